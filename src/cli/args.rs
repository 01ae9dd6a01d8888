//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    completions::CompletionsArgs, curve::CurveArgs, eval::EvalArgs, init::InitArgs,
    percentile::PercentileArgs, plot::PlotArgs, run::RunArgs, summary::SummaryArgs,
};

#[derive(Parser)]
#[command(name = "relia")]
#[command(author, version, about = "Reliability metrics for time-to-failure models")]
#[command(long_about = "Computes survival probability, failure rate, failure density and gamma-percent lifetime for uniform, normal and gamma time-to-failure distributions, prints moment summaries and draws overlaid comparison charts.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output (debug logging on stderr)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Scenario file (default: ./relia.yaml, else the built-in scenario)
    #[arg(long, short = 's', global = true)]
    pub scenario: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a scenario template to edit
    Init(InitArgs),

    /// Print mean, variance and standard deviation of every model
    Summary(SummaryArgs),

    /// Tabulate one time-based quantity over the time grid
    Curve(CurveArgs),

    /// Tabulate gamma-percent lifetimes over the percentile grid
    Percentile(PercentileArgs),

    /// Evaluate a single model at chosen times and percentiles
    Eval(EvalArgs),

    /// Write the four comparison charts as SVG files
    Plot(PlotArgs),

    /// Print the summary and write the charts in one go
    Run(RunArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables
    #[default]
    Auto,
    /// Tab-separated values (for piping)
    Tsv,
    /// CSV format (for spreadsheets)
    Csv,
    /// JSON format (for programming)
    Json,
    /// YAML format
    Yaml,
    /// Markdown tables
    Md,
}

impl OutputFormat {
    /// Apply a configured default when the flag was left at `auto`
    pub fn or_configured(self, configured: Option<&str>) -> Self {
        if self != OutputFormat::Auto {
            return self;
        }
        configured
            .and_then(|name| OutputFormat::from_str(name, true).ok())
            .unwrap_or(self)
    }
}
