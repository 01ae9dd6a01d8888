//! `relia run` command - the whole study in one go
//!
//! Prints the moment summary and writes the four comparison charts.

use console::style;
use miette::Result;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::commands::plot::report_written;
use crate::cli::commands::summary::summary_records;
use crate::cli::commands::utils::{is_decorated, load_scenario, output_format, print_structured};
use crate::cli::GlobalOpts;
use crate::core::{Config, ModelSummary, ScenarioAnalysis};
use crate::render::write_charts;

#[derive(clap::Args, Debug)]
pub struct RunArgs {
    /// Directory for the SVG files (default: ./charts or RELIA_OUTPUT_DIR)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Only print the summary
    #[arg(long)]
    pub no_charts: bool,
}

#[derive(Debug, Serialize)]
struct RunReport<'a> {
    title: &'a str,
    summaries: &'a [ModelSummary],
    charts: Vec<PathBuf>,
}

pub fn run(args: RunArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let scenario = load_scenario(global, &config)?;
    let format = output_format(global, &config);
    let analysis = ScenarioAnalysis::compute(&scenario)?;

    let dir = args.output.unwrap_or_else(|| config.output_dir());
    let charts = if args.no_charts {
        Vec::new()
    } else {
        let (width, height) = config.chart_size();
        write_charts(&analysis, &dir, width, height)?
    };

    let report = RunReport {
        title: &analysis.title,
        summaries: &analysis.summaries,
        charts,
    };
    if print_structured(&report, format)? {
        return Ok(());
    }

    if is_decorated(global, format) {
        println!("{}", style(&analysis.title).bold());
    }
    print!("{}", summary_records(&analysis.summaries, format).render(format)?);
    if !report.charts.is_empty() && is_decorated(global, format) {
        println!();
        report_written(&dir, &report.charts);
    }
    Ok(())
}
