//! `relia plot` command - write the comparison charts

use console::style;
use miette::Result;
use std::path::{Path, PathBuf};

use crate::cli::commands::utils::load_scenario;
use crate::cli::GlobalOpts;
use crate::core::{Config, ScenarioAnalysis};
use crate::render::write_charts;

#[derive(clap::Args, Debug)]
pub struct PlotArgs {
    /// Directory for the SVG files (default: ./charts or RELIA_OUTPUT_DIR)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Chart width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Chart height in pixels
    #[arg(long)]
    pub height: Option<u32>,
}

pub fn run(args: PlotArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let scenario = load_scenario(global, &config)?;
    let analysis = ScenarioAnalysis::compute(&scenario)?;

    let dir = args.output.unwrap_or_else(|| config.output_dir());
    let (default_width, default_height) = config.chart_size();
    let written = write_charts(
        &analysis,
        &dir,
        args.width.unwrap_or(default_width),
        args.height.unwrap_or(default_height),
    )?;

    if !global.quiet {
        report_written(&dir, &written);
    }
    Ok(())
}

/// Print the chart files that were written
pub fn report_written(dir: &Path, written: &[PathBuf]) {
    println!(
        "{} Wrote {} charts to {}",
        style("✓").green(),
        style(written.len()).cyan(),
        style(dir.display()).cyan()
    );
    for path in written {
        println!("   {}", style(path.display()).dim());
    }
}
