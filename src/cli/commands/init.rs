//! `relia init` command - write a scenario template

use console::style;
use miette::{miette, IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::GlobalOpts;
use crate::core::config::LOCAL_SCENARIO_FILE;
use crate::core::Scenario;
use crate::render::TemplateGenerator;

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// File to create
    #[arg(long, short = 'p', default_value = LOCAL_SCENARIO_FILE)]
    pub path: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, global: &GlobalOpts) -> Result<()> {
    if args.path.exists() && !args.force {
        return Err(miette!(
            help = "pass --force to overwrite it",
            "{} already exists",
            args.path.display()
        ));
    }

    if let Some(parent) = args.path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).into_diagnostic()?;
    }

    let generator = TemplateGenerator::new()?;
    let content = generator.generate_scenario(&Scenario::default())?;
    std::fs::write(&args.path, content).into_diagnostic()?;

    if global.quiet {
        return Ok(());
    }

    println!(
        "{} Created scenario file {}",
        style("✓").green(),
        style(args.path.display()).cyan()
    );
    println!();
    println!("Next steps:");
    println!("  {} Edit the models and grids", style(args.path.display()).yellow());
    println!("  {} Print the moment summary", style("relia summary").yellow());
    println!("  {} Write the comparison charts", style("relia plot").yellow());
    Ok(())
}
