//! `relia percentile` command - gamma-percent lifetimes

use console::style;
use miette::Result;

use crate::cli::commands::utils::{
    is_decorated, load_scenario, output_format, print_structured, select_models,
};
use crate::cli::table::curve_records;
use crate::cli::GlobalOpts;
use crate::core::{Config, ModelEntry, Quantity, ReliabilityCurve, ReliabilityError};

#[derive(clap::Args, Debug)]
pub struct PercentileArgs {
    /// Percent levels to evaluate instead of the scenario grid (repeatable)
    #[arg(long = "gamma", short = 'g', value_name = "PERCENT")]
    pub gamma: Vec<f64>,

    /// Only this model (label or family name)
    #[arg(long, short = 'm')]
    pub model: Option<String>,
}

pub fn run(args: PercentileArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let scenario = load_scenario(global, &config)?;
    let format = output_format(global, &config);
    let grid = scenario.percentile_grid()?;
    let levels: &[f64] = if args.gamma.is_empty() {
        grid.values()
    } else {
        &args.gamma
    };

    let curves = select_models(&scenario, args.model.as_deref())?
        .into_iter()
        .map(|entry| percentile_curve(entry, levels))
        .collect::<Result<Vec<_>, _>>()?;

    if print_structured(&curves, format)? {
        return Ok(());
    }

    if is_decorated(global, format) {
        println!("{}", style(Quantity::Percentile.title()).bold());
    }
    print!("{}", curve_records("gamma", &curves, format).render(format)?);
    Ok(())
}

fn percentile_curve(entry: &ModelEntry, levels: &[f64]) -> Result<ReliabilityCurve, ReliabilityError> {
    entry.model().percentile_levels(&entry.label, levels)
}
