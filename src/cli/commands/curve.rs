//! `relia curve` command - tabulate a time-based quantity

use console::style;
use miette::{miette, Result};
use tracing::debug;

use crate::cli::commands::utils::{
    is_decorated, load_scenario, output_format, print_structured, select_models,
};
use crate::cli::table::curve_records;
use crate::cli::GlobalOpts;
use crate::core::{Config, Quantity, ReliabilityCurve};

#[derive(clap::Args, Debug)]
pub struct CurveArgs {
    /// Quantity to tabulate over the time grid
    #[arg(value_enum)]
    pub quantity: Quantity,

    /// Only this model (label or family name)
    #[arg(long, short = 'm')]
    pub model: Option<String>,
}

pub fn run(args: CurveArgs, global: &GlobalOpts) -> Result<()> {
    if !args.quantity.is_time_based() {
        return Err(miette!(
            help = "use `relia percentile` for gamma-percent lifetimes",
            "'{}' is not sampled over the time grid",
            args.quantity
        ));
    }

    let config = Config::load();
    let scenario = load_scenario(global, &config)?;
    let format = output_format(global, &config);
    let times = scenario.time_grid()?;
    let percents = scenario.percentile_grid()?;

    let curves = select_models(&scenario, args.model.as_deref())?
        .into_iter()
        .map(|entry| entry.model().curve(&entry.label, args.quantity, &times, &percents))
        .collect::<Result<Vec<ReliabilityCurve>, _>>()?;
    debug!(
        quantity = %args.quantity,
        curves = curves.len(),
        points = times.len(),
        "sampled curves"
    );

    if print_structured(&curves, format)? {
        return Ok(());
    }

    if is_decorated(global, format) {
        println!("{}", style(args.quantity.title()).bold());
    }
    print!("{}", curve_records("t", &curves, format).render(format)?);
    Ok(())
}
