//! `relia summary` command - moments of every model

use console::style;
use miette::Result;

use crate::cli::commands::utils::{is_decorated, load_scenario, output_format, print_structured};
use crate::cli::table::{number_cell, Records};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Config, ModelSummary};

#[derive(clap::Args, Debug)]
pub struct SummaryArgs {}

pub fn run(_args: SummaryArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let scenario = load_scenario(global, &config)?;
    let format = output_format(global, &config);

    let summaries: Vec<ModelSummary> = scenario.models.iter().map(ModelSummary::of).collect();
    if print_structured(&summaries, format)? {
        return Ok(());
    }

    if is_decorated(global, format) {
        println!("{}", style(&scenario.title).bold());
    }
    print!("{}", summary_records(&summaries, format).render(format)?);
    Ok(())
}

/// One row per model: label, distribution, mean, variance, standard deviation
pub fn summary_records(summaries: &[ModelSummary], format: OutputFormat) -> Records {
    let headers = match format {
        OutputFormat::Csv | OutputFormat::Tsv => {
            ["model", "distribution", "mean", "variance", "stddev"]
        }
        _ => ["Model", "Distribution", "Mean", "Variance", "Std. dev."],
    };
    let mut records = Records::new(headers);
    for s in summaries {
        records.push(vec![
            s.label.clone(),
            s.distribution.clone(),
            number_cell(s.mean, format),
            number_cell(s.variance, format),
            number_cell(s.stddev, format),
        ]);
    }
    records
}
