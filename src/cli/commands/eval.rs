//! `relia eval` command - point evaluation of one model
//!
//! The model is either an ad-hoc distribution (`gamma:8,65`) or a model of
//! the active scenario picked by label or family. Hazard and percentile
//! domain errors abort the command instead of printing a gap.

use console::style;
use miette::{miette, Result};
use serde::Serialize;

use crate::cli::commands::utils::{is_decorated, load_scenario, output_format, print_structured};
use crate::cli::helpers::format_number;
use crate::cli::table::{number_cell, Records, TABLE_PRECISION};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Config, DistributionSpec, ModelEntry, ModelSummary, ReliabilityModel};

#[derive(clap::Args, Debug)]
pub struct EvalArgs {
    /// Distribution (uniform:A,B | normal:MU,SIGMA | gamma:K,THETA) or scenario model label
    pub model: String,

    /// Times at which to evaluate reliability, density and hazard (repeatable)
    #[arg(long = "at", short = 't', value_name = "T")]
    pub at: Vec<f64>,

    /// Percent levels for the gamma-percent lifetime (repeatable)
    #[arg(long = "gamma", short = 'g', value_name = "PERCENT")]
    pub gamma: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimePoint {
    pub t: f64,
    pub reliability: f64,
    pub density: f64,
    pub hazard: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PercentilePoint {
    pub gamma: f64,
    pub t: f64,
}

/// Everything `eval` reports for one model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvalReport {
    #[serde(flatten)]
    pub summary: ModelSummary,
    pub points: Vec<TimePoint>,
    pub percentiles: Vec<PercentilePoint>,
}

impl EvalReport {
    pub fn compute(summary: ModelSummary, model: &ReliabilityModel, at: &[f64], gamma: &[f64]) -> Result<Self> {
        let points = at
            .iter()
            .map(|&t| -> Result<TimePoint> {
                Ok(TimePoint {
                    t,
                    reliability: model.reliability(t),
                    density: model.density(t),
                    hazard: model.hazard(t)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let percentiles = gamma
            .iter()
            .map(|&g| -> Result<PercentilePoint> {
                Ok(PercentilePoint {
                    gamma: g,
                    t: model.percentile(g)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            summary,
            points,
            percentiles,
        })
    }
}

pub fn run(args: EvalArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let format = output_format(global, &config);
    let entry = resolve_model(&args.model, global, &config)?;

    let report = EvalReport::compute(ModelSummary::of(&entry), &entry.model(), &args.at, &args.gamma)?;
    if print_structured(&report, format)? {
        return Ok(());
    }

    if is_decorated(global, format) {
        let s = &report.summary;
        println!(
            "{} {}",
            style(&s.label).bold(),
            style(format!("[{}]", s.distribution)).dim()
        );
        println!(
            "  mean = {}, variance = {}, stddev = {}",
            style(format_number(s.mean, TABLE_PRECISION)).cyan(),
            style(format_number(s.variance, TABLE_PRECISION)).cyan(),
            style(format_number(s.stddev, TABLE_PRECISION)).cyan()
        );
    }

    let mut tables = Vec::new();
    if !report.points.is_empty() {
        tables.push(time_records(&report.points, format).render(format)?);
    }
    if !report.percentiles.is_empty() {
        tables.push(percentile_records(&report.percentiles, format).render(format)?);
    }
    if tables.is_empty() && is_decorated(global, format) {
        println!(
            "{}",
            style("Pass --at T or --gamma PERCENT to evaluate points").dim()
        );
    }
    print!("{}", tables.join("\n"));
    Ok(())
}

/// The requested model, labelled by its scenario label or its distribution
fn resolve_model(query: &str, global: &GlobalOpts, config: &Config) -> Result<ModelEntry> {
    if query.contains(':') {
        let spec: DistributionSpec = query.parse()?;
        return Ok(ModelEntry::new(spec.to_string(), spec));
    }
    let scenario = load_scenario(global, config)?;
    scenario
        .find_model(query)
        .cloned()
        .ok_or_else(|| no_such_model(query))
}

fn no_such_model(query: &str) -> miette::Report {
    miette!(
        help = "pass a distribution such as gamma:8,65 or a model label from the scenario",
        "no model matches '{}'",
        query
    )
}

fn time_records(points: &[TimePoint], format: OutputFormat) -> Records {
    let mut records = Records::new(["t", "reliability", "density", "hazard"]);
    for p in points {
        records.push(vec![
            number_cell(p.t, format),
            number_cell(p.reliability, format),
            number_cell(p.density, format),
            number_cell(p.hazard, format),
        ]);
    }
    records
}

fn percentile_records(points: &[PercentilePoint], format: OutputFormat) -> Records {
    let mut records = Records::new(["gamma", "t"]);
    for p in points {
        records.push(vec![number_cell(p.gamma, format), number_cell(p.t, format)]);
    }
    records
}
