//! Scenario - the fixed parameter sets and grids of one reliability study
//!
//! A scenario names one lifetime model per family and the grids they are
//! sampled on. [`ScenarioAnalysis`] evaluates every model over both grids
//! and collects the overlaid charts and the moment summary.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

use crate::core::curve::{Quantity, ReliabilityCurve};
use crate::core::distribution::DistributionSpec;
use crate::core::error::ReliabilityError;
use crate::core::grid::{PercentileGrid, PercentileGridConfig, TimeGrid, TimeGridConfig};
use crate::core::model::ReliabilityModel;
use crate::yaml::YamlError;

/// A labelled lifetime distribution within a scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelEntry {
    /// Legend label, e.g. "Uniform U(100, 5000)"
    pub label: String,

    pub distribution: DistributionSpec,
}

impl ModelEntry {
    pub fn new(label: impl Into<String>, distribution: DistributionSpec) -> Self {
        Self {
            label: label.into(),
            distribution,
        }
    }

    pub fn model(&self) -> ReliabilityModel {
        ReliabilityModel::new(self.distribution)
    }
}

/// Parameter sets and sampling grids for one study
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default = "default_title")]
    pub title: String,

    pub models: Vec<ModelEntry>,

    #[serde(default)]
    pub time_grid: TimeGridConfig,

    #[serde(default)]
    pub percentile_grid: PercentileGridConfig,
}

fn default_title() -> String {
    "Reliability study".to_string()
}

impl Default for Scenario {
    /// Uniform U(100, 5000), normal N(500, 100²) and gamma Γ(8, 65) over t in [0, 6000]
    fn default() -> Self {
        let models = [
            ("Uniform U(100, 5000)", DistributionSpec::uniform(100.0, 5000.0)),
            ("Normal N(500, 10000)", DistributionSpec::normal(500.0, 100.0)),
            ("Gamma Γ(8, 65)", DistributionSpec::gamma(8.0, 65.0)),
        ]
        .into_iter()
        .filter_map(|(label, spec)| spec.ok().map(|spec| ModelEntry::new(label, spec)))
        .collect();

        Self {
            title: default_title(),
            models,
            time_grid: TimeGridConfig::default(),
            percentile_grid: PercentileGridConfig::default(),
        }
    }
}

impl Scenario {
    /// Load and validate a scenario from a YAML file
    pub fn load(path: &Path) -> Result<Self, YamlError> {
        let scenario: Scenario = crate::yaml::parse_yaml_file(path)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Parse and validate a scenario from YAML text
    pub fn from_yaml_str(content: &str, filename: &str) -> Result<Self, YamlError> {
        let scenario: Scenario = crate::yaml::parse_yaml(content, filename)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn to_yaml(&self) -> Result<String, serde_yml::Error> {
        serde_yml::to_string(self)
    }

    /// Check cross-field constraints that serde cannot express
    pub fn validate(&self) -> Result<(), ReliabilityError> {
        if self.models.is_empty() {
            return Err(ReliabilityError::InvalidScenario(
                "scenario defines no models".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for entry in &self.models {
            if entry.label.trim().is_empty() {
                return Err(ReliabilityError::InvalidScenario(
                    "model labels must not be empty".to_string(),
                ));
            }
            if !seen.insert(entry.label.as_str()) {
                return Err(ReliabilityError::InvalidScenario(format!(
                    "duplicate model label '{}'",
                    entry.label
                )));
            }
        }
        self.time_grid.build()?;
        self.percentile_grid.build()?;
        Ok(())
    }

    pub fn time_grid(&self) -> Result<TimeGrid, ReliabilityError> {
        self.time_grid.build()
    }

    pub fn percentile_grid(&self) -> Result<PercentileGrid, ReliabilityError> {
        self.percentile_grid.build()
    }

    /// Find a model by label (case-insensitive) or by family name when unique
    pub fn find_model(&self, query: &str) -> Option<&ModelEntry> {
        let query = query.trim();
        if let Some(entry) = self
            .models
            .iter()
            .find(|m| m.label.eq_ignore_ascii_case(query))
        {
            return Some(entry);
        }
        let mut by_family = self
            .models
            .iter()
            .filter(|m| m.distribution.family().eq_ignore_ascii_case(query));
        match (by_family.next(), by_family.next()) {
            (Some(entry), None) => Some(entry),
            _ => None,
        }
    }
}

/// Moment summary of one model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelSummary {
    pub label: String,
    pub family: &'static str,
    pub distribution: String,
    pub mean: f64,
    pub variance: f64,
    pub stddev: f64,
}

impl ModelSummary {
    pub fn of(entry: &ModelEntry) -> Self {
        let model = entry.model();
        Self {
            label: entry.label.clone(),
            family: entry.distribution.family(),
            distribution: entry.distribution.to_string(),
            mean: model.mean(),
            variance: model.variance(),
            stddev: model.stddev(),
        }
    }
}

/// One quantity with every model of the scenario overlaid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub quantity: Quantity,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<ReliabilityCurve>,
}

impl Chart {
    pub fn new(quantity: Quantity, series: Vec<ReliabilityCurve>) -> Self {
        Self {
            quantity,
            title: quantity.title().to_string(),
            x_label: quantity.x_label().to_string(),
            y_label: quantity.y_label().to_string(),
            series,
        }
    }
}

/// Everything the study produces: summaries plus one chart per quantity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioAnalysis {
    pub title: String,
    pub summaries: Vec<ModelSummary>,
    pub charts: Vec<Chart>,
}

impl ScenarioAnalysis {
    pub fn compute(scenario: &Scenario) -> Result<Self, ReliabilityError> {
        scenario.validate()?;
        let times = scenario.time_grid()?;
        let percents = scenario.percentile_grid()?;
        debug!(
            models = scenario.models.len(),
            time_points = times.len(),
            percentile_points = percents.len(),
            "computing scenario"
        );

        let summaries = scenario.models.iter().map(ModelSummary::of).collect();

        let charts = Quantity::ALL
            .iter()
            .map(|&quantity| {
                let series = scenario
                    .models
                    .iter()
                    .map(|entry| entry.model().curve(&entry.label, quantity, &times, &percents))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Chart::new(quantity, series))
            })
            .collect::<Result<Vec<_>, ReliabilityError>>()?;

        Ok(Self {
            title: scenario.title.clone(),
            summaries,
            charts,
        })
    }

    pub fn chart(&self, quantity: Quantity) -> Option<&Chart> {
        self.charts.iter().find(|c| c.quantity == quantity)
    }
}
