//! Sampled reliability curves

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// The four sampled quantities of a reliability model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Quantity {
    /// Probability of failure-free operation R(t)
    Reliability,
    /// Failure rate h(t)
    Hazard,
    /// Time-to-failure density f(t)
    Density,
    /// Gamma-percent lifetime t(γ)
    Percentile,
}

impl Quantity {
    pub const ALL: [Quantity; 4] = [
        Quantity::Reliability,
        Quantity::Hazard,
        Quantity::Density,
        Quantity::Percentile,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Quantity::Reliability => "Probability of failure-free operation",
            Quantity::Hazard => "Failure rate",
            Quantity::Density => "Time-to-failure density",
            Quantity::Percentile => "Gamma-percent lifetime",
        }
    }

    pub fn x_label(&self) -> &'static str {
        match self {
            Quantity::Percentile => "Gamma (%)",
            _ => "Time",
        }
    }

    pub fn y_label(&self) -> &'static str {
        match self {
            Quantity::Reliability => "Probability",
            Quantity::Hazard => "Failure rate",
            Quantity::Density => "Density",
            Quantity::Percentile => "Time",
        }
    }

    /// File name stem for exported charts
    pub fn file_stem(&self) -> &'static str {
        match self {
            Quantity::Reliability => "reliability",
            Quantity::Hazard => "hazard",
            Quantity::Density => "density",
            Quantity::Percentile => "percentile",
        }
    }

    /// True for quantities sampled over the time grid
    pub fn is_time_based(&self) -> bool {
        !matches!(self, Quantity::Percentile)
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.file_stem())
    }
}

/// One sample of a curve; `y` is `None` where the quantity is undefined
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub x: f64,
    pub y: Option<f64>,
}

/// A quantity sampled over a grid, in grid order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReliabilityCurve {
    pub label: String,
    pub quantity: Quantity,
    pub points: Vec<CurvePoint>,
}

impl ReliabilityCurve {
    pub fn new(label: impl Into<String>, quantity: Quantity, points: Vec<CurvePoint>) -> Self {
        Self {
            label: label.into(),
            quantity,
            points,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The y values in grid order
    pub fn values(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        self.points.iter().map(|p| p.y)
    }

    /// Points with a finite y value
    pub fn finite_points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points
            .iter()
            .filter_map(|p| p.y.filter(|y| y.is_finite()).map(|y| (p.x, y)))
    }

    /// Number of samples where the quantity is undefined
    pub fn undefined_count(&self) -> usize {
        self.points.iter().filter(|p| p.y.is_none()).count()
    }

    /// Trapezoidal integral over the finite samples
    pub fn trapezoid(&self) -> f64 {
        let finite: Vec<(f64, f64)> = self.finite_points().collect();
        finite
            .windows(2)
            .map(|w| (w[1].0 - w[0].0) * (w[0].1 + w[1].1) / 2.0)
            .sum()
    }
}
