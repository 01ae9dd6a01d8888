//! Core module - distributions, reliability model and scenario analysis

pub mod config;
pub mod curve;
pub mod distribution;
pub mod error;
pub mod grid;
pub mod model;
pub mod scenario;
pub mod special;

pub use config::Config;
pub use curve::{CurvePoint, Quantity, ReliabilityCurve};
pub use distribution::{DistributionSpec, Gamma, LifetimeDistribution, Normal, Uniform};
pub use error::ReliabilityError;
pub use grid::{PercentileGrid, PercentileGridConfig, TimeGrid, TimeGridConfig};
pub use model::ReliabilityModel;
pub use scenario::{Chart, ModelEntry, ModelSummary, Scenario, ScenarioAnalysis};
