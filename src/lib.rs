//! Relia - reliability metrics for time-to-failure models
//!
//! Survival probability R(t), failure rate h(t), failure density f(t) and
//! gamma-percent lifetime for uniform, normal and gamma lifetimes, with
//! moment summaries and overlaid comparison charts.
//!
//! ```
//! use relia::core::ReliabilityModel;
//!
//! let model = ReliabilityModel::gamma(8.0, 65.0).unwrap();
//! assert_eq!(model.mean(), 520.0);
//! assert_eq!(model.variance(), 33800.0);
//! ```

pub mod cli;
pub mod core;
pub mod render;
pub mod yaml;
