//! Error types for reliability computations

use miette::Diagnostic;
use thiserror::Error;

/// Errors raised while building models or evaluating reliability quantities
#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
pub enum ReliabilityError {
    /// A distribution parameter violates its family invariant
    #[error("invalid {family} parameter: {message}")]
    #[diagnostic(
        code(relia::invalid_parameter),
        help("uniform needs a < b, normal needs sigma > 0, gamma needs k > 0 and theta > 0")
    )]
    InvalidParameter {
        family: &'static str,
        message: String,
    },

    /// A per-call input lies outside the function's domain
    #[error("{quantity} input {value} is outside the valid domain [{min}, {max}]")]
    #[diagnostic(code(relia::out_of_domain))]
    OutOfDomain {
        quantity: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Hazard evaluated where reliability is exactly zero
    #[error("hazard is undefined at t = {t}: reliability is zero (division by zero)")]
    #[diagnostic(
        code(relia::division_by_zero),
        help("the failure rate only exists where some units are still surviving")
    )]
    DivisionByZero { t: f64 },

    /// A time or percentile grid is malformed
    #[error("invalid grid: {0}")]
    #[diagnostic(code(relia::invalid_grid))]
    InvalidGrid(String),

    /// A scenario definition is inconsistent
    #[error("invalid scenario: {0}")]
    #[diagnostic(code(relia::invalid_scenario))]
    InvalidScenario(String),
}

impl ReliabilityError {
    pub(crate) fn invalid_parameter(family: &'static str, message: impl Into<String>) -> Self {
        ReliabilityError::InvalidParameter {
            family,
            message: message.into(),
        }
    }
}
