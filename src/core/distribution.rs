//! Time-to-failure distribution families
//!
//! Each family exposes the same capability set (density, cumulative
//! distribution, survival, inverse cumulative distribution and closed-form
//! moments) through [`LifetimeDistribution`]. [`DistributionSpec`] is the
//! tagged variant the rest of the crate works with.
//!
//! | Family | Parameters | Mean | Variance |
//! |---|---|---|---|
//! | [`Uniform`] | a < b | (a+b)/2 | (b−a)²/12 |
//! | [`Normal`] | μ, σ > 0 | μ | σ² |
//! | [`Gamma`] | k > 0, θ > 0 | kθ | kθ² |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::ReliabilityError;
use crate::core::special;

/// Probability primitives shared by every lifetime family
pub trait LifetimeDistribution {
    /// Probability density f(x)
    fn pdf(&self, x: f64) -> f64;

    /// Cumulative distribution F(x) = P(X <= x)
    fn cdf(&self, x: f64) -> f64;

    /// Survival function 1 - F(x)
    fn survival(&self, x: f64) -> f64 {
        1.0 - self.cdf(x)
    }

    /// ln f(x); `-inf` where the density is zero
    fn ln_pdf(&self, x: f64) -> f64 {
        self.pdf(x).ln()
    }

    /// ln(1 - F(x)); `-inf` only where the survival probability is exactly zero
    fn ln_survival(&self, x: f64) -> f64 {
        self.survival(x).ln()
    }

    /// Inverse cumulative distribution for p in [0, 1]; NaN outside
    fn inverse_cdf(&self, p: f64) -> f64;

    fn mean(&self) -> f64;

    fn variance(&self) -> f64;

    fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }
}

fn require_finite(family: &'static str, name: &str, value: f64) -> Result<(), ReliabilityError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ReliabilityError::invalid_parameter(
            family,
            format!("{name} must be finite, got {value}"),
        ))
    }
}

// ============================================================================
// Uniform
// ============================================================================

/// Continuous uniform lifetime on `[a, b]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Uniform {
    a: f64,
    b: f64,
}

impl Uniform {
    pub fn new(a: f64, b: f64) -> Result<Self, ReliabilityError> {
        require_finite("uniform", "a", a)?;
        require_finite("uniform", "b", b)?;
        if a >= b {
            return Err(ReliabilityError::invalid_parameter(
                "uniform",
                format!("lower bound a must be less than upper bound b, got a={a}, b={b}"),
            ));
        }
        Ok(Self { a, b })
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn b(&self) -> f64 {
        self.b
    }
}

impl LifetimeDistribution for Uniform {
    fn pdf(&self, x: f64) -> f64 {
        if x >= self.a && x <= self.b {
            1.0 / (self.b - self.a)
        } else {
            0.0
        }
    }

    fn cdf(&self, x: f64) -> f64 {
        if x <= self.a {
            0.0
        } else if x >= self.b {
            1.0
        } else {
            (x - self.a) / (self.b - self.a)
        }
    }

    fn survival(&self, x: f64) -> f64 {
        if x <= self.a {
            1.0
        } else if x >= self.b {
            0.0
        } else {
            (self.b - x) / (self.b - self.a)
        }
    }

    fn inverse_cdf(&self, p: f64) -> f64 {
        if p.is_nan() || !(0.0..=1.0).contains(&p) {
            return f64::NAN;
        }
        if p == 1.0 {
            return self.b;
        }
        self.a + p * (self.b - self.a)
    }

    fn mean(&self) -> f64 {
        (self.a + self.b) / 2.0
    }

    fn variance(&self) -> f64 {
        let range = self.b - self.a;
        range * range / 12.0
    }
}

// ============================================================================
// Normal
// ============================================================================

/// Normal (Gaussian) lifetime with mean `mu` and standard deviation `sigma`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normal {
    mu: f64,
    sigma: f64,
}

impl Normal {
    pub fn new(mu: f64, sigma: f64) -> Result<Self, ReliabilityError> {
        require_finite("normal", "mu", mu)?;
        require_finite("normal", "sigma", sigma)?;
        if sigma <= 0.0 {
            return Err(ReliabilityError::invalid_parameter(
                "normal",
                format!("standard deviation sigma must be positive, got {sigma}"),
            ));
        }
        Ok(Self { mu, sigma })
    }

    pub fn mu(&self) -> f64 {
        self.mu
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    fn z(&self, x: f64) -> f64 {
        (x - self.mu) / self.sigma
    }
}

impl LifetimeDistribution for Normal {
    fn pdf(&self, x: f64) -> f64 {
        special::standard_normal_pdf(self.z(x)) / self.sigma
    }

    fn cdf(&self, x: f64) -> f64 {
        special::standard_normal_cdf(self.z(x))
    }

    fn survival(&self, x: f64) -> f64 {
        special::standard_normal_sf(self.z(x))
    }

    fn ln_pdf(&self, x: f64) -> f64 {
        let z = self.z(x);
        -0.5 * z * z - self.sigma.ln() - 0.5 * (2.0 * std::f64::consts::PI).ln()
    }

    fn ln_survival(&self, x: f64) -> f64 {
        special::ln_standard_normal_sf(self.z(x))
    }

    fn inverse_cdf(&self, p: f64) -> f64 {
        let z = special::inverse_standard_normal_cdf(p);
        if z.is_infinite() {
            return z;
        }
        self.mu + self.sigma * z
    }

    fn mean(&self) -> f64 {
        self.mu
    }

    fn variance(&self) -> f64 {
        self.sigma * self.sigma
    }

    fn std_dev(&self) -> f64 {
        self.sigma
    }
}

// ============================================================================
// Gamma
// ============================================================================

/// Gamma lifetime with shape `k` and scale `theta`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gamma {
    k: f64,
    theta: f64,
}

impl Gamma {
    pub fn new(k: f64, theta: f64) -> Result<Self, ReliabilityError> {
        require_finite("gamma", "k", k)?;
        require_finite("gamma", "theta", theta)?;
        if k <= 0.0 || theta <= 0.0 {
            return Err(ReliabilityError::invalid_parameter(
                "gamma",
                format!("shape k and scale theta must be positive, got k={k}, theta={theta}"),
            ));
        }
        Ok(Self { k, theta })
    }

    pub fn k(&self) -> f64 {
        self.k
    }

    pub fn theta(&self) -> f64 {
        self.theta
    }
}

impl LifetimeDistribution for Gamma {
    fn pdf(&self, x: f64) -> f64 {
        if x.is_nan() {
            return f64::NAN;
        }
        if x < 0.0 || x.is_infinite() {
            return 0.0;
        }
        if x == 0.0 {
            // Density at the origin depends on the shape
            return if self.k < 1.0 {
                f64::INFINITY
            } else if self.k == 1.0 {
                1.0 / self.theta
            } else {
                0.0
            };
        }
        let z = x / self.theta;
        ((self.k - 1.0) * z.ln() - z - special::ln_gamma(self.k)).exp() / self.theta
    }

    fn cdf(&self, x: f64) -> f64 {
        special::regularized_lower_gamma(self.k, x / self.theta)
    }

    fn survival(&self, x: f64) -> f64 {
        special::regularized_upper_gamma(self.k, x / self.theta)
    }

    fn ln_pdf(&self, x: f64) -> f64 {
        if x > 0.0 && x.is_finite() {
            let z = x / self.theta;
            (self.k - 1.0) * z.ln() - z - special::ln_gamma(self.k) - self.theta.ln()
        } else {
            self.pdf(x).ln()
        }
    }

    fn ln_survival(&self, x: f64) -> f64 {
        special::ln_regularized_upper_gamma(self.k, x / self.theta)
    }

    fn inverse_cdf(&self, p: f64) -> f64 {
        let z = special::inverse_regularized_lower_gamma(self.k, p);
        if z.is_infinite() {
            return z;
        }
        self.theta * z
    }

    fn mean(&self) -> f64 {
        self.k * self.theta
    }

    fn variance(&self) -> f64 {
        self.k * self.theta * self.theta
    }
}

// ============================================================================
// Tagged family variant
// ============================================================================

/// A validated lifetime distribution: one of the supported families
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSpec", into = "RawSpec")]
pub enum DistributionSpec {
    Uniform(Uniform),
    Normal(Normal),
    Gamma(Gamma),
}

/// Unvalidated wire form of a [`DistributionSpec`]
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "lowercase")]
enum RawSpec {
    Uniform { a: f64, b: f64 },
    Normal { mu: f64, sigma: f64 },
    Gamma { k: f64, theta: f64 },
}

impl TryFrom<RawSpec> for DistributionSpec {
    type Error = ReliabilityError;

    fn try_from(raw: RawSpec) -> Result<Self, Self::Error> {
        match raw {
            RawSpec::Uniform { a, b } => DistributionSpec::uniform(a, b),
            RawSpec::Normal { mu, sigma } => DistributionSpec::normal(mu, sigma),
            RawSpec::Gamma { k, theta } => DistributionSpec::gamma(k, theta),
        }
    }
}

impl From<DistributionSpec> for RawSpec {
    fn from(spec: DistributionSpec) -> Self {
        match spec {
            DistributionSpec::Uniform(d) => RawSpec::Uniform { a: d.a, b: d.b },
            DistributionSpec::Normal(d) => RawSpec::Normal {
                mu: d.mu,
                sigma: d.sigma,
            },
            DistributionSpec::Gamma(d) => RawSpec::Gamma {
                k: d.k,
                theta: d.theta,
            },
        }
    }
}

impl DistributionSpec {
    pub fn uniform(a: f64, b: f64) -> Result<Self, ReliabilityError> {
        Uniform::new(a, b).map(DistributionSpec::Uniform)
    }

    pub fn normal(mu: f64, sigma: f64) -> Result<Self, ReliabilityError> {
        Normal::new(mu, sigma).map(DistributionSpec::Normal)
    }

    pub fn gamma(k: f64, theta: f64) -> Result<Self, ReliabilityError> {
        Gamma::new(k, theta).map(DistributionSpec::Gamma)
    }

    /// Family name as used in scenario files
    pub fn family(&self) -> &'static str {
        match self {
            DistributionSpec::Uniform(_) => "uniform",
            DistributionSpec::Normal(_) => "normal",
            DistributionSpec::Gamma(_) => "gamma",
        }
    }
}

impl LifetimeDistribution for DistributionSpec {
    fn pdf(&self, x: f64) -> f64 {
        match self {
            DistributionSpec::Uniform(d) => d.pdf(x),
            DistributionSpec::Normal(d) => d.pdf(x),
            DistributionSpec::Gamma(d) => d.pdf(x),
        }
    }

    fn cdf(&self, x: f64) -> f64 {
        match self {
            DistributionSpec::Uniform(d) => d.cdf(x),
            DistributionSpec::Normal(d) => d.cdf(x),
            DistributionSpec::Gamma(d) => d.cdf(x),
        }
    }

    fn survival(&self, x: f64) -> f64 {
        match self {
            DistributionSpec::Uniform(d) => d.survival(x),
            DistributionSpec::Normal(d) => d.survival(x),
            DistributionSpec::Gamma(d) => d.survival(x),
        }
    }

    fn ln_pdf(&self, x: f64) -> f64 {
        match self {
            DistributionSpec::Uniform(d) => d.ln_pdf(x),
            DistributionSpec::Normal(d) => d.ln_pdf(x),
            DistributionSpec::Gamma(d) => d.ln_pdf(x),
        }
    }

    fn ln_survival(&self, x: f64) -> f64 {
        match self {
            DistributionSpec::Uniform(d) => d.ln_survival(x),
            DistributionSpec::Normal(d) => d.ln_survival(x),
            DistributionSpec::Gamma(d) => d.ln_survival(x),
        }
    }

    fn inverse_cdf(&self, p: f64) -> f64 {
        match self {
            DistributionSpec::Uniform(d) => d.inverse_cdf(p),
            DistributionSpec::Normal(d) => d.inverse_cdf(p),
            DistributionSpec::Gamma(d) => d.inverse_cdf(p),
        }
    }

    fn mean(&self) -> f64 {
        match self {
            DistributionSpec::Uniform(d) => d.mean(),
            DistributionSpec::Normal(d) => d.mean(),
            DistributionSpec::Gamma(d) => d.mean(),
        }
    }

    fn variance(&self) -> f64 {
        match self {
            DistributionSpec::Uniform(d) => d.variance(),
            DistributionSpec::Normal(d) => d.variance(),
            DistributionSpec::Gamma(d) => d.variance(),
        }
    }

    fn std_dev(&self) -> f64 {
        match self {
            DistributionSpec::Uniform(d) => d.std_dev(),
            DistributionSpec::Normal(d) => d.std_dev(),
            DistributionSpec::Gamma(d) => d.std_dev(),
        }
    }
}

impl fmt::Display for DistributionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistributionSpec::Uniform(d) => write!(f, "U({}, {})", d.a, d.b),
            DistributionSpec::Normal(d) => write!(f, "N({}, {})", d.mu, d.sigma * d.sigma),
            DistributionSpec::Gamma(d) => write!(f, "Γ({}, {})", d.k, d.theta),
        }
    }
}

/// Parses `family:p1,p2`, e.g. `uniform:100,5000`, `normal:500,100`, `gamma:8,65`
impl FromStr for DistributionSpec {
    type Err = ReliabilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (family, params) = s.split_once(':').ok_or_else(|| {
            ReliabilityError::InvalidScenario(format!(
                "expected FAMILY:P1,P2 (e.g. gamma:8,65), got '{s}'"
            ))
        })?;

        let values = params
            .split(',')
            .map(|p| {
                p.trim().parse::<f64>().map_err(|_| {
                    ReliabilityError::InvalidScenario(format!(
                        "'{}' is not a number in '{s}'",
                        p.trim()
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let [p1, p2] = values[..] else {
            return Err(ReliabilityError::InvalidScenario(format!(
                "expected exactly two parameters in '{s}', got {}",
                values.len()
            )));
        };

        match family.trim().to_lowercase().as_str() {
            "uniform" | "u" => DistributionSpec::uniform(p1, p2),
            "normal" | "n" => DistributionSpec::normal(p1, p2),
            "gamma" | "g" => DistributionSpec::gamma(p1, p2),
            other => Err(ReliabilityError::InvalidScenario(format!(
                "unknown distribution family '{other}' (expected uniform, normal or gamma)"
            ))),
        }
    }
}
