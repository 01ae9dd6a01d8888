//! Reliability model - reliability-theory quantities for one lifetime distribution
//!
//! A [`ReliabilityModel`] wraps a validated [`DistributionSpec`] and exposes
//! the survival probability, failure rate, density, percentile lifetime and
//! moments of the time to failure. Every operation is a pure function of the
//! spec and its input.

use tracing::debug;

use crate::core::curve::{CurvePoint, Quantity, ReliabilityCurve};
use crate::core::distribution::{DistributionSpec, LifetimeDistribution};
use crate::core::error::ReliabilityError;
use crate::core::grid::{PercentileGrid, TimeGrid};

/// Reliability quantities for a single time-to-failure distribution
///
/// # Examples
///
/// ```
/// use relia::core::{DistributionSpec, ReliabilityModel};
///
/// let model = ReliabilityModel::new(DistributionSpec::normal(500.0, 100.0).unwrap());
/// assert_eq!(model.mean(), 500.0);
/// assert_eq!(model.reliability(500.0), 0.5);
/// assert_eq!(model.percentile(50.0).unwrap(), 500.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReliabilityModel {
    spec: DistributionSpec,
}

impl ReliabilityModel {
    pub fn new(spec: DistributionSpec) -> Self {
        Self { spec }
    }

    pub fn uniform(a: f64, b: f64) -> Result<Self, ReliabilityError> {
        DistributionSpec::uniform(a, b).map(Self::new)
    }

    pub fn normal(mu: f64, sigma: f64) -> Result<Self, ReliabilityError> {
        DistributionSpec::normal(mu, sigma).map(Self::new)
    }

    pub fn gamma(k: f64, theta: f64) -> Result<Self, ReliabilityError> {
        DistributionSpec::gamma(k, theta).map(Self::new)
    }

    pub fn spec(&self) -> &DistributionSpec {
        &self.spec
    }

    /// Probability that failure occurs after time `t`: R(t) = 1 - F(t)
    pub fn reliability(&self, t: f64) -> f64 {
        self.spec.survival(t)
    }

    /// Time-to-failure probability density f(t)
    pub fn density(&self, t: f64) -> f64 {
        self.spec.pdf(t)
    }

    /// Failure rate h(t) = f(t) / R(t)
    ///
    /// Far in a normal or gamma tail both f(t) and R(t) underflow while
    /// their ratio stays moderate, so the ratio is then taken in log space.
    ///
    /// # Errors
    /// [`ReliabilityError::DivisionByZero`] where R(t) is exactly zero: at
    /// and beyond the upper bound of a uniform lifetime.
    pub fn hazard(&self, t: f64) -> Result<f64, ReliabilityError> {
        let r = self.reliability(t);
        let f = self.density(t);
        if r.is_normal() && f.is_normal() {
            return Ok(f / r);
        }
        let ln_r = self.spec.ln_survival(t);
        if ln_r == f64::NEG_INFINITY {
            return Err(ReliabilityError::DivisionByZero { t });
        }
        Ok((self.spec.ln_pdf(t) - ln_r).exp())
    }

    /// γ-percent lifetime: the time by which `gamma_pct` percent of units have failed
    ///
    /// This is the inverse CDF at `gamma_pct / 100`, counted from the failure
    /// side. The edges may be infinite: `percentile(0)` is `-inf` for a normal
    /// lifetime and `percentile(100)` is `+inf` for normal and gamma.
    ///
    /// # Errors
    /// [`ReliabilityError::OutOfDomain`] when `gamma_pct` is outside [0, 100] or NaN.
    pub fn percentile(&self, gamma_pct: f64) -> Result<f64, ReliabilityError> {
        if gamma_pct.is_nan() || !(0.0..=100.0).contains(&gamma_pct) {
            return Err(ReliabilityError::OutOfDomain {
                quantity: "percentile",
                value: gamma_pct,
                min: 0.0,
                max: 100.0,
            });
        }
        Ok(self.spec.inverse_cdf(gamma_pct / 100.0))
    }

    /// Mean time to failure
    pub fn mean(&self) -> f64 {
        self.spec.mean()
    }

    pub fn variance(&self) -> f64 {
        self.spec.variance()
    }

    pub fn stddev(&self) -> f64 {
        self.spec.std_dev()
    }

    /// 50-percent lifetime
    pub fn median(&self) -> f64 {
        self.spec.inverse_cdf(0.5)
    }

    pub fn reliability_curve(&self, label: &str, grid: &TimeGrid) -> ReliabilityCurve {
        self.sample(label, Quantity::Reliability, grid, |t| Some(self.reliability(t)))
    }

    pub fn density_curve(&self, label: &str, grid: &TimeGrid) -> ReliabilityCurve {
        self.sample(label, Quantity::Density, grid, |t| Some(self.density(t)))
    }

    /// Failure rate over the grid; samples where R(t) = 0 are left undefined
    pub fn hazard_curve(&self, label: &str, grid: &TimeGrid) -> ReliabilityCurve {
        let curve = self.sample(label, Quantity::Hazard, grid, |t| self.hazard(t).ok());
        let undefined = curve.undefined_count();
        if undefined > 0 {
            debug!(
                model = label,
                undefined, "hazard undefined where reliability reaches zero"
            );
        }
        curve
    }

    pub fn percentile_curve(
        &self,
        label: &str,
        grid: &PercentileGrid,
    ) -> Result<ReliabilityCurve, ReliabilityError> {
        self.percentile_levels(label, grid.values())
    }

    /// Percentile lifetimes at arbitrary levels, kept in the order given
    pub fn percentile_levels(
        &self,
        label: &str,
        levels: &[f64],
    ) -> Result<ReliabilityCurve, ReliabilityError> {
        let points = levels
            .iter()
            .map(|&g| {
                self.percentile(g).map(|t| CurvePoint { x: g, y: Some(t) })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ReliabilityCurve::new(label, Quantity::Percentile, points))
    }

    /// Sample any quantity; time-based quantities use `times`, percentiles use `percents`
    pub fn curve(
        &self,
        label: &str,
        quantity: Quantity,
        times: &TimeGrid,
        percents: &PercentileGrid,
    ) -> Result<ReliabilityCurve, ReliabilityError> {
        match quantity {
            Quantity::Reliability => Ok(self.reliability_curve(label, times)),
            Quantity::Hazard => Ok(self.hazard_curve(label, times)),
            Quantity::Density => Ok(self.density_curve(label, times)),
            Quantity::Percentile => self.percentile_curve(label, percents),
        }
    }

    fn sample(
        &self,
        label: &str,
        quantity: Quantity,
        grid: &TimeGrid,
        f: impl Fn(f64) -> Option<f64>,
    ) -> ReliabilityCurve {
        let points = grid
            .values()
            .iter()
            .map(|&t| CurvePoint { x: t, y: f(t) })
            .collect();
        ReliabilityCurve::new(label, quantity, points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform() -> ReliabilityModel {
        ReliabilityModel::uniform(100.0, 5000.0).unwrap()
    }

    fn normal() -> ReliabilityModel {
        ReliabilityModel::normal(500.0, 100.0).unwrap()
    }

    fn gamma() -> ReliabilityModel {
        ReliabilityModel::gamma(8.0, 65.0).unwrap()
    }

    #[test]
    fn test_uniform_scenario() {
        let m = uniform();
        assert_eq!(m.mean(), 2550.0);
        assert!((m.variance() - 2_000_833.333_333_333).abs() < 1e-6);
        assert_eq!(m.reliability(100.0), 1.0);
        assert_eq!(m.reliability(5000.0), 0.0);
        assert_eq!(m.percentile(50.0).unwrap(), 2550.0);
        assert_eq!(m.percentile(0.0).unwrap(), 100.0);
        assert_eq!(m.percentile(100.0).unwrap(), 5000.0);
        assert_eq!(m.reliability(0.0), 1.0);
        assert_eq!(m.reliability(6000.0), 0.0);
    }

    #[test]
    fn test_normal_scenario() {
        let m = normal();
        assert_eq!(m.mean(), 500.0);
        assert_eq!(m.variance(), 10000.0);
        assert_eq!(m.stddev(), 100.0);
        assert_eq!(m.percentile(50.0).unwrap(), 500.0);
        assert_eq!(m.median(), 500.0);
        assert_eq!(m.reliability(500.0), 0.5);
        assert_eq!(m.percentile(0.0).unwrap(), f64::NEG_INFINITY);
        assert_eq!(m.percentile(100.0).unwrap(), f64::INFINITY);
    }

    #[test]
    fn test_gamma_scenario() {
        let m = gamma();
        assert_eq!(m.mean(), 520.0);
        assert_eq!(m.variance(), 8.0 * 65.0 * 65.0);
        assert_eq!(m.variance(), 33800.0);
        assert!((m.stddev() - 33800.0_f64.sqrt()).abs() < 1e-12);
        assert_eq!(m.percentile(0.0).unwrap(), 0.0);
        assert_eq!(m.percentile(100.0).unwrap(), f64::INFINITY);
        assert_eq!(m.reliability(0.0), 1.0);
        // Median of Γ(8, θ) sits just below the mean: θ(k - 1/3) approximately
        let median = m.percentile(50.0).unwrap();
        assert!((median - 65.0 * (8.0 - 1.0 / 3.0)).abs() < 1.0, "median={median}");
    }

    #[test]
    fn test_percentile_rejects_out_of_domain() {
        for m in [uniform(), normal(), gamma()] {
            assert!(matches!(
                m.percentile(-1.0),
                Err(ReliabilityError::OutOfDomain { .. })
            ));
            assert!(matches!(
                m.percentile(100.5),
                Err(ReliabilityError::OutOfDomain { .. })
            ));
            assert!(m.percentile(f64::NAN).is_err());
        }
    }

    #[test]
    fn test_hazard_is_density_over_reliability() {
        for m in [uniform(), normal(), gamma()] {
            for t in [0.0, 150.0, 400.0, 520.0, 900.0, 2500.0, 4999.0] {
                let r = m.reliability(t);
                if r > 0.0 {
                    let h = m.hazard(t).unwrap();
                    let expected = m.density(t) / r;
                    assert!((h - expected).abs() <= 1e-12 * expected.abs().max(1.0));
                }
            }
        }
    }

    #[test]
    fn test_uniform_hazard_diverges_then_undefined() {
        let m = uniform();
        assert_eq!(m.hazard(50.0).unwrap(), 0.0);
        let near = m.hazard(4999.0).unwrap();
        assert!((near - 1.0).abs() < 1e-9, "h(4999) = 1/(5000-4999), got {near}");
        assert!(m.hazard(4999.9).unwrap() > m.hazard(4990.0).unwrap());
        assert!(matches!(
            m.hazard(5000.0),
            Err(ReliabilityError::DivisionByZero { .. })
        ));
        assert!(m.hazard(6000.0).is_err());
    }

    #[test]
    fn test_gamma_and_normal_hazard_defined_on_grid_interior() {
        assert!(gamma().hazard(3000.0).unwrap().is_finite());
        assert!(normal().hazard(1500.0).unwrap().is_finite());
    }

    #[test]
    fn test_normal_hazard_past_underflow() {
        let m = normal();
        assert_eq!(m.reliability(4500.0), 0.0);
        assert_eq!(m.density(4500.0), 0.0);
        // h(t) approaches z/σ in the far tail
        let h = m.hazard(4500.0).unwrap();
        assert!((h - 0.4).abs() < 1e-3, "h(4500) = {h}");
        let h = m.hazard(6000.0).unwrap();
        assert!((h - 0.55).abs() < 1e-3, "h(6000) = {h}");
        // No jump where the direct ratio hands over to the log-space one
        let before = m.hazard(4250.0).unwrap();
        let after = m.hazard(4260.0).unwrap();
        assert!(after > before && after - before < 2e-3, "{before} -> {after}");
    }

    #[test]
    fn test_gamma_hazard_past_underflow() {
        // Exponential lifetime: constant failure rate 1/θ
        let m = ReliabilityModel::gamma(1.0, 2.0).unwrap();
        assert_eq!(m.reliability(3000.0), 0.0);
        let h = m.hazard(3000.0).unwrap();
        assert!((h - 0.5).abs() < 1e-9, "h(3000) = {h}");
    }

    #[test]
    fn test_default_grid_hazard_only_undefined_for_uniform() {
        let grid = TimeGrid::linspace(0.0, 6000.0, 1000).unwrap();
        assert_eq!(normal().hazard_curve("N", &grid).undefined_count(), 0);
        assert_eq!(gamma().hazard_curve("G", &grid).undefined_count(), 0);
        assert!(uniform().hazard_curve("U", &grid).undefined_count() > 0);
    }

    #[test]
    fn test_reliability_vanishes_for_large_t() {
        for m in [uniform(), normal(), gamma()] {
            assert!(m.reliability(1e5) < 1e-12, "{}", m.spec());
            assert_eq!(m.reliability(f64::INFINITY), 0.0);
        }
    }

    #[test]
    fn test_large_shape_gamma() {
        for k in [1e4_f64, 1e5] {
            let m = ReliabilityModel::gamma(k, 1.0).unwrap();
            let median = k - 1.0 / 3.0;
            let r = m.reliability(median);
            assert!((r - 0.5).abs() < 1e-5, "k={k}: R(median) = {r}");
            let p50 = m.percentile(50.0).unwrap();
            assert!((p50 - median).abs() < 1e-3, "k={k}: percentile(50) = {p50}");
            assert!(m.hazard(k).unwrap().is_finite());
        }
    }

    #[test]
    fn test_curves_preserve_grid_order() {
        let grid = TimeGrid::linspace(0.0, 6000.0, 61).unwrap();
        let curve = uniform().hazard_curve("U", &grid);
        assert_eq!(curve.len(), 61);
        let xs: Vec<f64> = curve.points.iter().map(|p| p.x).collect();
        assert_eq!(xs, grid.values());
        // t = 5000 and beyond have no failure rate
        assert_eq!(curve.undefined_count(), 11);
        assert_eq!(curve.points[49].y.map(|y| y.is_finite()), Some(true));
        assert_eq!(curve.points[50].y, None);
    }

    #[test]
    fn test_percentile_curve() {
        let grid = PercentileGrid::stepped(0.0, 100.0, 10.0).unwrap();
        let curve = uniform().percentile_curve("U", &grid).unwrap();
        assert_eq!(curve.quantity, Quantity::Percentile);
        assert_eq!(curve.points[0].y, Some(100.0));
        assert_eq!(curve.points[5].y, Some(2550.0));
        assert_eq!(curve.points[10].y, Some(5000.0));
    }

    #[test]
    fn test_percentile_levels_keep_order() {
        let curve = uniform().percentile_levels("U", &[90.0, 50.0]).unwrap();
        assert_eq!(curve.points[0].x, 90.0);
        assert_eq!(curve.points[1].y, Some(2550.0));
        assert!(uniform().percentile_levels("U", &[120.0]).is_err());
    }

    #[test]
    fn test_density_integrates_to_one() {
        let wide = TimeGrid::linspace(0.0, 6000.0, 20001).unwrap();
        let uniform_area = uniform().density_curve("U", &wide).trapezoid();
        assert!((uniform_area - 1.0).abs() < 1e-3, "uniform area {uniform_area}");

        let gamma_area = gamma().density_curve("G", &wide).trapezoid();
        assert!((gamma_area - 1.0).abs() < 1e-6, "gamma area {gamma_area}");

        let normal_area = normal().density_curve("N", &wide).trapezoid();
        assert!((normal_area - 1.0).abs() < 1e-6, "normal area {normal_area}");
    }

    #[test]
    fn test_curve_dispatch() {
        let times = TimeGrid::linspace(0.0, 1000.0, 11).unwrap();
        let percents = PercentileGrid::stepped(0.0, 100.0, 25.0).unwrap();
        let m = normal();
        for q in Quantity::ALL {
            let curve = m.curve("N", q, &times, &percents).unwrap();
            assert_eq!(curve.quantity, q);
            let expected_len = if q.is_time_based() { 11 } else { 5 };
            assert_eq!(curve.len(), expected_len);
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn models() -> [ReliabilityModel; 3] {
            [uniform(), normal(), gamma()]
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(200))]

            #[test]
            fn reliability_is_non_increasing(t1 in 0.0_f64..6000.0, dt in 0.0_f64..1000.0) {
                for m in models() {
                    let r1 = m.reliability(t1);
                    let r2 = m.reliability(t1 + dt);
                    prop_assert!(r2 <= r1 + 1e-12, "R({}) = {r1} < R({}) = {r2}", t1, t1 + dt);
                    prop_assert!((0.0..=1.0).contains(&r1));
                }
            }

            #[test]
            fn density_is_non_negative(t in -1000.0_f64..10000.0) {
                for m in models() {
                    prop_assert!(m.density(t) >= 0.0);
                }
            }

            #[test]
            fn percentile_inverts_reliability(t in 150.0_f64..4950.0) {
                let m = uniform();
                let back = m.percentile(100.0 * (1.0 - m.reliability(t))).unwrap();
                prop_assert!((back - t).abs() < 1e-6, "t={t} back={back}");
            }

            #[test]
            fn normal_percentile_inverts_reliability(t in 200.0_f64..800.0) {
                let m = normal();
                let back = m.percentile(100.0 * (1.0 - m.reliability(t))).unwrap();
                prop_assert!((back - t).abs() < 1e-6, "t={t} back={back}");
            }

            #[test]
            fn gamma_percentile_inverts_reliability(t in 150.0_f64..1500.0) {
                let m = gamma();
                let back = m.percentile(100.0 * (1.0 - m.reliability(t))).unwrap();
                prop_assert!((back - t).abs() < 1e-6 * t, "t={t} back={back}");
            }

            #[test]
            fn gamma_roundtrip_any_parameters(
                ln_k in -0.5_f64..11.5,
                theta in 0.1_f64..1000.0,
                p in 0.001_f64..0.999,
            ) {
                let m = ReliabilityModel::gamma(ln_k.exp(), theta).unwrap();
                let t = m.percentile(100.0 * p).unwrap();
                let failed = 1.0 - m.reliability(t);
                prop_assert!((failed - p).abs() < 1e-7, "k={} θ={theta}: F(t({p})) = {failed}", ln_k.exp());
                prop_assert!(m.reliability(m.mean() + 50.0 * m.stddev()) < 1e-12);
                prop_assert!(m.hazard(t).unwrap().is_finite());
            }

            #[test]
            fn normal_roundtrip_any_parameters(
                mu in -1000.0_f64..1000.0,
                sigma in 0.1_f64..1000.0,
                p in 0.001_f64..0.999,
            ) {
                let m = ReliabilityModel::normal(mu, sigma).unwrap();
                let t = m.percentile(100.0 * p).unwrap();
                let failed = 1.0 - m.reliability(t);
                prop_assert!((failed - p).abs() < 1e-9, "μ={mu} σ={sigma}: F(t({p})) = {failed}");
                prop_assert!(m.reliability(mu + 50.0 * sigma) < 1e-12);
                let far = m.hazard(mu + 60.0 * sigma).unwrap();
                prop_assert!((far * sigma - 60.0).abs() < 0.1, "σ·h = {}", far * sigma);
            }

            #[test]
            fn stddev_is_root_of_variance(a in 0.0_f64..1000.0, width in 0.1_f64..1000.0) {
                let m = ReliabilityModel::uniform(a, a + width).unwrap();
                prop_assert!(m.stddev() >= 0.0);
                prop_assert!((m.stddev() * m.stddev() - m.variance()).abs() <= 1e-9 * m.variance());
            }
        }
    }
}
