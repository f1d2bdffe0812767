//! Critical regions, error rates, p-values and confidence intervals.
//!
//! # Tie-break
//!
//! A [`CriticalRegion`] is closed on the critical side: an observation equal
//! to a boundary is rejected. The acceptance region is therefore the open
//! interval between the boundaries, and β is the alternative's mass strictly
//! inside it. The region classifier uses the same convention, so shading and
//! the reported areas agree at the boundary.

use crate::stats::continuous::Normal;
use crate::stats::descriptor::DistributionDescriptor;
use crate::stats::distribution::{ContinuousDistribution, check_probability};
use crate::stats::error::{StatsError, StatsResult};
use crate::stats::sampling::sample_means;
use rand::Rng;
use std::fmt;
use tracing::debug;

/// Side(s) of the test statistic that lead to rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tail {
    #[default]
    TwoSided,
    Left,
    Right,
}

impl Tail {
    /// Stable name, also accepted by [`Tail::parse`].
    pub fn name(self) -> &'static str {
        match self {
            Tail::TwoSided => "two-sided",
            Tail::Left => "left",
            Tail::Right => "right",
        }
    }

    /// Parse a tail name.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "two-sided" | "two_sided" | "both" => Some(Tail::TwoSided),
            "left" | "left-sided" | "less" => Some(Tail::Left),
            "right" | "right-sided" | "greater" => Some(Tail::Right),
            _ => None,
        }
    }
}

impl fmt::Display for Tail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One or two boundaries separating acceptance from rejection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CriticalRegion {
    /// Which side(s) reject.
    pub tail: Tail,
    /// Values `x <= lower` are rejected.
    pub lower: Option<f64>,
    /// Values `x >= upper` are rejected.
    pub upper: Option<f64>,
}

impl CriticalRegion {
    /// True when `x` falls in the rejection region (boundaries included).
    pub fn rejects(&self, x: f64) -> bool {
        self.lower.is_some_and(|l| x <= l) || self.upper.is_some_and(|u| x >= u)
    }

    /// Open acceptance interval, with infinite ends for one-sided regions.
    pub fn acceptance(&self) -> (f64, f64) {
        (
            self.lower.unwrap_or(f64::NEG_INFINITY),
            self.upper.unwrap_or(f64::INFINITY),
        )
    }

    /// The finite boundaries in ascending order.
    pub fn boundaries(&self) -> Vec<f64> {
        self.lower.into_iter().chain(self.upper).collect()
    }
}

/// Critical region of level `alpha` for `dist` under the null hypothesis.
///
/// Two-sided regions of symmetric families are mirrored about the centre so
/// both tails carry exactly α/2.
///
/// # Errors
///
/// `InvalidProbability` when `alpha` is outside (0, 1).
pub fn critical_region(
    dist: &DistributionDescriptor,
    alpha: f64,
    tail: Tail,
) -> StatsResult<CriticalRegion> {
    check_probability(alpha)?;

    let region = match tail {
        Tail::Right => CriticalRegion {
            tail,
            lower: None,
            upper: Some(dist.quantile(1.0 - alpha)?),
        },
        Tail::Left => CriticalRegion {
            tail,
            lower: Some(dist.quantile(alpha)?),
            upper: None,
        },
        Tail::TwoSided => {
            let upper = dist.quantile(1.0 - alpha / 2.0)?;
            let lower = if dist.is_symmetric() {
                2.0 * dist.center() - upper
            } else {
                dist.quantile(alpha / 2.0)?
            };
            CriticalRegion {
                tail,
                lower: Some(lower),
                upper: Some(upper),
            }
        }
    };

    debug!(%dist, alpha, %tail, lower = ?region.lower, upper = ?region.upper, "critical region");
    Ok(region)
}

/// Type-I and type-II error rates of a test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorRates {
    /// Null mass in the rejection region.
    pub alpha: f64,
    /// Alternative mass in the acceptance region.
    pub beta: f64,
    /// 1 - β.
    pub power: f64,
}

/// Error rates of `region` when the truth is `dist_alt`.
///
/// `alpha` is recomputed from `dist_null` rather than copied from the level
/// used to build the region; for discrete families it is the attained size.
pub fn type2_error(
    dist_null: &DistributionDescriptor,
    dist_alt: &DistributionDescriptor,
    region: &CriticalRegion,
) -> ErrorRates {
    let (lo, hi) = region.acceptance();
    let alpha = 1.0 - dist_null.mass_between(lo, hi);
    let beta = dist_alt.mass_between(lo, hi);
    let rates = ErrorRates {
        alpha,
        beta,
        power: 1.0 - beta,
    };
    debug!(alpha = rates.alpha, beta = rates.beta, power = rates.power, "error rates");
    rates
}

/// Probability under `dist` of a statistic at least as extreme as `observed`.
///
/// Two-sided values double the smaller tail and are capped at 1.
pub fn p_value(dist: &DistributionDescriptor, observed: f64, tail: Tail) -> f64 {
    let left = dist.cdf(observed);
    let right = 1.0 - dist.cdf_strict(observed);
    match tail {
        Tail::Left => left,
        Tail::Right => right,
        Tail::TwoSided => (2.0 * left.min(right)).min(1.0),
    }
}

/// z-interval for a mean with known σ.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceInterval {
    /// Sample mean the interval is centred on.
    pub center: f64,
    pub lower: f64,
    pub upper: f64,
    /// z·σ/√n
    pub margin: f64,
    /// Standard normal quantile at 1 - α/2.
    pub z: f64,
    /// Significance level; the confidence level is 1 - α.
    pub alpha: f64,
}

impl ConfidenceInterval {
    /// upper - lower.
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// True when `mu` lies in the closed interval.
    pub fn contains(&self, mu: f64) -> bool {
        self.lower <= mu && mu <= self.upper
    }
}

/// `[x̄ - z·σ/√n, x̄ + z·σ/√n]` with `z = Φ⁻¹(1 - α/2)`.
///
/// # Errors
///
/// `InvalidParameter` for σ ≤ 0 or n = 0; `InvalidProbability` for α
/// outside (0, 1).
pub fn confidence_interval(
    sample_mean: f64,
    sigma: f64,
    n: u64,
    alpha: f64,
) -> StatsResult<ConfidenceInterval> {
    if n == 0 {
        return Err(StatsError::invalid("n", 0.0, "sample size must be positive"));
    }
    if !sample_mean.is_finite() {
        return Err(StatsError::invalid(
            "sample_mean",
            sample_mean,
            "must be finite",
        ));
    }
    check_probability(alpha)?;

    let se = Normal::sampling(0.0, sigma, n)?.sigma();
    let z = Normal::standard().ppf(1.0 - alpha / 2.0)?;
    let margin = z * se;

    let ci = ConfidenceInterval {
        center: sample_mean,
        lower: sample_mean - margin,
        upper: sample_mean + margin,
        margin,
        z,
        alpha,
    };
    debug!(lower = ci.lower, upper = ci.upper, margin, "confidence interval");
    Ok(ci)
}

/// One simulated sample of a coverage run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverageSample {
    pub interval: ConfidenceInterval,
    pub covers: bool,
}

/// Repeated-sampling illustration of what "95% confidence" means.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageRun {
    /// True population mean.
    pub mu: f64,
    pub samples: Vec<CoverageSample>,
}

impl CoverageRun {
    /// Number of intervals containing μ.
    pub fn hits(&self) -> usize {
        self.samples.iter().filter(|s| s.covers).count()
    }

    /// Fraction of intervals containing μ.
    pub fn rate(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.hits() as f64 / self.samples.len() as f64
    }
}

/// Draw `num_samples` samples of size `sample_size` from N(μ, σ) and build
/// a known-σ interval from each.
pub fn coverage<R: Rng + ?Sized>(
    mu: f64,
    sigma: f64,
    sample_size: u64,
    num_samples: usize,
    alpha: f64,
    rng: &mut R,
) -> StatsResult<CoverageRun> {
    let population = DistributionDescriptor::normal(mu, sigma)?;
    if num_samples == 0 {
        return Err(StatsError::invalid(
            "num_samples",
            0.0,
            "need at least one sample",
        ));
    }

    let means = sample_means(&population, sample_size as usize, num_samples, rng)?;
    let samples = means
        .into_iter()
        .map(|m| {
            let interval = confidence_interval(m, sigma, sample_size, alpha)?;
            Ok(CoverageSample {
                interval,
                covers: interval.contains(mu),
            })
        })
        .collect::<StatsResult<Vec<_>>>()?;

    Ok(CoverageRun { mu, samples })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::sampling::seeded_rng;

    fn std_normal() -> DistributionDescriptor {
        DistributionDescriptor::normal(0.0, 1.0).unwrap()
    }

    #[test]
    fn test_two_sided_normal_boundaries() {
        let r = critical_region(&std_normal(), 0.05, Tail::TwoSided).unwrap();
        assert!((r.upper.unwrap() - 1.959964).abs() < 1e-5);
        assert_eq!(r.lower.unwrap(), -r.upper.unwrap());
        assert_eq!(r.boundaries().len(), 2);
    }

    #[test]
    fn test_one_sided_boundaries() {
        let right = critical_region(&std_normal(), 0.05, Tail::Right).unwrap();
        assert!(right.lower.is_none());
        assert!((right.upper.unwrap() - 1.644854).abs() < 1e-5);

        let left = critical_region(&std_normal(), 0.05, Tail::Left).unwrap();
        assert!(left.upper.is_none());
        assert!((left.lower.unwrap() + 1.644854).abs() < 1e-5);
    }

    #[test]
    fn test_chi_squared_right_tail() {
        let chi2 = DistributionDescriptor::chi_squared(5.0).unwrap();
        let r = critical_region(&chi2, 0.05, Tail::Right).unwrap();
        assert!((r.upper.unwrap() - 11.0705).abs() < 1e-3);
    }

    #[test]
    fn test_alpha_outside_unit_interval() {
        for alpha in [0.0, 1.0, -0.1, 1.5] {
            assert!(matches!(
                critical_region(&std_normal(), alpha, Tail::Right),
                Err(StatsError::InvalidProbability { .. })
            ));
        }
    }

    #[test]
    fn test_boundary_is_rejected() {
        let r = critical_region(&std_normal(), 0.05, Tail::TwoSided).unwrap();
        let (lo, hi) = (r.lower.unwrap(), r.upper.unwrap());
        assert!(r.rejects(lo));
        assert!(r.rejects(hi));
        assert!(!r.rejects(0.0));
        assert!(!r.rejects(hi - 1e-9));
    }

    #[test]
    fn test_identical_hypotheses() {
        let se = 15.0 / 25f64.sqrt();
        let null = DistributionDescriptor::normal(100.0, se).unwrap();
        for alpha in [0.01, 0.05, 0.1] {
            let r = critical_region(&null, alpha, Tail::TwoSided).unwrap();
            let rates = type2_error(&null, &null, &r);
            assert!((rates.alpha - alpha).abs() < 1e-7);
            assert!((rates.beta - (1.0 - alpha)).abs() < 1e-7);
            assert!((rates.power - alpha).abs() < 1e-7);
        }
    }

    #[test]
    fn test_power_grows_with_effect() {
        let null = DistributionDescriptor::normal(0.0, 1.0).unwrap();
        let r = critical_region(&null, 0.05, Tail::Right).unwrap();
        let near = type2_error(&null, &DistributionDescriptor::normal(0.5, 1.0).unwrap(), &r);
        let far = type2_error(&null, &DistributionDescriptor::normal(3.0, 1.0).unwrap(), &r);
        assert!(far.power > near.power);
        assert!((near.alpha - 0.05).abs() < 1e-7);

        // β for a right test is Φ(z_.95 - δ)
        let expected = DistributionDescriptor::normal(0.0, 1.0)
            .unwrap()
            .cdf(r.upper.unwrap() - 3.0);
        assert!((far.beta - expected).abs() < 1e-12);
    }

    #[test]
    fn test_p_values() {
        let n = std_normal();
        assert!((p_value(&n, 1.959964, Tail::TwoSided) - 0.05).abs() < 1e-5);
        assert!((p_value(&n, 1.644854, Tail::Right) - 0.05).abs() < 1e-5);
        assert!((p_value(&n, -1.644854, Tail::Left) - 0.05).abs() < 1e-5);
        assert_eq!(p_value(&n, 0.0, Tail::TwoSided), 1.0);

        // P(X ≥ 3) for Binomial(3, 0.5)
        let b = DistributionDescriptor::binomial(3, 0.5).unwrap();
        assert!((p_value(&b, 3.0, Tail::Right) - 0.125).abs() < 1e-10);
    }

    #[test]
    fn test_confidence_interval_textbook() {
        let ci = confidence_interval(100.0, 15.0, 25, 0.05).unwrap();
        assert!((ci.margin - 1.959964 * 3.0).abs() < 1e-4);
        assert!((ci.center - 100.0).abs() < 1e-12);
        assert!((ci.width() - 2.0 * ci.margin).abs() < 1e-12);
        assert!(ci.contains(100.0));
        assert!(ci.contains(ci.lower));
        assert!(!ci.contains(ci.upper + 1e-9));
    }

    #[test]
    fn test_confidence_interval_rejects_bad_input() {
        assert!(confidence_interval(0.0, 0.0, 10, 0.05).is_err());
        assert!(confidence_interval(0.0, 1.0, 0, 0.05).is_err());
        assert!(confidence_interval(0.0, 1.0, 10, 1.0).is_err());
        assert!(confidence_interval(f64::NAN, 1.0, 10, 0.05).is_err());
    }

    #[test]
    fn test_coverage_near_nominal() {
        let mut rng = seeded_rng(Some(11));
        let run = coverage(100.0, 15.0, 30, 2000, 0.05, &mut rng).unwrap();
        assert_eq!(run.samples.len(), 2000);
        assert!((run.rate() - 0.95).abs() < 0.02);
        assert!(run.samples.iter().all(|s| s.covers == s.interval.contains(100.0)));
    }

    #[test]
    fn test_tail_names() {
        for tail in [Tail::TwoSided, Tail::Left, Tail::Right] {
            assert_eq!(Tail::parse(tail.name()), Some(tail));
        }
        assert_eq!(Tail::parse("sideways"), None);
    }
}
