//! A single tagged type covering every family the pages draw.
//!
//! Pages never talk to the concrete distribution structs directly. They build
//! a [`DistributionDescriptor`] from their parameter set and ask it for
//! densities, cumulative probabilities and quantiles, so the same drawing and
//! region code serves the normal, t, chi-square, binomial and Poisson pages.

use crate::stats::continuous::{ChiSquared, Exponential, Normal, StudentT, Uniform};
use crate::stats::discrete::{Binomial, Poisson};
use crate::stats::distribution::{ContinuousDistribution, DiscreteDistribution, Distribution};
use crate::stats::error::{StatsError, StatsResult};
use std::fmt;

/// Distribution family tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Normal,
    StudentT,
    ChiSquared,
    Binomial,
    Poisson,
    Uniform,
    Exponential,
}

impl Family {
    /// Stable lowercase name, also accepted by [`Family::parse`].
    pub fn name(self) -> &'static str {
        match self {
            Family::Normal => "normal",
            Family::StudentT => "t",
            Family::ChiSquared => "chi-squared",
            Family::Binomial => "binomial",
            Family::Poisson => "poisson",
            Family::Uniform => "uniform",
            Family::Exponential => "exponential",
        }
    }

    /// Parse a family name.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "normal" => Some(Family::Normal),
            "t" | "student-t" => Some(Family::StudentT),
            "chi-squared" | "chi2" => Some(Family::ChiSquared),
            "binomial" => Some(Family::Binomial),
            "poisson" => Some(Family::Poisson),
            "uniform" => Some(Family::Uniform),
            "exponential" => Some(Family::Exponential),
            _ => None,
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An immutable distribution with validated shape parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DistributionDescriptor {
    Normal(Normal),
    StudentT(StudentT),
    ChiSquared(ChiSquared),
    Binomial(Binomial),
    Poisson(Poisson),
    Uniform(Uniform),
    Exponential(Exponential),
}

impl DistributionDescriptor {
    /// N(μ, σ). Fails when σ ≤ 0.
    pub fn normal(mu: f64, sigma: f64) -> StatsResult<Self> {
        Normal::new(mu, sigma).map(Self::Normal)
    }

    /// Sampling distribution of the mean of `n` draws from a population
    /// with mean μ and standard deviation σ: N(μ, σ/√n).
    pub fn sample_mean(mu: f64, sigma: f64, n: u64) -> StatsResult<Self> {
        Normal::sampling(mu, sigma, n).map(Self::Normal)
    }

    /// Student-t with `df` degrees of freedom. Fails when df < 1.
    pub fn student_t(df: f64) -> StatsResult<Self> {
        StudentT::new(df).map(Self::StudentT)
    }

    /// χ² with `df` degrees of freedom. Fails when df < 1.
    pub fn chi_squared(df: f64) -> StatsResult<Self> {
        ChiSquared::new(df).map(Self::ChiSquared)
    }

    /// Binomial(n, p). Fails when n < 0 or p ∉ [0, 1].
    pub fn binomial(n: i64, p: f64) -> StatsResult<Self> {
        if n < 0 {
            return Err(StatsError::invalid(
                "n",
                n as f64,
                "number of trials must be non-negative",
            ));
        }
        Binomial::new(n as u64, p).map(Self::Binomial)
    }

    /// Poisson(λ). Fails when λ < 0.
    pub fn poisson(lambda: f64) -> StatsResult<Self> {
        Poisson::new(lambda).map(Self::Poisson)
    }

    /// U(a, b). Fails when a ≥ b.
    pub fn uniform(a: f64, b: f64) -> StatsResult<Self> {
        Uniform::new(a, b).map(Self::Uniform)
    }

    /// Exponential with rate λ. Fails when λ ≤ 0.
    pub fn exponential(lambda: f64) -> StatsResult<Self> {
        Exponential::new(lambda).map(Self::Exponential)
    }

    /// Family tag.
    pub fn family(&self) -> Family {
        match self {
            Self::Normal(_) => Family::Normal,
            Self::StudentT(_) => Family::StudentT,
            Self::ChiSquared(_) => Family::ChiSquared,
            Self::Binomial(_) => Family::Binomial,
            Self::Poisson(_) => Family::Poisson,
            Self::Uniform(_) => Family::Uniform,
            Self::Exponential(_) => Family::Exponential,
        }
    }

    /// True for integer-valued families.
    pub fn is_discrete(&self) -> bool {
        matches!(self, Self::Binomial(_) | Self::Poisson(_))
    }

    /// True when the density is mirror-symmetric about [`center`](Self::center).
    pub fn is_symmetric(&self) -> bool {
        matches!(self, Self::Normal(_) | Self::StudentT(_) | Self::Uniform(_))
    }

    /// Centre of symmetry for symmetric families, the mean otherwise.
    pub fn center(&self) -> f64 {
        match self {
            Self::StudentT(_) => 0.0,
            _ => self.mean(),
        }
    }

    /// Mean of the distribution.
    pub fn mean(&self) -> f64 {
        self.as_dist().mean()
    }

    /// Standard deviation of the distribution.
    pub fn std(&self) -> f64 {
        self.as_dist().std()
    }

    fn as_dist(&self) -> &dyn Distribution {
        match self {
            Self::Normal(d) => d,
            Self::StudentT(d) => d,
            Self::ChiSquared(d) => d,
            Self::Binomial(d) => d,
            Self::Poisson(d) => d,
            Self::Uniform(d) => d,
            Self::Exponential(d) => d,
        }
    }

    fn as_continuous(&self) -> Option<&dyn ContinuousDistribution> {
        match self {
            Self::Normal(d) => Some(d),
            Self::StudentT(d) => Some(d),
            Self::ChiSquared(d) => Some(d),
            Self::Uniform(d) => Some(d),
            Self::Exponential(d) => Some(d),
            Self::Binomial(_) | Self::Poisson(_) => None,
        }
    }

    fn as_discrete(&self) -> Option<&dyn DiscreteDistribution> {
        match self {
            Self::Binomial(d) => Some(d),
            Self::Poisson(d) => Some(d),
            _ => None,
        }
    }

    /// Density (continuous) or mass (discrete) at `x`.
    ///
    /// Discrete families have zero mass off the non-negative integers.
    pub fn density(&self, x: f64) -> f64 {
        if let Some(c) = self.as_continuous() {
            return c.pdf(x);
        }
        match (self.as_discrete(), as_count(x)) {
            (Some(d), Some(k)) => d.pmf(k),
            _ => 0.0,
        }
    }

    /// P(X ≤ x).
    pub fn cdf(&self, x: f64) -> f64 {
        if x.is_nan() {
            return f64::NAN;
        }
        if x == f64::NEG_INFINITY {
            return 0.0;
        }
        if x == f64::INFINITY {
            return 1.0;
        }
        if let Some(c) = self.as_continuous() {
            return c.cdf(x);
        }
        match self.as_discrete() {
            Some(_) if x < 0.0 => 0.0,
            Some(d) => d.cdf(x.floor() as u64),
            None => f64::NAN,
        }
    }

    /// P(X < x). Equal to [`cdf`](Self::cdf) for continuous families.
    pub fn cdf_strict(&self, x: f64) -> f64 {
        if !self.is_discrete() || !x.is_finite() {
            return self.cdf(x);
        }
        // P(X < x) = P(X ≤ ⌈x⌉ - 1)
        self.cdf(x.ceil() - 1.0)
    }

    /// Probability mass strictly between `lower` and `upper`.
    pub fn mass_between(&self, lower: f64, upper: f64) -> f64 {
        if upper <= lower {
            return 0.0;
        }
        (self.cdf_strict(upper) - self.cdf(lower)).clamp(0.0, 1.0)
    }

    /// Inverse CDF for `p` in (0, 1).
    ///
    /// For discrete families this is the smallest k with P(X ≤ k) ≥ p.
    pub fn quantile(&self, p: f64) -> StatsResult<f64> {
        if let Some(c) = self.as_continuous() {
            return c.ppf(p);
        }
        match self.as_discrete() {
            Some(d) => d.ppf(p).map(|k| k as f64),
            None => Err(StatsError::NumericalError {
                message: format!("no quantile function for {}", self.family()),
            }),
        }
    }

    /// A plotting range holding nearly all the mass.
    pub fn display_range(&self) -> (f64, f64) {
        match self {
            Self::Normal(n) => (n.mu() - 4.0 * n.sigma(), n.mu() + 4.0 * n.sigma()),
            Self::StudentT(_) => (-4.0, 4.0),
            Self::ChiSquared(c) => (0.0, c.display_max()),
            Self::Binomial(b) => (0.0, b.n() as f64),
            Self::Poisson(p) => (0.0, (2.0 * p.lambda()).max(20.0)),
            Self::Uniform(u) => {
                let pad = 0.1 * (u.b() - u.a());
                (u.a() - pad, u.b() + pad)
            }
            Self::Exponential(e) => (0.0, 6.0 / e.rate()),
        }
    }
}

impl fmt::Display for DistributionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal(n) => write!(f, "N({}, {})", n.mu(), n.sigma()),
            Self::StudentT(t) => write!(f, "t(df={})", t.df()),
            Self::ChiSquared(c) => write!(f, "χ²(df={})", c.df()),
            Self::Binomial(b) => write!(f, "Binomial(n={}, p={})", b.n(), b.p()),
            Self::Poisson(p) => write!(f, "Poisson(λ={})", p.lambda()),
            Self::Uniform(u) => write!(f, "U({}, {})", u.a(), u.b()),
            Self::Exponential(e) => write!(f, "Exp(λ={})", e.rate()),
        }
    }
}

/// `x` as a count if it is a non-negative integer.
fn as_count(x: f64) -> Option<u64> {
    if x >= 0.0 && x.fract() == 0.0 && x <= u64::MAX as f64 {
        Some(x as u64)
    } else {
        None
    }
}

/// Density or mass of `dist` at `x`.
pub fn density(dist: &DistributionDescriptor, x: f64) -> f64 {
    dist.density(x)
}

/// Cumulative probability P(X ≤ x).
pub fn cdf(dist: &DistributionDescriptor, x: f64) -> f64 {
    dist.cdf(x)
}

/// Inverse CDF for `p` in (0, 1).
pub fn quantile(dist: &DistributionDescriptor, p: f64) -> StatsResult<f64> {
    dist.quantile(p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_validate() {
        assert!(DistributionDescriptor::normal(0.0, 0.0).is_err());
        assert!(DistributionDescriptor::normal(0.0, -2.0).is_err());
        assert!(DistributionDescriptor::student_t(0.0).is_err());
        assert!(DistributionDescriptor::chi_squared(0.5).is_err());
        assert!(DistributionDescriptor::binomial(-1, 0.5).is_err());
        assert!(DistributionDescriptor::binomial(10, 1.5).is_err());
        assert!(DistributionDescriptor::binomial(10, -0.5).is_err());
        assert!(DistributionDescriptor::poisson(-0.1).is_err());

        let err = DistributionDescriptor::normal(0.0, -1.0).unwrap_err();
        assert!(matches!(err, StatsError::InvalidParameter { .. }));
    }

    #[test]
    fn test_sample_mean_scales_spread() {
        let d = DistributionDescriptor::sample_mean(100.0, 15.0, 25).unwrap();
        assert_eq!(d.family(), Family::Normal);
        assert!((d.mean() - 100.0).abs() < 1e-12);
        assert!((d.std() - 3.0).abs() < 1e-12);
        assert!(matches!(
            DistributionDescriptor::sample_mean(0.0, 1.0, 0),
            Err(StatsError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_discrete_density_off_support() {
        let b = DistributionDescriptor::binomial(10, 0.5).unwrap();
        assert_eq!(b.density(2.5), 0.0);
        assert_eq!(b.density(-1.0), 0.0);
        assert!(b.density(5.0) > 0.2);
    }

    #[test]
    fn test_discrete_cdf_steps() {
        let p = DistributionDescriptor::poisson(2.0).unwrap();
        assert_eq!(p.cdf(-0.5), 0.0);
        assert!((p.cdf(1.7) - p.cdf(1.0)).abs() < 1e-15);
        assert!((p.cdf_strict(2.0) - p.cdf(1.0)).abs() < 1e-15);
        assert!((p.cdf_strict(2.5) - p.cdf(2.0)).abs() < 1e-15);
    }

    #[test]
    fn test_mass_between_is_open() {
        let b = DistributionDescriptor::binomial(4, 0.5).unwrap();
        // Only k = 2 lies strictly between 1 and 3
        assert!((b.mass_between(1.0, 3.0) - 6.0 / 16.0).abs() < 1e-10);

        let n = DistributionDescriptor::normal(0.0, 1.0).unwrap();
        let m = n.mass_between(f64::NEG_INFINITY, f64::INFINITY);
        assert!((m - 1.0).abs() < 1e-12);
        assert_eq!(n.mass_between(1.0, -1.0), 0.0);
    }

    #[test]
    fn test_quantile_dispatch() {
        let c = DistributionDescriptor::chi_squared(5.0).unwrap();
        assert!((quantile(&c, 0.95).unwrap() - 11.0705).abs() < 1e-3);

        let b = DistributionDescriptor::binomial(20, 0.5).unwrap();
        assert_eq!(quantile(&b, 0.5).unwrap(), 10.0);
        assert!(quantile(&b, 0.0).is_err());
    }

    #[test]
    fn test_family_names_round_trip() {
        for family in [
            Family::Normal,
            Family::StudentT,
            Family::ChiSquared,
            Family::Binomial,
            Family::Poisson,
            Family::Uniform,
            Family::Exponential,
        ] {
            assert_eq!(Family::parse(family.name()), Some(family));
        }
        assert_eq!(Family::parse("cauchy"), None);
    }
}
