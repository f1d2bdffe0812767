//! Normal (Gaussian) distribution.

use super::special::{self, INV_SQRT_2PI, LN_SQRT_2PI};
use crate::stats::distribution::{ContinuousDistribution, Distribution, check_probability};
use crate::stats::error::{StatsError, StatsResult};

/// Normal (Gaussian) distribution.
///
/// The normal distribution with mean μ and standard deviation σ has PDF:
///
/// f(x) = (1 / (σ√(2π))) exp(-(x-μ)² / (2σ²))
///
/// This is the sampling distribution of x̄ under both hypotheses on the
/// hypothesis-testing page, with σ replaced by the standard error σ/√n.
///
/// # Examples
///
/// ```ignore
/// use statviz::stats::{Normal, ContinuousDistribution};
///
/// let n = Normal::standard();
/// assert!((n.cdf(0.0) - 0.5).abs() < 1e-10);
///
/// // Sampling distribution of the mean of 25 draws from N(100, 15)
/// let xbar = Normal::sampling(100.0, 15.0, 25).unwrap();
/// assert!((xbar.sigma() - 3.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normal {
    /// Mean (μ)
    mu: f64,
    /// Standard deviation (σ)
    sigma: f64,
}

impl Normal {
    /// Create a new normal distribution with given mean and standard deviation.
    ///
    /// # Errors
    ///
    /// Returns an error if sigma is not positive or mu is not finite.
    pub fn new(mu: f64, sigma: f64) -> StatsResult<Self> {
        if !(sigma > 0.0) || !sigma.is_finite() {
            return Err(StatsError::invalid(
                "sigma",
                sigma,
                "must be positive and finite",
            ));
        }
        if !mu.is_finite() {
            return Err(StatsError::invalid("mu", mu, "must be finite"));
        }
        Ok(Self { mu, sigma })
    }

    /// Create a standard normal distribution N(0, 1).
    pub fn standard() -> Self {
        Self {
            mu: 0.0,
            sigma: 1.0,
        }
    }

    /// Sampling distribution of the mean of `n` draws: N(μ, σ/√n).
    pub fn sampling(mu: f64, sigma: f64, n: u64) -> StatsResult<Self> {
        if n == 0 {
            return Err(StatsError::invalid("n", 0.0, "sample size must be positive"));
        }
        Self::new(mu, sigma / (n as f64).sqrt())
    }

    /// Get the mean parameter.
    pub fn mu(&self) -> f64 {
        self.mu
    }

    /// Get the standard deviation parameter.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Standardize a value: z = (x - μ) / σ
    fn standardize(&self, x: f64) -> f64 {
        (x - self.mu) / self.sigma
    }
}

impl Distribution for Normal {
    fn mean(&self) -> f64 {
        self.mu
    }

    fn var(&self) -> f64 {
        self.sigma * self.sigma
    }

    fn std(&self) -> f64 {
        self.sigma
    }

    fn median(&self) -> f64 {
        self.mu
    }

    fn mode(&self) -> f64 {
        self.mu
    }

    fn skewness(&self) -> f64 {
        0.0
    }

    fn kurtosis(&self) -> f64 {
        0.0
    }
}

impl ContinuousDistribution for Normal {
    fn pdf(&self, x: f64) -> f64 {
        let z = self.standardize(x);
        INV_SQRT_2PI * (-0.5 * z * z).exp() / self.sigma
    }

    fn log_pdf(&self, x: f64) -> f64 {
        let z = self.standardize(x);
        -LN_SQRT_2PI - self.sigma.ln() - 0.5 * z * z
    }

    fn cdf(&self, x: f64) -> f64 {
        special::norm_cdf(self.standardize(x))
    }

    fn sf(&self, x: f64) -> f64 {
        special::norm_cdf(-self.standardize(x))
    }

    fn ppf(&self, p: f64) -> StatsResult<f64> {
        check_probability(p)?;
        Ok(self.mu + self.sigma * special::norm_ppf(p))
    }
}
