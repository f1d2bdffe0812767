//! Chi-squared distribution.

use super::Gamma;
use crate::stats::distribution::{ContinuousDistribution, Distribution};
use crate::stats::error::{StatsError, StatsResult};

/// Chi-squared distribution.
///
/// The chi-squared distribution with k degrees of freedom is a special case
/// of the gamma distribution: χ²(k) = Gamma(k/2, 1/2).
///
/// f(x) = (1 / (2^(k/2) Γ(k/2))) x^(k/2-1) exp(-x/2)  for x > 0
///
/// # Examples
///
/// ```ignore
/// use statviz::stats::{ChiSquared, ContinuousDistribution};
///
/// let chi2 = ChiSquared::new(5.0).unwrap();
/// println!("95th percentile: {}", chi2.ppf(0.95).unwrap()); // ≈ 11.0705
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChiSquared {
    /// Degrees of freedom
    k: f64,
    /// Underlying gamma distribution
    gamma: Gamma,
}

impl ChiSquared {
    /// Create a new chi-squared distribution with k degrees of freedom.
    ///
    /// # Errors
    ///
    /// Returns an error if k < 1 or not finite.
    pub fn new(k: f64) -> StatsResult<Self> {
        if !k.is_finite() || k < 1.0 {
            return Err(StatsError::invalid(
                "df",
                k,
                "degrees of freedom must be at least 1",
            ));
        }
        let gamma = Gamma::new(k / 2.0, 0.5)?;
        Ok(Self { k, gamma })
    }

    /// Get the degrees of freedom.
    pub fn df(&self) -> f64 {
        self.k
    }

    /// Right end of a plotting range that shows essentially all of the mass.
    pub fn display_max(&self) -> f64 {
        (self.k + 5.0 * self.k.sqrt()).max(10.0)
    }
}

impl Distribution for ChiSquared {
    fn mean(&self) -> f64 {
        self.k
    }

    fn var(&self) -> f64 {
        2.0 * self.k
    }

    fn median(&self) -> f64 {
        // Approximation: k * (1 - 2/(9k))³
        self.k * (1.0 - 2.0 / (9.0 * self.k)).powi(3)
    }

    fn mode(&self) -> f64 {
        if self.k >= 2.0 { self.k - 2.0 } else { 0.0 }
    }

    fn skewness(&self) -> f64 {
        (8.0 / self.k).sqrt()
    }

    fn kurtosis(&self) -> f64 {
        12.0 / self.k
    }
}

impl ContinuousDistribution for ChiSquared {
    fn pdf(&self, x: f64) -> f64 {
        self.gamma.pdf(x)
    }

    fn log_pdf(&self, x: f64) -> f64 {
        self.gamma.log_pdf(x)
    }

    fn cdf(&self, x: f64) -> f64 {
        self.gamma.cdf(x)
    }

    fn sf(&self, x: f64) -> f64 {
        self.gamma.sf(x)
    }

    fn ppf(&self, p: f64) -> StatsResult<f64> {
        self.gamma.ppf(p)
    }
}
