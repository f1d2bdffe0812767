//! Exponential distribution.

use crate::stats::distribution::{ContinuousDistribution, Distribution, check_probability};
use crate::stats::error::{StatsError, StatsResult};

/// Exponential distribution with rate λ.
///
/// f(x) = λ exp(-λx)  for x ≥ 0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Exponential {
    /// Rate parameter (λ)
    lambda: f64,
}

impl Exponential {
    /// Create a new exponential distribution with given rate parameter.
    ///
    /// # Errors
    ///
    /// Returns an error if lambda is not positive and finite.
    pub fn new(lambda: f64) -> StatsResult<Self> {
        if !(lambda > 0.0) || !lambda.is_finite() {
            return Err(StatsError::invalid("lambda", lambda, "rate must be positive"));
        }
        Ok(Self { lambda })
    }

    /// Get the rate parameter λ.
    pub fn rate(&self) -> f64 {
        self.lambda
    }
}

impl Distribution for Exponential {
    fn mean(&self) -> f64 {
        1.0 / self.lambda
    }

    fn var(&self) -> f64 {
        1.0 / (self.lambda * self.lambda)
    }

    fn median(&self) -> f64 {
        std::f64::consts::LN_2 / self.lambda
    }

    fn mode(&self) -> f64 {
        0.0
    }

    fn skewness(&self) -> f64 {
        2.0
    }

    fn kurtosis(&self) -> f64 {
        6.0
    }
}

impl ContinuousDistribution for Exponential {
    fn pdf(&self, x: f64) -> f64 {
        if x < 0.0 {
            0.0
        } else {
            self.lambda * (-self.lambda * x).exp()
        }
    }

    fn cdf(&self, x: f64) -> f64 {
        if x < 0.0 {
            0.0
        } else {
            // -expm1(-λx) keeps precision for small x
            -(-self.lambda * x).exp_m1()
        }
    }

    fn sf(&self, x: f64) -> f64 {
        if x < 0.0 {
            1.0
        } else {
            (-self.lambda * x).exp()
        }
    }

    fn ppf(&self, p: f64) -> StatsResult<f64> {
        check_probability(p)?;
        Ok(-(-p).ln_1p() / self.lambda)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exponential_creation() {
        assert!(Exponential::new(2.0).is_ok());
        assert!(Exponential::new(0.0).is_err());
        assert!(Exponential::new(-1.0).is_err());
    }

    #[test]
    fn test_exponential_values() {
        let e = Exponential::new(2.0).unwrap();
        assert!((e.mean() - 0.5).abs() < 1e-10);
        assert!((e.pdf(0.0) - 2.0).abs() < 1e-10);
        assert!((e.cdf(1.0) - (1.0 - (-2.0_f64).exp())).abs() < 1e-12);
        assert!((e.ppf(0.5).unwrap() - e.median()).abs() < 1e-12);
        assert!((e.sf(1.0) + e.cdf(1.0) - 1.0).abs() < 1e-12);
    }
}
