//! Poisson distribution.

use crate::stats::continuous::special;
use crate::stats::distribution::{DiscreteDistribution, Distribution, check_probability};
use crate::stats::error::{StatsError, StatsResult};

/// Poisson distribution.
///
/// The Poisson distribution models the number of events occurring in a fixed
/// interval when events occur independently at a constant rate λ.
///
/// P(X = k) = λ^k e^(-λ) / k!
///
/// It is the limit of Binomial(n, λ/n) as n → ∞.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Poisson {
    /// Rate parameter (λ)
    lambda: f64,
}

impl Poisson {
    /// Create a new Poisson distribution with rate λ.
    ///
    /// λ = 0 is accepted and puts all mass on k = 0.
    ///
    /// # Errors
    ///
    /// Returns an error if λ is negative or not finite.
    pub fn new(lambda: f64) -> StatsResult<Self> {
        if !lambda.is_finite() {
            return Err(StatsError::invalid("lambda", lambda, "must be finite"));
        }
        if lambda < 0.0 {
            return Err(StatsError::invalid(
                "lambda",
                lambda,
                "rate must be non-negative",
            ));
        }
        Ok(Self { lambda })
    }

    /// Get the rate parameter λ.
    pub fn lambda(&self) -> f64 {
        self.lambda
    }
}

impl Distribution for Poisson {
    fn mean(&self) -> f64 {
        self.lambda
    }

    fn var(&self) -> f64 {
        self.lambda
    }

    fn median(&self) -> f64 {
        if self.lambda == 0.0 {
            return 0.0;
        }
        (self.lambda + 1.0 / 3.0 - 0.02 / self.lambda).floor()
    }

    fn mode(&self) -> f64 {
        self.lambda.floor()
    }

    fn skewness(&self) -> f64 {
        1.0 / self.lambda.sqrt()
    }

    fn kurtosis(&self) -> f64 {
        1.0 / self.lambda
    }
}

impl DiscreteDistribution for Poisson {
    fn pmf(&self, k: u64) -> f64 {
        self.log_pmf(k).exp()
    }

    fn log_pmf(&self, k: u64) -> f64 {
        if self.lambda == 0.0 {
            return if k == 0 { 0.0 } else { f64::NEG_INFINITY };
        }
        let k_f = k as f64;
        k_f * self.lambda.ln() - self.lambda - special::lgamma(k_f + 1.0)
    }

    fn cdf(&self, k: u64) -> f64 {
        if self.lambda == 0.0 {
            return 1.0;
        }
        // CDF = Q(k+1, λ)
        special::gammaincc((k + 1) as f64, self.lambda)
    }

    fn sf(&self, k: u64) -> f64 {
        if self.lambda == 0.0 {
            return 0.0;
        }
        special::gammainc((k + 1) as f64, self.lambda)
    }

    fn ppf(&self, prob: f64) -> StatsResult<u64> {
        check_probability(prob)?;
        if self.lambda == 0.0 {
            return Ok(0);
        }

        // Start from the normal approximation and walk to the exact answer
        let z = special::norm_ppf(prob);
        let guess = (self.lambda + z * self.lambda.sqrt()).floor().max(0.0);
        let mut k = guess as u64;

        while self.cdf(k) < prob {
            k += 1;
        }
        while k > 0 && self.cdf(k - 1) >= prob {
            k -= 1;
        }

        Ok(k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poisson_creation() {
        let p = Poisson::new(5.0).unwrap();
        assert!((p.lambda() - 5.0).abs() < 1e-10);

        assert!(Poisson::new(0.0).is_ok());
        assert!(Poisson::new(-1.0).is_err());
        assert!(Poisson::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_poisson_moments() {
        let p = Poisson::new(4.0).unwrap();
        assert!((p.mean() - 4.0).abs() < 1e-10);
        assert!((p.var() - 4.0).abs() < 1e-10);
        assert!((p.std() - 2.0).abs() < 1e-10);
        assert!((p.skewness() - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_poisson_pmf() {
        let p = Poisson::new(3.0).unwrap();
        assert!((p.pmf(0) - (-3.0_f64).exp()).abs() < 1e-10);

        let expected = 27.0 * (-3.0_f64).exp() / 6.0;
        assert!((p.pmf(3) - expected).abs() < 1e-10);

        let total: f64 = (0..50).map(|k| p.pmf(k)).sum();
        assert!((total - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_poisson_zero_rate() {
        let p = Poisson::new(0.0).unwrap();
        assert_eq!(p.pmf(0), 1.0);
        assert_eq!(p.pmf(1), 0.0);
        assert_eq!(p.cdf(0), 1.0);
        assert_eq!(p.ppf(0.9).unwrap(), 0);
    }

    #[test]
    fn test_poisson_cdf() {
        let p = Poisson::new(3.0).unwrap();
        assert!((p.cdf(0) - (-3.0_f64).exp()).abs() < 1e-10);

        let cdf_3: f64 = (0..=3).map(|k| p.pmf(k)).sum();
        assert!((p.cdf(3) - cdf_3).abs() < 1e-6);
        assert!((p.cdf(3) + p.sf(3) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_poisson_ppf() {
        let p = Poisson::new(6.5).unwrap();
        for prob in [0.01, 0.2, 0.5, 0.8, 0.99] {
            let k = p.ppf(prob).unwrap();
            assert!(p.cdf(k) >= prob);
            if k > 0 {
                assert!(p.cdf(k - 1) < prob);
            }
        }
        assert!(p.ppf(1.0).is_err());
    }
}
