//! Uniform distribution.

use crate::stats::distribution::{ContinuousDistribution, Distribution, check_probability};
use crate::stats::error::{StatsError, StatsResult};

/// Continuous uniform distribution on [a, b].
///
/// f(x) = 1 / (b - a)  for a ≤ x ≤ b
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Uniform {
    /// Lower bound
    a: f64,
    /// Upper bound
    b: f64,
    /// Range (b - a)
    range: f64,
}

impl Uniform {
    /// Create a new uniform distribution on [a, b].
    ///
    /// # Errors
    ///
    /// Returns an error if a >= b or if bounds are not finite.
    pub fn new(a: f64, b: f64) -> StatsResult<Self> {
        if !a.is_finite() {
            return Err(StatsError::invalid("a", a, "must be finite"));
        }
        if !b.is_finite() {
            return Err(StatsError::invalid("b", b, "must be finite"));
        }
        if a >= b {
            return Err(StatsError::InvalidParameter {
                name: "a, b".to_string(),
                value: a,
                reason: format!("a must be less than b (got a={}, b={})", a, b),
            });
        }
        Ok(Self { a, b, range: b - a })
    }

    /// Get the lower bound.
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Get the upper bound.
    pub fn b(&self) -> f64 {
        self.b
    }
}

impl Distribution for Uniform {
    fn mean(&self) -> f64 {
        (self.a + self.b) / 2.0
    }

    fn var(&self) -> f64 {
        self.range * self.range / 12.0
    }

    fn median(&self) -> f64 {
        (self.a + self.b) / 2.0
    }

    fn mode(&self) -> f64 {
        // Any value in [a, b] is a mode; return midpoint
        (self.a + self.b) / 2.0
    }

    fn skewness(&self) -> f64 {
        0.0
    }

    fn kurtosis(&self) -> f64 {
        -6.0 / 5.0
    }
}

impl ContinuousDistribution for Uniform {
    fn pdf(&self, x: f64) -> f64 {
        if x < self.a || x > self.b {
            0.0
        } else {
            1.0 / self.range
        }
    }

    fn cdf(&self, x: f64) -> f64 {
        if x < self.a {
            0.0
        } else if x > self.b {
            1.0
        } else {
            (x - self.a) / self.range
        }
    }

    fn ppf(&self, p: f64) -> StatsResult<f64> {
        check_probability(p)?;
        Ok(self.a + p * self.range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_creation() {
        let u = Uniform::new(-5.0, 5.0).unwrap();
        assert!((u.a() + 5.0).abs() < 1e-10);
        assert!((u.b() - 5.0).abs() < 1e-10);

        assert!(Uniform::new(1.0, 1.0).is_err());
        assert!(Uniform::new(2.0, 1.0).is_err());
        assert!(Uniform::new(f64::NEG_INFINITY, 1.0).is_err());
    }

    #[test]
    fn test_uniform_pdf_cdf() {
        let u = Uniform::new(2.0, 6.0).unwrap();
        assert!((u.pdf(3.0) - 0.25).abs() < 1e-10);
        assert_eq!(u.pdf(7.0), 0.0);
        assert!((u.cdf(4.0) - 0.5).abs() < 1e-10);
        assert_eq!(u.cdf(1.0), 0.0);
        assert_eq!(u.cdf(9.0), 1.0);
        assert!((u.ppf(0.25).unwrap() - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_uniform_moments() {
        let u = Uniform::new(0.0, 12.0).unwrap();
        assert!((u.mean() - 6.0).abs() < 1e-10);
        assert!((u.var() - 12.0).abs() < 1e-10);
    }
}
