//! Student's t distribution.

use super::special;
use crate::stats::distribution::{ContinuousDistribution, Distribution, check_probability};
use crate::stats::error::{StatsError, StatsResult};
use std::f64::consts::PI;

/// Student's t distribution.
///
/// The Student's t distribution with ν degrees of freedom has PDF:
///
/// f(x) = Γ((ν+1)/2) / (√(νπ) Γ(ν/2)) (1 + x²/ν)^(-(ν+1)/2)
///
/// As ν → ∞, the t distribution approaches the standard normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StudentT {
    /// Degrees of freedom (ν)
    nu: f64,
    /// Log of normalizing constant
    log_norm: f64,
}

impl StudentT {
    /// Create a new Student's t distribution with ν degrees of freedom.
    ///
    /// # Errors
    ///
    /// Returns an error if ν < 1 or not finite.
    pub fn new(nu: f64) -> StatsResult<Self> {
        if !nu.is_finite() {
            return Err(StatsError::invalid("df", nu, "must be finite"));
        }
        if nu < 1.0 {
            return Err(StatsError::invalid(
                "df",
                nu,
                "degrees of freedom must be at least 1",
            ));
        }

        // log_norm = ln(Γ((ν+1)/2)) - ln(√(νπ)) - ln(Γ(ν/2))
        let log_norm =
            special::lgamma((nu + 1.0) / 2.0) - 0.5 * (nu * PI).ln() - special::lgamma(nu / 2.0);

        Ok(Self { nu, log_norm })
    }

    /// Get the degrees of freedom.
    pub fn df(&self) -> f64 {
        self.nu
    }
}

impl Distribution for StudentT {
    fn mean(&self) -> f64 {
        if self.nu > 1.0 { 0.0 } else { f64::NAN }
    }

    fn var(&self) -> f64 {
        if self.nu > 2.0 {
            self.nu / (self.nu - 2.0)
        } else if self.nu > 1.0 {
            f64::INFINITY
        } else {
            f64::NAN
        }
    }

    fn median(&self) -> f64 {
        0.0
    }

    fn mode(&self) -> f64 {
        0.0
    }

    fn skewness(&self) -> f64 {
        if self.nu > 3.0 { 0.0 } else { f64::NAN }
    }

    fn kurtosis(&self) -> f64 {
        if self.nu > 4.0 {
            6.0 / (self.nu - 4.0)
        } else if self.nu > 2.0 {
            f64::INFINITY
        } else {
            f64::NAN
        }
    }
}

impl ContinuousDistribution for StudentT {
    fn pdf(&self, x: f64) -> f64 {
        self.log_pdf(x).exp()
    }

    fn log_pdf(&self, x: f64) -> f64 {
        self.log_norm - ((self.nu + 1.0) / 2.0) * (1.0 + x * x / self.nu).ln()
    }

    fn cdf(&self, x: f64) -> f64 {
        if x == 0.0 {
            return 0.5;
        }

        // CDF(x) = 1 - 0.5 * I_{ν/(ν+x²)}(ν/2, 1/2) for x > 0, mirrored for x < 0
        let t = self.nu / (self.nu + x * x);
        let beta_inc = special::betainc(self.nu / 2.0, 0.5, t);

        if x > 0.0 {
            1.0 - 0.5 * beta_inc
        } else {
            0.5 * beta_inc
        }
    }

    fn sf(&self, x: f64) -> f64 {
        self.cdf(-x)
    }

    fn ppf(&self, p: f64) -> StatsResult<f64> {
        check_probability(p)?;
        if p == 0.5 {
            return Ok(0.0);
        }

        let (q, sign) = if p > 0.5 {
            (2.0 * (1.0 - p), 1.0)
        } else {
            (2.0 * p, -1.0)
        };

        let t = special::betaincinv(self.nu / 2.0, 0.5, q);
        Ok(sign * (self.nu * (1.0 / t - 1.0)).sqrt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::Normal;

    #[test]
    fn test_student_t_creation() {
        let t = StudentT::new(10.0).unwrap();
        assert!((t.df() - 10.0).abs() < 1e-10);

        assert!(StudentT::new(0.5).is_err());
        assert!(StudentT::new(0.0).is_err());
        assert!(StudentT::new(-1.0).is_err());
        assert!(StudentT::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_student_t_moments() {
        let t = StudentT::new(10.0).unwrap();
        assert!((t.mean() - 0.0).abs() < 1e-10);
        assert!((t.var() - 10.0 / 8.0).abs() < 1e-10);
        assert!((t.kurtosis() - 1.0).abs() < 1e-10);
        assert!(StudentT::new(1.0).unwrap().mean().is_nan());
    }

    #[test]
    fn test_student_t_pdf() {
        let t = StudentT::new(5.0).unwrap();
        for x in [0.5, 1.0, 2.0, 3.0] {
            assert!((t.pdf(x) - t.pdf(-x)).abs() < 1e-10);
        }

        // df = 1 is the standard Cauchy: f(0) = 1/π
        let cauchy = StudentT::new(1.0).unwrap();
        assert!((cauchy.pdf(0.0) - 1.0 / PI).abs() < 1e-10);
    }

    #[test]
    fn test_student_t_heavier_tails_than_normal() {
        let t = StudentT::new(3.0).unwrap();
        let n = Normal::standard();
        assert!(t.pdf(0.0) < n.pdf(0.0));
        assert!(t.pdf(4.0) > n.pdf(4.0));
    }

    #[test]
    fn test_student_t_cdf() {
        let t = StudentT::new(10.0).unwrap();
        assert!((t.cdf(0.0) - 0.5).abs() < 1e-10);
        for x in [0.5, 1.0, 2.0] {
            assert!((t.cdf(-x) + t.cdf(x) - 1.0).abs() < 1e-10);
        }
    }

    #[test]
    fn test_student_t_ppf() {
        let t = StudentT::new(10.0).unwrap();
        assert!(t.ppf(0.5).unwrap().abs() < 1e-10);

        for p in [0.1, 0.25, 0.75, 0.9, 0.95, 0.99] {
            let x = t.ppf(p).unwrap();
            assert!(
                (t.cdf(x) - p).abs() < 1e-4,
                "Roundtrip failed for p={}: cdf(ppf(p)) = {}",
                p,
                t.cdf(x)
            );
        }

        // t_{0.975}(10) ≈ 2.228
        assert!((t.ppf(0.975).unwrap() - 2.228).abs() < 0.002);
        // t_{0.975}(1) ≈ 12.706
        let t1 = StudentT::new(1.0).unwrap();
        assert!((t1.ppf(0.975).unwrap() - 12.706).abs() < 0.01);

        assert!(t.ppf(0.0).is_err());
        assert!(t.ppf(1.0).is_err());
    }
}
