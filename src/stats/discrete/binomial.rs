//! Binomial distribution.

use super::log_binom;
use crate::stats::continuous::special;
use crate::stats::distribution::{DiscreteDistribution, Distribution, check_probability};
use crate::stats::error::{StatsError, StatsResult};

/// Binomial distribution.
///
/// The binomial distribution models the number of successes in n independent
/// Bernoulli trials with success probability p.
///
/// P(X = k) = C(n, k) p^k (1-p)^(n-k)
///
/// # Examples
///
/// ```ignore
/// use statviz::stats::{Binomial, DiscreteDistribution};
///
/// let b = Binomial::new(20, 0.5).unwrap();
/// println!("P(X = 10) = {}", b.pmf(10));
/// println!("P(X ≤ 7) = {}", b.cdf(7));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Binomial {
    /// Number of trials
    n: u64,
    /// Success probability
    p: f64,
    /// Failure probability (1 - p)
    q: f64,
}

impl Binomial {
    /// Create a new binomial distribution.
    ///
    /// # Errors
    ///
    /// Returns an error if `p` is outside [0, 1].
    pub fn new(n: u64, p: f64) -> StatsResult<Self> {
        if !(0.0..=1.0).contains(&p) {
            return Err(StatsError::invalid("p", p, "probability must be in [0, 1]"));
        }
        Ok(Self { n, p, q: 1.0 - p })
    }

    /// Get the number of trials.
    pub fn n(&self) -> u64 {
        self.n
    }

    /// Get the success probability.
    pub fn p(&self) -> f64 {
        self.p
    }
}

impl Distribution for Binomial {
    fn mean(&self) -> f64 {
        self.n as f64 * self.p
    }

    fn var(&self) -> f64 {
        self.n as f64 * self.p * self.q
    }

    fn median(&self) -> f64 {
        (self.n as f64 * self.p).floor()
    }

    fn mode(&self) -> f64 {
        ((self.n + 1) as f64 * self.p).floor().min(self.n as f64)
    }

    fn skewness(&self) -> f64 {
        if self.var() == 0.0 {
            return 0.0;
        }
        (self.q - self.p) / self.var().sqrt()
    }

    fn kurtosis(&self) -> f64 {
        if self.var() == 0.0 {
            return 0.0;
        }
        (1.0 - 6.0 * self.p * self.q) / self.var()
    }
}

impl DiscreteDistribution for Binomial {
    fn pmf(&self, k: u64) -> f64 {
        if k > self.n {
            return 0.0;
        }
        if self.p == 0.0 {
            return if k == 0 { 1.0 } else { 0.0 };
        }
        if self.p == 1.0 {
            return if k == self.n { 1.0 } else { 0.0 };
        }

        self.log_pmf(k).exp()
    }

    fn log_pmf(&self, k: u64) -> f64 {
        if k > self.n {
            return f64::NEG_INFINITY;
        }
        if self.p == 0.0 {
            return if k == 0 { 0.0 } else { f64::NEG_INFINITY };
        }
        if self.p == 1.0 {
            return if k == self.n { 0.0 } else { f64::NEG_INFINITY };
        }

        let k_f = k as f64;
        let n_f = self.n as f64;

        log_binom(self.n, k) + k_f * self.p.ln() + (n_f - k_f) * self.q.ln()
    }

    fn cdf(&self, k: u64) -> f64 {
        if k >= self.n || self.p == 0.0 {
            return 1.0;
        }
        if self.p == 1.0 {
            return 0.0;
        }

        // CDF = 1 - I_p(k+1, n-k)
        1.0 - special::betainc((k + 1) as f64, (self.n - k) as f64, self.p)
    }

    fn sf(&self, k: u64) -> f64 {
        if k >= self.n || self.p == 0.0 {
            return 0.0;
        }
        if self.p == 1.0 {
            return 1.0;
        }

        special::betainc((k + 1) as f64, (self.n - k) as f64, self.p)
    }

    fn ppf(&self, prob: f64) -> StatsResult<u64> {
        check_probability(prob)?;

        // Binary search for smallest k with CDF(k) >= prob
        let mut lo = 0u64;
        let mut hi = self.n;

        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if self.cdf(mid) < prob {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }

        Ok(lo)
    }
}
