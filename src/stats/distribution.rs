//! Distribution traits shared by all continuous and discrete families.

use crate::stats::error::{StatsError, StatsResult};

/// Summary moments common to every distribution.
pub trait Distribution {
    /// Mean of the distribution.
    fn mean(&self) -> f64;

    /// Variance of the distribution.
    fn var(&self) -> f64;

    /// Standard deviation.
    fn std(&self) -> f64 {
        self.var().sqrt()
    }

    /// Median of the distribution.
    fn median(&self) -> f64;

    /// Mode of the distribution.
    fn mode(&self) -> f64;

    /// Skewness.
    fn skewness(&self) -> f64;

    /// Excess kurtosis.
    fn kurtosis(&self) -> f64;
}

/// A distribution over the real line with a density.
pub trait ContinuousDistribution: Distribution {
    /// Probability density function.
    fn pdf(&self, x: f64) -> f64;

    /// Natural log of the density.
    fn log_pdf(&self, x: f64) -> f64 {
        self.pdf(x).ln()
    }

    /// Cumulative distribution function P(X ≤ x).
    fn cdf(&self, x: f64) -> f64;

    /// Survival function P(X > x).
    fn sf(&self, x: f64) -> f64 {
        1.0 - self.cdf(x)
    }

    /// Percent point function (inverse CDF) for `p` in (0, 1).
    fn ppf(&self, p: f64) -> StatsResult<f64>;

    /// Inverse survival function.
    fn isf(&self, p: f64) -> StatsResult<f64> {
        check_probability(p)?;
        self.ppf(1.0 - p)
    }

    /// Central interval containing `confidence` of the mass.
    fn interval(&self, confidence: f64) -> StatsResult<(f64, f64)> {
        check_probability(confidence)?;
        let tail = (1.0 - confidence) / 2.0;
        Ok((self.ppf(tail)?, self.ppf(1.0 - tail)?))
    }
}

/// A distribution over the non-negative integers.
pub trait DiscreteDistribution: Distribution {
    /// Probability mass function P(X = k).
    fn pmf(&self, k: u64) -> f64;

    /// Natural log of the mass.
    fn log_pmf(&self, k: u64) -> f64 {
        self.pmf(k).ln()
    }

    /// Cumulative distribution function P(X ≤ k).
    fn cdf(&self, k: u64) -> f64;

    /// Survival function P(X > k).
    fn sf(&self, k: u64) -> f64 {
        1.0 - self.cdf(k)
    }

    /// Smallest `k` with `cdf(k) >= p`, for `p` in (0, 1).
    fn ppf(&self, p: f64) -> StatsResult<u64>;
}

/// Reject probabilities outside the open unit interval.
///
/// Quantiles at exactly 0 or 1 are infinite for unbounded families, so the
/// input layer is expected to exclude them.
pub(crate) fn check_probability(p: f64) -> StatsResult<()> {
    if p > 0.0 && p < 1.0 {
        Ok(())
    } else {
        Err(StatsError::InvalidProbability { value: p })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_probability() {
        assert!(check_probability(0.5).is_ok());
        assert!(check_probability(1e-12).is_ok());
        assert!(check_probability(0.0).is_err());
        assert!(check_probability(1.0).is_err());
        assert!(check_probability(-0.1).is_err());
        assert!(check_probability(f64::NAN).is_err());
    }
}
