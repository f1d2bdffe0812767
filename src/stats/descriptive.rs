//! Summary statistics over plain slices.

use crate::stats::error::{StatsError, StatsResult};

/// Arithmetic mean.
pub fn mean(values: &[f64]) -> StatsResult<f64> {
    if values.is_empty() {
        return Err(StatsError::InsufficientData {
            required: 1,
            got: 0,
            context: "mean".to_string(),
        });
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Standard deviation with `ddof` delta degrees of freedom.
///
/// `ddof = 0` gives the population value, `ddof = 1` the sample value.
pub fn std(values: &[f64], ddof: usize) -> StatsResult<f64> {
    if values.len() <= ddof {
        return Err(StatsError::InsufficientData {
            required: ddof + 1,
            got: values.len(),
            context: "std".to_string(),
        });
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    Ok((ss / (values.len() - ddof) as f64).sqrt())
}

/// Equal-width histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `bins + 1` ascending bin edges.
    pub edges: Vec<f64>,
    /// Count per bin.
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bin width.
    pub fn bin_width(&self) -> f64 {
        match (self.edges.first(), self.edges.last()) {
            (Some(lo), Some(hi)) if !self.counts.is_empty() => (hi - lo) / self.counts.len() as f64,
            _ => 0.0,
        }
    }

    /// Total number of binned values.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Bin `values` into `bins` equal-width bins spanning their range.
///
/// The last bin is closed on the right. A zero-width range is widened by 0.5
/// on each side.
pub fn histogram(values: &[f64], bins: usize) -> StatsResult<Histogram> {
    if bins == 0 {
        return Err(StatsError::invalid("bins", 0.0, "need at least one bin"));
    }
    if values.is_empty() {
        return Err(StatsError::InsufficientData {
            required: 1,
            got: 0,
            context: "histogram".to_string(),
        });
    }

    if values.iter().any(|v| !v.is_finite()) {
        return Err(StatsError::NumericalError {
            message: "histogram input contains non-finite values".to_string(),
        });
    }
    let mut lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }

    let width = (hi - lo) / bins as f64;
    let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();
    let mut counts = vec![0usize; bins];
    for &v in values {
        let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }

    Ok(Histogram { edges, counts })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_std() {
        let xs = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((mean(&xs).unwrap() - 5.0).abs() < 1e-12);
        assert!((std(&xs, 0).unwrap() - 2.0).abs() < 1e-12);
        assert!((std(&xs, 1).unwrap() - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
        assert!(mean(&[]).is_err());
        assert!(std(&[1.0], 1).is_err());
    }

    #[test]
    fn test_histogram_counts() {
        let xs = [0.0, 0.1, 0.5, 0.9, 1.0];
        let h = histogram(&xs, 2).unwrap();
        assert_eq!(h.counts, vec![2, 3]);
        assert_eq!(h.edges.len(), 3);
        assert_eq!(h.total(), 5);
        assert!((h.bin_width() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_histogram_constant_input() {
        let h = histogram(&[3.0, 3.0, 3.0], 4).unwrap();
        assert!((h.edges[0] - 2.5).abs() < 1e-12);
        assert!((h.edges[4] - 3.5).abs() < 1e-12);
        assert_eq!(h.total(), 3);
    }

    #[test]
    fn test_histogram_rejects_bad_input() {
        assert!(histogram(&[1.0], 0).is_err());
        assert!(histogram(&[], 3).is_err());
        assert!(histogram(&[1.0, f64::NAN], 3).is_err());
    }
}
