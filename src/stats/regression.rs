//! Ordinary least squares fit of a straight line through clicked points.
//!
//! Fits y = slope·x + intercept. Alongside the coefficients the fit reports
//! the correlation coefficient, the two-sided p-value for a zero slope and the
//! standard errors of both coefficients.

use crate::stats::continuous::StudentT;
use crate::stats::distribution::ContinuousDistribution;
use crate::stats::error::{StatsError, StatsResult};

/// Result of a simple linear regression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinregressResult {
    /// Slope of the fitted line.
    pub slope: f64,
    /// Intercept of the fitted line.
    pub intercept: f64,
    /// Pearson correlation coefficient.
    pub rvalue: f64,
    /// Two-sided p-value for H0: slope = 0. NaN with only two points.
    pub pvalue: f64,
    /// Standard error of the slope. NaN with only two points.
    pub stderr: f64,
    /// Standard error of the intercept. NaN with only two points.
    pub intercept_stderr: f64,
}

impl LinregressResult {
    /// Value of the fitted line at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Least-squares line through `points`.
///
/// # Errors
///
/// `InsufficientData` with fewer than two points; `DomainEmpty` when every
/// point shares the same x, since the slope is then undefined.
pub fn linear_fit(points: &[(f64, f64)]) -> StatsResult<LinregressResult> {
    let n = points.len();
    if n < 2 {
        return Err(StatsError::InsufficientData {
            required: 2,
            got: n,
            context: "linear_fit".to_string(),
        });
    }

    let n_f = n as f64;
    let mean_x = points.iter().map(|p| p.0).sum::<f64>() / n_f;
    let mean_y = points.iter().map(|p| p.1).sum::<f64>() / n_f;

    let (mut ss_xy, mut ss_xx, mut ss_yy) = (0.0, 0.0, 0.0);
    for &(x, y) in points {
        let dx = x - mean_x;
        let dy = y - mean_y;
        ss_xy += dx * dy;
        ss_xx += dx * dx;
        ss_yy += dy * dy;
    }

    if ss_xx == 0.0 {
        return Err(StatsError::domain_empty(
            "linear_fit: all points share the same x",
        ));
    }

    let slope = ss_xy / ss_xx;
    let intercept = mean_y - slope * mean_x;

    let rvalue = if ss_yy > 0.0 {
        (ss_xy / (ss_xx * ss_yy).sqrt()).clamp(-1.0, 1.0)
    } else {
        1.0
    };

    let df = n_f - 2.0;
    if df < 1.0 {
        return Ok(LinregressResult {
            slope,
            intercept,
            rvalue,
            pvalue: f64::NAN,
            stderr: f64::NAN,
            intercept_stderr: f64::NAN,
        });
    }

    let ss_res: f64 = points
        .iter()
        .map(|&(x, y)| {
            let r = y - (slope * x + intercept);
            r * r
        })
        .sum();

    let mse = ss_res / df;
    let std_err = (mse / ss_xx).sqrt();

    let pvalue = if std_err == 0.0 {
        0.0
    } else {
        let t_stat = slope / std_err;
        2.0 * StudentT::new(df)?.sf(t_stat.abs())
    };
    let intercept_stderr = (mse * (1.0 / n_f + mean_x * mean_x / ss_xx)).sqrt();

    Ok(LinregressResult {
        slope,
        intercept,
        rvalue,
        pvalue,
        stderr: std_err,
        intercept_stderr,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_line() {
        let fit = linear_fit(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]).unwrap();
        assert!((fit.slope - 1.0).abs() < 1e-10);
        assert!(fit.intercept.abs() < 1e-10);
        assert!((fit.rvalue - 1.0).abs() < 1e-10);
        assert!(fit.stderr.abs() < 1e-10);
        assert!((fit.predict(10.0) - 10.0).abs() < 1e-10);
    }

    #[test]
    fn test_two_points_have_no_errors() {
        let fit = linear_fit(&[(1.0, 3.0), (3.0, 7.0)]).unwrap();
        assert!((fit.slope - 2.0).abs() < 1e-10);
        assert!((fit.intercept - 1.0).abs() < 1e-10);
        assert!(fit.stderr.is_nan());
        assert!(fit.pvalue.is_nan());
    }

    #[test]
    fn test_noisy_fit() {
        // y = 2x + 1 with alternating ±0.5 noise
        let points: Vec<(f64, f64)> = (0..10)
            .map(|i| {
                let x = i as f64;
                let noise = if i % 2 == 0 { 0.5 } else { -0.5 };
                (x, 2.0 * x + 1.0 + noise)
            })
            .collect();
        let fit = linear_fit(&points).unwrap();
        assert!((fit.slope - 2.0).abs() < 0.1);
        assert!((fit.intercept - 1.0).abs() < 0.5);
        assert!(fit.rvalue > 0.99);
        assert!(fit.pvalue < 1e-6);
        assert!(fit.stderr > 0.0);
        assert!(fit.intercept_stderr > fit.stderr);
    }

    #[test]
    fn test_standard_errors_by_hand() {
        // x = 0..4, y = 1, 2, 2, 4, 5: slope 1, intercept 0.8, SSE 0.8
        let points = [(0.0, 1.0), (1.0, 2.0), (2.0, 2.0), (3.0, 4.0), (4.0, 5.0)];
        let fit = linear_fit(&points).unwrap();
        assert!((fit.slope - 1.0).abs() < 1e-12);
        assert!((fit.intercept - 0.8).abs() < 1e-12);

        // s² = 0.8 / 3, Sxx = 10, x̄ = 2
        let s2 = 0.8 / 3.0;
        assert!((fit.stderr - (s2 / 10.0f64).sqrt()).abs() < 1e-12);
        let expected = (s2 * (1.0 / 5.0 + 4.0 / 10.0f64)).sqrt();
        assert!((fit.intercept_stderr - expected).abs() < 1e-12);
        assert!((fit.intercept_stderr - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(matches!(
            linear_fit(&[]),
            Err(StatsError::InsufficientData { required: 2, got: 0, .. })
        ));
        assert!(matches!(
            linear_fit(&[(1.0, 2.0)]),
            Err(StatsError::InsufficientData { got: 1, .. })
        ));
        assert!(matches!(
            linear_fit(&[(1.0, 2.0), (1.0, 5.0), (1.0, -1.0)]),
            Err(StatsError::DomainEmpty { .. })
        ));
    }
}
