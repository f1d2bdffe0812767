//! Partition a sampled x-domain into labelled regions for shading.
//!
//! Boundary points always belong to the critical side: a sample equal to a
//! rejection boundary is labelled [`RegionLabel::Rejection`], and a sample
//! equal to an interval bound is [`RegionLabel::Excluded`]. This matches
//! [`CriticalRegion::rejects`], so shaded areas and reported error rates
//! never disagree at the boundary.

use crate::figure::ColorRole;
use crate::stats::{CriticalRegion, DistributionDescriptor, StatsError, StatsResult};
use std::fmt;
use std::ops::Range;

/// Ascending sample points covering a plotting range.
#[derive(Debug, Clone, PartialEq)]
pub struct Domain {
    xs: Vec<f64>,
    discrete: bool,
}

impl Domain {
    /// `n` evenly spaced points from `xmin` to `xmax` inclusive.
    ///
    /// # Errors
    ///
    /// `DomainEmpty` when the range is degenerate, non-finite, or `n < 2`.
    pub fn linspace(xmin: f64, xmax: f64, n: usize) -> StatsResult<Self> {
        if !xmin.is_finite() || !xmax.is_finite() || xmax <= xmin {
            return Err(StatsError::domain_empty(format!(
                "linspace [{}, {}]",
                xmin, xmax
            )));
        }
        if n < 2 {
            return Err(StatsError::domain_empty(format!(
                "linspace with {} samples",
                n
            )));
        }

        let step = (xmax - xmin) / (n - 1) as f64;
        let mut xs: Vec<f64> = (0..n).map(|i| xmin + step * i as f64).collect();
        xs[n - 1] = xmax;
        Ok(Self { xs, discrete: false })
    }

    /// Every integer from `lo` to `hi` inclusive.
    pub fn integers(lo: i64, hi: i64) -> StatsResult<Self> {
        if hi < lo {
            return Err(StatsError::domain_empty(format!("integers [{}, {}]", lo, hi)));
        }
        Ok(Self {
            xs: (lo..=hi).map(|k| k as f64).collect(),
            discrete: true,
        })
    }

    /// Domain covering the display range of `dist`.
    ///
    /// Discrete families get their integer support; continuous ones `n`
    /// evenly spaced points.
    pub fn for_distribution(dist: &DistributionDescriptor, n: usize) -> StatsResult<Self> {
        let (lo, hi) = dist.display_range();
        if dist.is_discrete() {
            Self::integers(lo.floor() as i64, hi.ceil() as i64)
        } else {
            Self::linspace(lo, hi, n)
        }
    }

    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn is_discrete(&self) -> bool {
        self.discrete
    }

    /// Evaluate `f` at every sample point.
    pub fn map<F: Fn(f64) -> f64>(&self, f: F) -> Vec<f64> {
        self.xs.iter().map(|&x| f(x)).collect()
    }
}

/// Label attached to each sample point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionLabel {
    Acceptance,
    Rejection,
    Included,
    Excluded,
}

impl RegionLabel {
    pub fn name(self) -> &'static str {
        match self {
            Self::Acceptance => "acceptance",
            Self::Rejection => "rejection",
            Self::Included => "included",
            Self::Excluded => "excluded",
        }
    }

    pub fn color_role(self) -> ColorRole {
        match self {
            Self::Acceptance => ColorRole::Acceptance,
            Self::Rejection => ColorRole::Rejection,
            Self::Included => ColorRole::Included,
            Self::Excluded => ColorRole::Excluded,
        }
    }
}

impl fmt::Display for RegionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A maximal run of consecutive samples sharing one label.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub label: RegionLabel,
    /// x of the first sample in the run.
    pub start: f64,
    /// x of the last sample in the run.
    pub end: f64,
    /// Sample indices covered.
    pub indices: Range<usize>,
}

/// Label each sample as Rejection (on or beyond a boundary) or Acceptance.
pub fn classify(domain: &Domain, region: &CriticalRegion) -> Vec<RegionLabel> {
    domain
        .xs
        .iter()
        .map(|&x| {
            if region.rejects(x) {
                RegionLabel::Rejection
            } else {
                RegionLabel::Acceptance
            }
        })
        .collect()
}

/// Label each sample as Included (`lo < x < hi`) or Excluded.
///
/// # Errors
///
/// `InvalidParameter` when `hi < lo`.
pub fn classify_interval(domain: &Domain, lo: f64, hi: f64) -> StatsResult<Vec<RegionLabel>> {
    if hi < lo {
        return Err(StatsError::invalid(
            "upper",
            hi,
            "upper bound must not be below lower bound",
        ));
    }
    Ok(domain
        .xs
        .iter()
        .map(|&x| {
            if lo < x && x < hi {
                RegionLabel::Included
            } else {
                RegionLabel::Excluded
            }
        })
        .collect())
}

/// Collapse per-sample labels into contiguous regions.
pub fn regions(domain: &Domain, labels: &[RegionLabel]) -> StatsResult<Vec<Region>> {
    if labels.len() != domain.len() {
        return Err(StatsError::LengthMismatch {
            expected: domain.len(),
            got: labels.len(),
            context: "regions".to_string(),
        });
    }

    let mut out: Vec<Region> = Vec::new();
    for (i, (&x, &label)) in domain.xs.iter().zip(labels).enumerate() {
        match out.last_mut() {
            Some(r) if r.label == label => {
                r.end = x;
                r.indices.end = i + 1;
            }
            _ => out.push(Region {
                label,
                start: x,
                end: x,
                indices: i..i + 1,
            }),
        }
    }
    Ok(out)
}

/// Mask of samples carrying `label`, for `fill_between`.
pub fn mask(labels: &[RegionLabel], label: RegionLabel) -> Vec<bool> {
    labels.iter().map(|&l| l == label).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::Tail;

    #[test]
    fn test_linspace() {
        let d = Domain::linspace(0.0, 1.0, 5).unwrap();
        assert_eq!(d.len(), 5);
        assert_eq!(d.xs()[0], 0.0);
        assert_eq!(d.xs()[4], 1.0);
        assert!((d.xs()[2] - 0.5).abs() < 1e-15);
        assert!(!d.is_discrete());

        assert!(matches!(
            Domain::linspace(1.0, 1.0, 10),
            Err(StatsError::DomainEmpty { .. })
        ));
        assert!(Domain::linspace(2.0, 1.0, 10).is_err());
        assert!(Domain::linspace(0.0, 1.0, 1).is_err());
        assert!(Domain::linspace(0.0, f64::INFINITY, 10).is_err());
    }

    #[test]
    fn test_integers() {
        let d = Domain::integers(0, 4).unwrap();
        assert_eq!(d.xs(), &[0.0, 1.0, 2.0, 3.0, 4.0]);
        assert!(d.is_discrete());
        assert!(Domain::integers(3, 2).is_err());
    }

    #[test]
    fn test_domain_for_binomial_is_support() {
        let b = DistributionDescriptor::binomial(10, 0.4).unwrap();
        let d = Domain::for_distribution(&b, 1000).unwrap();
        assert_eq!(d.len(), 11);
    }

    #[test]
    fn test_boundary_goes_to_rejection() {
        let d = Domain::integers(-3, 3).unwrap();
        let region = CriticalRegion {
            tail: Tail::TwoSided,
            lower: Some(-2.0),
            upper: Some(2.0),
        };
        let labels = classify(&d, &region);
        use RegionLabel::*;
        assert_eq!(
            labels,
            vec![Rejection, Rejection, Acceptance, Acceptance, Acceptance, Rejection, Rejection]
        );

        let right = CriticalRegion {
            tail: Tail::Right,
            lower: None,
            upper: Some(1.0),
        };
        let labels = classify(&d, &right);
        assert_eq!(labels[4], Rejection);
        assert_eq!(labels[3], Acceptance);
        assert_eq!(labels[0], Acceptance);
    }

    #[test]
    fn test_interval_bounds_excluded() {
        let d = Domain::integers(0, 4).unwrap();
        let labels = classify_interval(&d, 1.0, 3.0).unwrap();
        use RegionLabel::*;
        assert_eq!(labels, vec![Excluded, Excluded, Included, Excluded, Excluded]);
        assert!(classify_interval(&d, 3.0, 1.0).is_err());
    }

    #[test]
    fn test_regions_collapse_runs() {
        let d = Domain::integers(0, 5).unwrap();
        let labels = classify_interval(&d, 0.5, 3.5).unwrap();
        let rs = regions(&d, &labels).unwrap();
        assert_eq!(rs.len(), 3);
        assert_eq!(rs[0].label, RegionLabel::Excluded);
        assert_eq!(rs[1].label, RegionLabel::Included);
        assert_eq!((rs[1].start, rs[1].end), (1.0, 3.0));
        assert_eq!(rs[1].indices, 1..4);
        assert_eq!(rs[2].indices, 4..6);

        assert!(regions(&d, &labels[..3]).is_err());
    }

    #[test]
    fn test_mask_and_colors() {
        let labels = [RegionLabel::Acceptance, RegionLabel::Rejection];
        assert_eq!(mask(&labels, RegionLabel::Rejection), vec![false, true]);
        assert_eq!(RegionLabel::Rejection.color_role(), ColorRole::Rejection);
        assert_eq!(RegionLabel::Included.to_string(), "included");
    }
}
