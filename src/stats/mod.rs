//! Distribution math behind every page.
//!
//! # Distributions
//!
//! Scalar distributions implement [`Distribution`] plus either
//! [`ContinuousDistribution`] or [`DiscreteDistribution`]:
//!
//! ```ignore
//! use statviz::stats::{Normal, ContinuousDistribution};
//!
//! let n = Normal::standard();
//! let p = n.cdf(1.96);
//! ```
//!
//! Pages work through [`DistributionDescriptor`], a tagged union over the
//! supported families, so one drawing routine serves all of them:
//!
//! ```ignore
//! use statviz::stats::{DistributionDescriptor, Tail, critical_region};
//!
//! let chi2 = DistributionDescriptor::chi_squared(5.0)?;
//! let region = critical_region(&chi2, 0.05, Tail::Right)?;
//! assert!((region.upper.unwrap() - 11.07).abs() < 1e-2);
//! ```
//!
//! # Inference
//!
//! [`critical_region`], [`type2_error`], [`p_value`] and
//! [`confidence_interval`] derive the closed-form quantities the pages shade
//! and annotate. [`sample_means`] and [`coverage`] are the Monte-Carlo parts.

mod continuous;
mod descriptive;
mod descriptor;
mod discrete;
mod distribution;
mod error;
mod inference;
mod regression;
mod sampling;

pub use distribution::{ContinuousDistribution, DiscreteDistribution, Distribution};
pub use error::{StatsError, StatsResult};

pub use continuous::{ChiSquared, Exponential, Gamma, Normal, StudentT, Uniform};
pub use discrete::{Binomial, Poisson};

pub use descriptive::{Histogram, histogram, mean, std};
pub use descriptor::{DistributionDescriptor, Family, cdf, density, quantile};
pub use inference::{
    ConfidenceInterval, CoverageRun, CoverageSample, CriticalRegion, ErrorRates, Tail,
    confidence_interval, coverage, critical_region, p_value, type2_error,
};
pub use regression::{LinregressResult, linear_fit};
pub use sampling::{sample, sample_gamma, sample_means, sample_standard_normal, seeded_rng};
