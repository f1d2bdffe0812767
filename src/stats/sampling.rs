//! Pseudorandom draws from the supported families.
//!
//! All generators take `&mut R where R: Rng + ?Sized`, so callers pick the
//! source: a seeded [`StdRng`] for reproducible pages and tests, or
//! [`rand::rng`] for fresh draws.

use crate::stats::descriptor::DistributionDescriptor;
use crate::stats::distribution::DiscreteDistribution;
use crate::stats::error::{StatsError, StatsResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

/// Poisson rates at or above this switch from multiplication to inversion.
const POISSON_INVERSION_THRESHOLD: f64 = 30.0;

/// Build the generator used for one page run.
///
/// A fixed seed gives identical figures across runs.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// One N(0, 1) draw via Box–Muller.
#[inline]
pub fn sample_standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // u1 in (0, 1) keeps the log finite
    let u1: f64 = rng.random::<f64>().max(f64::MIN_POSITIVE);
    let u2: f64 = rng.random::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

/// One Γ(shape, scale) draw via Marsaglia–Tsang. Requires shape, scale > 0.
pub fn sample_gamma<R: Rng + ?Sized>(rng: &mut R, shape: f64, scale: f64) -> f64 {
    if shape < 1.0 {
        let u: f64 = rng.random::<f64>();
        return sample_gamma(rng, shape + 1.0, scale) * u.powf(1.0 / shape);
    }

    let d = shape - 1.0 / 3.0;
    let c = 1.0 / (9.0 * d).sqrt();

    loop {
        let x = sample_standard_normal(rng);
        let one_plus_cx = 1.0 + c * x;
        if one_plus_cx <= 0.0 {
            continue;
        }
        let v = one_plus_cx * one_plus_cx * one_plus_cx;
        let u: f64 = rng.random::<f64>();

        if u < 1.0 - 0.0331 * (x * x) * (x * x) {
            return d * v * scale;
        }
        if u.ln() < 0.5 * x * x + d * (1.0 - v + v.ln()) {
            return d * v * scale;
        }
    }
}

fn sample_poisson<R: Rng + ?Sized>(rng: &mut R, dist: &crate::stats::Poisson) -> f64 {
    let lambda = dist.lambda();
    if lambda == 0.0 {
        return 0.0;
    }
    if lambda < POISSON_INVERSION_THRESHOLD {
        // Knuth: count uniforms until their product drops below e^-λ
        let limit = (-lambda).exp();
        let mut k = 0u64;
        let mut prod: f64 = rng.random::<f64>();
        while prod > limit {
            k += 1;
            prod *= rng.random::<f64>();
        }
        return k as f64;
    }
    let u = rng.random::<f64>().clamp(f64::MIN_POSITIVE, 1.0 - f64::EPSILON);
    match dist.ppf(u) {
        Ok(k) => k as f64,
        Err(_) => lambda.round(),
    }
}

impl DistributionDescriptor {
    /// Draw one value.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            Self::Normal(n) => n.mu() + n.sigma() * sample_standard_normal(rng),
            Self::StudentT(t) => {
                let z = sample_standard_normal(rng);
                let chi2 = sample_gamma(rng, 0.5 * t.df(), 2.0);
                z / (chi2 / t.df()).sqrt()
            }
            Self::ChiSquared(c) => sample_gamma(rng, 0.5 * c.df(), 2.0),
            Self::Binomial(b) => {
                let p = b.p();
                (0..b.n()).filter(|_| rng.random::<f64>() < p).count() as f64
            }
            Self::Poisson(p) => sample_poisson(rng, p),
            Self::Uniform(u) => u.a() + (u.b() - u.a()) * rng.random::<f64>(),
            Self::Exponential(e) => {
                let u: f64 = rng.random::<f64>();
                -(-u).ln_1p() / e.rate()
            }
        }
    }
}

/// `n` independent draws from `dist`.
pub fn sample<R: Rng + ?Sized>(dist: &DistributionDescriptor, n: usize, rng: &mut R) -> Vec<f64> {
    (0..n).map(|_| dist.sample(rng)).collect()
}

/// Means of `n_samples` independent samples, each of size `sample_size`.
///
/// # Errors
///
/// Returns `InvalidParameter` when either count is zero.
pub fn sample_means<R: Rng + ?Sized>(
    dist: &DistributionDescriptor,
    sample_size: usize,
    n_samples: usize,
    rng: &mut R,
) -> StatsResult<Vec<f64>> {
    if sample_size == 0 {
        return Err(StatsError::invalid(
            "sample_size",
            0.0,
            "each sample needs at least one draw",
        ));
    }
    if n_samples == 0 {
        return Err(StatsError::invalid(
            "n_samples",
            0.0,
            "need at least one sample",
        ));
    }

    let size = sample_size as f64;
    let means = (0..n_samples)
        .map(|_| (0..sample_size).map(|_| dist.sample(rng)).sum::<f64>() / size)
        .collect();
    Ok(means)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::descriptive::{mean, std};

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let dist = DistributionDescriptor::normal(0.0, 1.0).unwrap();
        let a = sample(&dist, 16, &mut seeded_rng(Some(7)));
        let b = sample(&dist, 16, &mut seeded_rng(Some(7)));
        assert_eq!(a, b);
    }

    #[test]
    fn test_normal_draws_match_moments() {
        let dist = DistributionDescriptor::normal(100.0, 15.0).unwrap();
        let xs = sample(&dist, 20_000, &mut seeded_rng(Some(1)));
        assert!((mean(&xs).unwrap() - 100.0).abs() < 0.5);
        assert!((std(&xs, 1).unwrap() - 15.0).abs() < 0.5);
    }

    #[test]
    fn test_gamma_based_draws_match_moments() {
        let mut rng = seeded_rng(Some(2));
        let chi2 = DistributionDescriptor::chi_squared(5.0).unwrap();
        let xs = sample(&chi2, 20_000, &mut rng);
        assert!((mean(&xs).unwrap() - 5.0).abs() < 0.15);
        assert!(xs.iter().all(|&x| x > 0.0));

        let small_shape: Vec<f64> = (0..20_000).map(|_| sample_gamma(&mut rng, 0.5, 1.0)).collect();
        assert!((mean(&small_shape).unwrap() - 0.5).abs() < 0.05);
    }

    #[test]
    fn test_discrete_draws_are_counts() {
        let mut rng = seeded_rng(Some(3));
        let binom = DistributionDescriptor::binomial(10, 0.3).unwrap();
        let pois = DistributionDescriptor::poisson(4.0).unwrap();
        let big_pois = DistributionDescriptor::poisson(50.0).unwrap();

        let b = sample(&binom, 5_000, &mut rng);
        assert!(b.iter().all(|&x| x.fract() == 0.0 && (0.0..=10.0).contains(&x)));
        assert!((mean(&b).unwrap() - 3.0).abs() < 0.1);

        let p = sample(&pois, 5_000, &mut rng);
        assert!(p.iter().all(|&x| x.fract() == 0.0 && x >= 0.0));
        assert!((mean(&p).unwrap() - 4.0).abs() < 0.15);

        let q = sample(&big_pois, 5_000, &mut rng);
        assert!((mean(&q).unwrap() - 50.0).abs() < 0.5);

        let zero = DistributionDescriptor::poisson(0.0).unwrap();
        assert!(sample(&zero, 10, &mut rng).iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_sample_means_rejects_empty_counts() {
        let dist = DistributionDescriptor::uniform(0.0, 1.0).unwrap();
        let mut rng = seeded_rng(Some(4));
        assert!(matches!(
            sample_means(&dist, 0, 10, &mut rng),
            Err(StatsError::InvalidParameter { .. })
        ));
        assert!(matches!(
            sample_means(&dist, 10, 0, &mut rng),
            Err(StatsError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_sample_means_follow_clt() {
        let dist = DistributionDescriptor::normal(0.0, 1.0).unwrap();
        let mut rng = seeded_rng(Some(42));
        let means = sample_means(&dist, 1000, 5000, &mut rng).unwrap();
        let expected_std = 1.0 / 1000f64.sqrt();
        assert!(mean(&means).unwrap().abs() < 0.05);
        assert!((std(&means, 1).unwrap() - expected_std).abs() < 0.05);
    }

    #[test]
    fn test_larger_samples_shrink_spread() {
        let dist = DistributionDescriptor::exponential(1.0).unwrap();
        let mut rng = seeded_rng(Some(9));
        let small = sample_means(&dist, 5, 2000, &mut rng).unwrap();
        let large = sample_means(&dist, 200, 2000, &mut rng).unwrap();
        assert!(std(&large, 1).unwrap() < std(&small, 1).unwrap());
    }
}
