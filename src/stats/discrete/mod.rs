//! Discrete probability distributions.

mod binomial;
mod poisson;

pub use binomial::Binomial;
pub use poisson::Poisson;

/// Helper for computing log-binomial coefficients.
pub(crate) fn log_binom(n: u64, k: u64) -> f64 {
    use super::continuous::special::lgamma;

    if k > n {
        return f64::NEG_INFINITY;
    }
    if k == 0 || k == n {
        return 0.0;
    }

    let n_f = n as f64;
    let k_f = k as f64;

    lgamma(n_f + 1.0) - lgamma(k_f + 1.0) - lgamma(n_f - k_f + 1.0)
}
