//! The concrete visualisation pages.
//!
//! | id | shows |
//! |----|-------|
//! | `hypothesis-testing` | H0/H1 sampling distributions, α and β areas |
//! | `confidence-intervals` | coverage of repeated-sample intervals |
//! | `interval-width` | how σ, n and α set the bounds of one interval |
//! | `binomial` | binomial mass function |
//! | `binomial-poisson` | Binomial(n, λ/n) next to Poisson(λ) |
//! | `chi-squared` | χ² density with a shaded interval |
//! | `student-t` | N(0, 1) against t(df) |
//! | `central-limit` | histogram of simulated sample means |
//! | `regression` | least-squares line through session points |

mod binomial;
mod binomial_poisson;
mod central_limit;
mod chi_squared;
mod confidence_intervals;
pub mod density;
mod hypothesis_testing;
mod interval_width;
mod regression;
mod student_t;

pub use binomial::Binomial;
pub use binomial_poisson::BinomialPoisson;
pub use central_limit::CentralLimit;
pub use chi_squared::ChiSquared;
pub use confidence_intervals::ConfidenceIntervals;
pub use hypothesis_testing::HypothesisTesting;
pub use interval_width::IntervalWidth;
pub use regression::Regression;
pub use student_t::StudentT;

use crate::page::{Page, PageError, PageResult};

/// Every page, in menu order.
pub fn all_pages() -> Vec<Box<dyn Page>> {
    vec![
        Box::new(HypothesisTesting),
        Box::new(ConfidenceIntervals),
        Box::new(IntervalWidth),
        Box::new(Binomial),
        Box::new(BinomialPoisson),
        Box::new(ChiSquared),
        Box::new(StudentT),
        Box::new(CentralLimit),
        Box::new(Regression),
    ]
}

/// Look a page up by id.
pub fn find(id: &str) -> PageResult<Box<dyn Page>> {
    all_pages()
        .into_iter()
        .find(|p| p.id() == id)
        .ok_or_else(|| PageError::UnknownPage(id.to_string()))
}
