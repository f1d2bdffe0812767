//! Binomial(n, λ/n) next to Poisson(λ): the Poisson limit of rare events.

use super::density::plot_distribution;
use crate::figure::{ColorRole, Figure, FigureBuilder, Style};
use crate::page::{Page, PageResult, ParamKind, ParamSpec, ParameterSet, Session};
use crate::region::Domain;
use crate::stats::DistributionDescriptor;
use rand::rngs::StdRng;

pub struct BinomialPoisson;

/// `n` must exceed λ so that p = λ/n stays below 1.
fn n_after_lambda(set: &ParameterSet, kind: ParamKind) -> ParamKind {
    match (kind, set.f64("lambda")) {
        (ParamKind::Int { max, .. }, Ok(lambda)) => {
            let min = lambda.floor() as i64 + 1;
            ParamKind::Int {
                min,
                max,
                default: min,
            }
        }
        (kind, _) => kind,
    }
}

/// Largest k shown; the plotted range is `0..max(2λ, 20)` exclusive.
fn k_max(lambda: f64) -> i64 {
    (2.0 * lambda).max(20.0).ceil() as i64 - 1
}

impl Page for BinomialPoisson {
    fn id(&self) -> &'static str {
        "binomial-poisson"
    }

    fn title(&self) -> &'static str {
        "From the binomial to the Poisson distribution"
    }

    fn params(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::float("lambda", "Rate λ", 1.0, 20.0, 1.0).step(0.1),
            ParamSpec::int("n", "Number of Bernoulli trials n", 2, 500, 2)
                .refine(n_after_lambda),
        ]
    }

    fn layout(&self, _params: &ParameterSet) -> FigureBuilder {
        FigureBuilder::new(self.title())
            .size(1400, 600)
            .grid(1, 2)
            .labels("k", "P(X = k)")
    }

    fn plot(
        &self,
        figure: &mut Figure,
        params: &ParameterSet,
        _session: &mut Session,
        _rng: &mut StdRng,
    ) -> PageResult<()> {
        let lambda = params.f64("lambda")?;
        let n = params.i64("n")?;
        let p = lambda / n as f64;

        let binomial = DistributionDescriptor::binomial(n, p)?;
        let poisson = DistributionDescriptor::poisson(lambda)?;
        let domain = Domain::integers(0, k_max(lambda))?;

        let ax = figure.axes(0)?;
        plot_distribution(ax, &binomial, &domain, Style::new(ColorRole::Primary))?;
        let p_text = if p.fract() == 0.0 {
            format!("{}", p)
        } else {
            format!("≈ {:.4}", p)
        };
        ax.set_title(format!("Binomial(n = {}, p = λ/n {})", n, p_text));

        let ax = figure.axes(1)?;
        plot_distribution(ax, &poisson, &domain, Style::new(ColorRole::Secondary))?;
        ax.set_title(format!("Poisson(λ = {})", lambda));
        Ok(())
    }
}
