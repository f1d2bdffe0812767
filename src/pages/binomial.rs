//! Probability mass function of the binomial distribution.

use super::density::plot_distribution;
use crate::figure::{ColorRole, Figure, FigureBuilder, Style};
use crate::page::{Page, PageResult, ParamSpec, ParameterSet, Session};
use crate::region::Domain;
use crate::stats::DistributionDescriptor;
use rand::rngs::StdRng;

pub struct Binomial;

impl Page for Binomial {
    fn id(&self) -> &'static str {
        "binomial"
    }

    fn title(&self) -> &'static str {
        "The binomial distribution"
    }

    fn params(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::int("n", "Number of Bernoulli trials n", 5, 100, 20),
            ParamSpec::float("p", "Probability of success p", 0.1, 0.99, 0.5).step(0.01),
        ]
    }

    fn layout(&self, _params: &ParameterSet) -> FigureBuilder {
        FigureBuilder::new(self.title()).labels("Number of successes k", "P(X = k)")
    }

    fn plot(
        &self,
        figure: &mut Figure,
        params: &ParameterSet,
        _session: &mut Session,
        _rng: &mut StdRng,
    ) -> PageResult<()> {
        let n = params.i64("n")?;
        let p = params.f64("p")?;
        let dist = DistributionDescriptor::binomial(n, p)?;
        let domain = Domain::integers(0, n)?;

        let ax = figure.axes(0)?;
        plot_distribution(ax, &dist, &domain, Style::new(ColorRole::Primary))?;
        ax.vline(
            dist.mean(),
            Style::new(ColorRole::Reference)
                .dotted()
                .label(format!("E[X] = np = {:.2}", dist.mean())),
        )
        .set_title(format!("{}", dist));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::Primitive;
    use crate::page::ParamValue;
    use crate::stats::seeded_rng;

    #[test]
    fn test_stems_cover_support() {
        let set = ParameterSet::new()
            .with("n", ParamValue::Int(20))
            .with("p", ParamValue::Float(0.3));
        let mut fig = Binomial.layout(&set).build().unwrap();
        Binomial
            .plot(&mut fig, &set, &mut Session::new(), &mut seeded_rng(None))
            .unwrap();

        match &fig.subplots()[0].primitives()[0] {
            Primitive::Stem { points, .. } => {
                assert_eq!(points.len(), 21);
                let total: f64 = points.iter().map(|p| p.1).sum();
                assert!((total - 1.0).abs() < 1e-10);
                // mode of Binomial(20, 0.3) is 6
                let mode = points
                    .iter()
                    .max_by(|a, b| a.1.total_cmp(&b.1))
                    .map(|p| p.0);
                assert_eq!(mode, Some(6.0));
            }
            other => panic!("expected stems, got {:?}", other),
        }
    }
}
