//! Central limit theorem: the distribution of sample means.

use crate::figure::{ColorRole, Figure, FigureBuilder, Style};
use crate::page::{Page, PageError, PageResult, ParamSpec, ParameterSet, Session};
use crate::region::Domain;
use crate::stats::{self, DistributionDescriptor, Family, histogram, sample_means};
use rand::rngs::StdRng;
use tracing::debug;

const BINS: usize = 30;

const EXPLANATION: &str = "\
Each bar counts how many of the simulated samples had their mean in that \
bin. Whatever the shape of the population, the histogram of sample means \
approaches a normal curve centred on the population mean μ with standard \
deviation σ/√n as the sample size n grows. The dark curve is that normal \
approximation, scaled to the number of samples.

Skewed populations such as the exponential need a larger n before the \
approximation is good; for a normal population it is exact for every n.";

pub struct CentralLimit;

fn population(params: &ParameterSet) -> PageResult<DistributionDescriptor> {
    let family = params.choice("family")?;
    let dist = match Family::parse(family) {
        Some(Family::Normal) => {
            DistributionDescriptor::normal(params.f64("mu")?, params.f64("sigma")?)?
        }
        Some(Family::Uniform) => DistributionDescriptor::uniform(params.f64("a")?, params.f64("b")?)?,
        Some(Family::Exponential) => DistributionDescriptor::exponential(params.f64("rate")?)?,
        Some(Family::Binomial) => {
            DistributionDescriptor::binomial(params.i64("trials")?, params.f64("p")?)?
        }
        Some(Family::Poisson) => DistributionDescriptor::poisson(params.f64("rate")?)?,
        _ => {
            return Err(PageError::Validation {
                name: "family".to_string(),
                message: format!("'{}' is not available here", family),
            });
        }
    };
    Ok(dist)
}

impl Page for CentralLimit {
    fn id(&self) -> &'static str {
        "central-limit"
    }

    fn title(&self) -> &'static str {
        "The central limit theorem"
    }

    fn params(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::choice(
                "family",
                "Population distribution",
                &["normal", "uniform", "exponential", "binomial", "poisson"],
                "normal",
            ),
            ParamSpec::int("sample_size", "Sample size n", 1, 500, 30),
            ParamSpec::int("n_samples", "Number of samples", 1, 100_000, 1000),
            ParamSpec::float("mu", "Normal mean μ", -10.0, 10.0, 0.0).step(0.5),
            ParamSpec::float("sigma", "Normal standard deviation σ", 0.1, 5.0, 1.0).step(0.1),
            ParamSpec::float("a", "Uniform lower end a", -10.0, 0.0, -5.0).step(0.5),
            ParamSpec::float("b", "Uniform upper end b", 0.0, 10.0, 5.0).step(0.5),
            ParamSpec::float("rate", "Rate λ (exponential, Poisson)", 0.1, 5.0, 1.0).step(0.1),
            ParamSpec::int("trials", "Binomial trials", 1, 100, 10),
            ParamSpec::float("p", "Binomial success probability", 0.0, 1.0, 0.5).step(0.01),
        ]
    }

    fn layout(&self, params: &ParameterSet) -> FigureBuilder {
        let title = match params.choice("family") {
            Ok(family) => format!(
                "Central limit theorem: means of {} random variables",
                family
            ),
            Err(_) => self.title().to_string(),
        };
        FigureBuilder::new(title)
            .size(1000, 620)
            .labels("Sample mean", "Frequency")
    }

    fn plot(
        &self,
        figure: &mut Figure,
        params: &ParameterSet,
        _session: &mut Session,
        rng: &mut StdRng,
    ) -> PageResult<()> {
        let dist = population(params)?;
        let sample_size = params.u64("sample_size")? as usize;
        let n_samples = params.u64("n_samples")? as usize;

        let means = sample_means(&dist, sample_size, n_samples, rng)?;
        let hist = histogram(&means, BINS)?;
        let observed = stats::mean(&means)?;
        debug!(%dist, sample_size, n_samples, observed, "sample means drawn");

        let ax = figure.axes(0)?;
        ax.histogram(
            &hist,
            Style::new(ColorRole::Primary).opacity(0.6).label("Sample means"),
        )?;

        if dist.std() > 0.0 {
            let approx =
                DistributionDescriptor::sample_mean(dist.mean(), dist.std(), sample_size as u64)?;
            let se = approx.std();
            let lo = hist.edges[0].min(dist.mean() - 4.0 * se);
            let hi = hist.edges[hist.edges.len() - 1].max(dist.mean() + 4.0 * se);
            let domain = Domain::linspace(lo, hi, 400)?;
            let scale = hist.total() as f64 * hist.bin_width();
            let ys = domain.map(|x| scale * approx.density(x));
            ax.line(
                domain.xs(),
                &ys,
                Style::new(ColorRole::Reference).label(format!(
                    "Normal approximation N({:.2}, {:.3})",
                    dist.mean(),
                    se
                )),
            )?;
        }

        ax.vline(
            observed,
            Style::new(ColorRole::Rejection)
                .dashed()
                .label(format!("Mean: {:.2}", observed)),
        )
        .set_title(format!(
            "Sample size = {}, number of samples = {}",
            sample_size, n_samples
        ));
        Ok(())
    }

    fn explanation(&self) -> Option<(&'static str, &'static str)> {
        Some(("Why the histogram looks normal", EXPLANATION))
    }
}
