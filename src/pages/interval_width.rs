//! Where the bounds of a known-σ confidence interval come from.
//!
//! The lower bound is the mean of the normal curve whose upper α/2 tail
//! starts exactly at x̄, and the upper bound is its mirror image. Drawing
//! both curves shows why the interval widens with σ and 1 - α and narrows
//! with n.

use super::density::{confidence_percent, peak};
use crate::figure::{ColorRole, Figure, FigureBuilder, Style};
use crate::page::{Page, PageResult, ParamSpec, ParameterSet, Session};
use crate::region::{self, Domain, RegionLabel};
use crate::stats::{DistributionDescriptor, confidence_interval};
use rand::rngs::StdRng;

const EXPLANATION: &str = "\
The interval is x̄ ± z·σ/√n with z the standard normal quantile at \
1 - α/2. Its two bounds are the extreme population means that are still \
compatible with the observed x̄: a sampling distribution centred on the \
lower bound puts exactly α/2 of its mass above x̄, and one centred on the \
upper bound puts exactly α/2 below it.

A larger σ or a higher confidence level moves the curves apart; a larger \
sample makes each curve narrower and pulls the bounds towards x̄.";

pub struct IntervalWidth;

impl Page for IntervalWidth {
    fn id(&self) -> &'static str {
        "interval-width"
    }

    fn title(&self) -> &'static str {
        "Width of a confidence interval"
    }

    fn params(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::float("sigma", "Population standard deviation σ", 0.1, 20.0, 8.0)
                .step(0.1),
            ParamSpec::float("xbar", "Sample mean x̄", 60.0, 90.0, 73.48).step(0.01),
            ParamSpec::int("n", "Sample size n", 1, 100, 1),
            ParamSpec::float("alpha", "Significance level α", 0.01, 0.10, 0.05).step(0.01),
        ]
    }

    fn layout(&self, params: &ParameterSet) -> FigureBuilder {
        let title = match params.f64("alpha") {
            Ok(alpha) => format!("{}% confidence interval for μ", confidence_percent(alpha)),
            Err(_) => self.title().to_string(),
        };
        FigureBuilder::new(title)
            .size(1200, 600)
            .labels("Population mean μ", "Density")
    }

    fn plot(
        &self,
        figure: &mut Figure,
        params: &ParameterSet,
        _session: &mut Session,
        _rng: &mut StdRng,
    ) -> PageResult<()> {
        let sigma = params.f64("sigma")?;
        let xbar = params.f64("xbar")?;
        let n = params.u64("n")?;
        let alpha = params.f64("alpha")?;

        let ci = confidence_interval(xbar, sigma, n, alpha)?;
        let se = ci.margin / ci.z;
        let at_lower = DistributionDescriptor::normal(ci.lower, se)?;
        let at_upper = DistributionDescriptor::normal(ci.upper, se)?;

        let domain = Domain::linspace(ci.lower - 4.0 * sigma, ci.upper + 4.0 * sigma, 1000)?;
        let pdf_lower = domain.map(|x| at_lower.density(x));
        let pdf_upper = domain.map(|x| at_upper.density(x));
        let ymax = peak(&pdf_lower);
        let yval = -0.1 * ymax;
        let tick = 0.03 * ymax;

        let central_lower = region::classify_interval(&domain, ci.lower - ci.margin, xbar)?;
        let central_upper = region::classify_interval(&domain, xbar, ci.upper + ci.margin)?;
        let zeros = vec![0.0; domain.len()];
        let xs = domain.xs();

        let ax = figure.axes(0)?;
        ax.line(
            xs,
            &pdf_lower,
            Style::new(ColorRole::Primary).label(format!("Lower bound: {:.2}", ci.lower)),
        )?
        .line(
            xs,
            &pdf_upper,
            Style::new(ColorRole::Secondary).label(format!("Upper bound: {:.2}", ci.upper)),
        )?
        .fill_between(
            xs,
            &zeros,
            &pdf_lower,
            &region::mask(&central_lower, RegionLabel::Included),
            Style::new(ColorRole::Primary).opacity(0.2),
        )?
        .fill_between(
            xs,
            &zeros,
            &pdf_upper,
            &region::mask(&central_upper, RegionLabel::Included),
            Style::new(ColorRole::Secondary).opacity(0.2),
        )?;

        let guide = Style::new(ColorRole::Muted).dashed();
        ax.vsegment(ci.lower, 0.0, at_lower.density(ci.lower), guide.clone())
            .vsegment(ci.upper, 0.0, at_upper.density(ci.upper), guide)
            .scatter(
                &[(xbar, 0.0)],
                Style::new(ColorRole::Reference).label(format!("x̄ = {}", xbar)),
            )
            .hsegment(
                yval,
                ci.lower,
                ci.upper,
                Style::new(ColorRole::Reference)
                    .width(3)
                    .label(format!("Width: {:.2}", ci.width())),
            )
            .vsegment(ci.lower, yval - tick, yval + tick, Style::new(ColorRole::Reference))
            .vsegment(ci.upper, yval - tick, yval + tick, Style::new(ColorRole::Reference))
            .set_ylim(2.0 * yval, 1.1 * ymax)
            .set_title(format!(
                "[{:.2}, {:.2}] = {} ± {:.2}",
                ci.lower, ci.upper, xbar, ci.margin
            ));
        Ok(())
    }

    fn explanation(&self) -> Option<(&'static str, &'static str)> {
        Some(("Where the bounds come from", EXPLANATION))
    }
}
