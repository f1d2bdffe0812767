//! Repeated-sampling view of confidence intervals.

use super::density::confidence_percent;
use crate::figure::{ColorRole, Figure, FigureBuilder, Style};
use crate::page::{Page, PageResult, ParamSpec, ParameterSet, Session};
use crate::region::RegionLabel;
use crate::stats::coverage;
use rand::rngs::StdRng;
use tracing::debug;

const EXPLANATION: &str = "\
Each horizontal bar is a confidence interval computed from its own random \
sample of size n drawn from a normal population with mean μ and known σ. \
The dot marks the sample mean x̄ and the bar spans x̄ ± z·σ/√n.

Green intervals contain the true mean μ (the vertical line); red ones miss \
it. The confidence level 1 - α is a statement about the procedure: in the \
long run a fraction 1 - α of intervals built this way contain μ. Any single \
interval either contains μ or it does not.

Increase the number of samples to watch the observed fraction settle near \
1 - α. Increasing n makes every interval narrower without changing that \
fraction.";

pub struct ConfidenceIntervals;

impl Page for ConfidenceIntervals {
    fn id(&self) -> &'static str {
        "confidence-intervals"
    }

    fn title(&self) -> &'static str {
        "Confidence intervals over repeated samples"
    }

    fn params(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::float("mu", "Population mean μ", 60.0, 140.0, 100.0).step(1.0),
            ParamSpec::float("sigma", "Population standard deviation σ", 10.0, 20.0, 15.0)
                .step(0.5),
            ParamSpec::int("n", "Sample size n", 10, 250, 100),
            ParamSpec::int("num_samples", "Number of samples", 5, 200, 10),
            ParamSpec::float("alpha", "Significance level α", 0.01, 0.10, 0.05).step(0.01),
        ]
    }

    fn layout(&self, params: &ParameterSet) -> FigureBuilder {
        let rows = params.u64("num_samples").unwrap_or(10) as u32;
        FigureBuilder::new(self.title())
            .size(1000, (240 + 12 * rows).max(400))
            .labels("x", "Sample index")
    }

    fn plot(
        &self,
        figure: &mut Figure,
        params: &ParameterSet,
        _session: &mut Session,
        rng: &mut StdRng,
    ) -> PageResult<()> {
        let mu = params.f64("mu")?;
        let sigma = params.f64("sigma")?;
        let n = params.u64("n")?;
        let num_samples = params.u64("num_samples")? as usize;
        let alpha = params.f64("alpha")?;

        let run = coverage(mu, sigma, n, num_samples, alpha, rng)?;

        let ax = figure.axes(0)?;
        let mut hit_label = Some(format!("{}% CI contains μ", confidence_percent(alpha)));
        let mut miss_label = Some(format!("{}% CI misses μ", confidence_percent(alpha)));
        for (i, s) in run.samples.iter().enumerate() {
            let y = (i + 1) as f64;
            let (label, slot) = if s.covers {
                (RegionLabel::Included, &mut hit_label)
            } else {
                (RegionLabel::Excluded, &mut miss_label)
            };
            let mut style = Style::new(label.color_role()).width(3);
            if let Some(text) = slot.take() {
                style = style.label(text);
            }
            ax.hsegment(y, s.interval.lower, s.interval.upper, style)
                .scatter(&[(s.interval.center, y)], Style::new(label.color_role()));
        }

        ax.vline(
            mu,
            Style::new(ColorRole::Reference).dashed().label(format!("μ = {}", mu)),
        )
        .set_ylim(0.0, num_samples as f64 + 1.0)
        .set_title(format!(
            "{} of {} intervals ({:.2}%) contain μ",
            run.hits(),
            run.samples.len(),
            100.0 * run.rate()
        ));

        debug!(hits = run.hits(), total = run.samples.len(), "coverage drawn");
        Ok(())
    }

    fn explanation(&self) -> Option<(&'static str, &'static str)> {
        Some(("What does 95% confidence mean?", EXPLANATION))
    }
}
