//! Type-I and type-II errors of a z-test for a mean.

use super::density::{peak, plot_distribution, shade};
use crate::figure::{ColorRole, Figure, FigureBuilder, Style};
use crate::page::{Page, PageResult, ParamSpec, ParameterSet, Session};
use crate::region::{self, Domain, RegionLabel};
use crate::stats::{DistributionDescriptor, Tail, critical_region, type2_error};
use rand::rngs::StdRng;
use tracing::debug;

pub struct HypothesisTesting;

fn hypotheses(tail: Tail, mu_0: f64) -> String {
    match tail {
        Tail::TwoSided => format!("H0: μ = {} vs H1: μ ≠ {}", mu_0, mu_0),
        Tail::Right => format!("H0: μ ≤ {} vs H1: μ > {}", mu_0, mu_0),
        Tail::Left => format!("H0: μ ≥ {} vs H1: μ < {}", mu_0, mu_0),
    }
}

impl Page for HypothesisTesting {
    fn id(&self) -> &'static str {
        "hypothesis-testing"
    }

    fn title(&self) -> &'static str {
        "Hypothesis testing: type I and type II errors"
    }

    fn params(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::choice(
                "tail",
                "Alternative hypothesis",
                &["two-sided", "left", "right"],
                "two-sided",
            ),
            ParamSpec::float("mu_0", "Mean under H0 (μ0)", -100.0, 100.0, 0.0).step(0.1),
            ParamSpec::float("sigma", "Population standard deviation σ", 0.1, 50.0, 1.0).step(0.1),
            ParamSpec::float("mu_1", "True mean under H1 (μ1)", -100.0, 100.0, 1.0).step(0.1),
            ParamSpec::float("alpha", "Significance level α", 0.001, 0.2, 0.05).step(0.001),
            ParamSpec::int("sample_size", "Sample size n", 1, 1000, 30),
        ]
    }

    fn layout(&self, params: &ParameterSet) -> FigureBuilder {
        let title = match (params.choice("tail"), params.f64("mu_0")) {
            (Ok(tail), Ok(mu_0)) => Tail::parse(tail)
                .map(|t| hypotheses(t, mu_0))
                .unwrap_or_else(|| self.title().to_string()),
            _ => self.title().to_string(),
        };
        FigureBuilder::new(title)
            .size(1200, 650)
            .labels("Sample mean x̄", "Density")
    }

    fn plot(
        &self,
        figure: &mut Figure,
        params: &ParameterSet,
        _session: &mut Session,
        _rng: &mut StdRng,
    ) -> PageResult<()> {
        let tail = params.choice("tail")?;
        let tail = Tail::parse(tail).unwrap_or_default();
        let mu_0 = params.f64("mu_0")?;
        let mu_1 = params.f64("mu_1")?;
        let sigma = params.f64("sigma")?;
        let alpha = params.f64("alpha")?;
        let n = params.u64("sample_size")?;

        let null = DistributionDescriptor::sample_mean(mu_0, sigma, n)?;
        let alt = DistributionDescriptor::sample_mean(mu_1, sigma, n)?;
        let se = null.std();
        let region = critical_region(&null, alpha, tail)?;
        let rates = type2_error(&null, &alt, &region);

        let xmin = mu_0.min(mu_1) - 4.0 * se;
        let xmax = mu_0.max(mu_1) + 4.0 * se;
        let domain = Domain::linspace(xmin, xmax, 1000)?;
        let labels = region::classify(&domain, &region);

        let ax = figure.axes(0)?;
        let pdf_0 = plot_distribution(
            ax,
            &null,
            &domain,
            Style::new(ColorRole::Primary).label("H0"),
        )?;
        let pdf_1 = plot_distribution(
            ax,
            &alt,
            &domain,
            Style::new(ColorRole::Secondary).label("H1"),
        )?;

        let ymax = peak(&pdf_0);
        let ytext = -0.2 * ymax;
        let ylines = 0.5 * ytext;
        let ymu = 0.25 * ytext;
        ax.set_ylim(1.5 * ytext, 1.1 * ymax);

        let marker = Style::new(ColorRole::Muted).dashed();
        ax.vsegment(mu_0, ymu, null.density(mu_0), marker.clone())
            .text(mu_0, ymu, "μ0", Style::new(ColorRole::Primary))
            .vsegment(mu_1, ymu, alt.density(mu_1), marker)
            .text(mu_1, ymu, "μ1", Style::new(ColorRole::Secondary));

        shade(
            ax,
            &domain,
            &pdf_0,
            &labels,
            RegionLabel::Rejection,
            Style::new(ColorRole::Rejection)
                .opacity(0.35)
                .label(format!("Type I error (α): {:.3}", rates.alpha)),
        )?;
        shade(
            ax,
            &domain,
            &pdf_1,
            &labels,
            RegionLabel::Acceptance,
            Style::new(ColorRole::Acceptance)
                .opacity(0.25)
                .label(format!("Type II error (β): {:.3}", rates.beta)),
        )?;

        for boundary in region.boundaries() {
            ax.vsegment(
                boundary,
                ylines,
                null.density(boundary),
                Style::new(ColorRole::Rejection).dashed(),
            );
        }

        for r in region::regions(&domain, &labels)? {
            let (text, color) = match r.label {
                RegionLabel::Rejection => ("Reject H0", ColorRole::Rejection),
                _ => ("Accept H0", ColorRole::Acceptance),
            };
            ax.hsegment(ylines, r.start, r.end, Style::new(color).width(5))
                .text((r.start + r.end) / 2.0, ytext, text, Style::new(color));
        }

        ax.set_title(format!(
            "α = {:.3}, β = {:.3}, power = {:.3}",
            rates.alpha, rates.beta, rates.power
        ));
        debug!(?region, ?rates, "hypothesis test drawn");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::Primitive;
    use crate::page::ParamValue;
    use crate::stats::seeded_rng;

    fn run(params: &ParameterSet) -> Figure {
        let page = HypothesisTesting;
        let mut fig = page.layout(params).build().unwrap();
        page.plot(&mut fig, params, &mut Session::new(), &mut seeded_rng(Some(0)))
            .unwrap();
        fig
    }

    fn defaults() -> ParameterSet {
        let mut set = ParameterSet::new();
        for spec in HypothesisTesting.params() {
            set.insert(spec.name, spec.default_value());
        }
        set
    }

    #[test]
    fn test_title_names_hypotheses() {
        let set = defaults().with("tail", ParamValue::Choice("right".into()));
        assert_eq!(run(&set).title(), "H0: μ ≤ 0 vs H1: μ > 0");
    }

    #[test]
    fn test_two_sided_legend_and_bars() {
        let fig = run(&defaults());
        let ax = &fig.subplots()[0];
        let legend: Vec<&str> = ax.legend().into_iter().map(|(l, _)| l).collect();
        assert_eq!(legend[0], "H0");
        assert_eq!(legend[1], "H1");
        assert_eq!(legend[2], "Type I error (α): 0.050");
        assert!(legend[3].starts_with("Type II error (β)"));

        let verdicts: Vec<&str> = ax
            .primitives()
            .iter()
            .filter_map(|p| match p {
                Primitive::Text { text, .. } if text.ends_with("H0") => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(verdicts, vec!["Reject H0", "Accept H0", "Reject H0"]);
    }

    #[test]
    fn test_left_tail_single_boundary() {
        let set = defaults()
            .with("tail", ParamValue::Choice("left".into()))
            .with("mu_1", ParamValue::Float(-1.0));
        let fig = run(&set);
        let boundaries = fig.subplots()[0]
            .primitives()
            .iter()
            .filter(|p| matches!(p, Primitive::VLine { style, .. } if style.color == ColorRole::Rejection))
            .count();
        assert_eq!(boundaries, 1);
    }
}
