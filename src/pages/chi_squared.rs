//! Chi-squared density with a shaded interval.
//!
//! The interval is given either by absolute bounds or by two percentiles,
//! which are turned into bounds with the quantile function.

use super::density::{peak, plot_distribution, shade};
use crate::figure::{ColorRole, Figure, FigureBuilder, Style};
use crate::page::{Page, PageError, PageResult, ParamKind, ParamSpec, ParameterSet, Session};
use crate::region::{self, Domain, RegionLabel};
use crate::stats::DistributionDescriptor;
use rand::rngs::StdRng;
use tracing::debug;

pub struct ChiSquared;

fn x_max(df: f64) -> f64 {
    DistributionDescriptor::chi_squared(df)
        .map(|d| d.display_range().1)
        .unwrap_or(10.0)
}

fn lower_after_df(set: &ParameterSet, kind: ParamKind) -> ParamKind {
    match (kind, set.f64("df")) {
        (ParamKind::Float { min, step, .. }, Ok(df)) => {
            let max = x_max(df);
            ParamKind::Float {
                min,
                max,
                default: (0.5 * df).min(max),
                step,
            }
        }
        (kind, _) => kind,
    }
}

fn upper_after_lower(set: &ParameterSet, kind: ParamKind) -> ParamKind {
    match (kind, set.f64("df"), set.f64("lower")) {
        (ParamKind::Float { step, .. }, Ok(df), Ok(lower)) => {
            let max = x_max(df).max(lower);
            ParamKind::Float {
                min: lower,
                max,
                default: (2.5 * df).clamp(lower, max),
                step,
            }
        }
        (kind, _, _) => kind,
    }
}

fn upper_pct_after_lower(set: &ParameterSet, kind: ParamKind) -> ParamKind {
    match (kind, set.f64("lower_pct")) {
        (ParamKind::Float { max, default, step, .. }, Ok(lower)) => ParamKind::Float {
            min: lower,
            max,
            default: default.max(lower),
            step,
        },
        (kind, _) => kind,
    }
}

/// Interval bounds in x for the chosen method.
fn bounds(dist: &DistributionDescriptor, params: &ParameterSet) -> PageResult<(f64, f64)> {
    match params.choice("method")? {
        "absolute" => Ok((params.f64("lower")?, params.f64("upper")?)),
        "percentile" => Ok((
            dist.quantile(params.f64("lower_pct")?)?,
            dist.quantile(params.f64("upper_pct")?)?,
        )),
        other => Err(PageError::Validation {
            name: "method".to_string(),
            message: format!("unknown method '{}'", other),
        }),
    }
}

impl Page for ChiSquared {
    fn id(&self) -> &'static str {
        "chi-squared"
    }

    fn title(&self) -> &'static str {
        "The chi-squared distribution"
    }

    fn params(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::int("df", "Degrees of freedom", 1, 100, 5),
            ParamSpec::choice(
                "method",
                "Give the interval as",
                &["absolute", "percentile"],
                "absolute",
            ),
            ParamSpec::float("lower", "Left bound", 0.0, 10.0, 2.5)
                .step(0.1)
                .refine(lower_after_df),
            ParamSpec::float("upper", "Right bound", 0.0, 10.0, 10.0)
                .step(0.1)
                .refine(upper_after_lower),
            ParamSpec::float("lower_pct", "Left percentile", 0.001, 0.999, 0.025).step(0.001),
            ParamSpec::float("upper_pct", "Right percentile", 0.001, 0.999, 0.975)
                .step(0.001)
                .refine(upper_pct_after_lower),
        ]
    }

    fn layout(&self, params: &ParameterSet) -> FigureBuilder {
        let title = match params.i64("df") {
            Ok(df) => format!("χ² distribution with {} degrees of freedom", df),
            Err(_) => self.title().to_string(),
        };
        FigureBuilder::new(title).labels("x", "Density f(x)")
    }

    fn plot(
        &self,
        figure: &mut Figure,
        params: &ParameterSet,
        _session: &mut Session,
        _rng: &mut StdRng,
    ) -> PageResult<()> {
        let df = params.f64("df")?;
        let dist = DistributionDescriptor::chi_squared(df)?;
        let (lower, upper) = bounds(&dist, params)?;
        let xmax = x_max(df);

        let domain = Domain::linspace(0.0, xmax, 1000)?;
        let labels = region::classify_interval(&domain, lower, upper)?;
        let mass = dist.mass_between(lower, upper);
        debug!(df, lower, upper, mass, "chi-squared interval");

        let ax = figure.axes(0)?;
        let pdf = plot_distribution(ax, &dist, &domain, Style::new(ColorRole::Primary))?;
        shade(
            ax,
            &domain,
            &pdf,
            &labels,
            RegionLabel::Included,
            Style::new(ColorRole::Included)
                .opacity(0.35)
                .label(format!("P({:.2} < X < {:.2}) = {:.4}", lower, upper, mass)),
        )?;

        let ymax = peak(&pdf);
        let ytext = -0.05 * ymax;
        let marker = Style::new(ColorRole::Muted).dashed();
        ax.vsegment(lower, 0.0, dist.density(lower).min(ymax), marker.clone())
            .vsegment(upper, 0.0, dist.density(upper).min(ymax), marker)
            .text(lower, ytext, format!("{:.2}", lower), Style::new(ColorRole::Muted))
            .text(upper, ytext, format!("{:.2}", upper), Style::new(ColorRole::Muted))
            .set_xlim(0.0, xmax)
            .set_ylim(3.0 * ytext, 1.1 * ymax);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{ParamValue, collect_params};
    use crate::stats::seeded_rng;

    fn legend(set: &ParameterSet) -> String {
        let mut fig = ChiSquared.layout(set).build().unwrap();
        ChiSquared
            .plot(&mut fig, set, &mut Session::new(), &mut seeded_rng(None))
            .unwrap();
        fig.subplots()[0].legend()[0].0.to_string()
    }

    #[test]
    fn test_defaults_follow_df() {
        let input = ParameterSet::new().with("df", ParamValue::Int(10));
        let set = collect_params(&ChiSquared, &input).unwrap();
        assert_eq!(set.f64("lower").unwrap(), 5.0);
        assert_eq!(set.f64("upper").unwrap(), 25.0);
    }

    #[test]
    fn test_upper_below_lower_rejected() {
        let input = ParameterSet::new()
            .with("df", ParamValue::Int(5))
            .with("lower", ParamValue::Float(8.0))
            .with("upper", ParamValue::Float(3.0));
        assert!(collect_params(&ChiSquared, &input).is_err());
    }

    #[test]
    fn test_percentile_interval_mass() {
        let input = ParameterSet::new()
            .with("df", ParamValue::Int(5))
            .with("method", ParamValue::Choice("percentile".into()));
        let set = collect_params(&ChiSquared, &input).unwrap();
        // χ²(5) 2.5% and 97.5% points
        assert_eq!(legend(&set), "P(0.83 < X < 12.83) = 0.9500");
    }

    #[test]
    fn test_absolute_interval_mass() {
        let input = ParameterSet::new()
            .with("df", ParamValue::Int(2))
            .with("lower", ParamValue::Float(0.0))
            .with("upper", ParamValue::Float(2.0));
        let set = collect_params(&ChiSquared, &input).unwrap();
        // χ²(2) is Exp(1/2): 1 - e^{-1}
        assert_eq!(legend(&set), "P(0.00 < X < 2.00) = 0.6321");
    }
}
