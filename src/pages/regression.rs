//! Least-squares line through points the user adds one at a time.
//!
//! Points live in the [`Session`], so they survive between runs. Each run
//! may add the point given by `x` and `y` or clear the list first.

use crate::figure::{ColorRole, Figure, FigureBuilder, Style};
use crate::page::{Page, PageError, PageResult, ParamKind, ParamSpec, ParameterSet, Session};
use crate::stats::{StatsError, linear_fit};
use rand::rngs::StdRng;
use tracing::debug;

const LIMIT: f64 = 1.0e6;

pub struct Regression;

fn at_least(name: &str, set: &ParameterSet, kind: ParamKind) -> ParamKind {
    match (kind, set.f64(name)) {
        (ParamKind::Float { max, default, step, .. }, Ok(lo)) => ParamKind::Float {
            min: lo,
            max,
            default: default.max(lo),
            step,
        },
        (kind, _) => kind,
    }
}

fn maxx_after_minx(set: &ParameterSet, kind: ParamKind) -> ParamKind {
    at_least("minx", set, kind)
}

fn maxy_after_miny(set: &ParameterSet, kind: ParamKind) -> ParamKind {
    at_least("miny", set, kind)
}

fn invalid(name: &str, message: impl Into<String>) -> PageError {
    PageError::Validation {
        name: name.to_string(),
        message: message.into(),
    }
}

impl Page for Regression {
    fn id(&self) -> &'static str {
        "regression"
    }

    fn title(&self) -> &'static str {
        "Simple linear regression"
    }

    fn params(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::float("minx", "Minimum x", -LIMIT, LIMIT, 0.0).step(1.0),
            ParamSpec::float("maxx", "Maximum x", -LIMIT, LIMIT, 100.0)
                .step(1.0)
                .refine(maxx_after_minx),
            ParamSpec::float("miny", "Minimum y", -LIMIT, LIMIT, 0.0).step(1.0),
            ParamSpec::float("maxy", "Maximum y", -LIMIT, LIMIT, 100.0)
                .step(1.0)
                .refine(maxy_after_miny),
            ParamSpec::choice("action", "Action", &["none", "add", "clear"], "none"),
            ParamSpec::float("x", "Point x", -LIMIT, LIMIT, 50.0),
            ParamSpec::float("y", "Point y", -LIMIT, LIMIT, 50.0),
        ]
    }

    fn layout(&self, _params: &ParameterSet) -> FigureBuilder {
        FigureBuilder::new(self.title())
            .size(900, 700)
            .labels("x", "y")
    }

    fn plot(
        &self,
        figure: &mut Figure,
        params: &ParameterSet,
        session: &mut Session,
        _rng: &mut StdRng,
    ) -> PageResult<()> {
        let (minx, maxx) = (params.f64("minx")?, params.f64("maxx")?);
        let (miny, maxy) = (params.f64("miny")?, params.f64("maxy")?);
        if maxx <= minx {
            return Err(invalid("maxx", "must be greater than the minimum x"));
        }
        if maxy <= miny {
            return Err(invalid("maxy", "must be greater than the minimum y"));
        }

        match params.choice("action")? {
            "add" => {
                let (x, y) = (params.f64("x")?, params.f64("y")?);
                if !(minx..=maxx).contains(&x) || !(miny..=maxy).contains(&y) {
                    return Err(invalid("x", format!("point ({}, {}) is outside the axes", x, y)));
                }
                session.add_point(x, y);
            }
            "clear" => session.clear_points(),
            _ => {}
        }

        let points = session.points();
        let ax = figure.axes(0)?;
        ax.set_xlim(minx, maxx)
            .set_ylim(miny, maxy)
            .set_title("Click to add points");
        if !points.is_empty() {
            ax.scatter(points, Style::new(ColorRole::Primary).label("Data points"));
        }

        if points.len() > 1 {
            match linear_fit(points) {
                Ok(fit) => {
                    let lo = points.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
                    let hi = points.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
                    ax.line(
                        &[lo, hi],
                        &[fit.predict(lo), fit.predict(hi)],
                        Style::new(ColorRole::Rejection).label(format!(
                            "Regression line: y = {:.3}x + {:.3}",
                            fit.slope, fit.intercept
                        )),
                    )?;
                    debug!(slope = fit.slope, intercept = fit.intercept, r = fit.rvalue, "fit");
                }
                Err(StatsError::DomainEmpty { .. }) => {
                    ax.set_title("All points share one x value: no regression line");
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}
