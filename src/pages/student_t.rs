//! Standard normal against Student's t with the same 95% critical values.

use super::density::plot_distribution;
use crate::figure::{ColorRole, Figure, FigureBuilder, Style};
use crate::page::{Page, PageResult, ParamSpec, ParameterSet, Session};
use crate::region::Domain;
use crate::stats::{DistributionDescriptor, Tail, critical_region};
use rand::rngs::StdRng;

const ALPHA: f64 = 0.05;

pub struct StudentT;

impl Page for StudentT {
    fn id(&self) -> &'static str {
        "student-t"
    }

    fn title(&self) -> &'static str {
        "Standard normal versus Student's t"
    }

    fn params(&self) -> Vec<ParamSpec> {
        vec![ParamSpec::int("df", "Degrees of freedom", 1, 100, 1)]
    }

    fn layout(&self, params: &ParameterSet) -> FigureBuilder {
        let title = match params.i64("df") {
            Ok(1) => "N(0, 1) compared with the t distribution with 1 degree of freedom".to_string(),
            Ok(df) => format!(
                "N(0, 1) compared with the t distribution with {} degrees of freedom",
                df
            ),
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
        let df = params.i64("df")?;
        let normal = DistributionDescriptor::normal(0.0, 1.0)?;
        let t = DistributionDescriptor::student_t(df as f64)?;
        let domain = Domain::linspace(-4.0, 4.0, 1000)?;

        let z = critical_region(&normal, ALPHA, Tail::TwoSided)?;
        let tc = critical_region(&t, ALPHA, Tail::TwoSided)?;

        let ax = figure.axes(0)?;
        plot_distribution(
            ax,
            &normal,
            &domain,
            Style::new(ColorRole::Primary).label("Standard normal N(0, 1)"),
        )?;
        for x in z.boundaries() {
            ax.vsegment(x, 0.0, normal.density(x), Style::new(ColorRole::Primary).dashed());
        }

        plot_distribution(
            ax,
            &t,
            &domain,
            Style::new(ColorRole::Secondary).label(format!("t(df = {})", df)),
        )?;
        // Beyond the plotted range for df < 3
        if df >= 3 {
            for x in tc.boundaries() {
                ax.vsegment(x, 0.0, t.density(x), Style::new(ColorRole::Secondary).dashed());
            }
        }

        let (z_lo, z_hi) = z.acceptance();
        let (t_lo, t_hi) = tc.acceptance();
        ax.set_title(format!(
            "{} prediction interval: N(0, 1) [{:.2}, {:.2}], t(df = {}) [{:.2}, {:.2}]",
            1.0 - ALPHA,
            z_lo,
            z_hi,
            df,
            t_lo,
            t_hi
        ));
        Ok(())
    }
}
