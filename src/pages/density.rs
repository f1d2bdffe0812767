//! Drawing a density or mass function and shading labelled parts of it.
//!
//! Every distribution page goes through these two helpers, so continuous
//! families always render as a curve with filled areas and discrete families
//! as stems with the shaded stems redrawn in the region colour.

use crate::figure::{Axes, FigureResult, Style};
use crate::region::{self, Domain, RegionLabel};
use crate::stats::DistributionDescriptor;

/// Draw `dist` over `domain` and return the evaluated heights.
pub fn plot_distribution(
    ax: &mut Axes,
    dist: &DistributionDescriptor,
    domain: &Domain,
    style: Style,
) -> FigureResult<Vec<f64>> {
    let ys = domain.map(|x| dist.density(x));
    if domain.is_discrete() {
        ax.stem(domain.xs(), &ys, style)?;
    } else {
        ax.line(domain.xs(), &ys, style)?;
    }
    Ok(ys)
}

/// Shade the samples labelled `which` under the heights `ys`.
///
/// Nothing is drawn when no sample carries the label.
pub fn shade(
    ax: &mut Axes,
    domain: &Domain,
    ys: &[f64],
    labels: &[RegionLabel],
    which: RegionLabel,
    style: Style,
) -> FigureResult<()> {
    let keep = region::mask(labels, which);
    if domain.is_discrete() {
        let (xs, hs): (Vec<f64>, Vec<f64>) = domain
            .xs()
            .iter()
            .zip(ys)
            .zip(&keep)
            .filter(|(_, k)| **k)
            .map(|((&x, &y), _)| (x, y))
            .unzip();
        if !xs.is_empty() {
            ax.stem(&xs, &hs, style)?;
        }
    } else {
        let zeros = vec![0.0; ys.len()];
        ax.fill_between(domain.xs(), &zeros, ys, &keep, style)?;
    }
    Ok(())
}

/// Largest finite value, or 0 for an empty slice.
pub fn peak(ys: &[f64]) -> f64 {
    ys.iter()
        .copied()
        .filter(|y| y.is_finite())
        .fold(0.0, f64::max)
}

/// `100·(1 - alpha)` without trailing zeros, e.g. `95` or `97.5`.
pub fn confidence_percent(alpha: f64) -> String {
    let pct = ((1.0 - alpha) * 100.0 * 100.0).round() / 100.0;
    format!("{}", pct)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::{ColorRole, FigureBuilder, Primitive};
    use crate::stats::{CriticalRegion, Tail};

    #[test]
    fn test_continuous_draws_line() {
        let mut fig = FigureBuilder::new("n").build().unwrap();
        let ax = fig.axes(0).unwrap();
        let dist = DistributionDescriptor::normal(0.0, 1.0).unwrap();
        let domain = Domain::linspace(-4.0, 4.0, 101).unwrap();
        let ys = plot_distribution(ax, &dist, &domain, Style::new(ColorRole::Primary)).unwrap();
        assert_eq!(ys.len(), 101);
        assert!((peak(&ys) - 0.398942).abs() < 1e-5);
        assert!(matches!(ax.primitives()[0], Primitive::Line { .. }));
    }

    #[test]
    fn test_discrete_shading_redraws_stems() {
        let mut fig = FigureBuilder::new("b").build().unwrap();
        let ax = fig.axes(0).unwrap();
        let dist = DistributionDescriptor::binomial(10, 0.5).unwrap();
        let domain = Domain::for_distribution(&dist, 0).unwrap();
        let ys = plot_distribution(ax, &dist, &domain, Style::new(ColorRole::Primary)).unwrap();

        let region = CriticalRegion {
            tail: Tail::Right,
            lower: None,
            upper: Some(8.0),
        };
        let labels = region::classify(&domain, &region);
        shade(
            ax,
            &domain,
            &ys,
            &labels,
            RegionLabel::Rejection,
            Style::new(ColorRole::Rejection),
        )
        .unwrap();

        match &ax.primitives()[1] {
            Primitive::Stem { points, .. } => {
                let ks: Vec<f64> = points.iter().map(|p| p.0).collect();
                assert_eq!(ks, vec![8.0, 9.0, 10.0]);
            }
            other => panic!("expected stems, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_shade_draws_nothing() {
        let mut fig = FigureBuilder::new("e").build().unwrap();
        let ax = fig.axes(0).unwrap();
        let domain = Domain::integers(0, 3).unwrap();
        let labels = vec![RegionLabel::Acceptance; 4];
        shade(
            ax,
            &domain,
            &[0.25; 4],
            &labels,
            RegionLabel::Rejection,
            Style::new(ColorRole::Rejection),
        )
        .unwrap();
        assert!(ax.primitives().is_empty());
    }

    #[test]
    fn test_confidence_percent() {
        assert_eq!(confidence_percent(0.05), "95");
        assert_eq!(confidence_percent(0.025), "97.5");
    }
}
