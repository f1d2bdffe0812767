//! Retained-mode figures.
//!
//! A [`Figure`] is a grid of [`Axes`], each holding an ordered list of
//! drawing [`Primitive`]s. Building a figure has no side effects: nothing is
//! rasterised until a [`RenderSurface`](crate::render::RenderSurface) is
//! handed the finished value.
//!
//! ```ignore
//! use statviz::figure::{FigureBuilder, Style, ColorRole};
//!
//! let mut fig = FigureBuilder::new("Binomial")
//!     .grid(1, 1)
//!     .labels("k", "P(X = k)")
//!     .build()?;
//! fig.axes(0)?.stem(&[0.0, 1.0], &[0.5, 0.5], Style::new(ColorRole::Primary))?;
//! ```

use crate::stats::Histogram;
use std::fmt;

/// Figure-level errors.
#[derive(Debug, Clone, PartialEq)]
pub enum FigureError {
    /// Paired coordinate slices differ in length.
    LengthMismatch {
        expected: usize,
        got: usize,
        context: String,
    },
    /// Subplot index outside the grid.
    NoSuchAxes { index: usize, count: usize },
    /// Grid with zero rows or columns, or a zero pixel size.
    EmptyLayout { rows: usize, cols: usize },
}

impl fmt::Display for FigureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch {
                expected,
                got,
                context,
            } => write!(
                f,
                "Length mismatch in {}: expected {}, got {}",
                context, expected, got
            ),
            Self::NoSuchAxes { index, count } => {
                write!(f, "Subplot {} requested but figure has {}", index, count)
            }
            Self::EmptyLayout { rows, cols } => {
                write!(f, "Empty subplot grid {}x{}", rows, cols)
            }
        }
    }
}

impl std::error::Error for FigureError {}

/// Result type for figure construction.
pub type FigureResult<T> = Result<T, FigureError>;

/// Semantic colour. The render surface maps roles to concrete colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorRole {
    /// Main curve or series.
    Primary,
    /// Second series drawn for comparison.
    Secondary,
    /// Values consistent with the null hypothesis.
    Acceptance,
    /// Critical region.
    Rejection,
    /// Inside an interval.
    Included,
    /// Outside an interval.
    Excluded,
    /// Means, reference values and guides.
    Reference,
    /// De-emphasised annotation.
    Muted,
}

/// Stroke pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

/// Visual style for a primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub color: ColorRole,
    pub line: LineStyle,
    pub width: u32,
    /// Fill opacity in [0, 1].
    pub opacity: f64,
    /// Legend entry, if any.
    pub label: Option<String>,
}

impl Style {
    pub fn new(color: ColorRole) -> Self {
        Self {
            color,
            line: LineStyle::Solid,
            width: 2,
            opacity: 1.0,
            label: None,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn dashed(mut self) -> Self {
        self.line = LineStyle::Dashed;
        self
    }

    pub fn dotted(mut self) -> Self {
        self.line = LineStyle::Dotted;
        self
    }

    pub fn width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }
}

/// One drawing instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Polyline through `points`.
    Line { points: Vec<(f64, f64)>, style: Style },
    /// Area between two curves over one contiguous run of x.
    Fill {
        xs: Vec<f64>,
        lower: Vec<f64>,
        upper: Vec<f64>,
        style: Style,
    },
    /// Vertical marker. `span = None` covers the full y-range.
    VLine {
        x: f64,
        span: Option<(f64, f64)>,
        style: Style,
    },
    /// Horizontal marker. `span = None` covers the full x-range.
    HLine {
        y: f64,
        span: Option<(f64, f64)>,
        style: Style,
    },
    /// Filled rectangle with corners `(x0, y0)` and `(x1, y1)`.
    Rect {
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
        style: Style,
    },
    /// Unconnected markers.
    Scatter { points: Vec<(f64, f64)>, style: Style },
    /// Vertical stems from zero with a marker on top.
    Stem { points: Vec<(f64, f64)>, style: Style },
    /// Histogram bars between consecutive `edges`.
    Bars {
        edges: Vec<f64>,
        heights: Vec<f64>,
        style: Style,
    },
    /// Text anchored at data coordinates.
    Text {
        x: f64,
        y: f64,
        text: String,
        style: Style,
    },
}

impl Primitive {
    pub fn style(&self) -> &Style {
        match self {
            Self::Line { style, .. }
            | Self::Fill { style, .. }
            | Self::VLine { style, .. }
            | Self::HLine { style, .. }
            | Self::Rect { style, .. }
            | Self::Scatter { style, .. }
            | Self::Stem { style, .. }
            | Self::Bars { style, .. }
            | Self::Text { style, .. } => style,
        }
    }
}

/// Data bounds `(xmin, xmax, ymin, ymax)`.
pub type Bounds = (f64, f64, f64, f64);

/// One subplot.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Axes {
    pub title: Option<String>,
    pub xlabel: String,
    pub ylabel: String,
    pub xlim: Option<(f64, f64)>,
    pub ylim: Option<(f64, f64)>,
    pub grid: bool,
    primitives: Vec<Primitive>,
}

fn check_len(expected: usize, got: usize, context: &str) -> FigureResult<()> {
    if expected == got {
        Ok(())
    } else {
        Err(FigureError::LengthMismatch {
            expected,
            got,
            context: context.to_string(),
        })
    }
}

impl Axes {
    fn new(xlabel: &str, ylabel: &str) -> Self {
        Self {
            xlabel: xlabel.to_string(),
            ylabel: ylabel.to_string(),
            grid: true,
            ..Self::default()
        }
    }

    /// Primitives in drawing order.
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Legend entries as `(label, style)` in drawing order.
    pub fn legend(&self) -> Vec<(&str, &Style)> {
        self.primitives
            .iter()
            .filter_map(|p| p.style().label.as_deref().map(|l| (l, p.style())))
            .collect()
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = Some(title.into());
        self
    }

    pub fn set_labels(&mut self, xlabel: impl Into<String>, ylabel: impl Into<String>) -> &mut Self {
        self.xlabel = xlabel.into();
        self.ylabel = ylabel.into();
        self
    }

    pub fn set_xlim(&mut self, lo: f64, hi: f64) -> &mut Self {
        self.xlim = Some((lo, hi));
        self
    }

    pub fn set_ylim(&mut self, lo: f64, hi: f64) -> &mut Self {
        self.ylim = Some((lo, hi));
        self
    }

    /// Polyline through `(xs[i], ys[i])`.
    pub fn line(&mut self, xs: &[f64], ys: &[f64], style: Style) -> FigureResult<&mut Self> {
        check_len(xs.len(), ys.len(), "line")?;
        self.primitives.push(Primitive::Line {
            points: xs.iter().copied().zip(ys.iter().copied()).collect(),
            style,
        });
        Ok(self)
    }

    /// Fill between `lower` and `upper` wherever `mask` holds.
    ///
    /// Each maximal run of `true` becomes its own filled area, so disjoint
    /// tails shade separately. The legend label is kept on the first run only.
    pub fn fill_between(
        &mut self,
        xs: &[f64],
        lower: &[f64],
        upper: &[f64],
        mask: &[bool],
        style: Style,
    ) -> FigureResult<&mut Self> {
        check_len(xs.len(), lower.len(), "fill_between lower")?;
        check_len(xs.len(), upper.len(), "fill_between upper")?;
        check_len(xs.len(), mask.len(), "fill_between mask")?;

        let mut style = style;
        let mut i = 0;
        while i < xs.len() {
            if !mask[i] {
                i += 1;
                continue;
            }
            let start = i;
            while i < xs.len() && mask[i] {
                i += 1;
            }
            self.primitives.push(Primitive::Fill {
                xs: xs[start..i].to_vec(),
                lower: lower[start..i].to_vec(),
                upper: upper[start..i].to_vec(),
                style: style.clone(),
            });
            style.label = None;
        }
        Ok(self)
    }

    /// Fill between the x-axis and `ys` where `predicate(x)` holds.
    pub fn fill_where<F>(
        &mut self,
        xs: &[f64],
        ys: &[f64],
        predicate: F,
        style: Style,
    ) -> FigureResult<&mut Self>
    where
        F: Fn(f64) -> bool,
    {
        let mask: Vec<bool> = xs.iter().map(|&x| predicate(x)).collect();
        let zeros = vec![0.0; xs.len()];
        self.fill_between(xs, &zeros, ys, &mask, style)
    }

    /// Vertical marker across the whole plot.
    pub fn vline(&mut self, x: f64, style: Style) -> &mut Self {
        self.primitives.push(Primitive::VLine { x, span: None, style });
        self
    }

    /// Vertical segment from `y0` to `y1`.
    pub fn vsegment(&mut self, x: f64, y0: f64, y1: f64, style: Style) -> &mut Self {
        self.primitives.push(Primitive::VLine {
            x,
            span: Some((y0, y1)),
            style,
        });
        self
    }

    /// Horizontal marker across the whole plot.
    pub fn hline(&mut self, y: f64, style: Style) -> &mut Self {
        self.primitives.push(Primitive::HLine { y, span: None, style });
        self
    }

    /// Horizontal segment from `x0` to `x1`.
    pub fn hsegment(&mut self, y: f64, x0: f64, x1: f64, style: Style) -> &mut Self {
        self.primitives.push(Primitive::HLine {
            y,
            span: Some((x0, x1)),
            style,
        });
        self
    }

    /// Filled rectangle.
    pub fn rect(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, style: Style) -> &mut Self {
        self.primitives.push(Primitive::Rect {
            x0,
            y0,
            x1,
            y1,
            style,
        });
        self
    }

    pub fn scatter(&mut self, points: &[(f64, f64)], style: Style) -> &mut Self {
        self.primitives.push(Primitive::Scatter {
            points: points.to_vec(),
            style,
        });
        self
    }

    pub fn stem(&mut self, xs: &[f64], ys: &[f64], style: Style) -> FigureResult<&mut Self> {
        check_len(xs.len(), ys.len(), "stem")?;
        self.primitives.push(Primitive::Stem {
            points: xs.iter().copied().zip(ys.iter().copied()).collect(),
            style,
        });
        Ok(self)
    }

    /// Bars between consecutive edges; `heights.len()` must be `edges.len() - 1`.
    pub fn bars(&mut self, edges: &[f64], heights: &[f64], style: Style) -> FigureResult<&mut Self> {
        check_len(edges.len().saturating_sub(1), heights.len(), "bars")?;
        self.primitives.push(Primitive::Bars {
            edges: edges.to_vec(),
            heights: heights.to_vec(),
            style,
        });
        Ok(self)
    }

    /// Bars of a binned sample, one per bin.
    pub fn histogram(&mut self, hist: &Histogram, style: Style) -> FigureResult<&mut Self> {
        let heights: Vec<f64> = hist.counts.iter().map(|&c| c as f64).collect();
        self.bars(&hist.edges, &heights, style)
    }

    pub fn text(&mut self, x: f64, y: f64, text: impl Into<String>, style: Style) -> &mut Self {
        self.primitives.push(Primitive::Text {
            x,
            y,
            text: text.into(),
            style,
        });
        self
    }

    /// Extent of the drawn data, honouring explicit limits.
    ///
    /// Returns `None` for an empty subplot without limits.
    pub fn bounds(&self) -> Option<Bounds> {
        let mut xs = Extent::default();
        let mut ys = Extent::default();

        for p in &self.primitives {
            match p {
                Primitive::Line { points, .. } | Primitive::Scatter { points, .. } => {
                    for &(x, y) in points {
                        xs.add(x);
                        ys.add(y);
                    }
                }
                Primitive::Stem { points, .. } => {
                    ys.add(0.0);
                    for &(x, y) in points {
                        xs.add(x);
                        ys.add(y);
                    }
                }
                Primitive::Fill {
                    xs: fx,
                    lower,
                    upper,
                    ..
                } => {
                    fx.iter().for_each(|&x| xs.add(x));
                    lower.iter().chain(upper).for_each(|&y| ys.add(y));
                }
                Primitive::VLine { x, span, .. } => {
                    xs.add(*x);
                    if let Some((a, b)) = span {
                        ys.add(*a);
                        ys.add(*b);
                    }
                }
                Primitive::HLine { y, span, .. } => {
                    ys.add(*y);
                    if let Some((a, b)) = span {
                        xs.add(*a);
                        xs.add(*b);
                    }
                }
                Primitive::Rect { x0, y0, x1, y1, .. } => {
                    xs.add(*x0);
                    xs.add(*x1);
                    ys.add(*y0);
                    ys.add(*y1);
                }
                Primitive::Bars { edges, heights, .. } => {
                    edges.iter().for_each(|&x| xs.add(x));
                    ys.add(0.0);
                    heights.iter().for_each(|&y| ys.add(y));
                }
                Primitive::Text { x, y, .. } => {
                    xs.add(*x);
                    ys.add(*y);
                }
            }
        }

        let (x0, x1) = self.xlim.or(xs.range())?;
        let (y0, y1) = self.ylim.or(ys.range())?;
        Some((x0, x1, y0, y1))
    }
}

#[derive(Default)]
struct Extent {
    lo: Option<f64>,
    hi: Option<f64>,
}

impl Extent {
    fn add(&mut self, v: f64) {
        if !v.is_finite() {
            return;
        }
        self.lo = Some(self.lo.map_or(v, |lo| lo.min(v)));
        self.hi = Some(self.hi.map_or(v, |hi| hi.max(v)));
    }

    fn range(&self) -> Option<(f64, f64)> {
        Some((self.lo?, self.hi?))
    }
}

/// A titled grid of subplots, stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    title: String,
    size: (u32, u32),
    rows: usize,
    cols: usize,
    axes: Vec<Axes>,
}

impl Figure {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Pixel size `(width, height)`.
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// `(rows, cols)`.
    pub fn grid(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Mutable subplot by row-major index.
    pub fn axes(&mut self, index: usize) -> FigureResult<&mut Axes> {
        let count = self.axes.len();
        self.axes
            .get_mut(index)
            .ok_or(FigureError::NoSuchAxes { index, count })
    }

    /// All subplots, row-major.
    pub fn subplots(&self) -> &[Axes] {
        &self.axes
    }

    /// Total number of primitives across all subplots.
    pub fn primitive_count(&self) -> usize {
        self.axes.iter().map(|a| a.primitives.len()).sum()
    }
}

/// Builder for [`Figure`].
#[derive(Debug, Clone)]
pub struct FigureBuilder {
    title: String,
    size: (u32, u32),
    rows: usize,
    cols: usize,
    xlabel: String,
    ylabel: String,
}

impl FigureBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            size: (1000, 600),
            rows: 1,
            cols: 1,
            xlabel: String::new(),
            ylabel: String::new(),
        }
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    pub fn grid(mut self, rows: usize, cols: usize) -> Self {
        self.rows = rows;
        self.cols = cols;
        self
    }

    /// Axis labels applied to every subplot.
    pub fn labels(mut self, xlabel: impl Into<String>, ylabel: impl Into<String>) -> Self {
        self.xlabel = xlabel.into();
        self.ylabel = ylabel.into();
        self
    }

    pub fn build(self) -> FigureResult<Figure> {
        if self.rows == 0 || self.cols == 0 || self.size.0 == 0 || self.size.1 == 0 {
            return Err(FigureError::EmptyLayout {
                rows: self.rows,
                cols: self.cols,
            });
        }
        let axes = (0..self.rows * self.cols)
            .map(|_| Axes::new(&self.xlabel, &self.ylabel))
            .collect();
        Ok(Figure {
            title: self.title,
            size: self.size,
            rows: self.rows,
            cols: self.cols,
            axes,
        })
    }
}
