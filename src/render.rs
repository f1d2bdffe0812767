//! Render surfaces: where finished figures and explanations go.
//!
//! [`RenderSurface`] is the boundary to the outside world. The library ships
//! two implementations: [`SvgDirSurface`] rasterises figures to SVG files with
//! `plotters`, and [`MemorySurface`] keeps everything in memory for tests and
//! embedding.

use crate::figure::{Axes, ColorRole, Figure, LineStyle, Primitive, Style};
use plotters::chart::SeriesAnno;
use plotters::coord::Shift;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// Failure to display or persist output.
#[derive(Debug)]
pub enum RenderError {
    Io { path: PathBuf, source: std::io::Error },
    Draw(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {}", path.display(), source),
            Self::Draw(msg) => write!(f, "drawing failed: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Draw(_) => None,
        }
    }
}

fn draw_err<E: fmt::Display>(e: E) -> RenderError {
    RenderError::Draw(e.to_string())
}

/// Displays page output. `page` is the id of the page being rendered.
pub trait RenderSurface {
    fn show_figure(&mut self, page: &str, figure: &Figure) -> Result<(), RenderError>;

    /// Explanatory Markdown shown under a heading.
    fn show_markdown(&mut self, page: &str, title: &str, body: &str) -> Result<(), RenderError>;

    /// A user-visible message for a failed run.
    fn show_error(&mut self, page: &str, message: &str) -> Result<(), RenderError>;
}

/// Collects output in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    pub figures: Vec<(String, Figure)>,
    /// `(page, title, body)`
    pub markdown: Vec<(String, String, String)>,
    /// `(page, message)`
    pub errors: Vec<(String, String)>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last figure shown for `page`.
    pub fn figure(&self, page: &str) -> Option<&Figure> {
        self.figures
            .iter()
            .rev()
            .find(|(p, _)| p == page)
            .map(|(_, f)| f)
    }
}

impl RenderSurface for MemorySurface {
    fn show_figure(&mut self, page: &str, figure: &Figure) -> Result<(), RenderError> {
        self.figures.push((page.to_string(), figure.clone()));
        Ok(())
    }

    fn show_markdown(&mut self, page: &str, title: &str, body: &str) -> Result<(), RenderError> {
        self.markdown
            .push((page.to_string(), title.to_string(), body.to_string()));
        Ok(())
    }

    fn show_error(&mut self, page: &str, message: &str) -> Result<(), RenderError> {
        self.errors.push((page.to_string(), message.to_string()));
        Ok(())
    }
}

/// Writes `<page>.svg` and `<page>.md` into a directory.
#[derive(Debug, Clone)]
pub struct SvgDirSurface {
    dir: PathBuf,
}

impl SvgDirSurface {
    /// Create the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, RenderError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| RenderError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn write(&self, file: String, contents: &str) -> Result<(), RenderError> {
        let path = self.dir.join(file);
        fs::write(&path, contents).map_err(|source| RenderError::Io {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), bytes = contents.len(), "wrote");
        Ok(())
    }
}

impl RenderSurface for SvgDirSurface {
    fn show_figure(&mut self, page: &str, figure: &Figure) -> Result<(), RenderError> {
        let svg = render_svg(figure)?;
        self.write(format!("{}.svg", page), &svg)
    }

    fn show_markdown(&mut self, page: &str, title: &str, body: &str) -> Result<(), RenderError> {
        self.write(format!("{}.md", page), &format!("# {}\n\n{}\n", title, body))
    }

    fn show_error(&mut self, page: &str, message: &str) -> Result<(), RenderError> {
        error!(page, message, "page failed");
        self.write(format!("{}.error.txt", page), message)
    }
}

/// Concrete colour for a role.
pub fn role_color(role: ColorRole) -> RGBColor {
    match role {
        ColorRole::Primary => RGBColor(0, 150, 199),
        ColorRole::Secondary => RGBColor(230, 159, 0),
        ColorRole::Acceptance => RGBColor(46, 160, 67),
        ColorRole::Rejection => RGBColor(230, 75, 53),
        ColorRole::Included => RGBColor(46, 160, 67),
        ColorRole::Excluded => RGBColor(214, 39, 40),
        ColorRole::Reference => RGBColor(31, 78, 180),
        ColorRole::Muted => RGBColor(120, 120, 120),
    }
}

fn stroke(style: &Style) -> ShapeStyle {
    role_color(style.color).mix(style.opacity).stroke_width(style.width)
}

fn fill(style: &Style) -> ShapeStyle {
    role_color(style.color).mix(style.opacity).filled()
}

/// Rasterise a figure to an SVG document.
pub fn render_svg(figure: &Figure) -> Result<String, RenderError> {
    let mut buf = String::new();
    {
        let root = SVGBackend::with_string(&mut buf, figure.size()).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;
        let body = root
            .titled(figure.title(), ("sans-serif", 24))
            .map_err(draw_err)?;
        let panels = body.split_evenly(figure.grid());
        for (panel, axes) in panels.iter().zip(figure.subplots()) {
            draw_axes(panel, axes)?;
        }
        root.present().map_err(draw_err)?;
    }
    Ok(buf)
}

fn padded(lo: f64, hi: f64, frac: f64) -> (f64, f64) {
    if hi > lo {
        let pad = (hi - lo) * frac;
        (lo - pad, hi + pad)
    } else {
        (lo - 0.5, hi + 0.5)
    }
}

fn draw_axes<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    axes: &Axes,
) -> Result<(), RenderError> {
    let (x0, x1, y0, y1) = axes.bounds().unwrap_or((0.0, 1.0, 0.0, 1.0));
    let (x0, x1) = match axes.xlim {
        Some(lim) => lim,
        None => padded(x0, x1, 0.02),
    };
    let (y0, y1) = match axes.ylim {
        Some(lim) => lim,
        None => padded(y0, y1, 0.05),
    };

    let mut builder = ChartBuilder::on(area);
    builder.margin(10).x_label_area_size(40).y_label_area_size(60);
    if let Some(title) = &axes.title {
        builder.caption(title, ("sans-serif", 18));
    }
    let mut chart = builder
        .build_cartesian_2d(x0..x1, y0..y1)
        .map_err(draw_err)?;

    let mut mesh = chart.configure_mesh();
    mesh.x_desc(axes.xlabel.as_str()).y_desc(axes.ylabel.as_str());
    if !axes.grid {
        mesh.disable_mesh();
    }
    mesh.draw().map_err(draw_err)?;

    let frame = (x0, x1, y0, y1);
    for primitive in axes.primitives() {
        draw_primitive(&mut chart, primitive, frame)?;
    }

    if !axes.legend().is_empty() {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(draw_err)?;
    }
    Ok(())
}

type Chart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

fn annotate<'a, DB: DrawingBackend + 'a>(anno: &mut SeriesAnno<'a, DB>, style: &Style) {
    if let Some(label) = &style.label {
        let color = role_color(style.color).mix(style.opacity.max(0.5));
        anno.label(label.as_str()).legend(move |(x, y)| {
            PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(3))
        });
    }
}

/// Split a polyline into the "on" pieces of a dash pattern.
///
/// Lengths are measured in frame-relative units so dashes look the same on
/// every axis scale.
fn dash_pieces(
    points: &[(f64, f64)],
    pattern: LineStyle,
    frame: (f64, f64, f64, f64),
) -> Vec<Vec<(f64, f64)>> {
    let (on, off) = match pattern {
        LineStyle::Solid => return vec![points.to_vec()],
        LineStyle::Dashed => (0.02, 0.012),
        LineStyle::Dotted => (0.004, 0.008),
    };
    let sx = (frame.1 - frame.0).abs().max(f64::MIN_POSITIVE);
    let sy = (frame.3 - frame.2).abs().max(f64::MIN_POSITIVE);

    let mut pieces = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();
    let mut drawing = true;
    let mut left = on;

    for pair in points.windows(2) {
        let (mut a, b) = (pair[0], pair[1]);
        let mut seg = (((b.0 - a.0) / sx).powi(2) + ((b.1 - a.1) / sy).powi(2)).sqrt();
        if drawing && current.is_empty() {
            current.push(a);
        }
        while seg > left {
            let t = left / seg;
            let cut = (a.0 + (b.0 - a.0) * t, a.1 + (b.1 - a.1) * t);
            if drawing {
                current.push(cut);
                pieces.push(std::mem::take(&mut current));
            } else {
                current.push(cut);
            }
            seg -= left;
            a = cut;
            drawing = !drawing;
            left = if drawing { on } else { off };
        }
        left -= seg;
        if drawing {
            current.push(b);
        } else {
            current.clear();
        }
    }
    if drawing && current.len() > 1 {
        pieces.push(current);
    }
    pieces
}

fn draw_path<'a, DB: DrawingBackend + 'a>(
    chart: &mut Chart<'a, DB>,
    points: &[(f64, f64)],
    style: &Style,
    frame: (f64, f64, f64, f64),
) -> Result<(), RenderError> {
    let shape = stroke(style);
    let pieces: Vec<Vec<(f64, f64)>> = points
        .split(|p| !p.0.is_finite() || !p.1.is_finite())
        .filter(|run| run.len() > 1)
        .flat_map(|run| dash_pieces(run, style.line, frame))
        .collect();
    let anno = chart
        .draw_series(pieces.into_iter().map(|p| PathElement::new(p, shape)))
        .map_err(draw_err)?;
    annotate(anno, style);
    Ok(())
}

fn draw_primitive<'a, DB: DrawingBackend + 'a>(
    chart: &mut Chart<'a, DB>,
    primitive: &Primitive,
    frame: (f64, f64, f64, f64),
) -> Result<(), RenderError> {
    let (x0, x1, y0, y1) = frame;
    match primitive {
        Primitive::Line { points, style } => draw_path(chart, points, style, frame)?,
        Primitive::VLine { x, span, style } => {
            let (a, b) = span.unwrap_or((y0, y1));
            draw_path(chart, &[(*x, a), (*x, b)], style, frame)?;
        }
        Primitive::HLine { y, span, style } => {
            let (a, b) = span.unwrap_or((x0, x1));
            draw_path(chart, &[(a, *y), (b, *y)], style, frame)?;
        }
        Primitive::Fill {
            xs,
            lower,
            upper,
            style,
        } => {
            let clip = |y: f64| if y.is_finite() { y } else { y1 };
            let outline: Vec<(f64, f64)> = xs
                .iter()
                .copied()
                .zip(upper.iter().map(|&y| clip(y)))
                .chain(xs.iter().copied().zip(lower.iter().map(|&y| clip(y))).rev())
                .collect();
            let anno = chart
                .draw_series(std::iter::once(Polygon::new(outline, fill(style))))
                .map_err(draw_err)?;
            annotate(anno, style);
        }
        Primitive::Rect {
            x0: rx0,
            y0: ry0,
            x1: rx1,
            y1: ry1,
            style,
        } => {
            let anno = chart
                .draw_series(std::iter::once(Rectangle::new(
                    [(*rx0, *ry0), (*rx1, *ry1)],
                    fill(style),
                )))
                .map_err(draw_err)?;
            annotate(anno, style);
        }
        Primitive::Scatter { points, style } => {
            let shape = fill(style);
            let radius = style.width.max(2) + 1;
            let anno = chart
                .draw_series(points.iter().map(|&p| Circle::new(p, radius, shape)))
                .map_err(draw_err)?;
            annotate(anno, style);
        }
        Primitive::Stem { points, style } => {
            let line = stroke(style);
            chart
                .draw_series(
                    points
                        .iter()
                        .map(|&(x, y)| PathElement::new(vec![(x, 0.0), (x, y)], line)),
                )
                .map_err(draw_err)?;
            let dot = fill(style);
            let anno = chart
                .draw_series(points.iter().map(|&p| Circle::new(p, 4, dot)))
                .map_err(draw_err)?;
            annotate(anno, style);
        }
        Primitive::Bars {
            edges,
            heights,
            style,
        } => {
            let shape = fill(style);
            let anno = chart
                .draw_series(
                    edges
                        .windows(2)
                        .zip(heights)
                        .map(|(e, &h)| Rectangle::new([(e[0], 0.0), (e[1], h)], shape)),
                )
                .map_err(draw_err)?;
            annotate(anno, style);
        }
        Primitive::Text { x, y, text, style } => {
            let color = role_color(style.color);
            chart
                .draw_series(std::iter::once(Text::new(
                    text.clone(),
                    (*x, *y),
                    ("sans-serif", 14).into_font().color(&color),
                )))
                .map_err(draw_err)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::FigureBuilder;

    #[test]
    fn test_dash_pieces_solid_is_whole() {
        let pts = [(0.0, 0.0), (1.0, 1.0)];
        let pieces = dash_pieces(&pts, LineStyle::Solid, (0.0, 1.0, 0.0, 1.0));
        assert_eq!(pieces, vec![pts.to_vec()]);
    }

    #[test]
    fn test_dash_pieces_split_long_segment() {
        let pts = [(0.0, 0.0), (1.0, 0.0)];
        let pieces = dash_pieces(&pts, LineStyle::Dashed, (0.0, 1.0, 0.0, 1.0));
        // One period is 0.032 of the frame width
        assert!(pieces.len() >= 30);
        for piece in &pieces {
            let len = piece.last().unwrap().0 - piece[0].0;
            assert!(len <= 0.02 + 1e-12);
        }
    }

    #[test]
    fn test_render_svg_contains_title() {
        let mut fig = FigureBuilder::new("Binomial distribution")
            .size(400, 300)
            .labels("k", "P(X = k)")
            .build()
            .unwrap();
        let ax = fig.axes(0).unwrap();
        ax.stem(&[0.0, 1.0, 2.0], &[0.25, 0.5, 0.25], Style::new(ColorRole::Primary).label("pmf"))
            .unwrap();
        ax.vline(1.0, Style::new(ColorRole::Reference).dashed());
        ax.text(1.0, 0.4, "mean", Style::new(ColorRole::Muted));

        let svg = render_svg(&fig).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("Binomial distribution"));
        assert!(svg.contains("pmf"));
    }

    #[test]
    fn test_memory_surface_records() {
        let mut surface = MemorySurface::new();
        let fig = FigureBuilder::new("t").build().unwrap();
        surface.show_figure("a", &fig).unwrap();
        surface.show_markdown("a", "About", "text").unwrap();
        surface.show_error("b", "bad").unwrap();
        assert!(surface.figure("a").is_some());
        assert!(surface.figure("b").is_none());
        assert_eq!(surface.errors, vec![("b".to_string(), "bad".to_string())]);
    }

    #[test]
    fn test_svg_dir_surface_writes_files() {
        let dir = std::env::temp_dir().join(format!("statviz-render-{}", std::process::id()));
        let mut surface = SvgDirSurface::new(&dir).unwrap();
        let fig = FigureBuilder::new("empty").size(200, 100).build().unwrap();
        surface.show_figure("empty", &fig).unwrap();
        surface.show_markdown("empty", "About", "body").unwrap();
        assert!(dir.join("empty.svg").exists());
        let md = fs::read_to_string(dir.join("empty.md")).unwrap();
        assert!(md.starts_with("# About"));
        let _ = fs::remove_dir_all(&dir);
    }
}
