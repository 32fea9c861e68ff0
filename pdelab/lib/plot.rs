//! Rendering of simulation output to image files.
//!
//! Every simulation in this crate reduces to one of three pictures, described
//! by [`Plot`]: overlaid 1D profiles, a colour-mapped 2D field, or a vector
//! field drawn over a colour-mapped background. [`render`] draws a `Plot` to a
//! file, choosing the SVG backend for `.svg` paths and the bitmap backend
//! otherwise.
//!
//! 2D fields are drawn with column index `j` along the horizontal axis and row
//! index `i` increasing upward.

use std::path::Path;
use plotters::prelude::*;
use crate::{
    error::PlotError,
    grid::Field2,
    utils::extent,
};

pub type PlotResult<T> = Result<T, PlotError>;

/// Image-level settings shared by every plot.
#[derive(Clone, Debug)]
pub struct PlotConfig {
    /// Image width in pixels (default: 800)
    pub width: u32,
    /// Image height in pixels (default: 600)
    pub height: u32,
    /// Background colour (default: white)
    pub background: RGBColor,
    /// Line width in pixels (default: 2)
    pub line_width: u32,
    /// Draw grid lines (default: true)
    pub show_grid: bool,
    /// Colours cycled through for successive curves.
    pub curve_colors: Vec<RGBColor>,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            background: WHITE,
            line_width: 2,
            show_grid: true,
            curve_colors: vec![
                RGBColor(31, 119, 180),
                RGBColor(255, 127, 14),
                RGBColor(44, 160, 44),
                RGBColor(214, 39, 40),
                RGBColor(148, 103, 189),
                RGBColor(140, 86, 75),
            ],
        }
    }
}

impl PlotConfig {
    /// Default settings at a given image size.
    pub fn sized(width: u32, height: u32) -> Self {
        Self { width, height, ..Self::default() }
    }

    /// Colour for the `k`-th curve.
    pub fn curve_color(&self, k: usize) -> RGBColor {
        if self.curve_colors.is_empty() {
            BLACK
        } else {
            self.curve_colors[k % self.curve_colors.len()]
        }
    }
}

/// Title and axis labels.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Labels {
    pub title: String,
    pub xlabel: String,
    pub ylabel: String,
}

impl Labels {
    pub fn new(title: &str, xlabel: &str, ylabel: &str) -> Self {
        Self {
            title: title.to_string(),
            xlabel: xlabel.to_string(),
            ylabel: ylabel.to_string(),
        }
    }
}

/// A single labelled curve over shared abscissae.
#[derive(Clone, Debug, PartialEq)]
pub struct Curve {
    pub label: String,
    pub y: Vec<f64>,
    pub dashed: bool,
}

impl Curve {
    pub fn new<I>(label: &str, y: I) -> Self
    where I: IntoIterator<Item = f64>
    {
        Self { label: label.to_string(), y: y.into_iter().collect(), dashed: false }
    }

    /// Draw this curve with a dashed line.
    pub fn dashed(mut self) -> Self {
        self.dashed = true;
        self
    }
}

/// Hand-tuned colour maps, each a handful of linearly interpolated stops.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Palette {
    /// Black through red and orange to pale yellow; for temperatures.
    Hot,
    /// Blue through white to red; for signed fields.
    Diverging,
    /// Dark violet through magenta to yellow; for amplitudes.
    Plasma,
}

const HOT_STOPS: [(f64, f64, f64); 5] = [
    (10.0, 10.0, 10.0),     // near black   (0.00)
    (120.0, 16.0, 10.0),    // dark red     (0.25)
    (220.0, 50.0, 20.0),    // red          (0.50)
    (255.0, 160.0, 30.0),   // orange       (0.75)
    (255.0, 250.0, 200.0),  // pale yellow  (1.00)
];

const DIVERGING_STOPS: [(f64, f64, f64); 5] = [
    (0.0, 0.0, 90.0),       // dark blue    (0.00)
    (60.0, 110.0, 255.0),   // blue         (0.25)
    (255.0, 255.0, 255.0),  // white        (0.50)
    (255.0, 70.0, 50.0),    // red          (0.75)
    (110.0, 0.0, 0.0),      // dark red     (1.00)
];

const PLASMA_STOPS: [(f64, f64, f64); 5] = [
    (13.0, 8.0, 135.0),     // indigo       (0.00)
    (126.0, 3.0, 168.0),    // violet       (0.25)
    (204.0, 71.0, 120.0),   // magenta      (0.50)
    (248.0, 149.0, 64.0),   // orange       (0.75)
    (240.0, 249.0, 33.0),   // yellow       (1.00)
];

impl Palette {
    fn stops(&self) -> &'static [(f64, f64, f64); 5] {
        match self {
            Self::Hot => &HOT_STOPS,
            Self::Diverging => &DIVERGING_STOPS,
            Self::Plasma => &PLASMA_STOPS,
        }
    }

    /// Map `t ∈ [0, 1]` to a colour; values outside are clamped.
    pub fn color(&self, t: f64) -> RGBColor {
        let stops = self.stops();
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let seg = t * 4.0;
        let i = (seg as usize).min(3);
        let s = seg - i as f64;
        let (r0, g0, b0) = stops[i];
        let (r1, g1, b1) = stops[i + 1];
        RGBColor(
            (r0 + s * (r1 - r0)) as u8,
            (g0 + s * (g1 - g0)) as u8,
            (b0 + s * (b1 - b0)) as u8,
        )
    }
}

/// Value range used for colour mapping.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Range {
    /// Use the data's own extent.
    Auto,
    /// Use the data's extent, made symmetric about zero.
    Symmetric,
    /// Fixed bounds.
    Fixed(f64, f64),
}

impl Range {
    fn resolve(&self, field: &Field2) -> (f64, f64) {
        let (lo, hi) = match *self {
            Self::Auto => extent(field),
            Self::Symmetric => {
                let (lo, hi) = extent(field);
                let m = lo.abs().max(hi.abs());
                (-m, m)
            },
            Self::Fixed(lo, hi) => (lo, hi),
        };
        if !lo.is_finite() || !hi.is_finite() {
            (0.0, 1.0)
        } else if hi - lo <= f64::EPSILON * hi.abs().max(1.0) {
            (lo - 0.5, hi + 0.5)
        } else {
            (lo, hi)
        }
    }
}

/// A picture of simulation output.
#[derive(Clone, Debug)]
pub enum Plot {
    /// One or more curves over the same abscissae.
    Profiles {
        labels: Labels,
        x: Vec<f64>,
        curves: Vec<Curve>,
        y_range: Option<(f64, f64)>,
    },
    /// A colour-mapped 2D field.
    Heatmap {
        labels: Labels,
        field: Field2,
        palette: Palette,
        range: Range,
    },
    /// Arrows of `(u, v)` drawn over a colour-mapped `background`.
    Vectors {
        labels: Labels,
        u: Field2,
        v: Field2,
        background: Field2,
        palette: Palette,
    },
}

impl Plot {
    /// Title and axis labels.
    pub fn labels(&self) -> &Labels {
        match self {
            Self::Profiles { labels, .. } => labels,
            Self::Heatmap { labels, .. } => labels,
            Self::Vectors { labels, .. } => labels,
        }
    }

    /// Return `true` if `self` is `Profiles`.
    pub fn is_profiles(&self) -> bool { matches!(self, Self::Profiles { .. }) }

    /// Return `true` if `self` is `Heatmap`.
    pub fn is_heatmap(&self) -> bool { matches!(self, Self::Heatmap { .. }) }

    /// Return `true` if `self` is `Vectors`.
    pub fn is_vectors(&self) -> bool { matches!(self, Self::Vectors { .. }) }

    fn check(&self) -> PlotResult<()> {
        let nonempty = match self {
            Self::Profiles { x, curves, .. } => {
                x.len() >= 2
                    && !curves.is_empty()
                    && curves.iter().all(|c| c.y.len() == x.len())
            },
            Self::Heatmap { field, .. } => !field.is_empty(),
            Self::Vectors { u, v, background, .. } => {
                !u.is_empty() && u.dim() == v.dim() && u.dim() == background.dim()
            },
        };
        nonempty.then_some(()).ok_or(PlotError::Empty)
    }
}

fn draw_err<E: std::fmt::Display>(err: E) -> PlotError {
    PlotError::Draw(err.to_string())
}

/// Draw `plot` to `path`, creating parent directories as needed.
///
/// Paths ending in `.svg` are drawn as SVG; anything else goes through the
/// bitmap backend, whose format follows the extension.
pub fn render<P>(plot: &Plot, path: P, config: &PlotConfig) -> PlotResult<()>
where P: AsRef<Path>
{
    plot.check()?;
    let path = path.as_ref();
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() { std::fs::create_dir_all(dir)?; }
    }
    let size = (config.width, config.height);
    let is_svg = path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
    if is_svg {
        draw(SVGBackend::new(path, size), plot, config)
    } else {
        draw(BitMapBackend::new(path, size), plot, config)
    }
}

fn draw<DB>(backend: DB, plot: &Plot, config: &PlotConfig) -> PlotResult<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background).map_err(draw_err)?;
    match plot {
        Plot::Profiles { labels, x, curves, y_range } => {
            draw_profiles(&root, labels, x, curves, *y_range, config)?;
        },
        Plot::Heatmap { labels, field, palette, range } => {
            draw_heatmap(&root, labels, field, *palette, *range, config)?;
        },
        Plot::Vectors { labels, u, v, background, palette } => {
            draw_vectors(&root, labels, u, v, background, *palette, config)?;
        },
    }
    root.present().map_err(draw_err)
}

fn draw_profiles<DB>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    labels: &Labels,
    x: &[f64],
    curves: &[Curve],
    y_range: Option<(f64, f64)>,
    config: &PlotConfig,
) -> PlotResult<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let (x0, x1) = extent(x);
    let (y0, y1) = y_range.unwrap_or_else(|| {
        let (lo, hi) = extent(curves.iter().flat_map(|c| c.y.iter()));
        let pad = 0.05 * (hi - lo).abs().max(1e-12);
        (lo - pad, hi + pad)
    });
    let (y0, y1) = if y0.is_finite() && y1.is_finite() { (y0, y1) } else { (0.0, 1.0) };

    let mut chart = ChartBuilder::on(root)
        .caption(&labels.title, ("sans-serif", 28).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(x0..x1, y0..y1)
        .map_err(draw_err)?;

    let mut mesh = chart.configure_mesh();
    mesh.x_desc(&labels.xlabel).y_desc(&labels.ylabel);
    if !config.show_grid { mesh.disable_mesh(); }
    mesh.draw().map_err(draw_err)?;

    for (k, curve) in curves.iter().enumerate() {
        let color = config.curve_color(k);
        let style = ShapeStyle::from(&color).stroke_width(config.line_width);
        let points: Vec<(f64, f64)>
            = x.iter().copied().zip(curve.y.iter().copied()).collect();
        let series = if curve.dashed {
            chart.draw_series(DashedLineSeries::new(points, 8, 5, style))
        } else {
            chart.draw_series(LineSeries::new(points, style))
        };
        series.map_err(draw_err)?
            .label(curve.label.as_str())
            .legend(move |(lx, ly)| {
                PathElement::new(vec![(lx, ly), (lx + 20, ly)], color)
            });
    }

    chart.configure_series_labels()
        .background_style(config.background.mix(0.8))
        .border_style(BLACK)
        .position(SeriesLabelPosition::UpperRight)
        .draw()
        .map_err(draw_err)
}

fn cells<'a>(field: &'a Field2, palette: Palette, (lo, hi): (f64, f64))
    -> impl Iterator<Item = Rectangle<(f64, f64)>> + 'a
{
    field.indexed_iter()
        .map(move |((i, j), &value)| {
            let color = palette.color((value - lo) / (hi - lo));
            let (x, y) = (j as f64, i as f64);
            Rectangle::new([(x, y), (x + 1.0, y + 1.0)], color.filled())
        })
}

fn draw_heatmap<DB>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    labels: &Labels,
    field: &Field2,
    palette: Palette,
    range: Range,
    config: &PlotConfig,
) -> PlotResult<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let (nr, nc) = field.dim();
    let bounds = range.resolve(field);
    let mut chart = ChartBuilder::on(root)
        .caption(&labels.title, ("sans-serif", 28).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..nc as f64, 0.0..nr as f64)
        .map_err(draw_err)?;
    let mut mesh = chart.configure_mesh();
    mesh.x_desc(&labels.xlabel).y_desc(&labels.ylabel).disable_mesh();
    if !config.show_grid { mesh.disable_axes(); }
    mesh.draw().map_err(draw_err)?;
    chart.draw_series(cells(field, palette, bounds)).map_err(draw_err)?;
    Ok(())
}

// at most this many arrows along each axis
const ARROW_LATTICE: usize = 20;

#[allow(clippy::too_many_arguments)]
fn draw_vectors<DB>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    labels: &Labels,
    u: &Field2,
    v: &Field2,
    background: &Field2,
    palette: Palette,
    config: &PlotConfig,
) -> PlotResult<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let (nr, nc) = u.dim();
    let mut chart = ChartBuilder::on(root)
        .caption(&labels.title, ("sans-serif", 28).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..nc as f64, 0.0..nr as f64)
        .map_err(draw_err)?;
    let mut mesh = chart.configure_mesh();
    mesh.x_desc(&labels.xlabel).y_desc(&labels.ylabel).disable_mesh();
    if !config.show_grid { mesh.disable_axes(); }
    mesh.draw().map_err(draw_err)?;

    let bounds = Range::Auto.resolve(background);
    chart.draw_series(cells(background, palette, bounds)).map_err(draw_err)?;

    let stride = (nr.max(nc) / ARROW_LATTICE).max(1);
    let speed_max = u.iter().zip(v.iter())
        .map(|(uk, vk)| uk.hypot(*vk))
        .filter(|s| s.is_finite())
        .fold(0.0, f64::max);
    if speed_max <= 0.0 { return Ok(()); }
    let scale = 0.9 * stride as f64 / speed_max;
    let arrows = (0..nr).step_by(stride)
        .flat_map(|i| (0..nc).step_by(stride).map(move |j| (i, j)))
        .filter_map(|(i, j)| {
            let (du, dv) = (u[[i, j]] * scale, v[[i, j]] * scale);
            (du.is_finite() && dv.is_finite() && (du != 0.0 || dv != 0.0))
                .then(|| {
                    let (x, y) = (j as f64 + 0.5, i as f64 + 0.5);
                    PathElement::new(vec![(x, y), (x + du, y + dv)], BLACK)
                })
        });
    chart.draw_series(arrows).map_err(draw_err)?;
    Ok(())
}
