//! Renderer-independent chart descriptions.
//!
//! Experiments are turned into [`Figure`]s here; `ui::plot` draws them.

pub mod figures;
pub mod projection;
pub mod ticks;

use eframe::egui::Color32;

/// Matplotlib's second and third cycle colours, used for the fitted minima.
pub const POLY_FIT_COLOR: Color32 = Color32::from_rgb(0xff, 0x7f, 0x0e);
pub const GRID_SEARCH_COLOR: Color32 = Color32::from_rgb(0x2c, 0xa0, 0x2c);

/// Appearance settings shared by every figure.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    pub line_width: f32,
    pub marker_radius: f32,
    pub prediction_color: Color32,
    pub measurement_color: Color32,
    /// Finest fraction of π used for phase and time axes.
    pub pi_denominator: u64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            line_width: 1.5,
            marker_radius: 1.5,
            prediction_color: Color32::from_rgb(0xca, 0x67, 0x02),
            measurement_color: Color32::from_rgb(0x00, 0x5f, 0x73),
            pi_denominator: 4,
        }
    }
}

/// How tick labels along the x axis are produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickStyle {
    Auto,
    /// Marks at multiples of π/n, labelled as reduced fractions.
    PiFractions(u64),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SeriesKind {
    Line(Vec<[f64; 2]>),
    Points(Vec<[f64; 2]>),
    VLine(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// Legend entry; unnamed series stay out of the legend.
    pub name: Option<String>,
    pub kind: SeriesKind,
    pub color: Option<Color32>,
}

impl Series {
    pub fn line(points: Vec<[f64; 2]>) -> Self {
        Self {
            name: None,
            kind: SeriesKind::Line(points),
            color: None,
        }
    }

    pub fn points(points: Vec<[f64; 2]>) -> Self {
        Self {
            name: None,
            kind: SeriesKind::Points(points),
            color: None,
        }
    }

    pub fn vline(x: f64) -> Self {
        Self {
            name: None,
            kind: SeriesKind::VLine(x),
            color: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn color(mut self, color: Color32) -> Self {
        self.color = Some(color);
        self
    }
}

/// One chart, shown on its own in the central panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    /// Stable id for the plot widget.
    pub id: String,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
    pub x_ticks: TickStyle,
    /// `[x_min, x_max, y_min, y_max]` kept in view; data outside still widens it.
    pub bounds: Option<[f64; 4]>,
    /// Draw without axes or grid (projected 3-D views).
    pub bare: bool,
}

impl Figure {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            x_label: String::new(),
            y_label: String::new(),
            series: Vec::new(),
            x_ticks: TickStyle::Auto,
            bounds: None,
            bare: false,
        }
    }

    pub fn labels(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.x_label = x.into();
        self.y_label = y.into();
        self
    }

    pub fn with(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    pub fn has_legend(&self) -> bool {
        self.series.iter().any(|s| s.name.is_some())
    }
}

/// Pair up two equally long columns as plot points.
pub fn zip_points(xs: &[f64], ys: &[f64]) -> Vec<[f64; 2]> {
    xs.iter().zip(ys).map(|(&x, &y)| [x, y]).collect()
}
