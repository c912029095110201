//! Declarative chart description consumed by a renderer

use serde::Serialize;

use super::color::ColorHex;
use super::gradient::Gradient;

/// Base color of each dataset, indexed by dataset position
pub type TooltipColorTable = Vec<ColorHex>;

/// Style and data of a single line dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetStyle {
    pub label: String,
    pub fill: bool,
    pub line_tension: f64,
    pub background_color: Gradient,
    pub border_color: ColorHex,
    pub point_border_color: &'static str,
    pub point_border_width: u32,
    pub point_hover_radius: u32,
    pub point_hover_background_color: ColorHex,
    pub point_hover_border_color: &'static str,
    pub point_hover_border_width: u32,
    pub point_radius: u32,
    pub point_hit_radius: u32,
    pub show_line: bool,
    pub data: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleKind {
    Linear,
    Category,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisOptions {
    pub kind: ScaleKind,
    pub grid_lines: bool,
    pub label: &'static str,
    pub font_size: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Center,
    Bottom,
}

/// The point under the tooltip, in renderer coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoveredPoint {
    pub dataset_index: usize,
    pub x: f64,
    pub y: f64,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipOptions {
    pub x_align: Align,
    pub y_align: Align,
    pub y_offset: f64,
    pub x_padding: u32,
    pub y_padding: u32,
    pub title_font_size: u32,
    pub display_colors: bool,
    pub background_colors: TooltipColorTable,
}

impl TooltipOptions {
    /// Background for a tooltip; none when nothing is hovered
    pub fn background_for(&self, point: Option<&HoveredPoint>) -> Option<&ColorHex> {
        point.and_then(|p| self.background_colors.get(p.dataset_index))
    }

    /// Label text is the raw value, without currency formatting
    pub fn label_for(&self, value: f64) -> String {
        value.to_string()
    }

    pub fn title(&self) -> &'static str {
        ""
    }

    /// Anchor of the tooltip box, shifted by `y_offset` from the point
    pub fn position(&self, point: &HoveredPoint) -> (f64, f64) {
        (point.x, point.y + self.y_offset)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HoverMode {
    Nearest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Cursor {
    Pointer,
    Default,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoverOptions {
    pub mode: HoverMode,
    pub cursor_on_point: Cursor,
    pub cursor_elsewhere: Cursor,
}

impl HoverOptions {
    /// Index of the point closest to `(x, y)` within `hit_radius`
    pub fn nearest(&self, points: &[(f64, f64)], x: f64, y: f64, hit_radius: f64) -> Option<usize> {
        match self.mode {
            HoverMode::Nearest => points
                .iter()
                .enumerate()
                .map(|(i, (px, py))| (i, ((px - x).powi(2) + (py - y).powi(2)).sqrt()))
                .filter(|(_, d)| *d <= hit_radius)
                .min_by(|a, b| a.1.total_cmp(&b.1))
                .map(|(i, _)| i),
        }
    }

    pub fn cursor(&self, point_under_cursor: bool) -> Cursor {
        if point_under_cursor {
            self.cursor_on_point
        } else {
            self.cursor_elsewhere
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartOptions {
    pub y_axis: AxisOptions,
    pub x_axis: AxisOptions,
    pub tooltip: TooltipOptions,
    pub hover: HoverOptions,
}

/// Everything a renderer needs to draw the line chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartDescription {
    pub labels: Vec<String>,
    pub datasets: Vec<DatasetStyle>,
    pub options: ChartOptions,
}
