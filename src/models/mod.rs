//! Data models for the chart pipeline
//!
//! Everything here is request-scoped: built fresh for one chart and dropped afterwards.

pub mod chart;
pub mod color;
pub mod gradient;
pub mod series;

// Re-export commonly used types for convenience
pub use chart::{
    Align, AxisOptions, ChartDescription, ChartOptions, Cursor, DatasetStyle, HoverMode,
    HoverOptions, HoveredPoint, ScaleKind, TooltipColorTable, TooltipOptions,
};
pub use color::{ColorHex, Rgba};
pub use gradient::{FadePolicy, Gradient, GradientExtent, GradientStop, GradientSurface};
pub use series::SeriesRecord;
