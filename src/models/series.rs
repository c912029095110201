//! Price series as handed over by the coin provider

use serde::Serialize;

use super::color::ColorHex;

/// One named, colored price history, oldest sample first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesRecord {
    pub name: String,
    pub color: ColorHex,
    pub samples: Vec<f64>,
}
