//! Gradient fill models

use std::fmt;
use std::str::FromStr;

use colorgrad::Gradient as _;
use serde::Serialize;

use super::color::Rgba;
use crate::utils::ChartError;

/// The vertical line a gradient runs along, from `(0, 0)` to `(0, height)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GradientExtent {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl GradientExtent {
    pub fn vertical(height: u32) -> Self {
        Self {
            x0: 0,
            y0: 0,
            x1: 0,
            y1: height,
        }
    }

    pub fn height(&self) -> u32 {
        self.y1.saturating_sub(self.y0)
    }
}

/// Anything that can hand out gradient extents for dataset fills
pub trait GradientSurface {
    fn allocate_gradient(&self, height: u32) -> GradientExtent;
}

/// How a stop's opacity is derived from its offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FadePolicy {
    /// `1.2 - offset`, matching the chart this tool replaces
    #[default]
    Compatible,
    /// `1 - offset`, opaque at the top and transparent at the bottom
    Linear,
}

impl FadePolicy {
    pub fn alpha_at(self, offset: f64) -> f64 {
        match self {
            FadePolicy::Compatible => 1.2 - offset,
            FadePolicy::Linear => 1.0 - offset,
        }
    }
}

impl FromStr for FadePolicy {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "compatible" => Ok(FadePolicy::Compatible),
            "linear" => Ok(FadePolicy::Linear),
            other => Err(ChartError::Config(format!(
                "Unknown gradient fade '{}'. Supported: compatible, linear",
                other
            ))),
        }
    }
}

impl fmt::Display for FadePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FadePolicy::Compatible => f.write_str("compatible"),
            FadePolicy::Linear => f.write_str("linear"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Rgba,
}

/// A linear gradient. Stops are kept in the order they were registered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gradient {
    pub extent: GradientExtent,
    pub stops: Vec<GradientStop>,
}

impl Gradient {
    /// Sample the gradient at `offset`, clamping to the outermost stops
    pub fn color_at(&self, offset: f64) -> Option<Rgba> {
        self.sample([offset]).pop()
    }

    /// Sample several offsets against a single interpolator
    pub fn sample<I>(&self, offsets: I) -> Vec<Rgba>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted = self.stops.clone();
        sorted.sort_by(|a, b| a.offset.total_cmp(&b.offset));
        sorted.dedup_by(|a, b| a.offset == b.offset);

        match sorted.as_slice() {
            [] => Vec::new(),
            [only] => offsets.into_iter().map(|_| only.color).collect(),
            stops => {
                let colors: Vec<colorgrad::Color> = stops
                    .iter()
                    .map(|s| {
                        colorgrad::Color::from_rgba8(s.color.r, s.color.g, s.color.b, alpha_u8(s.color.a))
                    })
                    .collect();
                let domain: Vec<f32> = stops.iter().map(|s| s.offset as f32).collect();

                let Ok(grad) = colorgrad::GradientBuilder::new()
                    .colors(&colors)
                    .domain(&domain)
                    .mode(colorgrad::BlendMode::Rgb)
                    .build::<colorgrad::LinearGradient>()
                else {
                    return Vec::new();
                };

                offsets
                    .into_iter()
                    .map(|offset| {
                        let [r, g, b, a] = grad.at(offset as f32).to_rgba8();
                        Rgba {
                            r,
                            g,
                            b,
                            a: f64::from(a) / 255.0,
                        }
                    })
                    .collect()
            }
        }
    }
}

fn alpha_u8(a: f64) -> u8 {
    (a.clamp(0.0, 1.0) * 255.0).round() as u8
}
