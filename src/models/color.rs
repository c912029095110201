//! Color models shared by the gradient builder and the renderer

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::utils::ChartError;

/// A validated `#RGB` / `#RRGGBB` color, kept in the spelling it arrived in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorHex {
    text: String,
    rgb: [u8; 3],
}

impl ColorHex {
    /// Parse a hex color. Three-digit forms expand each digit (`#abc` -> `#aabbcc`).
    pub fn parse(input: &str) -> Result<Self, ChartError> {
        let bad = || ChartError::InvalidColor(input.to_string());

        let digits = input.strip_prefix('#').ok_or_else(bad)?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(bad());
        }

        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => return Err(bad()),
        };

        let bytes = hex::decode(&expanded).map_err(|_| bad())?;
        let rgb: [u8; 3] = bytes.try_into().map_err(|_| bad())?;

        Ok(Self {
            text: input.to_string(),
            rgb,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn rgb(&self) -> [u8; 3] {
        self.rgb
    }

    /// The same color with the given opacity
    pub fn with_alpha(&self, a: f64) -> Rgba {
        let [r, g, b] = self.rgb;
        Rgba { r, g, b, a }
    }
}

impl FromStr for ColorHex {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ColorHex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Serialize for ColorHex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

/// An RGB color with a fractional opacity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
