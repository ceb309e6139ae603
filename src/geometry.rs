//! Shared geometric primitives used by the catalog layout data and the viewer clone handshake.
use std::fmt;

use serde::{Deserialize, Serialize};

/// A percentage of the parent element, serialized as `"37.54%"`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Percent(f32);

impl Percent {
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    pub const fn value(self) -> f32 {
        self.0
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.0)
    }
}

impl TryFrom<String> for Percent {
    type Error = String;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        let trimmed = raw.trim();
        let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
        number
            .parse::<f32>()
            .ok()
            .filter(|value| value.is_finite())
            .map(Self)
            .ok_or_else(|| format!("invalid percentage: {raw:?}"))
    }
}

impl From<Percent> for String {
    fn from(value: Percent) -> Self {
        value.to_string()
    }
}

/// Rectangle placed relative to its parent, every edge in percent units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentRect {
    pub width: Percent,
    pub height: Percent,
    pub x: Percent,
    pub y: Percent,
}

impl PercentRect {
    pub const fn new(width: f32, height: f32, x: f32, y: f32) -> Self {
        Self {
            width: Percent::new(width),
            height: Percent::new(height),
            x: Percent::new(x),
            y: Percent::new(y),
        }
    }
}

/// Page-space rectangle of a gallery element, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CloneBounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl CloneBounds {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}
