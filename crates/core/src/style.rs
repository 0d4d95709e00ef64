//! Visual styling configuration.
//!
//! Styling is cosmetic: colors, marker radius, and line width are external
//! configuration, not part of the algorithmic contract. The defaults are
//! the original green-on-black palette of the site background.

use crate::error::FlowError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// sRGB color with components in [0, 1].
///
/// Serializes as a hex string `"#rrggbb"`. The hex round-trip quantizes to
/// 8 bits, which hex colors inherently are.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Srgb {
    /// Parses a hex color like `"#51d448"` or `"51d448"` (case
    /// insensitive).
    ///
    /// Returns `FlowError::InvalidColor` for anything but 6 hex digits.
    pub fn from_hex(hex: &str) -> Result<Srgb, FlowError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 {
            return Err(FlowError::InvalidColor(format!(
                "expected 6 hex digits, got {}",
                hex.len()
            )));
        }
        let r = u8::from_str_radix(&hex[0..2], 16)
            .map_err(|e| FlowError::InvalidColor(format!("invalid red component: {e}")))?;
        let g = u8::from_str_radix(&hex[2..4], 16)
            .map_err(|e| FlowError::InvalidColor(format!("invalid green component: {e}")))?;
        let b = u8::from_str_radix(&hex[4..6], 16)
            .map_err(|e| FlowError::InvalidColor(format!("invalid blue component: {e}")))?;
        Ok(Srgb {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        })
    }

    /// Formats the color as `"#rrggbb"`.
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_bytes();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Quantizes the components to 8 bits.
    pub fn to_bytes(self) -> [u8; 3] {
        [
            (self.r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.b.clamp(0.0, 1.0) * 255.0).round() as u8,
        ]
    }
}

impl Serialize for Srgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Srgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Srgb::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}

/// Rendering style for a scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    /// Canvas clear color.
    pub background: Srgb,
    /// Stroke color for triangle edges.
    pub edge_color: Srgb,
    /// Fill color for point markers.
    pub point_color: Srgb,
    /// Marker radius in viewport units.
    pub point_radius: f64,
    /// Edge stroke width in viewport units.
    pub line_width: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            background: Srgb {
                r: 0.0,
                g: 0.0,
                b: 0.0,
            },
            edge_color: Srgb::from_hex("#51d448").expect("valid default edge color"),
            point_color: Srgb::from_hex("#289120").expect("valid default point color"),
            point_radius: 5.0,
            line_width: 2.0,
        }
    }
}
