use geo::Rect;
use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_ICON, MarkerParams};
use crate::map::Pixel;
use crate::projection::{self, Projected};

/// How icon anchor values are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorUnits {
    /// Fraction of the icon size, 0.0 to 1.0
    Fraction,
    /// Pixels from the top-left corner of the icon
    Pixels,
}

/// Icon image style for point features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IconStyle {
    /// Image path or URL
    pub src: String,
    /// Point of the icon pinned to the coordinate
    pub anchor: [f64; 2],
    pub anchor_units: [AnchorUnits; 2],
    /// Drawn size in pixels
    pub size: [f64; 2],
}

impl IconStyle {
    /// Icon centered on its coordinate
    pub fn centered(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            anchor: [0.5, 0.5],
            anchor_units: [AnchorUnits::Fraction, AnchorUnits::Fraction],
            size: [32.0, 32.0],
        }
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.size = [width, height];
        self
    }

    /// Anchor offset from the icon's top-left corner, in pixels
    pub fn anchor_offset(&self) -> (f64, f64) {
        let resolve = |value: f64, units: AnchorUnits, extent: f64| match units {
            AnchorUnits::Fraction => value * extent,
            AnchorUnits::Pixels => value,
        };
        (
            resolve(self.anchor[0], self.anchor_units[0], self.size[0]),
            resolve(self.anchor[1], self.anchor_units[1], self.size[1]),
        )
    }

    /// Pixel box covered by the icon when its anchor sits at `pixel`
    pub fn pixel_box(&self, pixel: Pixel) -> Rect<f64> {
        let (ax, ay) = self.anchor_offset();
        let min = geo::coord! { x: pixel.x - ax, y: pixel.y - ay };
        let max = geo::coord! { x: min.x + self.size[0], y: min.y + self.size[1] };
        Rect::new(min, max)
    }
}

impl Default for IconStyle {
    fn default() -> Self {
        Self::centered(DEFAULT_ICON)
    }
}

/// A point feature with popup content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    geometry: Projected,
    content: String,
    style: IconStyle,
}

impl Feature {
    pub fn new(geometry: Projected, content: impl Into<String>, style: IconStyle) -> Self {
        Self {
            geometry,
            content: content.into(),
            style,
        }
    }

    /// Build a centered icon marker from degree coordinates
    pub fn marker(params: &MarkerParams) -> Self {
        Self::new(
            projection::transform(params.longitude, params.latitude),
            params.content_or_default(),
            IconStyle::centered(params.icon_or_default()),
        )
    }

    pub fn geometry(&self) -> Projected {
        self.geometry
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn style(&self) -> &IconStyle {
        &self.style
    }
}
