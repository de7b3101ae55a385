mod builder;
mod marker;

pub use builder::*;
pub use marker::*;

use serde::{Deserialize, Serialize};

use crate::{MapError, Result};

/// Default XYZ template: GSI standard map tiles
pub const DEFAULT_TILE_URL: &str = "https://cyberjapandata.gsi.go.jp/xyz/std/{z}/{x}/{y}.png";

/// Attribution shown for the default tile layer
pub const DEFAULT_ATTRIBUTION: &str =
    "<a href='https://maps.gsi.go.jp/development/ichiran.html' target='_blank'>国土地理院</a>";

pub const DEFAULT_TARGET: &str = "olmap";
pub const DEFAULT_POPUP_ELEMENT: &str = "popup";
pub const DEFAULT_LONGITUDE: f64 = 136.22167;
pub const DEFAULT_LATITUDE: f64 = 36.06519;
pub const DEFAULT_MAX_ZOOM: f64 = 18.0;
pub const DEFAULT_MIN_ZOOM: f64 = 1.0;
pub const DEFAULT_ZOOM: f64 = 12.0;

/// Configuration for constructing a map facade
///
/// Every key is optional when deserializing; missing keys take the defaults above.
/// Keys use the camelCase spelling of the JavaScript-style options object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapConfig {
    /// Id of the host element the map renders into
    pub target: String,
    /// URL template for the base tile layer
    pub tile_url: String,
    /// Attribution text for the base tile layer
    pub attribution: String,
    /// Id of the element holding popup content
    pub popup_element: String,
    /// Initial center longitude in degrees
    pub longitude: f64,
    /// Initial center latitude in degrees
    pub latitude: f64,
    pub max_zoom: f64,
    pub min_zoom: f64,
    /// Initial zoom, clamped into `[min_zoom, max_zoom]`
    pub zoom: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET.to_string(),
            tile_url: DEFAULT_TILE_URL.to_string(),
            attribution: DEFAULT_ATTRIBUTION.to_string(),
            popup_element: DEFAULT_POPUP_ELEMENT.to_string(),
            longitude: DEFAULT_LONGITUDE,
            latitude: DEFAULT_LATITUDE,
            max_zoom: DEFAULT_MAX_ZOOM,
            min_zoom: DEFAULT_MIN_ZOOM,
            zoom: DEFAULT_ZOOM,
        }
    }
}

impl MapConfig {
    /// Parse a configuration object from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Create a configuration rendering into the given target
    pub fn for_target(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            ..Default::default()
        }
    }

    /// Set the base tile URL template
    pub fn with_tile_url(mut self, url: impl Into<String>) -> Self {
        self.tile_url = url.into();
        self
    }

    /// Set the initial center in degrees
    pub fn with_center(mut self, longitude: f64, latitude: f64) -> Self {
        self.longitude = longitude;
        self.latitude = latitude;
        self
    }

    /// Set the initial zoom
    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = zoom;
        self
    }

    /// Set the zoom bounds
    pub fn with_zoom_range(mut self, min_zoom: f64, max_zoom: f64) -> Self {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self
    }

    /// Create a builder for more complex configuration
    pub fn builder() -> MapConfigBuilder {
        MapConfigBuilder::new()
    }

    /// Check the numeric options
    ///
    /// The render target is not checked here; the document does that at construction.
    pub fn validate(&self) -> Result<()> {
        let numbers = [
            ("longitude", self.longitude),
            ("latitude", self.latitude),
            ("maxZoom", self.max_zoom),
            ("minZoom", self.min_zoom),
            ("zoom", self.zoom),
        ];
        for (name, value) in numbers {
            if !value.is_finite() {
                return Err(MapError::Config(format!(
                    "'{}' must be a finite number, got {}",
                    name, value
                )));
            }
        }

        if self.min_zoom > self.max_zoom {
            return Err(MapError::Config(format!(
                "minZoom ({}) is greater than maxZoom ({})",
                self.min_zoom, self.max_zoom
            )));
        }

        Ok(())
    }

    /// Tile URL template for the base layer; a blank `tileUrl` means the default service
    pub fn base_tile_url(&self) -> &str {
        if self.tile_url.trim().is_empty() {
            DEFAULT_TILE_URL
        } else {
            &self.tile_url
        }
    }
}
