use super::{
    DEFAULT_ATTRIBUTION, DEFAULT_LATITUDE, DEFAULT_LONGITUDE, DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM,
    DEFAULT_POPUP_ELEMENT, DEFAULT_TARGET, DEFAULT_TILE_URL, DEFAULT_ZOOM, MapConfig,
};

/// Builder for creating map configurations with a fluent API
#[derive(Debug, Clone, Default)]
pub struct MapConfigBuilder {
    target: Option<String>,
    tile_url: Option<String>,
    attribution: Option<String>,
    popup_element: Option<String>,
    longitude: Option<f64>,
    latitude: Option<f64>,
    max_zoom: Option<f64>,
    min_zoom: Option<f64>,
    zoom: Option<f64>,
}

impl MapConfigBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the host element id
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Set the base tile URL template
    pub fn tile_url(mut self, url: impl Into<String>) -> Self {
        self.tile_url = Some(url.into());
        self
    }

    /// Set the attribution of the base tile layer
    pub fn attribution(mut self, attribution: impl Into<String>) -> Self {
        self.attribution = Some(attribution.into());
        self
    }

    /// Set the popup content element id
    pub fn popup_element(mut self, id: impl Into<String>) -> Self {
        self.popup_element = Some(id.into());
        self
    }

    /// Set the initial center in degrees
    pub fn center(mut self, longitude: f64, latitude: f64) -> Self {
        self.longitude = Some(longitude);
        self.latitude = Some(latitude);
        self
    }

    pub fn max_zoom(mut self, zoom: f64) -> Self {
        self.max_zoom = Some(zoom);
        self
    }

    pub fn min_zoom(mut self, zoom: f64) -> Self {
        self.min_zoom = Some(zoom);
        self
    }

    pub fn zoom(mut self, zoom: f64) -> Self {
        self.zoom = Some(zoom);
        self
    }

    /// Use OpenStreetMap standard tiles for the base layer
    pub fn openstreetmap(self) -> Self {
        self.tile_url("https://tile.openstreetmap.org/{z}/{x}/{y}.png")
            .attribution("© OpenStreetMap contributors")
    }

    /// Build the final configuration
    pub fn build(self) -> MapConfig {
        MapConfig {
            target: self.target.unwrap_or_else(|| DEFAULT_TARGET.to_string()),
            tile_url: self.tile_url.unwrap_or_else(|| DEFAULT_TILE_URL.to_string()),
            attribution: self
                .attribution
                .unwrap_or_else(|| DEFAULT_ATTRIBUTION.to_string()),
            popup_element: self
                .popup_element
                .unwrap_or_else(|| DEFAULT_POPUP_ELEMENT.to_string()),
            longitude: self.longitude.unwrap_or(DEFAULT_LONGITUDE),
            latitude: self.latitude.unwrap_or(DEFAULT_LATITUDE),
            max_zoom: self.max_zoom.unwrap_or(DEFAULT_MAX_ZOOM),
            min_zoom: self.min_zoom.unwrap_or(DEFAULT_MIN_ZOOM),
            zoom: self.zoom.unwrap_or(DEFAULT_ZOOM),
        }
    }
}
