use serde::{Deserialize, Serialize};

use crate::Result;

/// Icon used for markers when none is given
pub const DEFAULT_ICON: &str = "./v1/icon.png";

/// Options for placing a point marker
///
/// Longitude and latitude are in degrees and are required; `content` and `icon`
/// fall back to an empty string and [`DEFAULT_ICON`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerParams {
    pub longitude: f64,
    pub latitude: f64,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

impl MarkerParams {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
            content: None,
            icon: None,
        }
    }

    /// Parse marker options from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the popup content
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Set the icon image path or URL
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Content with the default applied
    pub fn content_or_default(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }

    /// Icon with the default applied
    pub fn icon_or_default(&self) -> &str {
        self.icon.as_deref().unwrap_or(DEFAULT_ICON)
    }
}
