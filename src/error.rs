use thiserror::Error;

use crate::http::HttpError;

/// Errors that can occur while building or driving a map
#[derive(Error, Debug)]
pub enum MapError {
    /// Configuration validation errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A required host element is not present in the document
    #[error("Element not found: '{id}'")]
    MissingElement { id: String },

    /// A marker was added to a layer that holds no vector features
    #[error("Layer {layer} is not a vector layer")]
    NotVectorLayer { layer: String },

    /// Errors reported by the rendering engine
    #[error("Engine error: {0}")]
    Engine(String),

    /// Errors parsing JSON configuration objects
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Transport errors while fetching tiles
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),
}

pub type Result<T> = std::result::Result<T, MapError>;
