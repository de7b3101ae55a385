use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{Identified, LayerKey};
use crate::projection::Projected;

/// Keeps an overlay inside the viewport when it is shown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoPan {
    pub animation_duration: Duration,
    /// Distance kept between the anchor and the viewport edge, in pixels
    pub margin: f64,
}

impl Default for AutoPan {
    fn default() -> Self {
        Self {
            animation_duration: Duration::from_millis(250),
            margin: 20.0,
        }
    }
}

/// A UI element anchored to a map coordinate
///
/// The overlay is hidden whenever it has no position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overlay {
    id: Option<LayerKey>,
    element: String,
    position: Option<Projected>,
    auto_pan: Option<AutoPan>,
}

impl Overlay {
    /// Create a hidden overlay bound to a document element
    pub fn new(element: impl Into<String>) -> Self {
        Self {
            id: None,
            element: element.into(),
            position: None,
            auto_pan: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<LayerKey>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_auto_pan(mut self, auto_pan: AutoPan) -> Self {
        self.auto_pan = Some(auto_pan);
        self
    }

    /// Id of the document element holding the overlay's content
    pub fn element(&self) -> &str {
        &self.element
    }

    pub fn position(&self) -> Option<Projected> {
        self.position
    }

    /// Anchor the overlay, or hide it with `None`
    pub fn set_position(&mut self, position: Option<Projected>) {
        self.position = position;
    }

    pub fn is_visible(&self) -> bool {
        self.position.is_some()
    }

    pub fn auto_pan(&self) -> Option<&AutoPan> {
        self.auto_pan.as_ref()
    }
}

impl Identified for Overlay {
    fn id(&self) -> Option<&LayerKey> {
        self.id.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_overlay_is_hidden() {
        let overlay = Overlay::new("popup");
        assert!(!overlay.is_visible());
        assert_eq!(overlay.element(), "popup");
        assert!(overlay.id().is_none());
    }

    #[test]
    fn test_show_and_hide() {
        let mut overlay = Overlay::new("popup").with_auto_pan(AutoPan::default());
        overlay.set_position(Some(Projected::new(1.0, 2.0)));
        assert!(overlay.is_visible());
        overlay.set_position(None);
        assert!(!overlay.is_visible());
        assert_eq!(
            overlay.auto_pan().unwrap().animation_duration,
            Duration::from_millis(250)
        );
    }
}
