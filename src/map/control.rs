use serde::{Deserialize, Serialize};

/// UI controls drawn on top of the map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Control {
    /// Zoom in/out buttons
    Zoom,
    /// Reset-rotation button
    Rotate,
    /// Attribution box listing layer sources
    Attribution { collapsible: bool },
}

impl Control {
    /// The default control set: zoom, rotate and a non-collapsible attribution box
    pub fn defaults() -> Vec<Control> {
        vec![
            Control::Zoom,
            Control::Rotate,
            Control::Attribution { collapsible: false },
        ]
    }
}
