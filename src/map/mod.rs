//! The in-memory map model: view, layers, overlays and controls.

mod control;
mod feature;
mod identity;
mod layer;
mod overlay;
mod view;

pub use control::*;
pub use feature::*;
pub use identity::*;
pub use layer::*;
pub use overlay::*;
pub use view::*;

use serde::{Deserialize, Serialize};

use crate::tiles::{self, TileCoord};

/// A map bound to a render target
///
/// Layers draw in list order, so later layers are on top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    target: String,
    view: View,
    layers: Vec<Layer>,
    overlays: Vec<Overlay>,
    controls: Vec<Control>,
}

/// A tile the view currently needs, with its expanded URL
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleTile {
    /// Position of the owning layer in draw order
    pub layer_index: usize,
    pub layer_id: Option<LayerKey>,
    pub coord: TileCoord,
    pub url: String,
}

impl MapView {
    pub fn new(target: impl Into<String>, view: View) -> Self {
        Self {
            target: target.into(),
            view,
            layers: Vec::new(),
            overlays: Vec::new(),
            controls: Vec::new(),
        }
    }

    pub fn with_controls(mut self, controls: Vec<Control>) -> Self {
        self.controls = controls;
        self
    }

    /// Id of the host element
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut View {
        &mut self.view
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layers_mut(&mut self) -> &mut [Layer] {
        &mut self.layers
    }

    pub fn add_layer(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    pub fn overlays(&self) -> &[Overlay] {
        &self.overlays
    }

    pub fn overlays_mut(&mut self) -> &mut [Overlay] {
        &mut self.overlays
    }

    pub fn add_overlay(&mut self, overlay: Overlay) {
        self.overlays.push(overlay);
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    /// Attribution text of visible tile layers, in draw order
    pub fn attributions(&self) -> Vec<&str> {
        self.layers
            .iter()
            .filter(|layer| layer.is_visible())
            .filter_map(|layer| layer.tile_source())
            .filter_map(|source| source.attribution.as_deref())
            .collect()
    }

    /// Tiles of every visible tile layer that cover the current viewport
    ///
    /// Empty when the view has no pixel size yet.
    pub fn visible_tiles(&self) -> Vec<VisibleTile> {
        let Some(extent) = self.view.extent() else {
            return Vec::new();
        };

        let mut visible = Vec::new();
        for (layer_index, layer) in self.layers.iter().enumerate() {
            if !layer.is_visible() {
                continue;
            }
            let Some(source) = layer.tile_source() else {
                continue;
            };
            let z = tiles::zoom_level(self.view.zoom(), source.max_zoom);
            for coord in tiles::tiles_for_extent(extent, z) {
                visible.push(VisibleTile {
                    layer_index,
                    layer_id: layer.id().cloned(),
                    coord,
                    url: source.tile_url(coord),
                });
            }
        }
        visible
    }
}
