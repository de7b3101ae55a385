use serde::{Deserialize, Serialize};

use super::{Feature, Identified, LayerKey};
use crate::config::MarkerParams;
use crate::projection::Projection;
use crate::tiles::TileCoord;
use crate::{MapError, Result};

/// Raster tiles addressed by an XYZ URL template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XyzSource {
    /// Template containing `{z}`, `{x}` and `{y}` (or `{-y}`) placeholders
    pub url_template: String,
    /// Attribution text shown by the attribution control
    pub attribution: Option<String>,
    pub projection: Projection,
    /// Tile edge length in pixels
    pub tile_size: u32,
    /// Highest zoom level the server provides
    pub max_zoom: u8,
}

impl XyzSource {
    pub fn new(url_template: impl Into<String>) -> Self {
        Self {
            url_template: url_template.into(),
            attribution: None,
            projection: Projection::Epsg3857,
            tile_size: 256,
            max_zoom: 18,
        }
    }

    pub fn with_attribution(mut self, attribution: impl Into<String>) -> Self {
        self.attribution = Some(attribution.into());
        self
    }

    pub fn with_max_zoom(mut self, max_zoom: u8) -> Self {
        self.max_zoom = max_zoom;
        self
    }

    /// Expand the URL template for one tile
    ///
    /// Unknown placeholders are left untouched; a malformed template simply yields
    /// URLs that fail to load.
    pub fn tile_url(&self, coord: TileCoord) -> String {
        let flipped_y = coord
            .grid_size()
            .saturating_sub(1)
            .saturating_sub(coord.y as u64);
        self.url_template
            .replace("{z}", &coord.z.to_string())
            .replace("{x}", &coord.x.to_string())
            .replace("{-y}", &flipped_y.to_string())
            .replace("{y}", &coord.y.to_string())
    }
}

/// Ordered collection of vector features
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VectorSource {
    pub projection: Projection,
    features: Vec<Feature>,
}

impl VectorSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_feature(&mut self, feature: Feature) {
        self.features.push(feature);
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn clear(&mut self) {
        self.features.clear();
    }
}

/// What a layer draws
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LayerSource {
    Tile(XyzSource),
    Vector(VectorSource),
}

/// A rendering unit in the map's draw order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    id: Option<LayerKey>,
    source: LayerSource,
    visible: bool,
}

impl Layer {
    /// Raster tile layer
    pub fn tile(id: Option<LayerKey>, source: XyzSource) -> Self {
        Self {
            id,
            source: LayerSource::Tile(source),
            visible: true,
        }
    }

    /// Empty vector layer
    pub fn vector(id: Option<LayerKey>) -> Self {
        Self {
            id,
            source: LayerSource::Vector(VectorSource::new()),
            visible: true,
        }
    }

    pub fn source(&self) -> &LayerSource {
        &self.source
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn tile_source(&self) -> Option<&XyzSource> {
        match &self.source {
            LayerSource::Tile(source) => Some(source),
            LayerSource::Vector(_) => None,
        }
    }

    pub fn vector_source(&self) -> Option<&VectorSource> {
        match &self.source {
            LayerSource::Vector(source) => Some(source),
            LayerSource::Tile(_) => None,
        }
    }

    pub fn vector_source_mut(&mut self) -> Option<&mut VectorSource> {
        match &mut self.source {
            LayerSource::Vector(source) => Some(source),
            LayerSource::Tile(_) => None,
        }
    }

    /// Place an icon marker on this layer
    pub fn add_marker(&mut self, params: &MarkerParams) -> Result<()> {
        let label = self.label();
        let Some(source) = self.vector_source_mut() else {
            return Err(MapError::NotVectorLayer { layer: label });
        };
        let feature = Feature::marker(params);
        tracing::debug!(
            "Adding marker at ({:.2}, {:.2}) to layer {}",
            feature.geometry().x,
            feature.geometry().y,
            label
        );
        source.add_feature(feature);
        Ok(())
    }

    fn label(&self) -> String {
        self.id
            .as_ref()
            .map_or_else(|| "<unnamed>".to_string(), |id| id.to_string())
    }
}

impl Identified for Layer {
    fn id(&self) -> Option<&LayerKey> {
        self.id.as_ref()
    }
}
