use serde::{Deserialize, Serialize};

use crate::config::{MapConfig, MarkerParams};
use crate::engine::{Document, RenderEngine};
use crate::map::{
    self, AutoPan, Control, Layer, LayerKey, MapView, Overlay, Pixel, Size, View, XyzSource,
};
use crate::projection::{self, Projected};
use crate::{MapError, Result};

/// A click on the map surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClickEvent {
    pub pixel: Pixel,
    /// Projected coordinate under `pixel`
    pub coordinate: Projected,
}

/// Events the facade reacts to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MapEvent {
    Click(ClickEvent),
    /// The host element changed size
    Resize(Size),
}

/// Convenience wrapper for a tile basemap, vector markers and a click popup
///
/// All coordinates kept by the facade are projected (EPSG:3857). Degrees are only
/// accepted by [`MapFacade::transform`], [`MapFacade::set_center_lon_lat`] and
/// [`MarkerParams`], and are converted immediately.
pub struct MapFacade {
    map: MapView,
    engine: Box<dyn RenderEngine>,
    document: Box<dyn Document>,
}

impl MapFacade {
    /// Build a map with a base tile layer, a hidden popup overlay and default controls
    ///
    /// Fails if the configuration is invalid or the document lacks the render
    /// target or popup element.
    pub fn new(
        config: MapConfig,
        engine: impl RenderEngine + 'static,
        document: impl Document + 'static,
    ) -> Result<Self> {
        config.validate()?;

        for id in [&config.target, &config.popup_element] {
            if !document.has_element(id) {
                return Err(MapError::MissingElement { id: id.clone() });
            }
        }

        let center = projection::transform(config.longitude, config.latitude);
        let mut view = View::new(center, config.zoom, config.min_zoom, config.max_zoom);
        if let Some(size) = document.element_size(&config.target) {
            view.set_size(size);
        }

        let mut map = MapView::new(config.target.clone(), view).with_controls(Control::defaults());
        map.add_layer(Layer::tile(
            None,
            XyzSource::new(config.base_tile_url()).with_attribution(config.attribution.clone()),
        ));
        map.add_overlay(Overlay::new(config.popup_element.clone()).with_auto_pan(AutoPan::default()));

        tracing::info!(
            "Created map in '{}' using {} engine, center ({}, {}) zoom {}",
            config.target,
            engine.name(),
            config.longitude,
            config.latitude,
            map.view().zoom()
        );

        Ok(Self {
            map,
            engine: Box::new(engine),
            document: Box::new(document),
        })
    }

    /// The underlying map, for anything the facade does not cover
    pub fn map(&self) -> &MapView {
        &self.map
    }

    /// The host document
    pub fn document(&self) -> &dyn Document {
        self.document.as_ref()
    }

    /// Append a raster tile layer on top of the existing layers
    ///
    /// Ids need not be unique. A bad URL is not detected here; its tiles just fail
    /// to load.
    pub fn add_tile_layer(&mut self, id: impl Into<LayerKey>, url: impl Into<String>) {
        let id = id.into();
        tracing::debug!("Adding tile layer {}", id);
        self.map.add_layer(Layer::tile(Some(id), XyzSource::new(url)));
    }

    /// Append an empty vector layer on top of the existing layers
    pub fn add_vector_layer(&mut self, id: impl Into<LayerKey>) {
        let id = id.into();
        tracing::debug!("Adding vector layer {}", id);
        self.map.add_layer(Layer::vector(Some(id)));
    }

    /// Append a hidden overlay bound to a document element
    pub fn add_overlay(&mut self, id: impl Into<LayerKey>, element: impl Into<String>) -> Result<()> {
        let element = element.into();
        if !self.document.has_element(&element) {
            return Err(MapError::MissingElement { id: element });
        }
        self.map.add_overlay(Overlay::new(element).with_id(id));
        Ok(())
    }

    /// First layer with a matching id, or the first layer when none matches
    pub fn get_layer(&self, id: impl Into<LayerKey>) -> Option<&Layer> {
        map::resolve_by_id(self.map.layers(), Some(&id.into()))
    }

    /// First layer with a matching id, without falling back
    pub fn find_layer(&self, id: impl Into<LayerKey>) -> Option<&Layer> {
        let id = id.into();
        map::find_index(self.map.layers(), Some(&id)).map(|index| &self.map.layers()[index])
    }

    /// Mutable variant of [`MapFacade::get_layer`]
    pub fn get_layer_mut(&mut self, id: impl Into<LayerKey>) -> Option<&mut Layer> {
        let index = map::resolve_index(self.map.layers(), Some(&id.into()))?;
        self.map.layers_mut().get_mut(index)
    }

    /// First overlay with a matching id, or the first overlay when none matches
    pub fn get_overlay(&self, id: impl Into<LayerKey>) -> Option<&Overlay> {
        map::resolve_by_id(self.map.overlays(), Some(&id.into()))
    }

    /// Place an icon marker on the layer resolved like [`MapFacade::get_layer`]
    pub fn add_marker(&mut self, layer: impl Into<LayerKey>, params: MarkerParams) -> Result<()> {
        let layer = self
            .get_layer_mut(layer)
            .ok_or_else(|| MapError::Engine("map has no layers".to_string()))?;
        layer.add_marker(&params)
    }

    /// Degrees (EPSG:4326) to the map's projected coordinates (EPSG:3857)
    pub fn transform(&self, longitude: f64, latitude: f64) -> Projected {
        projection::transform(longitude, latitude)
    }

    /// Jump to an already projected center
    pub fn set_center(&mut self, coordinate: Projected) {
        self.map.view_mut().set_center(coordinate);
    }

    /// Jump to a center given in degrees
    pub fn set_center_lon_lat(&mut self, longitude: f64, latitude: f64) {
        self.set_center(projection::transform(longitude, latitude));
    }

    /// The popup overlay created at construction
    pub fn popup(&self) -> Option<&Overlay> {
        map::resolve_by_id(self.map.overlays(), None)
    }

    /// Feed an event to the map
    pub fn dispatch(&mut self, event: MapEvent) -> Result<()> {
        match event {
            MapEvent::Click(click) => self.handle_click(&click),
            MapEvent::Resize(size) => {
                tracing::debug!("Map resized to {}x{}", size.width, size.height);
                self.map.view_mut().set_size(size);
                Ok(())
            }
        }
    }

    /// Simulate a click at a pixel, resolving its coordinate through the engine
    pub fn click_at(&mut self, pixel: Pixel) -> Result<()> {
        let coordinate = self
            .engine
            .coordinate_from_pixel(&self.map, pixel)
            .ok_or_else(|| {
                MapError::Engine(format!(
                    "cannot resolve pixel ({}, {}) before the map has a size",
                    pixel.x, pixel.y
                ))
            })?;
        self.dispatch(MapEvent::Click(ClickEvent { pixel, coordinate }))
    }

    /// Popup behaviour: hide, then show the hit feature's content at the click point
    fn handle_click(&mut self, event: &ClickEvent) -> Result<()> {
        let content = self
            .engine
            .feature_at_pixel(&self.map, event.pixel)
            .map(|feature| feature.content().to_string());

        let Some(index) = map::resolve_index(self.map.overlays(), None) else {
            return Ok(());
        };
        self.map.overlays_mut()[index].set_position(None);

        let Some(content) = content else {
            tracing::debug!("Click at ({}, {}) hit nothing", event.pixel.x, event.pixel.y);
            return Ok(());
        };

        let element = self.map.overlays()[index].element().to_string();
        self.document
            .set_inner_html(&element, &format!("<p>{}</p>", escape_html(&content)))?;

        let overlay = &mut self.map.overlays_mut()[index];
        overlay.set_position(Some(event.coordinate));
        let margin = overlay.auto_pan().map(|auto_pan| auto_pan.margin);
        tracing::debug!(
            "Popup shown at ({:.2}, {:.2})",
            event.coordinate.x,
            event.coordinate.y
        );

        if let Some(margin) = margin {
            self.map.view_mut().pan_into_view(event.coordinate, margin);
        }
        Ok(())
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
