use geo::Intersects;
use std::collections::HashMap;

use super::{Document, RenderEngine};
use crate::map::{Feature, MapView, Pixel, Size};
use crate::projection::Projected;
use crate::{MapError, Result};

/// Engine that computes hits from view geometry without drawing anything
///
/// A feature is hit when the pixel falls inside its icon box, placed on the
/// feature's coordinate by the icon anchor.
#[derive(Debug, Clone, Default)]
pub struct HeadlessEngine;

impl HeadlessEngine {
    pub fn new() -> Self {
        Self
    }
}

impl RenderEngine for HeadlessEngine {
    fn name(&self) -> &'static str {
        "headless"
    }

    fn coordinate_from_pixel(&self, map: &MapView, pixel: Pixel) -> Option<Projected> {
        map.view().coordinate_from_pixel(pixel)
    }

    fn feature_at_pixel<'a>(&self, map: &'a MapView, pixel: Pixel) -> Option<&'a Feature> {
        let view = map.view();
        let probe = geo::coord! { x: pixel.x, y: pixel.y };

        map.layers()
            .iter()
            .rev()
            .filter(|layer| layer.is_visible())
            .filter_map(|layer| layer.vector_source())
            .flat_map(|source| source.features().iter().rev())
            .find(|feature| {
                view.pixel_from_coordinate(feature.geometry())
                    .map(|anchor| feature.style().pixel_box(anchor).intersects(&probe))
                    .unwrap_or(false)
            })
    }
}

#[derive(Debug, Clone, Default)]
struct Element {
    size: Option<Size>,
    inner_html: String,
}

/// In-memory document with elements keyed by id
#[derive(Debug, Clone, Default)]
pub struct HeadlessDocument {
    elements: HashMap<String, Element>,
}

impl HeadlessDocument {
    /// Empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Document with an 800x600 `olmap` target and an empty `popup` element
    pub fn with_defaults() -> Self {
        Self::new()
            .with_sized_element("olmap", Size::new(800.0, 600.0))
            .with_element("popup")
    }

    /// Add an element without a rendered size
    pub fn with_element(mut self, id: impl Into<String>) -> Self {
        self.elements.insert(id.into(), Element::default());
        self
    }

    /// Add an element with a rendered size
    pub fn with_sized_element(mut self, id: impl Into<String>, size: Size) -> Self {
        self.elements.insert(
            id.into(),
            Element {
                size: Some(size),
                inner_html: String::new(),
            },
        );
        self
    }
}

impl Document for HeadlessDocument {
    fn has_element(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    fn element_size(&self, id: &str) -> Option<Size> {
        self.elements.get(id).and_then(|e| e.size)
    }

    fn inner_html(&self, id: &str) -> Option<&str> {
        self.elements.get(id).map(|e| e.inner_html.as_str())
    }

    fn set_inner_html(&mut self, id: &str, html: &str) -> Result<()> {
        let element = self
            .elements
            .get_mut(id)
            .ok_or_else(|| MapError::MissingElement { id: id.to_string() })?;
        element.inner_html = html.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MarkerParams;
    use crate::map::{IconStyle, Layer, View};
    use crate::projection;

    fn map() -> MapView {
        let center = projection::transform(136.0, 36.0);
        let view = View::new(center, 12.0, 1.0, 18.0).with_size(Size::new(800.0, 600.0));
        let mut map = MapView::new("olmap", view);
        map.add_layer(Layer::vector(Some("pts".into())));
        map
    }

    #[test]
    fn test_hit_on_icon() {
        let mut map = map();
        map.layers_mut()[0]
            .add_marker(&MarkerParams::new(136.0, 36.0).with_content("center"))
            .unwrap();

        let engine = HeadlessEngine::new();
        let hit = engine.feature_at_pixel(&map, Pixel::new(410.0, 290.0));
        assert_eq!(hit.map(|f| f.content()), Some("center"));
        assert!(engine.feature_at_pixel(&map, Pixel::new(450.0, 300.0)).is_none());
    }

    #[test]
    fn test_topmost_feature_wins() {
        let mut map = map();
        map.layers_mut()[0]
            .add_marker(&MarkerParams::new(136.0, 36.0).with_content("first"))
            .unwrap();
        map.layers_mut()[0]
            .add_marker(&MarkerParams::new(136.0, 36.0).with_content("second"))
            .unwrap();
        map.add_layer(Layer::vector(Some("above".into())));

        let engine = HeadlessEngine::new();
        let hit = engine.feature_at_pixel(&map, Pixel::new(400.0, 300.0));
        assert_eq!(hit.map(|f| f.content()), Some("second"));

        map.layers_mut()[1]
            .add_marker(&MarkerParams::new(136.0, 36.0).with_content("top"))
            .unwrap();
        let hit = engine.feature_at_pixel(&map, Pixel::new(400.0, 300.0));
        assert_eq!(hit.map(|f| f.content()), Some("top"));
    }

    #[test]
    fn test_hidden_layers_are_skipped() {
        let mut map = map();
        map.layers_mut()[0]
            .add_marker(&MarkerParams::new(136.0, 36.0).with_content("x"))
            .unwrap();
        map.layers_mut()[0].set_visible(false);

        let engine = HeadlessEngine::new();
        assert!(engine.feature_at_pixel(&map, Pixel::new(400.0, 300.0)).is_none());
    }

    #[test]
    fn test_icon_size_drives_hit_box() {
        let mut map = map();
        let center = map.view().center();
        map.layers_mut()[0]
            .vector_source_mut()
            .unwrap()
            .add_feature(Feature::new(
                center,
                "big",
                IconStyle::centered("big.png").with_size(100.0, 100.0),
            ));

        let engine = HeadlessEngine::new();
        let hit = engine.feature_at_pixel(&map, Pixel::new(440.0, 340.0));
        assert_eq!(hit.map(|f| f.content()), Some("big"));
    }

    #[test]
    fn test_document_elements() {
        let mut doc = HeadlessDocument::with_defaults();
        assert!(doc.has_element("olmap"));
        assert!(doc.has_element("popup"));
        assert_eq!(doc.element_size("olmap"), Some(Size::new(800.0, 600.0)));
        assert_eq!(doc.element_size("popup"), None);

        doc.set_inner_html("popup", "<p>hi</p>").unwrap();
        assert_eq!(doc.inner_html("popup"), Some("<p>hi</p>"));

        let err = doc.set_inner_html("nope", "x").unwrap_err();
        assert!(matches!(err, MapError::MissingElement { .. }));
    }
}
