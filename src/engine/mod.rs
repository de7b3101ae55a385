//! Seams to the rendering engine and the host document.
//!
//! The facade never draws or touches the DOM itself. It asks a [`RenderEngine`] to
//! resolve pixels and hit-test features, and a [`Document`] to look up and fill host
//! elements. [`HeadlessEngine`] and [`HeadlessDocument`] implement both in memory.

mod headless;

pub use headless::*;

use crate::map::{Feature, MapView, Pixel, Size};
use crate::projection::Projected;
use crate::Result;

/// Rendering engine operations the facade relies on
pub trait RenderEngine: Send + Sync {
    /// Engine identifier used in logs (e.g., "headless")
    fn name(&self) -> &'static str;

    /// Projected coordinate under a pixel of the rendered map
    fn coordinate_from_pixel(&self, map: &MapView, pixel: Pixel) -> Option<Projected>;

    /// Topmost feature drawn under a pixel
    ///
    /// Implementations search in reverse draw order: the last visible vector layer
    /// first, and within a layer the last feature first.
    fn feature_at_pixel<'a>(&self, map: &'a MapView, pixel: Pixel) -> Option<&'a Feature>;
}

/// Host document holding the render target and overlay elements
pub trait Document: Send + Sync {
    fn has_element(&self, id: &str) -> bool;

    /// Rendered size of an element, if it has one
    fn element_size(&self, id: &str) -> Option<Size>;

    fn inner_html(&self, id: &str) -> Option<&str>;

    /// Replace an element's content; fails if the element does not exist
    fn set_inner_html(&mut self, id: &str, html: &str) -> Result<()>;
}
