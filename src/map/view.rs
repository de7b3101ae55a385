use geo::Rect;
use serde::{Deserialize, Serialize};

use crate::projection::{HALF_SIZE, Projected, Projection};

/// Resolution at zoom 0 for 256px web mercator tiles (meters per pixel)
pub const MAX_RESOLUTION: f64 = 2.0 * HALF_SIZE / 256.0;

/// A position on the rendered map surface, in CSS pixels from the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pixel {
    pub x: f64,
    pub y: f64,
}

impl Pixel {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pixel dimensions of a host element
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Center, zoom and projection of a map
///
/// The center is always stored projected. Rotation is not supported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct View {
    projection: Projection,
    center: Projected,
    min_zoom: f64,
    max_zoom: f64,
    zoom: f64,
    size: Option<Size>,
}

impl View {
    /// Create a web mercator view; `zoom` is clamped into `[min_zoom, max_zoom]`
    pub fn new(center: Projected, zoom: f64, min_zoom: f64, max_zoom: f64) -> Self {
        Self {
            projection: Projection::Epsg3857,
            center,
            min_zoom,
            max_zoom,
            zoom: zoom.max(min_zoom).min(max_zoom),
            size: None,
        }
    }

    /// Attach the pixel size of the host element
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    pub fn center(&self) -> Projected {
        self.center
    }

    /// Jump to a new center without animation
    pub fn set_center(&mut self, center: Projected) {
        tracing::debug!("View center -> ({:.2}, {:.2})", center.x, center.y);
        self.center = center;
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Set the zoom, constrained to the view's bounds
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.max(self.min_zoom).min(self.max_zoom);
    }

    pub fn min_zoom(&self) -> f64 {
        self.min_zoom
    }

    pub fn max_zoom(&self) -> f64 {
        self.max_zoom
    }

    pub fn size(&self) -> Option<Size> {
        self.size
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = Some(size);
    }

    /// Meters per pixel at the current zoom
    pub fn resolution(&self) -> f64 {
        MAX_RESOLUTION / 2f64.powf(self.zoom)
    }

    /// Projected area covered by the viewport, if the size is known
    pub fn extent(&self) -> Option<Rect<f64>> {
        let size = self.size.filter(|s| !s.is_empty())?;
        let half_w = size.width * self.resolution() / 2.0;
        let half_h = size.height * self.resolution() / 2.0;
        Some(Rect::new(
            geo::coord! { x: self.center.x - half_w, y: self.center.y - half_h },
            geo::coord! { x: self.center.x + half_w, y: self.center.y + half_h },
        ))
    }

    /// Projected coordinate under a pixel
    pub fn coordinate_from_pixel(&self, pixel: Pixel) -> Option<Projected> {
        let size = self.size.filter(|s| !s.is_empty())?;
        let resolution = self.resolution();
        Some(Projected::new(
            self.center.x + (pixel.x - size.width / 2.0) * resolution,
            self.center.y - (pixel.y - size.height / 2.0) * resolution,
        ))
    }

    /// Pixel at which a projected coordinate is drawn
    pub fn pixel_from_coordinate(&self, coordinate: Projected) -> Option<Pixel> {
        let size = self.size.filter(|s| !s.is_empty())?;
        let resolution = self.resolution();
        Some(Pixel::new(
            (coordinate.x - self.center.x) / resolution + size.width / 2.0,
            (self.center.y - coordinate.y) / resolution + size.height / 2.0,
        ))
    }

    /// Shift the center the least amount that keeps `coordinate` at least
    /// `margin` pixels inside the viewport. Returns whether the view moved.
    pub fn pan_into_view(&mut self, coordinate: Projected, margin: f64) -> bool {
        let (Some(size), Some(pixel)) = (self.size, self.pixel_from_coordinate(coordinate)) else {
            return false;
        };

        let shift = |position: f64, extent: f64| -> f64 {
            if position < margin {
                position - margin
            } else if position > extent - margin {
                position - (extent - margin)
            } else {
                0.0
            }
        };

        let dx = shift(pixel.x, size.width);
        let dy = shift(pixel.y, size.height);
        if dx == 0.0 && dy == 0.0 {
            return false;
        }

        let resolution = self.resolution();
        self.set_center(Projected::new(
            self.center.x + dx * resolution,
            self.center.y - dy * resolution,
        ));
        true
    }
}
