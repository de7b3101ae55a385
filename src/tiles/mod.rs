//! XYZ tile addressing for web mercator raster layers.

mod loader;

pub use loader::*;

use geo::Rect;
use serde::{Deserialize, Serialize};

use crate::projection::HALF_SIZE;

/// Address of one raster tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    pub z: u8,
    pub x: u32,
    pub y: u32,
}

impl TileCoord {
    pub fn new(z: u8, x: u32, y: u32) -> Self {
        Self { z, x, y }
    }

    /// Number of tiles along one axis at this zoom level
    pub fn grid_size(&self) -> u64 {
        grid_size(self.z)
    }
}

fn grid_size(z: u8) -> u64 {
    1u64.checked_shl(z as u32).unwrap_or(u64::MAX)
}

/// Integer tile zoom for a fractional view zoom, capped at the source's maximum
pub fn zoom_level(view_zoom: f64, max_zoom: u8) -> u8 {
    let rounded = view_zoom.round();
    if rounded <= 0.0 {
        0
    } else if rounded >= max_zoom as f64 {
        max_zoom
    } else {
        rounded as u8
    }
}

/// Tile column and row containing a projected coordinate, clamped to the grid
fn tile_index(x: f64, y: f64, z: u8) -> (u32, u32) {
    let n = grid_size(z) as f64;
    let world = 2.0 * HALF_SIZE;
    let clamp = |v: f64| v.floor().max(0.0).min(n - 1.0) as u32;
    (
        clamp((x + HALF_SIZE) / world * n),
        clamp((HALF_SIZE - y) / world * n),
    )
}

/// All tiles at zoom `z` that intersect a projected extent, row by row
pub fn tiles_for_extent(extent: Rect<f64>, z: u8) -> Vec<TileCoord> {
    let (min_x, min_y) = tile_index(extent.min().x, extent.max().y, z);
    let (max_x, max_y) = tile_index(extent.max().x, extent.min().y, z);

    let mut tiles = Vec::new();
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            tiles.push(TileCoord::new(z, x, y));
        }
    }
    tiles
}
