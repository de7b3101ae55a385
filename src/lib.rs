//! A small facade over a 2D web map: an XYZ tile basemap, vector icon markers and a
//! popup that follows clicks on features.
//!
//! Rendering and DOM access sit behind the [`RenderEngine`] and [`Document`] traits;
//! the bundled headless implementations make the whole facade usable without a
//! browser. Geographic degrees are converted to web mercator at the API boundary and
//! never stored.

pub mod config;
pub mod engine;
pub mod error;
pub mod facade;
pub mod http;
pub mod map;
pub mod projection;
pub mod tiles;


pub use config::*;
pub use engine::*;
pub use error::*;
pub use facade::*;
pub use map::*;
pub use projection::{LonLat, Projected, Projection};
pub use tiles::*;
