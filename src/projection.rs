//! Conversions between geographic degrees (EPSG:4326) and web mercator meters (EPSG:3857).
//!
//! The two coordinate systems are separate types so that a longitude/latitude pair can
//! never be stored where a projected coordinate is expected.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Radius of the spherical mercator earth, in meters
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Half the width of the projected world, in meters
pub const HALF_SIZE: f64 = PI * EARTH_RADIUS;

/// Latitude at which the square mercator world ends
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Coordinate reference systems known to the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Projection {
    /// Longitude/latitude in degrees
    #[serde(rename = "EPSG:4326")]
    Epsg4326,
    /// Spherical mercator in meters
    #[serde(rename = "EPSG:3857")]
    Epsg3857,
}

impl Projection {
    /// EPSG code as used by web map configuration
    pub fn code(&self) -> &'static str {
        match self {
            Self::Epsg4326 => "EPSG:4326",
            Self::Epsg3857 => "EPSG:3857",
        }
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::Epsg3857
    }
}

/// A geographic coordinate in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl LonLat {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Project into web mercator
    pub fn to_projected(self) -> Projected {
        transform(self.lon, self.lat)
    }
}

/// A coordinate in the map's projected system (meters)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projected {
    pub x: f64,
    pub y: f64,
}

impl Projected {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Back to degrees
    pub fn to_lon_lat(self) -> LonLat {
        inverse(self)
    }
}

impl From<Projected> for geo::Coord<f64> {
    fn from(p: Projected) -> Self {
        geo::coord! { x: p.x, y: p.y }
    }
}

impl From<geo::Coord<f64>> for Projected {
    fn from(c: geo::Coord<f64>) -> Self {
        Self::new(c.x, c.y)
    }
}

impl From<Projected> for geo::Point<f64> {
    fn from(p: Projected) -> Self {
        geo::Point::new(p.x, p.y)
    }
}

impl From<LonLat> for geo::Point<f64> {
    fn from(ll: LonLat) -> Self {
        geo::Point::new(ll.lon, ll.lat)
    }
}

impl From<geo::Point<f64>> for LonLat {
    fn from(p: geo::Point<f64>) -> Self {
        Self::new(p.x(), p.y())
    }
}

/// Transform longitude/latitude degrees into web mercator meters
pub fn transform(longitude: f64, latitude: f64) -> Projected {
    let x = EARTH_RADIUS * longitude.to_radians();
    let y = EARTH_RADIUS * (PI * (latitude + 90.0) / 360.0).tan().ln();
    Projected::new(x, y.clamp(-HALF_SIZE, HALF_SIZE))
}

/// Transform web mercator meters back into longitude/latitude degrees
pub fn inverse(coordinate: Projected) -> LonLat {
    let lon = 180.0 * coordinate.x / HALF_SIZE;
    let lat = 360.0 * (coordinate.y / EARTH_RADIUS).exp().atan() / PI - 90.0;
    LonLat::new(lon, lat)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_origin_maps_to_origin() {
        let p = transform(0.0, 0.0);
        assert!(p.x.abs() < EPSILON);
        assert!(p.y.abs() < 1e-6);
    }

    #[test]
    fn test_known_values() {
        let p = transform(180.0, 0.0);
        assert!((p.x - HALF_SIZE).abs() < 1e-6);

        let p = transform(136.22167, 36.06519);
        assert!((p.x - 15_164_126.939).abs() < 0.01, "x was {}", p.x);
        assert!((p.y - 4_309_595.127).abs() < 0.01, "y was {}", p.y);
    }

    #[test]
    fn test_round_trip() {
        for &(lon, lat) in &[
            (136.22167, 36.06519),
            (-122.4194, 37.7749),
            (13.4, 52.5),
            (-179.9, -84.0),
            (0.0, 85.0),
        ] {
            let back = inverse(transform(lon, lat));
            assert!((back.lon - lon).abs() < EPSILON, "lon {} -> {}", lon, back.lon);
            assert!((back.lat - lat).abs() < EPSILON, "lat {} -> {}", lat, back.lat);
        }
    }

    #[test]
    fn test_transform_is_deterministic() {
        assert_eq!(transform(136.0, 36.0), transform(136.0, 36.0));
    }

    #[test]
    fn test_poles_are_clamped() {
        let north = transform(0.0, 90.0);
        let south = transform(0.0, -90.0);
        assert_eq!(north.y, HALF_SIZE);
        assert_eq!(south.y, -HALF_SIZE);

        let edge = inverse(Projected::new(0.0, HALF_SIZE));
        assert!((edge.lat - MAX_LATITUDE).abs() < 1e-6);
    }

    #[test]
    fn test_geo_conversions() {
        let p = Projected::new(1.0, 2.0);
        let coord: geo::Coord<f64> = p.into();
        assert_eq!(Projected::from(coord), p);

        let ll = LonLat::new(13.4, 52.5);
        let point: geo::Point<f64> = ll.into();
        assert_eq!(point.x(), 13.4);
        assert_eq!(LonLat::from(point), ll);
    }

    #[test]
    fn test_projection_codes() {
        assert_eq!(Projection::default().code(), "EPSG:3857");
        assert_eq!(Projection::Epsg4326.code(), "EPSG:4326");
        let json = serde_json::to_string(&Projection::Epsg3857).unwrap();
        assert_eq!(json, "\"EPSG:3857\"");
    }
}
