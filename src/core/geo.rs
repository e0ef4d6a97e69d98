//! Geographic and projected coordinates.
//!
//! Markers and overlays are positioned in EPSG:3857 (spherical Web Mercator,
//! metres); the registry and the mouse read-out speak EPSG:4326 degrees.

use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

/// Sphere radius used by EPSG:3857
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Latitude at which the Mercator square ends
pub const MAX_LATITUDE: f64 = 85.0511287798;

/// Length of the EPSG:3857 world square in projected units (metres)
pub const WORLD_EXTENT: f64 = 2.0 * PI * EARTH_RADIUS;

/// A `[longitude, latitude]` pair, the order used by tile servers and GeoJSON
pub type LonLat = [f64; 2];

/// A position in EPSG:4326 degrees
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn from_lon_lat([lng, lat]: LonLat) -> Self {
        Self { lat, lng }
    }

    pub fn to_lon_lat(&self) -> LonLat {
        [self.lng, self.lat]
    }

    /// Keeps a latitude inside the Mercator square
    pub fn clamp_lat(lat: f64) -> f64 {
        lat.clamp(-MAX_LATITUDE, MAX_LATITUDE)
    }

    /// Finite and within ±90° latitude, ±180° longitude
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    /// Projects to EPSG:3857
    pub fn to_mercator(&self) -> Point {
        let phi = Self::clamp_lat(self.lat).to_radians();
        Point {
            x: EARTH_RADIUS * self.lng.to_radians(),
            y: EARTH_RADIUS * (FRAC_PI_4 + phi / 2.0).tan().ln(),
        }
    }

    /// Inverse of [`LatLng::to_mercator`]
    pub fn from_mercator(projected: Point) -> Self {
        let phi = 2.0 * (projected.y / EARTH_RADIUS).exp().atan() - FRAC_PI_2;
        Self {
            lat: phi.to_degrees(),
            lng: (projected.x / EARTH_RADIUS).to_degrees(),
        }
    }
}

/// A 2D point: container pixels or projected metres depending on context
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(&self, other: &Point) -> Point {
        Point {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    pub fn subtract(&self, other: &Point) -> Point {
        self.add(&other.multiply(-1.0))
    }

    pub fn multiply(&self, factor: f64) -> Point {
        Point {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Euclidean distance
    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Rectangle in degrees, south-west to north-east
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    pub fn new(south_west: LatLng, north_east: LatLng) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// Smallest bounds containing every coordinate, `None` for an empty input
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a LatLng>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = *points.next()?;
        Some(points.fold(Self::new(first, first), |mut bounds, point| {
            bounds.extend(point);
            bounds
        }))
    }

    /// Inclusive on every edge
    pub fn contains(&self, point: &LatLng) -> bool {
        (self.south_west.lat..=self.north_east.lat).contains(&point.lat)
            && (self.south_west.lng..=self.north_east.lng).contains(&point.lng)
    }

    pub fn intersects(&self, other: &LatLngBounds) -> bool {
        self.south_west.lat <= other.north_east.lat
            && other.south_west.lat <= self.north_east.lat
            && self.south_west.lng <= other.north_east.lng
            && other.south_west.lng <= self.north_east.lng
    }

    /// Grows the bounds to cover `point`
    pub fn extend(&mut self, point: &LatLng) {
        let (sw, ne) = (&mut self.south_west, &mut self.north_east);
        sw.lat = sw.lat.min(point.lat);
        sw.lng = sw.lng.min(point.lng);
        ne.lat = ne.lat.max(point.lat);
        ne.lng = ne.lng.max(point.lng);
    }
}

/// A slippy-map tile address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: u32,
    pub y: u32,
    pub z: u8,
}

impl TileCoord {
    pub fn new(x: u32, y: u32, z: u8) -> Self {
        Self { x, y, z }
    }

    /// The tile at zoom `z` that contains `lat_lng`
    pub fn from_lat_lng(lat_lng: &LatLng, z: u8) -> Self {
        let projected = lat_lng.to_mercator();
        let tiles_across = f64::from(1u32 << z);
        let last = tiles_across - 1.0;
        let column = (projected.x / WORLD_EXTENT + 0.5) * tiles_across;
        let row = (0.5 - projected.y / WORLD_EXTENT) * tiles_across;
        Self {
            x: column.floor().clamp(0.0, last) as u32,
            y: row.floor().clamp(0.0, last) as u32,
            z,
        }
    }
}
