//! The campus points of interest.
//!
//! The registry is compiled in and never changes while the program runs.
//! Coordinates and marker styling are kept in separate types so the map can
//! restyle points without touching their geography.

use crate::core::geo::{LatLng, LonLat, Point};
use serde::Serialize;

/// Marker artwork for a point of interest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IconKind {
    Park,
    Church,
    Sport,
    Hostel,
    Memorial,
}

impl IconKind {
    pub fn name(&self) -> &'static str {
        match self {
            IconKind::Park => "park",
            IconKind::Church => "church",
            IconKind::Sport => "sport",
            IconKind::Hostel => "hostel",
            IconKind::Memorial => "memorial",
        }
    }

    /// Path of the marker image relative to the asset root
    pub fn asset_path(&self) -> String {
        format!("images/icons/{}.svg", self.name())
    }

    /// Fill colour of the drawn marker as RGB
    pub fn color(&self) -> [u8; 3] {
        match self {
            IconKind::Park => [46, 139, 87],
            IconKind::Church => [218, 165, 32],
            IconKind::Sport => [30, 144, 255],
            IconKind::Hostel => [205, 92, 92],
            IconKind::Memorial => [112, 128, 144],
        }
    }

    /// Single-character glyph drawn on the marker
    pub fn glyph(&self) -> char {
        match self {
            IconKind::Park => '♣',
            IconKind::Church => '✝',
            IconKind::Sport => '⚽',
            IconKind::Hostel => '⌂',
            IconKind::Memorial => '★',
        }
    }
}

/// A named place on the campus map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointOfInterest {
    pub id: u32,
    pub name: &'static str,
    /// `[longitude, latitude]` in EPSG:4326
    pub coordinate: LonLat,
    pub icon: IconKind,
    pub description: &'static str,
}

impl PointOfInterest {
    pub fn lat_lng(&self) -> LatLng {
        LatLng::from_lon_lat(self.coordinate)
    }

    /// Coordinate in EPSG:3857, the map's view projection
    pub fn projected(&self) -> Point {
        self.lat_lng().to_mercator()
    }
}

static REGISTRY: [PointOfInterest; 5] = [
    PointOfInterest {
        id: 0,
        name: "Парк ДГТУ",
        coordinate: [39.71065, 47.24011],
        icon: IconKind::Park,
        description: "Студенческий парк",
    },
    PointOfInterest {
        id: 1,
        name: "Церковь при ДГТУ",
        coordinate: [39.71109, 47.23931],
        icon: IconKind::Church,
        description: "Храм святой мученицы Татианы",
    },
    PointOfInterest {
        id: 2,
        name: "Спортивный манеж",
        coordinate: [39.70892, 47.24088],
        icon: IconKind::Sport,
        description: "Легко-атлетический манеж ДГТУ",
    },
    PointOfInterest {
        id: 3,
        name: "Общежитие ДГТУ",
        coordinate: [39.71271, 47.23941],
        icon: IconKind::Hostel,
        description: "Студенческое общежитие",
    },
    PointOfInterest {
        id: 4,
        name: "Памятник студентам и сотрудникам РИСХМ",
        coordinate: [39.71038, 47.23929],
        icon: IconKind::Memorial,
        description: "Установлен 08.05.1982",
    },
];

/// All points of interest in display order
pub fn registry() -> &'static [PointOfInterest] {
    &REGISTRY
}

pub fn find(id: u32) -> Option<&'static PointOfInterest> {
    REGISTRY.iter().find(|poi| poi.id == id)
}
