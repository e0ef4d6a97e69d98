//! Map controls: the state behind the zoom buttons, attribution line,
//! pointer coordinate read-out and the object list panel.

use crate::core::{constants::DEFAULT_ZOOM_DELTA, geo::LatLng};
use serde::{Deserialize, Serialize};

/// Coordinate reference systems the read-out can display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Projection {
    /// Geographic longitude/latitude in degrees
    #[default]
    #[serde(rename = "EPSG:4326")]
    Epsg4326,
    /// Web Mercator metres
    #[serde(rename = "EPSG:3857")]
    Epsg3857,
}

impl Projection {
    pub fn code(&self) -> &'static str {
        match self {
            Projection::Epsg4326 => "EPSG:4326",
            Projection::Epsg3857 => "EPSG:3857",
        }
    }

    /// Expresses a coordinate as an `[x, y]` pair in this projection
    pub fn transform(&self, lat_lng: &LatLng) -> [f64; 2] {
        match self {
            Projection::Epsg4326 => lat_lng.to_lon_lat(),
            Projection::Epsg3857 => {
                let p = lat_lng.to_mercator();
                [p.x, p.y]
            }
        }
    }
}

/// Formats an `[x, y]` pair as `"x, y"` with a fixed number of decimals
pub fn format_coordinate(xy: [f64; 2], precision: usize) -> String {
    format!("{:.*}, {:.*}", precision, xy[0], precision, xy[1])
}

/// Shows the coordinate under the pointer
#[derive(Debug, Clone, PartialEq)]
pub struct MousePosition {
    projection: Projection,
    precision: usize,
    undefined_text: String,
    coordinate: Option<LatLng>,
}

impl MousePosition {
    pub fn new(projection: Projection, precision: usize) -> Self {
        Self {
            projection,
            precision,
            undefined_text: String::new(),
            coordinate: None,
        }
    }

    /// Text shown while the pointer is outside the map
    pub fn with_undefined_text(mut self, text: impl Into<String>) -> Self {
        self.undefined_text = text.into();
        self
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    pub fn coordinate(&self) -> Option<LatLng> {
        self.coordinate
    }

    pub fn update(&mut self, coordinate: Option<LatLng>) {
        self.coordinate = coordinate;
    }

    pub fn text(&self) -> String {
        match &self.coordinate {
            Some(lat_lng) => format_coordinate(self.projection.transform(lat_lng), self.precision),
            None => self.undefined_text.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    Zoom,
    Attribution,
    MousePosition,
    ObjectList,
}

/// A control attached to a map
#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    Zoom { delta: f64 },
    Attribution { text: String },
    MousePosition(MousePosition),
    /// Panel listing the map's points of interest; its entries are drawn by
    /// the page that owns the registry
    ObjectList,
}

impl Control {
    /// Controls every map starts with
    pub fn defaults(attribution: impl Into<String>) -> Vec<Control> {
        vec![
            Control::Zoom {
                delta: DEFAULT_ZOOM_DELTA,
            },
            Control::Attribution {
                text: attribution.into(),
            },
        ]
    }

    pub fn kind(&self) -> ControlKind {
        match self {
            Control::Zoom { .. } => ControlKind::Zoom,
            Control::Attribution { .. } => ControlKind::Attribution,
            Control::MousePosition(_) => ControlKind::MousePosition,
            Control::ObjectList => ControlKind::ObjectList,
        }
    }
}
