//! Map features and their icon styles.

use crate::{
    core::{
        bounds::Bounds,
        geo::{LatLng, Point},
    },
    prelude::HashMap,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How an icon anchor component is measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconAnchorUnits {
    /// Fraction of the icon size, 0.0 to 1.0
    #[default]
    Fraction,
    Pixels,
}

/// A raster or vector image drawn at a feature's position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Icon {
    /// Asset path or URL of the image
    pub src: String,
    /// Point of the image placed on the feature coordinate
    pub anchor: [f64; 2],
    pub anchor_x_units: IconAnchorUnits,
    pub anchor_y_units: IconAnchorUnits,
    /// Rendered size in pixels (width, height)
    pub size: (f64, f64),
    pub cross_origin: Option<String>,
}

impl Icon {
    /// Icon anchored at its centre
    pub fn new(src: impl Into<String>, size: (f64, f64)) -> Self {
        Self {
            src: src.into(),
            anchor: [0.5, 0.5],
            anchor_x_units: IconAnchorUnits::Fraction,
            anchor_y_units: IconAnchorUnits::Fraction,
            size,
            cross_origin: None,
        }
    }

    pub fn with_anchor(
        mut self,
        anchor: [f64; 2],
        x_units: IconAnchorUnits,
        y_units: IconAnchorUnits,
    ) -> Self {
        self.anchor = anchor;
        self.anchor_x_units = x_units;
        self.anchor_y_units = y_units;
        self
    }

    pub fn with_cross_origin(mut self, cross_origin: impl Into<String>) -> Self {
        self.cross_origin = Some(cross_origin.into());
        self
    }

    /// Anchor position in pixels from the icon's top-left corner
    pub fn anchor_offset(&self) -> Point {
        let resolve = |value: f64, units: IconAnchorUnits, extent: f64| match units {
            IconAnchorUnits::Fraction => value * extent,
            IconAnchorUnits::Pixels => value,
        };
        Point::new(
            resolve(self.anchor[0], self.anchor_x_units, self.size.0),
            resolve(self.anchor[1], self.anchor_y_units, self.size.1),
        )
    }

    /// Screen rectangle covered by the icon when its anchor sits on `screen`
    pub fn hit_rect(&self, screen: &Point) -> Bounds {
        let min = screen.subtract(&self.anchor_offset());
        Bounds::from_min_size(min, self.size.0, self.size.1)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub image: Icon,
}

impl Style {
    pub fn icon(image: Icon) -> Self {
        Self { image }
    }
}

/// A point feature in projected (EPSG:3857) coordinates with free-form properties
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    id: u32,
    geometry: Point,
    properties: HashMap<String, Value>,
    style: Option<Style>,
}

impl Feature {
    pub fn new(id: u32, geometry: Point) -> Self {
        Self {
            id,
            geometry,
            properties: HashMap::default(),
            style: None,
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn geometry(&self) -> Point {
        self.geometry
    }

    pub fn lat_lng(&self) -> LatLng {
        LatLng::from_mercator(self.geometry)
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.property(key).and_then(Value::as_str)
    }

    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.property(key).and_then(Value::as_u64)
    }

    pub fn style(&self) -> Option<&Style> {
        self.style.as_ref()
    }
}
