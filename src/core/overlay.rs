//! Overlays: screen elements pinned to a map coordinate (the popup).

use crate::core::{bounds::Bounds, geo::Point, viewport::Viewport};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Which point of the overlay element sits on the anchor coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverlayPositioning {
    BottomLeft,
    BottomCenter,
    BottomRight,
    CenterLeft,
    CenterCenter,
    CenterRight,
    #[default]
    TopLeft,
    TopCenter,
    TopRight,
}

impl OverlayPositioning {
    /// Fraction of the element size to shift left/up so that the named
    /// point lands on the anchor
    fn shift(&self) -> (f64, f64) {
        use OverlayPositioning::*;
        let x = match self {
            BottomLeft | CenterLeft | TopLeft => 0.0,
            BottomCenter | CenterCenter | TopCenter => 0.5,
            BottomRight | CenterRight | TopRight => 1.0,
        };
        let y = match self {
            TopLeft | TopCenter | TopRight => 0.0,
            CenterLeft | CenterCenter | CenterRight => 0.5,
            BottomLeft | BottomCenter | BottomRight => 1.0,
        };
        (x, y)
    }
}

impl FromStr for OverlayPositioning {
    type Err = std::convert::Infallible;

    /// Unrecognised names place the element by its top-left corner, the
    /// same fallback browsers give an unknown positioning class.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use OverlayPositioning::*;
        Ok(match s {
            "bottom-left" => BottomLeft,
            "bottom-center" => BottomCenter,
            "bottom-right" => BottomRight,
            "center-left" => CenterLeft,
            "center-center" => CenterCenter,
            "center-right" => CenterRight,
            "top-center" => TopCenter,
            "top-right" => TopRight,
            _ => TopLeft,
        })
    }
}

/// Goes through [`FromStr`], so configs accept the same names (and the same
/// top-left fallback) as the positioning strings in code.
impl<'de> Deserialize<'de> for OverlayPositioning {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        match name.parse::<OverlayPositioning>() {
            Ok(positioning) => Ok(positioning),
            Err(never) => match never {},
        }
    }
}

/// An element anchored to a projected (EPSG:3857) map coordinate.
///
/// An overlay without a position is not displayed even while attached.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    id: String,
    position: Option<Point>,
    positioning: OverlayPositioning,
    offset: Point,
    stop_event: bool,
}

impl Overlay {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            position: None,
            positioning: OverlayPositioning::default(),
            offset: Point::default(),
            stop_event: true,
        }
    }

    pub fn with_positioning(mut self, positioning: OverlayPositioning) -> Self {
        self.positioning = positioning;
        self
    }

    /// Pixel offset applied after positioning (x right, y down)
    pub fn with_offset(mut self, offset: [f64; 2]) -> Self {
        self.offset = Point::new(offset[0], offset[1]);
        self
    }

    /// Whether pointer events over the element stay out of the map
    pub fn with_stop_event(mut self, stop_event: bool) -> Self {
        self.stop_event = stop_event;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn position(&self) -> Option<Point> {
        self.position
    }

    pub fn set_position(&mut self, position: Option<Point>) {
        self.position = position;
    }

    pub fn positioning(&self) -> OverlayPositioning {
        self.positioning
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn stop_event(&self) -> bool {
        self.stop_event
    }

    /// Screen rectangle of an element of `element_size` pixels, or `None`
    /// while the overlay has no position
    pub fn placement(&self, viewport: &Viewport, element_size: (f64, f64)) -> Option<Bounds> {
        let anchor = viewport.projected_to_pixel(&self.position?);
        let (shift_x, shift_y) = self.positioning.shift();
        let min = Point::new(
            anchor.x + self.offset.x - element_size.0 * shift_x,
            anchor.y + self.offset.y - element_size.1 * shift_y,
        );
        Some(Bounds::from_min_size(min, element_size.0, element_size.1))
    }
}
