//! Axis-aligned rectangles in container pixels or projected metres.

use crate::core::geo::Point;
use serde::{Deserialize, Serialize};

/// Rectangle spanned by its smallest and largest corner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    pub fn from_coords(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min: Point::new(min_x, min_y),
            max: Point::new(max_x, max_y),
        }
    }

    /// Rectangle whose top-left corner is `min`
    pub fn from_min_size(min: Point, width: f64, height: f64) -> Self {
        let max = min.add(&Point::new(width, height));
        Self { min, max }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point {
        self.min.add(&self.max).multiply(0.5)
    }

    /// Inclusive on every edge, so a click on the border of an icon counts
    pub fn contains(&self, point: &Point) -> bool {
        (self.min.x..=self.max.x).contains(&point.x) && (self.min.y..=self.max.y).contains(&point.y)
    }

    /// Grows the rectangle to cover `point`
    pub fn extend(&mut self, point: &Point) {
        self.min = Point::new(self.min.x.min(point.x), self.min.y.min(point.y));
        self.max = Point::new(self.max.x.max(point.x), self.max.y.max(point.y));
    }

    pub fn extend_bounds(&mut self, other: &Bounds) {
        self.extend(&other.min);
        self.extend(&other.max);
    }

    /// Copy pushed outwards by `margin` on all four sides
    pub fn expanded(&self, margin: f64) -> Bounds {
        let grow = Point::new(margin, margin);
        Bounds::new(self.min.subtract(&grow), self.max.add(&grow))
    }

    /// `min` does not exceed `max` on either axis
    pub fn is_valid(&self) -> bool {
        self.width() >= 0.0 && self.height() >= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_and_center() {
        let bounds = Bounds::from_coords(10.0, 20.0, 30.0, 60.0);
        assert_eq!((bounds.width(), bounds.height()), (20.0, 40.0));
        assert_eq!(bounds.center(), Point::new(20.0, 40.0));
        assert!(bounds.is_valid());
        assert!(!Bounds::from_coords(1.0, 0.0, 0.0, 1.0).is_valid());
    }

    #[test]
    fn test_icon_rect_edges_are_hits() {
        // 20x20 icon whose top-left corner is at (90, 80)
        let icon = Bounds::from_min_size(Point::new(90.0, 80.0), 20.0, 20.0);
        assert!(icon.contains(&Point::new(90.0, 80.0)));
        assert!(icon.contains(&Point::new(110.0, 100.0)));
        assert!(!icon.contains(&Point::new(110.1, 100.0)));
        assert!(!icon.contains(&Point::new(100.0, 79.9)));
    }

    #[test]
    fn test_extend_and_expand() {
        let mut bounds = Bounds::new(Point::new(0.0, 0.0), Point::new(0.0, 0.0));
        bounds.extend(&Point::new(-1.0, 2.0));
        bounds.extend_bounds(&Bounds::from_coords(3.0, -4.0, 5.0, 1.0));
        assert_eq!(bounds, Bounds::from_coords(-1.0, -4.0, 5.0, 2.0));

        let grown = Bounds::from_coords(-1.0, -1.0, 1.0, 1.0).expanded(1.0);
        assert_eq!(grown, Bounds::from_coords(-2.0, -2.0, 2.0, 2.0));
    }
}
