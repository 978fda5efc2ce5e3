//! Circle geometry.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// A circle described only by its radius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub radius: f64,
}

impl Circle {
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }

    /// Width and height are both the diameter.
    pub fn effective_size(&self) -> (f64, f64) {
        let diameter = self.radius * 2.0;
        (diameter, diameter)
    }

    /// Take `width` as the new diameter. `height` is ignored: a circle has no
    /// independent vertical extent.
    pub fn set_effective_size(&mut self, width: f64, _height: f64) {
        self.radius = width / 2.0;
    }

    pub fn center(&self, position: Point) -> Point {
        Point::new(position.x + self.radius, position.y + self.radius)
    }

    pub fn bounds(&self, position: Point) -> Rect {
        let diameter = self.radius * 2.0;
        Rect::new(
            position.x,
            position.y,
            position.x + diameter,
            position.y + diameter,
        )
        .abs()
    }

    pub fn hit_test(&self, position: Point, point: Point, tolerance: f64) -> bool {
        let center = self.center(position);
        (point - center).hypot() <= self.radius.abs() + tolerance
    }
}
