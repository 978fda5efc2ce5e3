//! Rectangle geometry.

use super::base_or_fallback;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Rectangle geometry: base dimensions plus scale factors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    /// Width at creation time.
    pub base_width: f64,
    /// Height at creation time.
    pub base_height: f64,
    /// Horizontal scale factor.
    pub scale_x: f64,
    /// Vertical scale factor.
    pub scale_y: f64,
}

impl Rectangle {
    /// Create an unscaled rectangle.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            base_width: width,
            base_height: height,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }

    pub fn effective_size(&self) -> (f64, f64) {
        (self.base_width * self.scale_x, self.base_height * self.scale_y)
    }

    /// Derive scale factors from the base dimensions so that the effective
    /// size becomes `width` × `height`.
    pub fn set_effective_size(&mut self, width: f64, height: f64) {
        self.scale_x = width / base_or_fallback(self.base_width);
        self.scale_y = height / base_or_fallback(self.base_height);
    }

    /// Get the rectangle as a kurbo Rect anchored at `position`.
    pub fn bounds(&self, position: Point) -> Rect {
        let (width, height) = self.effective_size();
        Rect::new(position.x, position.y, position.x + width, position.y + height).abs()
    }

    pub fn hit_test(&self, position: Point, point: Point, tolerance: f64) -> bool {
        self.bounds(position)
            .inflate(tolerance, tolerance)
            .contains(point)
    }
}
