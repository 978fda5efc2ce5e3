//! Triangle geometry.
//!
//! An isosceles triangle with its apex at the top centre of the bounding box,
//! sized the same way as a rectangle (base dimensions plus scale factors).

use super::{base_or_fallback, point_to_segment_dist};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub base_width: f64,
    pub base_height: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl Triangle {
    /// Create an unscaled triangle.
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

    pub fn set_effective_size(&mut self, width: f64, height: f64) {
        self.scale_x = width / base_or_fallback(self.base_width);
        self.scale_y = height / base_or_fallback(self.base_height);
    }

    /// Apex, bottom-left and bottom-right corners.
    pub fn vertices(&self, position: Point) -> [Point; 3] {
        let (width, height) = self.effective_size();
        [
            Point::new(position.x + width / 2.0, position.y),
            Point::new(position.x, position.y + height),
            Point::new(position.x + width, position.y + height),
        ]
    }

    pub fn bounds(&self, position: Point) -> Rect {
        let (width, height) = self.effective_size();
        Rect::new(position.x, position.y, position.x + width, position.y + height).abs()
    }

    pub fn hit_test(&self, position: Point, point: Point, tolerance: f64) -> bool {
        if !self
            .bounds(position)
            .inflate(tolerance, tolerance)
            .contains(point)
        {
            return false;
        }
        let [a, b, c] = self.vertices(position);
        let cross = |o: Point, p: Point, q: Point| -> f64 {
            (p.x - o.x) * (q.y - o.y) - (p.y - o.y) * (q.x - o.x)
        };
        let d1 = cross(a, b, point);
        let d2 = cross(b, c, point);
        let d3 = cross(c, a, point);
        let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
        let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
        if !(has_neg && has_pos) {
            return true;
        }
        // Outside: accept points within tolerance of an edge
        [(a, b), (b, c), (c, a)]
            .iter()
            .any(|&(p, q)| point_to_segment_dist(point, p, q) <= tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertices() {
        let tri = Triangle::new(160.0, 120.0);
        let [apex, left, right] = tri.vertices(Point::new(0.0, 0.0));
        assert_eq!(apex, Point::new(80.0, 0.0));
        assert_eq!(left, Point::new(0.0, 120.0));
        assert_eq!(right, Point::new(160.0, 120.0));
    }

    #[test]
    fn test_scale_from_base() {
        let mut tri = Triangle::new(160.0, 120.0);
        tri.set_effective_size(80.0, 240.0);
        assert!((tri.scale_x - 0.5).abs() < f64::EPSILON);
        assert!((tri.scale_y - 2.0).abs() < f64::EPSILON);
        assert_eq!(tri.effective_size(), (80.0, 240.0));
    }

    #[test]
    fn test_hit_test() {
        let tri = Triangle::new(100.0, 100.0);
        let origin = Point::new(0.0, 0.0);
        assert!(tri.hit_test(origin, Point::new(50.0, 60.0), 0.0));
        // Top-left corner of the bounds is outside the triangle
        assert!(!tri.hit_test(origin, Point::new(5.0, 5.0), 0.0));
        assert!(!tri.hit_test(origin, Point::new(150.0, 50.0), 0.0));
    }
}
