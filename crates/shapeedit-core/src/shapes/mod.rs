//! Shape definitions for the editor.
//!
//! A [`Shape`] is a common attribute record (identity, position, style, layer)
//! plus a kind-specific [`Geometry`] payload. Width/height translation is done
//! with a `match` over the payload so the circle's single-radius asymmetry stays
//! explicit.

mod circle;
mod color;
mod rectangle;
mod triangle;

pub use circle::Circle;
pub use color::SerializableColor;
pub use rectangle::Rectangle;
pub use triangle::Triangle;

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Base dimension substituted when a shape's base width or height is zero or undefined.
pub const FALLBACK_BASE_SIZE: f64 = 100.0;

/// Dash pattern for [`BorderStyle::Dashed`].
pub const DASHED_PATTERN: [f64; 2] = [10.0, 6.0];
/// Dash pattern for [`BorderStyle::Dotted`].
pub const DOTTED_PATTERN: [f64; 2] = [2.0, 4.0];

/// Round half up, matching the panel's integer display.
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 { floor + 1.0 } else { floor }
}

pub(crate) fn base_or_fallback(base: f64) -> f64 {
    if base == 0.0 || base.is_nan() {
        FALLBACK_BASE_SIZE
    } else {
        base
    }
}

/// The kinds of shape the editor can create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Rectangle,
    Circle,
    Triangle,
}

impl ShapeKind {
    /// Display name for this kind.
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Circle => "circle",
            ShapeKind::Triangle => "triangle",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Error returned when a shape kind name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown shape kind: {0}")]
pub struct ParseShapeKindError(pub String);

impl FromStr for ShapeKind {
    type Err = ParseShapeKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rect" | "rectangle" => Ok(ShapeKind::Rectangle),
            "circle" => Ok(ShapeKind::Circle),
            "triangle" => Ok(ShapeKind::Triangle),
            _ => Err(ParseShapeKindError(s.to_string())),
        }
    }
}

/// Border style as offered by the property panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BorderStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    None,
}

impl BorderStyle {
    /// Panel name for this style.
    pub fn name(self) -> &'static str {
        match self {
            BorderStyle::Solid => "solid",
            BorderStyle::Dashed => "dashed",
            BorderStyle::Dotted => "dotted",
            BorderStyle::None => "none",
        }
    }

    /// Dash pattern written onto a shape for this style.
    ///
    /// `Solid` clears the pattern, `None` sets an explicitly empty one.
    pub fn dash_pattern(self) -> Option<Vec<f64>> {
        match self {
            BorderStyle::Solid => None,
            BorderStyle::Dashed => Some(DASHED_PATTERN.to_vec()),
            BorderStyle::Dotted => Some(DOTTED_PATTERN.to_vec()),
            BorderStyle::None => Some(Vec::new()),
        }
    }

    /// Recover the panel style from a shape's dash pattern.
    pub fn from_dash(dash: Option<&[f64]>) -> Self {
        match dash {
            None => BorderStyle::Solid,
            Some([]) => BorderStyle::None,
            Some(pattern) if pattern == &DOTTED_PATTERN[..] => BorderStyle::Dotted,
            Some(_) => BorderStyle::Dashed,
        }
    }
}

impl fmt::Display for BorderStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Error returned when a border style name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown border style: {0}")]
pub struct ParseBorderStyleError(pub String);

impl FromStr for BorderStyle {
    type Err = ParseBorderStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "solid" => Ok(BorderStyle::Solid),
            "dashed" => Ok(BorderStyle::Dashed),
            "dotted" => Ok(BorderStyle::Dotted),
            "none" => Ok(BorderStyle::None),
            _ => Err(ParseBorderStyleError(s.to_string())),
        }
    }
}

/// Style properties for shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Fill color as entered (None = unset).
    pub fill: Option<String>,
    /// Stroke color as entered (None = unset).
    pub stroke: Option<String>,
    /// Stroke width. NaN means the panel supplied an undefined number.
    pub stroke_width: f64,
    /// Stroke dash pattern. `None` is unset (solid), `Some(vec![])` is explicitly empty.
    pub stroke_dash: Option<Vec<f64>>,
}

impl ShapeStyle {
    /// Create a solid style with the given colors and width.
    pub fn new(fill: &str, stroke: &str, stroke_width: f64) -> Self {
        Self {
            fill: Some(fill.to_string()),
            stroke: Some(stroke.to_string()),
            stroke_width,
            stroke_dash: None,
        }
    }

    /// Fill color for rendering (None when unset).
    pub fn fill_color(&self) -> Option<SerializableColor> {
        self.fill.as_deref().map(SerializableColor::parse_hex)
    }

    /// Stroke color for rendering (None when unset).
    pub fn stroke_color(&self) -> Option<SerializableColor> {
        self.stroke.as_deref().map(SerializableColor::parse_hex)
    }
}

/// Kind-specific geometry payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    Rectangle(Rectangle),
    Circle(Circle),
    Triangle(Triangle),
}

/// A shape on the drawing surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub(crate) id: ShapeId,
    /// Top-left corner of the bounding box.
    pub position: Point,
    /// Style properties.
    pub style: ShapeStyle,
    /// Paint order; higher paints later.
    pub layer_index: i64,
    /// Kind-specific geometry.
    pub geometry: Geometry,
}

impl Shape {
    /// Create a shape of `kind` with the editor's creation defaults.
    pub fn with_defaults(kind: ShapeKind) -> Self {
        let (position, style, geometry) = match kind {
            ShapeKind::Rectangle => (
                Point::new(100.0, 100.0),
                ShapeStyle::new("#4caf50", "#000", 3.0),
                Geometry::Rectangle(Rectangle::new(150.0, 100.0)),
            ),
            ShapeKind::Circle => (
                Point::new(200.0, 150.0),
                ShapeStyle::new("#2196f3", "#000", 4.0),
                Geometry::Circle(Circle::new(60.0)),
            ),
            ShapeKind::Triangle => (
                Point::new(250.0, 120.0),
                ShapeStyle::new("#ff9800", "#000", 3.0),
                Geometry::Triangle(Triangle::new(160.0, 120.0)),
            ),
        };
        Self {
            id: Uuid::new_v4(),
            position,
            style,
            layer_index: 0,
            geometry,
        }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn kind(&self) -> ShapeKind {
        match self.geometry {
            Geometry::Rectangle(_) => ShapeKind::Rectangle,
            Geometry::Circle(_) => ShapeKind::Circle,
            Geometry::Triangle(_) => ShapeKind::Triangle,
        }
    }

    /// On-screen width and height.
    pub fn effective_size(&self) -> (f64, f64) {
        match &self.geometry {
            Geometry::Rectangle(r) => r.effective_size(),
            Geometry::Circle(c) => c.effective_size(),
            Geometry::Triangle(t) => t.effective_size(),
        }
    }

    /// Write a width/height pair into the native geometry.
    ///
    /// Rectangles and triangles derive new scale factors from their base
    /// dimensions. Circles take `width` as the diameter and ignore `height`.
    pub fn set_effective_size(&mut self, width: f64, height: f64) {
        match &mut self.geometry {
            Geometry::Rectangle(r) => r.set_effective_size(width, height),
            Geometry::Circle(c) => c.set_effective_size(width, height),
            Geometry::Triangle(t) => t.set_effective_size(width, height),
        }
    }

    /// Bounding box in surface coordinates.
    pub fn bounds(&self) -> Rect {
        match &self.geometry {
            Geometry::Rectangle(r) => r.bounds(self.position),
            Geometry::Circle(c) => c.bounds(self.position),
            Geometry::Triangle(t) => t.bounds(self.position),
        }
    }

    /// Check if a point hits this shape.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let tolerance = tolerance + self.style.stroke_width.max(0.0) / 2.0;
        match &self.geometry {
            Geometry::Rectangle(r) => r.hit_test(self.position, point, tolerance),
            Geometry::Circle(c) => c.hit_test(self.position, point, tolerance),
            Geometry::Triangle(t) => t.hit_test(self.position, point, tolerance),
        }
    }

    /// Move the shape by an offset.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.position = Point::new(self.position.x + dx, self.position.y + dy);
    }

    /// Current dash pattern, empty when unset.
    pub fn dash_pattern(&self) -> &[f64] {
        self.style.stroke_dash.as_deref().unwrap_or(&[])
    }
}

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = a + seg * t;
    (point - proj).hypot()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_table() {
        let rect = Shape::with_defaults(ShapeKind::Rectangle);
        assert_eq!(rect.kind(), ShapeKind::Rectangle);
        assert_eq!(rect.position, Point::new(100.0, 100.0));
        assert_eq!(rect.style.fill.as_deref(), Some("#4caf50"));
        assert_eq!(rect.style.stroke.as_deref(), Some("#000"));
        assert_eq!(rect.effective_size(), (150.0, 100.0));

        let circle = Shape::with_defaults(ShapeKind::Circle);
        assert_eq!(circle.position, Point::new(200.0, 150.0));
        assert_eq!(circle.style.fill.as_deref(), Some("#2196f3"));
        assert!((circle.style.stroke_width - 4.0).abs() < f64::EPSILON);
        assert_eq!(circle.effective_size(), (120.0, 120.0));

        let triangle = Shape::with_defaults(ShapeKind::Triangle);
        assert_eq!(triangle.position, Point::new(250.0, 120.0));
        assert_eq!(triangle.style.fill.as_deref(), Some("#ff9800"));
        assert_eq!(triangle.effective_size(), (160.0, 120.0));
    }

    #[test]
    fn test_unique_ids() {
        let a = Shape::with_defaults(ShapeKind::Rectangle);
        let b = Shape::with_defaults(ShapeKind::Rectangle);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_border_style_dash_mapping() {
        assert_eq!(BorderStyle::Solid.dash_pattern(), None);
        assert_eq!(BorderStyle::Dashed.dash_pattern(), Some(vec![10.0, 6.0]));
        assert_eq!(BorderStyle::Dotted.dash_pattern(), Some(vec![2.0, 4.0]));
        assert_eq!(BorderStyle::None.dash_pattern(), Some(vec![]));
    }

    #[test]
    fn test_border_style_from_dash() {
        for style in [
            BorderStyle::Solid,
            BorderStyle::Dashed,
            BorderStyle::Dotted,
            BorderStyle::None,
        ] {
            let dash = style.dash_pattern();
            assert_eq!(BorderStyle::from_dash(dash.as_deref()), style);
        }
    }

    #[test]
    fn test_border_style_parse() {
        assert_eq!("Dashed".parse::<BorderStyle>(), Ok(BorderStyle::Dashed));
        assert_eq!(" none ".parse::<BorderStyle>(), Ok(BorderStyle::None));
        assert!("wavy".parse::<BorderStyle>().is_err());
    }

    #[test]
    fn test_shape_kind_parse() {
        assert_eq!("rect".parse::<ShapeKind>(), Ok(ShapeKind::Rectangle));
        assert_eq!("Circle".parse::<ShapeKind>(), Ok(ShapeKind::Circle));
        assert_eq!("triangle".parse::<ShapeKind>(), Ok(ShapeKind::Triangle));
        assert!("hexagon".parse::<ShapeKind>().is_err());
    }

    #[test]
    fn test_dash_pattern_unset_is_empty() {
        let mut shape = Shape::with_defaults(ShapeKind::Rectangle);
        assert!(shape.dash_pattern().is_empty());
        shape.style.stroke_dash = Some(vec![10.0, 6.0]);
        assert_eq!(shape.dash_pattern(), &[10.0, 6.0]);
    }

    #[test]
    fn test_round_half_up() {
        assert!((round_half_up(2.5) - 3.0).abs() < f64::EPSILON);
        assert!((round_half_up(2.4) - 2.0).abs() < f64::EPSILON);
        assert!((round_half_up(-2.5) + 2.0).abs() < f64::EPSILON);
        assert!(round_half_up(f64::NAN).is_nan());
    }

    #[test]
    fn test_base_fallback() {
        assert!((base_or_fallback(0.0) - 100.0).abs() < f64::EPSILON);
        assert!((base_or_fallback(f64::NAN) - 100.0).abs() < f64::EPSILON);
        assert!((base_or_fallback(150.0) - 150.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_point_to_segment_dist() {
        let d = point_to_segment_dist(
            Point::new(5.0, 5.0),
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
        );
        assert!((d - 5.0).abs() < 1e-9);
    }
}
