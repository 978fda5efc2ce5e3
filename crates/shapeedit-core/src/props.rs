//! Property panel synchronization.
//!
//! [`PropertySync`] keeps an [`EditDraft`] in step with the selected shape.
//! Selection changes *pull* the shape's values into the draft; an explicit
//! apply *pushes* the draft back through [`Scene::apply_to_selected`] and then
//! pulls again so the panel shows exactly what the shape now holds.

use crate::events::{SceneEvent, ShapeSnapshot};
use crate::scene::{Scene, ShapePatch};
use crate::shapes::{BorderStyle, Geometry, ParseBorderStyleError, ShapeId, round_half_up};
use crate::visual::Visuals;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Fill shown when the shape has none.
pub const DEFAULT_FILL: &str = "#ffffff";
/// Stroke shown when the shape has none.
pub const DEFAULT_STROKE: &str = "#000000";
/// Stroke width shown when the shape's width is undefined or zero.
pub const DEFAULT_STROKE_WIDTH: f64 = 1.0;

/// Coerce panel text to a number. Text that is not a number (including empty
/// input) becomes NaN, which is passed on rather than rejected.
pub fn coerce_number(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(f64::NAN)
}

/// Transient panel-side copy of a shape's editable properties.
#[derive(Debug, Clone, PartialEq)]
pub struct EditDraft {
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f64,
    pub width: f64,
    pub height: f64,
    pub border_style: BorderStyle,
    pub layer_index: f64,
}

impl EditDraft {
    /// Project a shape into panel values.
    pub fn from_shape(shape: &ShapeSnapshot) -> Self {
        let style = &shape.style;
        let fill = style
            .fill
            .clone()
            .filter(|f| !f.is_empty())
            .unwrap_or_else(|| DEFAULT_FILL.to_string());
        let stroke = style
            .stroke
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_STROKE.to_string());
        let stroke_width = if style.stroke_width.is_nan() || style.stroke_width == 0.0 {
            DEFAULT_STROKE_WIDTH
        } else {
            style.stroke_width
        };

        // A circle's extents always come from its radius.
        let (width, height) = match &shape.geometry {
            Geometry::Rectangle(r) => (
                round_half_up(r.base_width * r.scale_x),
                round_half_up(r.base_height * r.scale_y),
            ),
            Geometry::Triangle(t) => (
                round_half_up(t.base_width * t.scale_x),
                round_half_up(t.base_height * t.scale_y),
            ),
            Geometry::Circle(c) => {
                let diameter = round_half_up(2.0 * c.radius);
                (diameter, diameter)
            }
        };

        Self {
            fill,
            stroke,
            stroke_width,
            width,
            height,
            border_style: BorderStyle::from_dash(style.stroke_dash.as_deref()),
            layer_index: shape.layer_index as f64,
        }
    }

    /// Build the patch committed by apply.
    pub fn to_patch(&self) -> ShapePatch {
        ShapePatch {
            fill: self.fill.clone(),
            stroke: self.stroke.clone(),
            stroke_width: self.stroke_width,
            stroke_dash: self.border_style.dash_pattern(),
            layer_index: self.layer_index,
            width: self.width,
            height: self.height,
        }
    }
}

/// Editable panel fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelField {
    Fill,
    Stroke,
    StrokeWidth,
    Width,
    Height,
    BorderStyle,
    LayerIndex,
}

impl PanelField {
    pub fn name(self) -> &'static str {
        match self {
            PanelField::Fill => "fill",
            PanelField::Stroke => "stroke",
            PanelField::StrokeWidth => "stroke-width",
            PanelField::Width => "width",
            PanelField::Height => "height",
            PanelField::BorderStyle => "border",
            PanelField::LayerIndex => "layer",
        }
    }
}

impl fmt::Display for PanelField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for PanelField {
    type Err = ParseInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "fill" => Ok(PanelField::Fill),
            "stroke" => Ok(PanelField::Stroke),
            "stroke-width" | "strokewidth" => Ok(PanelField::StrokeWidth),
            "width" => Ok(PanelField::Width),
            "height" => Ok(PanelField::Height),
            "border" | "border-style" | "borderstyle" => Ok(PanelField::BorderStyle),
            "layer" | "layer-index" | "layerindex" => Ok(PanelField::LayerIndex),
            _ => Err(ParseInputError::UnknownField(s.to_string())),
        }
    }
}

/// Errors from turning panel text into a [`PanelInput`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseInputError {
    #[error("unknown panel field: {0}")]
    UnknownField(String),
    #[error(transparent)]
    BorderStyle(#[from] ParseBorderStyleError),
}

/// A change notification from one of the panel's value holders.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelInput {
    Fill(String),
    Stroke(String),
    StrokeWidth(f64),
    Width(f64),
    Height(f64),
    BorderStyle(BorderStyle),
    LayerIndex(f64),
}

impl PanelInput {
    /// Build an input from raw field text. Numbers are coerced, never rejected.
    pub fn parse(field: PanelField, raw: &str) -> Result<Self, ParseInputError> {
        Ok(match field {
            PanelField::Fill => PanelInput::Fill(raw.trim().to_string()),
            PanelField::Stroke => PanelInput::Stroke(raw.trim().to_string()),
            PanelField::StrokeWidth => PanelInput::StrokeWidth(coerce_number(raw)),
            PanelField::Width => PanelInput::Width(coerce_number(raw)),
            PanelField::Height => PanelInput::Height(coerce_number(raw)),
            PanelField::BorderStyle => PanelInput::BorderStyle(raw.parse()?),
            PanelField::LayerIndex => PanelInput::LayerIndex(coerce_number(raw)),
        })
    }

    pub fn field(&self) -> PanelField {
        match self {
            PanelInput::Fill(_) => PanelField::Fill,
            PanelInput::Stroke(_) => PanelField::Stroke,
            PanelInput::StrokeWidth(_) => PanelField::StrokeWidth,
            PanelInput::Width(_) => PanelField::Width,
            PanelInput::Height(_) => PanelField::Height,
            PanelInput::BorderStyle(_) => PanelField::BorderStyle,
            PanelInput::LayerIndex(_) => PanelField::LayerIndex,
        }
    }
}

/// Mediates between the scene's selection and the panel's edit draft.
#[derive(Debug, Clone, Default)]
pub struct PropertySync {
    draft: Option<EditDraft>,
    /// Shape the draft was pulled from.
    shape_id: Option<ShapeId>,
}

impl PropertySync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current draft (None while nothing is selected).
    pub fn draft(&self) -> Option<&EditDraft> {
        self.draft.as_ref()
    }

    /// Shape the current draft belongs to.
    pub fn shape_id(&self) -> Option<ShapeId> {
        self.shape_id
    }

    /// Replace the draft with the values of `shape`, or clear it.
    pub fn pull(&mut self, shape: Option<&ShapeSnapshot>) {
        self.draft = shape.map(EditDraft::from_shape);
        self.shape_id = shape.map(|s| s.id());
    }

    /// React to a scene notification.
    pub fn handle_event(&mut self, event: &SceneEvent) {
        match event {
            SceneEvent::SelectionChanged { shape } => self.pull(shape.as_ref()),
            SceneEvent::ShapeModified { shape } => {
                if self.shape_id == Some(shape.id()) {
                    self.pull(Some(shape));
                }
            }
        }
    }

    /// Record a panel field change. Ignored when nothing is selected.
    pub fn set_input(&mut self, input: PanelInput) -> bool {
        let Some(draft) = self.draft.as_mut() else {
            log::debug!("Ignoring {} input without a selection", input.field());
            return false;
        };
        match input {
            PanelInput::Fill(fill) => draft.fill = fill,
            PanelInput::Stroke(stroke) => draft.stroke = stroke,
            PanelInput::StrokeWidth(width) => draft.stroke_width = width,
            PanelInput::Width(width) => draft.width = width,
            PanelInput::Height(height) => draft.height = height,
            PanelInput::BorderStyle(style) => draft.border_style = style,
            PanelInput::LayerIndex(layer) => draft.layer_index = layer,
        }
        true
    }

    /// Commit the draft onto the selected shape, then pull it back.
    pub fn apply<V: Visuals>(&mut self, scene: &mut Scene<V>) -> bool {
        let Some(draft) = self.draft.as_ref() else {
            return false;
        };
        if scene.selected_id() != self.shape_id {
            log::warn!("Draft does not belong to the selected shape; not applying");
            return false;
        }
        let applied = scene.apply_to_selected(&draft.to_patch());
        if applied {
            self.pull(scene.selected_snapshot().as_ref());
        }
        applied
    }

    /// Move the selected shape one layer forward and refresh the layer field.
    pub fn bring_forward<V: Visuals>(&mut self, scene: &mut Scene<V>) -> bool {
        let Some(id) = scene.selected_id() else {
            return false;
        };
        let moved = scene.bring_forward(id);
        self.refresh_layer_index(scene);
        moved
    }

    /// Move the selected shape one layer backward and refresh the layer field.
    pub fn send_backward<V: Visuals>(&mut self, scene: &mut Scene<V>) -> bool {
        let Some(id) = scene.selected_id() else {
            return false;
        };
        let moved = scene.send_backward(id);
        self.refresh_layer_index(scene);
        moved
    }

    /// Update only the draft's layer index; other fields keep pending edits.
    fn refresh_layer_index<V: Visuals>(&mut self, scene: &Scene<V>) {
        let layer = self
            .shape_id
            .and_then(|id| scene.get_shape(id))
            .map(|s| s.layer_index);
        if let (Some(draft), Some(layer)) = (self.draft.as_mut(), layer) {
            draft.layer_index = layer as f64;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Shape, ShapeKind};
    use crate::visual::NullVisuals;

    fn selected(scene: &mut Scene<NullVisuals>, kind: ShapeKind) -> PropertySync {
        scene.add_shape(kind);
        let mut sync = PropertySync::new();
        for event in scene.take_events() {
            sync.handle_event(&event);
        }
        sync
    }

    #[test]
    fn test_coerce_number() {
        assert!((coerce_number(" 42 ") - 42.0).abs() < f64::EPSILON);
        assert!((coerce_number("1.5") - 1.5).abs() < f64::EPSILON);
        assert!(coerce_number("").is_nan());
        assert!(coerce_number("abc").is_nan());
    }

    #[test]
    fn test_pull_defaults() {
        let rect = EditDraft::from_shape(&Shape::with_defaults(ShapeKind::Rectangle));
        assert_eq!(rect.fill, "#4caf50");
        assert_eq!(rect.stroke, "#000");
        assert!((rect.stroke_width - 3.0).abs() < f64::EPSILON);
        assert_eq!((rect.width, rect.height), (150.0, 100.0));
        assert_eq!(rect.border_style, BorderStyle::Solid);

        let circle = EditDraft::from_shape(&Shape::with_defaults(ShapeKind::Circle));
        assert_eq!(circle.fill, "#2196f3");
        assert!((circle.stroke_width - 4.0).abs() < f64::EPSILON);
        assert_eq!((circle.width, circle.height), (120.0, 120.0));

        let triangle = EditDraft::from_shape(&Shape::with_defaults(ShapeKind::Triangle));
        assert_eq!(triangle.fill, "#ff9800");
        assert_eq!((triangle.width, triangle.height), (160.0, 120.0));
    }

    #[test]
    fn test_pull_fallbacks() {
        let mut shape = Shape::with_defaults(ShapeKind::Rectangle);
        shape.style.fill = None;
        shape.style.stroke = Some(String::new());
        shape.style.stroke_width = f64::NAN;
        let draft = EditDraft::from_shape(&shape);
        assert_eq!(draft.fill, DEFAULT_FILL);
        assert_eq!(draft.stroke, DEFAULT_STROKE);
        assert!((draft.stroke_width - DEFAULT_STROKE_WIDTH).abs() < f64::EPSILON);

        shape.style.stroke_width = 0.0;
        let draft = EditDraft::from_shape(&shape);
        assert!((draft.stroke_width - DEFAULT_STROKE_WIDTH).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_stroke_width_reads_back_as_one() {
        let mut scene = Scene::new(NullVisuals::default());
        let mut sync = selected(&mut scene, ShapeKind::Circle);
        sync.set_input(PanelInput::StrokeWidth(0.0));
        assert!(sync.apply(&mut scene));
        // The shape keeps 0; only the panel shows the fallback
        assert_eq!(scene.selected_snapshot().unwrap().style.stroke_width, 0.0);
        assert!((sync.draft().unwrap().stroke_width - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_pull_rounds() {
        let mut shape = Shape::with_defaults(ShapeKind::Rectangle);
        shape.set_effective_size(100.6, 49.4);
        let draft = EditDraft::from_shape(&shape);
        assert_eq!((draft.width, draft.height), (101.0, 49.0));
    }

    #[test]
    fn test_pull_is_idempotent() {
        let mut scene = Scene::new(NullVisuals::default());
        let mut sync = selected(&mut scene, ShapeKind::Triangle);
        let first = sync.draft().cloned();
        sync.pull(scene.selected_snapshot().as_ref());
        sync.pull(scene.selected_snapshot().as_ref());
        assert_eq!(sync.draft().cloned(), first);
    }

    #[test]
    fn test_pull_none_clears() {
        let mut scene = Scene::new(NullVisuals::default());
        let mut sync = selected(&mut scene, ShapeKind::Rectangle);
        assert!(sync.draft().is_some());
        sync.pull(None);
        assert!(sync.draft().is_none());
        assert!(sync.shape_id().is_none());
        assert!(!sync.set_input(PanelInput::Width(10.0)));
    }

    #[test]
    fn test_rectangle_apply_scales_from_base() {
        let mut scene = Scene::new(NullVisuals::default());
        let mut sync = selected(&mut scene, ShapeKind::Rectangle);
        sync.set_input(PanelInput::Width(300.0));

        assert!(sync.apply(&mut scene));
        assert!(sync.apply(&mut scene));
        let shape = scene.selected_snapshot().unwrap();
        let Geometry::Rectangle(rect) = &shape.geometry else {
            panic!("expected rectangle");
        };
        assert!((rect.scale_x - 2.0).abs() < f64::EPSILON);
        assert!((rect.scale_y - 1.0).abs() < f64::EPSILON);
        assert_eq!(sync.draft().unwrap().width, 300.0);
    }

    #[test]
    fn test_circle_apply_ignores_height() {
        let mut scene = Scene::new(NullVisuals::default());
        let mut sync = selected(&mut scene, ShapeKind::Circle);
        sync.set_input(PanelInput::Width(40.0));
        sync.set_input(PanelInput::Height(500.0));
        sync.apply(&mut scene);

        let shape = scene.selected_snapshot().unwrap();
        let Geometry::Circle(circle) = &shape.geometry else {
            panic!("expected circle");
        };
        assert!((circle.radius - 20.0).abs() < f64::EPSILON);
        let draft = sync.draft().unwrap();
        assert_eq!((draft.width, draft.height), (40.0, 40.0));
    }

    #[test]
    fn test_border_style_apply() {
        let mut scene = Scene::new(NullVisuals::default());
        let mut sync = selected(&mut scene, ShapeKind::Rectangle);
        let cases: [(BorderStyle, &[f64]); 4] = [
            (BorderStyle::Solid, &[]),
            (BorderStyle::Dashed, &[10.0, 6.0]),
            (BorderStyle::Dotted, &[2.0, 4.0]),
            (BorderStyle::None, &[]),
        ];
        for (style, expected) in cases {
            sync.set_input(PanelInput::BorderStyle(style));
            sync.apply(&mut scene);
            let shape = scene.selected_snapshot().unwrap();
            assert_eq!(shape.dash_pattern(), expected);
            assert_eq!(sync.draft().unwrap().border_style, style);
        }
        // None is explicitly empty, Solid is unset
        assert_eq!(scene.selected_snapshot().unwrap().style.stroke_dash, Some(vec![]));
    }

    #[test]
    fn test_nan_width_propagates() {
        let mut scene = Scene::new(NullVisuals::default());
        let mut sync = selected(&mut scene, ShapeKind::Rectangle);
        sync.set_input(PanelInput::parse(PanelField::Width, "").unwrap());
        sync.apply(&mut scene);
        let shape = scene.selected_snapshot().unwrap();
        assert!(shape.effective_size().0.is_nan());
        assert!(sync.draft().unwrap().width.is_nan());
    }

    #[test]
    fn test_layering_refreshes_only_layer_index() {
        let mut scene = Scene::new(NullVisuals::default());
        scene.add_shape(ShapeKind::Rectangle);
        let mut sync = selected(&mut scene, ShapeKind::Circle);
        let circle = scene.selected_id().unwrap();

        sync.set_input(PanelInput::Fill("#abcdef".to_string()));
        assert!(sync.send_backward(&mut scene));
        let draft = sync.draft().unwrap();
        assert_eq!(draft.layer_index, 0.0);
        // Pending edit survives
        assert_eq!(draft.fill, "#abcdef");
        assert_eq!(scene.get_shape(circle).unwrap().style.fill.as_deref(), Some("#2196f3"));

        assert!(!sync.send_backward(&mut scene));
        assert!(sync.bring_forward(&mut scene));
        assert_eq!(sync.draft().unwrap().layer_index, 1.0);
    }

    #[test]
    fn test_modified_event_for_other_shape_ignored() {
        let mut scene = Scene::new(NullVisuals::default());
        let other = scene.add_shape(ShapeKind::Triangle);
        let mut sync = selected(&mut scene, ShapeKind::Rectangle);
        sync.set_input(PanelInput::Width(10.0));

        scene.resize_shape(other, 1.0, 1.0);
        for event in scene.take_events() {
            sync.handle_event(&event);
        }
        assert_eq!(sync.draft().unwrap().width, 10.0);
    }

    #[test]
    fn test_panel_input_parse() {
        assert_eq!(
            PanelInput::parse("stroke_width".parse().unwrap(), "5").unwrap(),
            PanelInput::StrokeWidth(5.0)
        );
        assert_eq!(
            PanelInput::parse(PanelField::BorderStyle, "dotted").unwrap(),
            PanelInput::BorderStyle(BorderStyle::Dotted)
        );
        assert!(PanelInput::parse(PanelField::BorderStyle, "wavy").is_err());
        assert!("opacity".parse::<PanelField>().is_err());
    }
}
