//! Scene registry: shape storage, selection and layering.

use crate::events::{SceneEvent, ShapeSnapshot};
use crate::shapes::{Shape, ShapeId, ShapeKind, round_half_up};
use crate::visual::{LayerDirection, VisualHandle, Visuals};
use kurbo::Point;
use std::collections::HashMap;

/// Largest layer index magnitude accepted from the panel (2^53, the last
/// integer an `f64` holds exactly).
pub const MAX_LAYER_INDEX: i64 = 1 << 53;

/// Selection state. There is no multi-selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Empty,
    Active(ShapeId),
}

impl Selection {
    pub fn id(self) -> Option<ShapeId> {
        match self {
            Selection::Empty => None,
            Selection::Active(id) => Some(id),
        }
    }
}

/// A batch of panel values committed onto the selected shape in one step.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapePatch {
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f64,
    /// Dash pattern to write (None clears it).
    pub stroke_dash: Option<Vec<f64>>,
    /// Requested layer index; rounded to an integer when finite.
    pub layer_index: f64,
    /// Effective width. For circles this is the diameter.
    pub width: f64,
    /// Effective height. Ignored for circles.
    pub height: f64,
}

/// Owns every shape, the paint order, the selection and the drawing surface.
///
/// `z_order` lists shapes back to front and is kept sorted by layer index
/// (stable, so equal layers keep their relative order).
#[derive(Debug)]
pub struct Scene<V: Visuals> {
    shapes: HashMap<ShapeId, Shape>,
    z_order: Vec<ShapeId>,
    handles: HashMap<ShapeId, VisualHandle>,
    selection: Selection,
    events: Vec<SceneEvent>,
    visuals: V,
}

impl<V: Visuals> Scene<V> {
    /// Create an empty scene drawing onto `visuals`.
    pub fn new(visuals: V) -> Self {
        Self {
            shapes: HashMap::new(),
            z_order: Vec::new(),
            handles: HashMap::new(),
            selection: Selection::Empty,
            events: Vec::new(),
            visuals,
        }
    }

    /// Add a shape with the creation defaults for `kind` on top of the layer
    /// order and select it.
    pub fn add_shape(&mut self, kind: ShapeKind) -> ShapeId {
        let mut shape = Shape::with_defaults(kind);
        shape.layer_index = self.next_layer_index();
        let id = shape.id();

        let handle = self.visuals.add_visual(kind, &shape);
        log::debug!("Added {} {} at layer {}", kind, id, shape.layer_index);
        self.handles.insert(id, handle);
        self.z_order.push(id);
        self.shapes.insert(id, shape);

        self.set_selection(Selection::Active(id));
        self.visuals.request_redraw();
        id
    }

    fn next_layer_index(&self) -> i64 {
        self.shapes
            .values()
            .map(|s| s.layer_index)
            .max()
            .map_or(0, |top| {
                top.checked_add(1).unwrap_or_else(|| {
                    log::warn!("Layer index overflow; new shape shares layer {}", top);
                    top
                })
            })
    }

    /// Select a shape. Unknown ids are ignored.
    /// Returns true if the selection was set.
    pub fn select(&mut self, id: ShapeId) -> bool {
        if !self.shapes.contains_key(&id) {
            log::debug!("Ignoring selection of unknown shape {}", id);
            return false;
        }
        self.set_selection(Selection::Active(id));
        true
    }

    /// Clear the selection.
    pub fn clear_selection(&mut self) {
        self.set_selection(Selection::Empty);
    }

    /// Route a click from the surface: select the topmost shape under the
    /// point, or clear the selection when nothing was hit.
    pub fn handle_click(&mut self, point: Point, tolerance: f64) -> Option<ShapeId> {
        match self.shapes_at_point(point, tolerance).first().copied() {
            Some(id) => {
                self.set_selection(Selection::Active(id));
                Some(id)
            }
            None => {
                self.clear_selection();
                None
            }
        }
    }

    fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
        let handle = selection.id().and_then(|id| self.handles.get(&id).copied());
        self.visuals.set_active(handle);
        let shape = self.selected_snapshot();
        log::debug!("Selection changed to {:?}", selection.id());
        self.events.push(SceneEvent::SelectionChanged { shape });
    }

    /// Move a shape one layer forward (towards front).
    /// Returns true if the shape was moved, false if already at front.
    pub fn bring_forward(&mut self, id: ShapeId) -> bool {
        self.step_layer(id, LayerDirection::Forward)
    }

    /// Move a shape one layer backward (towards back).
    /// Returns true if the shape was moved, false if already at back.
    pub fn send_backward(&mut self, id: ShapeId) -> bool {
        self.step_layer(id, LayerDirection::Backward)
    }

    fn step_layer(&mut self, id: ShapeId, direction: LayerDirection) -> bool {
        let Some(pos) = self.z_order.iter().position(|&shape_id| shape_id == id) else {
            return false;
        };
        let other_pos = match direction {
            LayerDirection::Forward if pos + 1 < self.z_order.len() => pos + 1,
            LayerDirection::Backward if pos > 0 => pos - 1,
            _ => return false,
        };
        let other = self.z_order[other_pos];
        self.z_order.swap(pos, other_pos);

        let layer = self.shapes.get(&id).map(|s| s.layer_index);
        let other_layer = self.shapes.get(&other).map(|s| s.layer_index);
        if let (Some(layer), Some(other_layer)) = (layer, other_layer) {
            if let Some(shape) = self.shapes.get_mut(&id) {
                shape.layer_index = other_layer;
            }
            if let Some(shape) = self.shapes.get_mut(&other) {
                shape.layer_index = layer;
            }
        }

        if let Some(&handle) = self.handles.get(&id) {
            self.visuals.reorder(handle, direction);
        }
        self.visuals.request_redraw();
        log::debug!("Moved {} {:?} to position {}", id, direction, other_pos);
        true
    }

    /// Commit a panel patch onto the selected shape.
    ///
    /// Returns false (and changes nothing) when no shape is selected. No event
    /// is queued: the caller re-reads the shape itself.
    pub fn apply_to_selected(&mut self, patch: &ShapePatch) -> bool {
        let Selection::Active(id) = self.selection else {
            return false;
        };
        let Some(shape) = self.shapes.get_mut(&id) else {
            return false;
        };

        shape.style.fill = Some(patch.fill.clone());
        shape.style.stroke = Some(patch.stroke.clone());
        shape.style.stroke_width = patch.stroke_width;
        shape.style.stroke_dash = patch.stroke_dash.clone();
        if patch.stroke_width.is_nan() {
            log::warn!("Stroke width of {} is not a number", id);
        }

        if patch.layer_index.is_finite() {
            let limit = MAX_LAYER_INDEX as f64;
            let layer = round_half_up(patch.layer_index);
            if layer.abs() > limit {
                log::warn!("Layer index {} for {} clamped to ±{}", layer, id, limit);
            }
            shape.layer_index = layer.clamp(-limit, limit) as i64;
        } else {
            log::warn!(
                "Layer index {} for {} is not finite; keeping layer {}",
                patch.layer_index,
                id,
                shape.layer_index
            );
        }

        shape.set_effective_size(patch.width, patch.height);
        let (width, height) = shape.effective_size();
        if width.is_nan() || height.is_nan() {
            log::warn!("Geometry of {} is not a number after apply", id);
        }
        let snapshot = shape.clone();

        if self.sort_z_order() {
            let order: Vec<VisualHandle> = self
                .z_order
                .iter()
                .filter_map(|shape_id| self.handles.get(shape_id).copied())
                .collect();
            self.visuals.restack(&order);
        }
        if let Some(&handle) = self.handles.get(&id) {
            self.visuals.update_visual(handle, &snapshot);
        }
        self.visuals.request_redraw();
        log::debug!("Applied panel values to {}", id);
        true
    }

    /// Re-sort the paint order by layer index. Returns true if it changed.
    fn sort_z_order(&mut self) -> bool {
        let before = self.z_order.clone();
        let shapes = &self.shapes;
        self.z_order
            .sort_by_key(|id| shapes.get(id).map_or(i64::MIN, |s| s.layer_index));
        before != self.z_order
    }

    /// Drag gesture from the surface.
    pub fn move_shape(&mut self, id: ShapeId, dx: f64, dy: f64) -> bool {
        self.modify_shape(id, |shape| shape.translate(dx, dy))
    }

    /// Resize gesture from the surface.
    pub fn resize_shape(&mut self, id: ShapeId, width: f64, height: f64) -> bool {
        self.modify_shape(id, |shape| shape.set_effective_size(width, height))
    }

    fn modify_shape(&mut self, id: ShapeId, f: impl FnOnce(&mut Shape)) -> bool {
        let Some(shape) = self.shapes.get_mut(&id) else {
            return false;
        };
        f(shape);
        let snapshot = shape.clone();
        if let Some(&handle) = self.handles.get(&id) {
            self.visuals.update_visual(handle, &snapshot);
        }
        self.visuals.request_redraw();
        self.events.push(SceneEvent::ShapeModified { shape: snapshot });
        true
    }

    /// Take pending events (drains the queue).
    pub fn take_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn selected_id(&self) -> Option<ShapeId> {
        self.selection.id()
    }

    /// Full attribute set of the selected shape.
    pub fn selected_snapshot(&self) -> Option<ShapeSnapshot> {
        self.selected_id()
            .and_then(|id| self.shapes.get(&id))
            .cloned()
    }

    /// Get a shape by ID.
    pub fn get_shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    /// Visual handle registered for a shape.
    pub fn visual_handle(&self, id: ShapeId) -> Option<VisualHandle> {
        self.handles.get(&id).copied()
    }

    /// Get shapes in paint order (back to front).
    pub fn shapes_ordered(&self) -> impl Iterator<Item = &Shape> {
        self.z_order.iter().filter_map(|id| self.shapes.get(id))
    }

    /// Paint order of shape ids (back to front).
    pub fn z_order(&self) -> &[ShapeId] {
        &self.z_order
    }

    /// Find shapes at a point, front to back.
    pub fn shapes_at_point(&self, point: Point, tolerance: f64) -> Vec<ShapeId> {
        self.z_order
            .iter()
            .rev()
            .filter_map(|&id| {
                self.shapes
                    .get(&id)
                    .filter(|s| s.hit_test(point, tolerance))
                    .map(|_| id)
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn visuals(&self) -> &V {
        &self.visuals
    }

    pub fn visuals_mut(&mut self) -> &mut V {
        &mut self.visuals
    }
}
