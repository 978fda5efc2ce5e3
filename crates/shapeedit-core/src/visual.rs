//! Rendering collaborator abstraction.
//!
//! The scene never draws anything itself. It mirrors every structural change
//! onto a [`Visuals`] implementation owned for the scene's lifetime.

use crate::events::ShapeSnapshot;
use crate::shapes::ShapeKind;
use serde::{Deserialize, Serialize};

/// Opaque handle to a shape's visual on the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisualHandle(pub u64);

/// Direction of a single-step layer move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayerDirection {
    /// Towards the front (paints later).
    Forward,
    /// Towards the back (paints earlier).
    Backward,
}

/// The drawing surface as seen by the scene.
pub trait Visuals {
    /// Create a visual for a newly added shape.
    fn add_visual(&mut self, kind: ShapeKind, shape: &ShapeSnapshot) -> VisualHandle;

    /// Mark a visual as the active one (None = no active visual).
    fn set_active(&mut self, handle: Option<VisualHandle>);

    /// Move a visual one step in paint order.
    fn reorder(&mut self, handle: VisualHandle, direction: LayerDirection);

    /// Replace the paint order (back to front).
    fn restack(&mut self, order: &[VisualHandle]);

    /// Refresh cached bounds and attributes after a shape changed.
    fn update_visual(&mut self, handle: VisualHandle, shape: &ShapeSnapshot);

    /// Ask the surface to redraw.
    fn request_redraw(&mut self);
}

/// Surface that ignores every call. Useful when only the model matters.
#[derive(Debug, Default)]
pub struct NullVisuals {
    next_handle: u64,
}

impl Visuals for NullVisuals {
    fn add_visual(&mut self, _kind: ShapeKind, _shape: &ShapeSnapshot) -> VisualHandle {
        self.next_handle += 1;
        VisualHandle(self.next_handle)
    }

    fn set_active(&mut self, _handle: Option<VisualHandle>) {}

    fn reorder(&mut self, _handle: VisualHandle, _direction: LayerDirection) {}

    fn restack(&mut self, _order: &[VisualHandle]) {}

    fn update_visual(&mut self, _handle: VisualHandle, _shape: &ShapeSnapshot) {}

    fn request_redraw(&mut self) {}
}
