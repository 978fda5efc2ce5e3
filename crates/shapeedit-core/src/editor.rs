//! Editor facade tying the scene to the property panel.
//!
//! Every operation runs to completion and dispatches the scene's queued
//! events to the [`PropertySync`] before returning, so a selection change is
//! always pulled into the draft before any later apply can run.

use crate::props::{EditDraft, PanelInput, PropertySync};
use crate::scene::Scene;
use crate::shapes::{ShapeId, ShapeKind};
use crate::visual::Visuals;
use kurbo::Point;

/// Hit tolerance for surface clicks.
pub const CLICK_TOLERANCE: f64 = 2.0;

/// The shape editor: a scene plus the panel's property sync.
#[derive(Debug)]
pub struct Editor<V: Visuals> {
    scene: Scene<V>,
    sync: PropertySync,
}

impl<V: Visuals> Editor<V> {
    /// Create an editor drawing onto `visuals`.
    pub fn new(visuals: V) -> Self {
        Self {
            scene: Scene::new(visuals),
            sync: PropertySync::new(),
        }
    }

    pub fn scene(&self) -> &Scene<V> {
        &self.scene
    }

    /// Current edit draft (None while nothing is selected).
    pub fn draft(&self) -> Option<&EditDraft> {
        self.sync.draft()
    }

    /// Deliver queued scene events to the panel.
    fn dispatch(&mut self) {
        for event in self.scene.take_events() {
            if log::log_enabled!(log::Level::Trace) {
                if let Ok(json) = event.to_json() {
                    log::trace!("Scene event: {}", json);
                }
            }
            self.sync.handle_event(&event);
        }
    }

    pub fn add_shape(&mut self, kind: ShapeKind) -> ShapeId {
        let id = self.scene.add_shape(kind);
        self.dispatch();
        id
    }

    pub fn select(&mut self, id: ShapeId) -> bool {
        let selected = self.scene.select(id);
        self.dispatch();
        selected
    }

    pub fn clear_selection(&mut self) {
        self.scene.clear_selection();
        self.dispatch();
    }

    /// Click on the surface at `point`.
    pub fn click(&mut self, point: Point) -> Option<ShapeId> {
        let hit = self.scene.handle_click(point, CLICK_TOLERANCE);
        self.dispatch();
        hit
    }

    /// Panel field change.
    pub fn set_input(&mut self, input: PanelInput) -> bool {
        self.dispatch();
        self.sync.set_input(input)
    }

    /// Commit the draft onto the selected shape.
    pub fn apply(&mut self) -> bool {
        self.dispatch();
        self.sync.apply(&mut self.scene)
    }

    pub fn bring_forward(&mut self) -> bool {
        self.dispatch();
        self.sync.bring_forward(&mut self.scene)
    }

    pub fn send_backward(&mut self) -> bool {
        self.dispatch();
        self.sync.send_backward(&mut self.scene)
    }

    /// Drag the selected shape on the surface.
    pub fn move_selected(&mut self, dx: f64, dy: f64) -> bool {
        let Some(id) = self.scene.selected_id() else {
            return false;
        };
        let moved = self.scene.move_shape(id, dx, dy);
        self.dispatch();
        moved
    }

    /// Resize the selected shape on the surface.
    pub fn resize_selected(&mut self, width: f64, height: f64) -> bool {
        let Some(id) = self.scene.selected_id() else {
            return false;
        };
        let resized = self.scene.resize_shape(id, width, height);
        self.dispatch();
        resized
    }
}
