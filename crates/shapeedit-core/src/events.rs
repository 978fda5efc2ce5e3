//! Scene notification channel.
//!
//! The scene queues an event for every selection change and every gesture
//! that modifies a shape. Consumers drain the queue with
//! [`Scene::take_events`](crate::scene::Scene::take_events) after each
//! operation, so events are always observed in the order they happened.

use crate::shapes::{Shape, ShapeId};
use serde::{Deserialize, Serialize};

/// Owned copy of a shape's full attribute set, taken when the event fired.
pub type ShapeSnapshot = Shape;

/// Events emitted by the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SceneEvent {
    /// The selected shape changed (None = selection cleared).
    SelectionChanged { shape: Option<ShapeSnapshot> },
    /// A shape was changed by a surface gesture (drag or resize).
    ShapeModified { shape: ShapeSnapshot },
}

impl SceneEvent {
    /// Id of the shape this event carries, if any.
    pub fn shape_id(&self) -> Option<ShapeId> {
        match self {
            SceneEvent::SelectionChanged { shape } => shape.as_ref().map(|s| s.id()),
            SceneEvent::ShapeModified { shape } => Some(shape.id()),
        }
    }

    /// Serialize the event to JSON (for tracing).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
