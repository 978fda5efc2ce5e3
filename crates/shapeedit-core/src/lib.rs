//! shapeedit Core Library
//!
//! Shape model, scene registry and property panel synchronization for the
//! shapeedit 2D editor. Rendering and widgets live outside this crate and are
//! reached through [`Visuals`] and [`PanelInput`].

pub mod editor;
pub mod events;
pub mod props;
pub mod scene;
pub mod shapes;
pub mod visual;

pub use editor::Editor;
pub use events::{SceneEvent, ShapeSnapshot};
pub use props::{EditDraft, PanelField, PanelInput, ParseInputError, PropertySync};
pub use scene::{Scene, Selection, ShapePatch};
pub use shapes::{BorderStyle, Shape, ShapeId, ShapeKind, ShapeStyle};
pub use visual::{LayerDirection, NullVisuals, VisualHandle, Visuals};
