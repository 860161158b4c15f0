mod app;
mod app_state;
mod canvas;
mod dnd;
mod document;
mod drawing;
mod event_handler;
mod history;
mod math;
mod payload;
mod renderer;
mod state;
mod surface;
mod ui;
mod update_logic;
mod vertex;

// Re-export the main public interface
pub use app::run;
pub use dnd::{DragEvent, DropError, Placement, allow_drop, begin_drag, drop_into_canvas};
pub use document::{CANVAS_ID, Document, Element, FILL_SWATCH_ID, STROKE_SWATCH_ID};
pub use drawing::{PlacedShape, ShapeKind, SourceId, SourceIdError, StyleKind};
pub use history::{HistorySink, NullHistory, PlacementHistory};
pub use payload::{DataTransfer, DragPayload, PayloadError};
pub use surface::{MeshSurface, Rgba, Surface2d};
pub use vertex::Vertex;

// Re-export for WASM compatibility
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg_attr(target_arch = "wasm32", wasm_bindgen(start))]
pub async fn start() {
    if let Err(err) = run().await {
        log::error!("fatal: {err:?}");
    }
}
