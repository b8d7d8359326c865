//! Pointer input handling for the mapping editor.
//!
//! ## Architecture
//!
//! The input system uses an explicit state machine (`InputState`) to track
//! the active gesture, plus a separate `AuthoringMode` for modal loop
//! authoring. Handlers are `impl EditorSession` blocks, one file per event.
//!
//! ## Modules
//!
//! - `coords` - Screen/surface/document conversions
//! - `state` - Input state machine, authoring mode, handler responses
//! - `mouse_down` - Pointer down (selection, move/resize start)
//! - `drag` - Pointer move (selection growth, move, resize, hover)
//! - `mouse_up` - Pointer up (finalize gestures, stage selections)
//! - `transform` - Zoom, surface and page changes

pub mod coords;
mod state;
mod mouse_down;
mod mouse_up;
mod drag;
mod transform;

pub use state::{AuthoringMode, InputResponse, InputState, Pending};
