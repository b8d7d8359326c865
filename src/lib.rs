//! Field-mapping editor core.
//!
//! Operators draw rectangles over rendered document pages and bind each one
//! to a data path, either as a single text placement or as a loop whose row
//! template repeats down the page (and continues on later pages).
//!
//! The host supplies pointer events, page images and persistence; this crate
//! owns the model, hit testing, the gesture state machine and the overlay
//! draw list. Start with [`session::EditorSession`].

pub mod config;
pub mod constants;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod host;
pub mod input;
pub mod logging;
pub mod perf;
pub mod render;
pub mod session;
pub mod spatial_index;
pub mod types;

#[cfg(feature = "pdfium")]
pub mod pdf;

pub use config::EditorConfig;
pub use editor::{EditTarget, IndexShift, MappingEditor};
pub use error::{EditorError, TransientIoError, ValidationError};
pub use geometry::{Point, Rect, point};
pub use session::EditorSession;
pub use types::{FieldMapping, LoopField, LoopPage, Segment, Template};
