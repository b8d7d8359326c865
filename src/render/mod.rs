//! Overlay rendering.
//!
//! - `overlay` - Builds the per-frame draw list in surface pixels
//! - `raster` - Composites a draw list onto an RGBA bitmap

mod overlay;
mod raster;

pub use overlay::{
    Color, DrawCommand, Layer, OverlayInput, OverlayPalette, parse_hex_color, render_overlay,
};
pub use raster::rasterize;
