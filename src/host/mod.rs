//! Host boundary - what the embedding application provides.
//!
//! ## Modules
//!
//! - `store` - Template persistence (`MappingStore`, JSON file store)
//! - `suggest` - Data path suggestions from example data

mod store;
mod suggest;

pub use store::{JsonFileStore, MappingStore};
pub use suggest::{PathKind, PathSuggester, PathSuggestion, SchemaPathSuggester};

use crate::error::IoResult;
use image::RgbaImage;

/// A rendered document page, ready to draw under the overlay.
#[derive(Debug, Clone)]
pub struct PageImage {
    pub page: u32,
    /// Surface pixels per document unit the image was rendered at
    pub scale: f32,
    pub pixels: RgbaImage,
}

impl PageImage {
    pub fn new(page: u32, scale: f32, pixels: RgbaImage) -> Self {
        Self {
            page,
            scale,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }
}

/// Renders document pages to bitmaps.
pub trait PageImageSource {
    /// Number of pages in the document.
    fn page_count(&self) -> IoResult<u32>;

    /// Render `page` at `scale` surface pixels per document unit.
    fn page_image(&mut self, page: u32, scale: f32) -> IoResult<PageImage>;
}
