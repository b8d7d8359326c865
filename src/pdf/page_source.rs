//! Page images rendered from a PDF held in memory.

use crate::error::{IoResult, TransientIoError};
use crate::host::{PageImage, PageImageSource};
use crate::pdf::PdfiumLoader;
use crate::profile_scope;
use image::RgbaImage;
use pdfium_render::prelude::*;
use std::path::Path;
use tracing::debug;

/// Renders pages of one PDF. Document units are PDF points, so `scale` is
/// pixels per point.
pub struct PdfiumPageSource {
    pdfium: Pdfium,
    bytes: Vec<u8>,
    page_count: u32,
}

impl PdfiumPageSource {
    pub fn open(path: &Path) -> IoResult<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(bytes)
    }

    pub fn from_bytes(bytes: Vec<u8>) -> IoResult<Self> {
        let pdfium = PdfiumLoader::load()?;
        let page_count = pdfium
            .load_pdf_from_byte_slice(&bytes, None)
            .map(|doc| doc.pages().len() as u32)
            .map_err(render_error)?;
        debug!(page_count, "Opened PDF");
        Ok(Self {
            pdfium,
            bytes,
            page_count,
        })
    }
}

fn render_error(e: PdfiumError) -> TransientIoError {
    TransientIoError::PageRender(format!("{e:?}"))
}

impl PageImageSource for PdfiumPageSource {
    fn page_count(&self) -> IoResult<u32> {
        Ok(self.page_count)
    }

    fn page_image(&mut self, page: u32, scale: f32) -> IoResult<PageImage> {
        profile_scope!("pdf_page_image");

        if page >= self.page_count {
            return Err(TransientIoError::MissingPage(page));
        }
        let index = PdfPageIndex::try_from(page).map_err(|_| TransientIoError::MissingPage(page))?;

        let document = self
            .pdfium
            .load_pdf_from_byte_slice(&self.bytes, None)
            .map_err(render_error)?;
        let pdf_page = document.pages().get(index).map_err(render_error)?;
        let config = PdfRenderConfig::new().scale_page_by_factor(scale);
        let bitmap = pdf_page.render_with_config(&config).map_err(render_error)?;

        let width = bitmap.width() as u32;
        let height = bitmap.height() as u32;
        let pixels = RgbaImage::from_raw(width, height, bitmap.as_rgba_bytes()).ok_or_else(|| {
            TransientIoError::PageRender(format!("bitmap size mismatch for page {page}"))
        })?;
        Ok(PageImage::new(page, scale, pixels))
    }
}
