//! PDF page images through PDFium (feature `pdfium`).
//!
//! - `page_source` - `PdfiumPageSource`, a `PageImageSource` over one PDF
//! - `pdfium_loader` - PDFium library loading logic

mod page_source;
mod pdfium_loader;

pub use page_source::PdfiumPageSource;
pub use pdfium_loader::PdfiumLoader;
