//! PDFium library loader with deployment-specific search paths.

use crate::error::{IoResult, TransientIoError};
use pdfium_render::prelude::*;
use std::path::PathBuf;
use tracing::debug;

pub struct PdfiumLoader;

impl PdfiumLoader {
    /// Load the PDFium library from known search paths or the system library.
    ///
    /// Search order:
    /// 1. `$FIELDMAP_PDFIUM_DIR`
    /// 2. `lib/` in the current working directory (development)
    /// 3. `lib/` next to the executable
    /// 4. System library fallback
    pub fn load() -> IoResult<Pdfium> {
        for dir in Self::search_dirs() {
            let path = Pdfium::pdfium_platform_library_name_at_path(&dir);
            if !path.exists() {
                continue;
            }
            match Pdfium::bind_to_library(&path) {
                Ok(bindings) => {
                    debug!(path = %path.display(), "Bound PDFium");
                    return Ok(Pdfium::new(bindings));
                }
                Err(e) => debug!(path = %path.display(), error = ?e, "PDFium bind failed"),
            }
        }
        Pdfium::bind_to_system_library()
            .map(Pdfium::new)
            .map_err(|e| TransientIoError::PageRender(format!("Failed to load pdfium: {e:?}")))
    }

    fn search_dirs() -> Vec<PathBuf> {
        let mut dirs = Vec::new();

        if let Some(dir) = std::env::var_os("FIELDMAP_PDFIUM_DIR") {
            dirs.push(PathBuf::from(dir));
        }

        if let Ok(cwd) = std::env::current_dir() {
            dirs.push(cwd.join("lib"));
        }

        if let Some(parent) = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(PathBuf::from))
        {
            dirs.push(parent.join("lib"));
        }

        dirs
    }
}
