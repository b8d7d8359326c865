//! Template persistence.

use crate::error::IoResult;
use crate::types::Template;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads and saves whole templates.
pub trait MappingStore {
    fn load(&mut self) -> IoResult<Template>;
    fn save(&mut self, template: &Template) -> IoResult<()>;
}

/// Stores a template as pretty-printed JSON in a single file.
///
/// Saves go through a temporary file in the same directory and a rename, so
/// a failed save never leaves a truncated file behind.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MappingStore for JsonFileStore {
    fn load(&mut self) -> IoResult<Template> {
        let content = std::fs::read_to_string(&self.path)?;
        let template: Template = serde_json::from_str(&content)?;
        debug!(path = %self.path.display(), mappings = template.len(), "Read template");
        Ok(template)
    }

    fn save(&mut self, template: &Template) -> IoResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)?;

        let contents = serde_json::to_string_pretty(template)?;
        let mut temp = tempfile::NamedTempFile::new_in(&dir)?;
        temp.write_all(contents.as_bytes())?;
        temp.as_file().sync_all()?;
        temp.persist(&self.path).map_err(|e| e.error)?;

        debug!(path = %self.path.display(), bytes = contents.len(), "Wrote template");
        Ok(())
    }
}
