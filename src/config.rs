//! Editor configuration.
//!
//! Read from `<config dir>/fieldmap/editor.json`. Every field has a default,
//! so a partial file (or none at all) is valid.

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_HANDLE_COLOR, DEFAULT_LOOP_COLOR,
    DEFAULT_LOOP_FIELD_COLOR, DEFAULT_LOOP_ROWS, DEFAULT_SELECTION_COLOR, DEFAULT_TEXT_COLOR,
    HANDLE_SIZE_PX, HANDLE_TOLERANCE_PX, MIN_MAPPING_SIZE,
};
use anyhow::Context as _;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Tunables for interaction and rendering.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Minimum width/height of a mapping in document units
    pub min_size: i32,
    /// Handle hit tolerance in screen pixels
    pub handle_tolerance_px: f32,
    /// Drawn handle size in surface pixels
    pub handle_size_px: f32,
    /// Rows given to a new loop when the host has none
    pub default_rows: u32,
    /// Draw the implied rows of loops
    pub show_row_guides: bool,
    pub theme: OverlayTheme,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            min_size: MIN_MAPPING_SIZE,
            handle_tolerance_px: HANDLE_TOLERANCE_PX,
            handle_size_px: HANDLE_SIZE_PX,
            default_rows: DEFAULT_LOOP_ROWS,
            show_row_guides: true,
            theme: OverlayTheme::default(),
        }
    }
}

/// Overlay colors as `#rrggbb` hex strings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayTheme {
    pub text: String,
    #[serde(rename = "loop")]
    pub loop_container: String,
    pub loop_field: String,
    pub selection: String,
    pub handle: String,
}

impl Default for OverlayTheme {
    fn default() -> Self {
        Self {
            text: DEFAULT_TEXT_COLOR.to_string(),
            loop_container: DEFAULT_LOOP_COLOR.to_string(),
            loop_field: DEFAULT_LOOP_FIELD_COLOR.to_string(),
            selection: DEFAULT_SELECTION_COLOR.to_string(),
            handle: DEFAULT_HANDLE_COLOR.to_string(),
        }
    }
}

impl EditorConfig {
    /// Parse a configuration file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        // A minimum below one would allow degenerate rectangles.
        Ok(Self {
            min_size: config.min_size.max(1),
            ..config
        })
    }

    /// Load from `path` (or the default location); defaults on any failure.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path.map(Path::to_path_buf).or_else(default_config_path) else {
            return Self::default();
        };
        if !path.exists() {
            debug!(path = %path.display(), "No editor config, using defaults");
            return Self::default();
        }
        match Self::load(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!("{e:#}; using default editor config");
                Self::default()
            }
        }
    }
}

/// `<platform config dir>/fieldmap/editor.json`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}
