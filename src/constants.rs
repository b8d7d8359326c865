//! Editor-wide constants.
//!
//! Centralizes geometry limits and interaction tolerances so the hit-tester,
//! the state machine and the renderer agree on the same numbers.

// ============================================================================
// Geometry
// ============================================================================

/// Minimum width/height of any mapping rectangle, in document units
pub const MIN_MAPPING_SIZE: i32 = 10;

/// Row count given to a loop when the host does not supply one
pub const DEFAULT_LOOP_ROWS: u32 = 1;

// ============================================================================
// Input Handling
// ============================================================================

/// Distance in screen pixels within which a handle is considered hit.
/// Independent of zoom: converted to document units through the viewport.
pub const HANDLE_TOLERANCE_PX: f32 = 6.0;

/// Cursor hint for the interior of a rectangle
pub const CURSOR_MOVE: &str = "move";

/// Cursor hint when nothing is under the pointer
pub const CURSOR_DEFAULT: &str = "default";

/// Cursor hint while drawing a new selection
pub const CURSOR_CROSSHAIR: &str = "crosshair";

// ============================================================================
// Overlay Rendering
// ============================================================================

/// Side length of a drawn resize handle in surface pixels
pub const HANDLE_SIZE_PX: f32 = 8.0;

/// Stroke width for mapping outlines in surface pixels
pub const OUTLINE_WIDTH_PX: f32 = 1.5;

/// Dash and gap length for the in-progress selection
pub const SELECTION_DASH_PX: f32 = 4.0;

/// Default text mapping color
pub const DEFAULT_TEXT_COLOR: &str = "#1e88e5";

/// Default loop container color
pub const DEFAULT_LOOP_COLOR: &str = "#43a047";

/// Default loop column color
pub const DEFAULT_LOOP_FIELD_COLOR: &str = "#fb8c00";

/// Default selection color
pub const DEFAULT_SELECTION_COLOR: &str = "#e53935";

/// Default handle color
pub const DEFAULT_HANDLE_COLOR: &str = "#ffffff";

/// Fill opacity for mapping rectangles
pub const FILL_OPACITY: f32 = 0.15;

/// Opacity of implied (not materialized) loop rows
pub const ROW_GUIDE_OPACITY: f32 = 0.35;

/// Upper bound on implied rows drawn per loop segment. Without a page image
/// to stop at, a huge row count would otherwise flood the draw list.
pub const MAX_DRAWN_ROWS: u32 = 500;

// ============================================================================
// Configuration
// ============================================================================

/// Directory name under the platform config dir
pub const CONFIG_DIR_NAME: &str = "fieldmap";

/// Editor configuration file name
pub const CONFIG_FILE_NAME: &str = "editor.json";

/// Default tracing filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "fieldmap=info";
