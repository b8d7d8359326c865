//! Error types for editor operations
//!
//! Two classes exist and neither is fatal:
//! - `ValidationError`: a rejected edit. Nothing was mutated.
//! - `TransientIoError`: a page image or persistence request failed at the
//!   host boundary. The in-memory template is untouched.

use thiserror::Error;

/// A rejected operation. Always recoverable locally.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Bound expression is empty or whitespace
    #[error("path must not be empty")]
    EmptyPath,

    /// Rectangle below the minimum size in either dimension
    #[error("rectangle {width}x{height} is smaller than the {min}x{min} minimum")]
    TooSmall { width: i32, height: i32, min: i32 },

    /// Loop column not contained in the loop's area on the targeted page
    #[error("loop field must lie inside the loop area")]
    OutsideLoopArea,

    /// Row count missing, not a number, or below one
    #[error("invalid row count: {0}")]
    InvalidRowCount(String),

    #[error("no mapping at index {0}")]
    NoSuchMapping(usize),

    #[error("mapping {0} is not a loop")]
    NotALoop(usize),

    #[error("loop {mapping} has no field at index {field}")]
    NoSuchLoopField { mapping: usize, field: usize },

    #[error("loop {mapping} has no continuation at index {continuation}")]
    NoSuchContinuation { mapping: usize, continuation: usize },

    /// A loop continues on pages it does not already cover
    #[error("loop {mapping} already has a segment on page {page}")]
    PageAlreadyCovered { mapping: usize, page: u32 },

    /// Loop authoring on a page the loop does not reach
    #[error("loop {mapping} has no segment on page {page}")]
    NoSegmentOnPage { mapping: usize, page: u32 },

    #[error("invalid viewport: {0}")]
    InvalidViewport(String),

    /// A commit was requested with no staged selection of the right kind
    #[error("no pending selection to commit")]
    NothingPending,
}

/// Failure at the host boundary (page images, load/save).
#[derive(Error, Debug)]
pub enum TransientIoError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("page render failed: {0}")]
    PageRender(String),

    #[error("page {0} does not exist")]
    MissingPage(u32),
}

/// Session-level error combining both classes.
#[derive(Error, Debug)]
pub enum EditorError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Io(#[from] TransientIoError),
}

/// Result type alias for facade operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Result type alias for host boundary operations
pub type IoResult<T> = Result<T, TransientIoError>;
