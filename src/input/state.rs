//! Input state machine - one explicit state for the active pointer gesture.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Selecting        (pointer down on empty area, or any pointer down
//!                           while authoring loop fields / loop pages)
//! Idle -> DraggingMove     (pointer down on a rectangle interior)
//! Idle -> DraggingResize   (pointer down on a resize handle)
//!
//! Any -> Idle              (pointer up finalizes, cancel reverts)
//! ```
//!
//! The authoring mode is kept separately: it survives gestures and rejected
//! selections, and only `cancel` or an explicit exit leaves it.

use crate::editor::EditTarget;
use crate::error::ValidationError;
use crate::geometry::{Point, Rect};
use crate::hit_test::Handle;
use crate::types::{FieldMapping, Segment};

/// The active pointer gesture. Positions are in document space.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No active gesture
    #[default]
    Idle,

    /// Drawing a new rectangle
    Selecting {
        /// Where the pointer went down
        anchor: Point,
        /// Latest pointer position
        current: Point,
    },

    /// Translating an existing rectangle
    DraggingMove {
        target: EditTarget,
        /// Position of the previous move event; reset on every event
        last: Point,
        /// Sub-unit movement not yet applied because of rounding
        residual: Point,
        /// Mapping as it was when the gesture started
        snapshot: FieldMapping,
    },

    /// Moving one or two edges of an existing rectangle
    DraggingResize {
        target: EditTarget,
        handle: Handle,
        /// Where the pointer went down
        anchor: Point,
        /// Target rectangle when the gesture started
        origin: Rect,
        /// Mapping as it was when the gesture started
        snapshot: FieldMapping,
    },
}

impl InputState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_selecting(&self) -> bool {
        matches!(self, Self::Selecting { .. })
    }

    /// Returns true if a move or resize is in progress
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::DraggingMove { .. } | Self::DraggingResize { .. })
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self, Self::DraggingResize { .. })
    }

    /// Target of the move or resize in progress
    pub fn edit_target(&self) -> Option<EditTarget> {
        match self {
            Self::DraggingMove { target, .. } | Self::DraggingResize { target, .. } => {
                Some(*target)
            }
            _ => None,
        }
    }

    /// In-progress selection, normalized and rounded to document units
    pub fn selection(&self) -> Option<Rect> {
        match self {
            Self::Selecting { anchor, current } => Some(Rect::from_corners(*anchor, *current)),
            _ => None,
        }
    }

    pub fn start_selecting(&mut self, anchor: Point) {
        *self = Self::Selecting {
            anchor,
            current: anchor,
        };
    }

    pub fn set_selection_current(&mut self, p: Point) {
        if let Self::Selecting { current, .. } = self {
            *current = p;
        }
    }

    pub fn start_moving(&mut self, target: EditTarget, at: Point, snapshot: FieldMapping) {
        *self = Self::DraggingMove {
            target,
            last: at,
            residual: Point::ZERO,
            snapshot,
        };
    }

    pub fn start_resizing(
        &mut self,
        target: EditTarget,
        handle: Handle,
        anchor: Point,
        origin: Rect,
        snapshot: FieldMapping,
    ) {
        *self = Self::DraggingResize {
            target,
            handle,
            anchor,
            origin,
            snapshot,
        };
    }

    /// Reset to Idle, returning the previous state
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    pub fn reset(&mut self) {
        *self = Self::Idle;
    }
}

/// Modal loop-authoring sub-state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthoringMode {
    /// Selections create new text or loop mappings
    #[default]
    Normal,
    /// Selections become columns of the given loop
    LoopField { mapping: usize },
    /// Selections become continuations of the given loop
    LoopPage { mapping: usize },
}

impl AuthoringMode {
    pub fn is_authoring(&self) -> bool {
        !matches!(self, Self::Normal)
    }

    pub fn loop_index(&self) -> Option<usize> {
        match self {
            Self::Normal => None,
            Self::LoopField { mapping } | Self::LoopPage { mapping } => Some(*mapping),
        }
    }

    /// Same mode aimed at another loop index.
    pub(crate) fn retarget(self, mapping: usize) -> Self {
        match self {
            Self::Normal => Self::Normal,
            Self::LoopField { .. } => Self::LoopField { mapping },
            Self::LoopPage { .. } => Self::LoopPage { mapping },
        }
    }
}

/// A completed selection waiting for operator input before it is committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pending {
    /// New text or loop mapping; needs a path (and rows for a loop)
    Mapping { page: u32, rect: Rect },
    /// New loop column, relative to `segment`; needs a path
    LoopField {
        mapping: usize,
        segment: Segment,
        rect: Rect,
    },
    /// New loop continuation; needs a row count
    LoopPage { mapping: usize, page: u32, rect: Rect },
}

impl Pending {
    /// Loop the staged selection belongs to
    pub fn loop_index(&self) -> Option<usize> {
        match self {
            Self::Mapping { .. } => None,
            Self::LoopField { mapping, .. } | Self::LoopPage { mapping, .. } => Some(*mapping),
        }
    }

    pub(crate) fn retarget(self, mapping: usize) -> Self {
        match self {
            Self::Mapping { .. } => self,
            Self::LoopField { segment, rect, .. } => Self::LoopField {
                mapping,
                segment,
                rect,
            },
            Self::LoopPage { page, rect, .. } => Self::LoopPage {
                mapping,
                page,
                rect,
            },
        }
    }
}

/// What the host should do after an input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputResponse {
    /// Nothing changed
    Ignored,
    /// Visual state changed; redraw
    Redraw,
    /// Hover changed; redraw and show this cursor
    Cursor(&'static str),
    /// Ask for a path (and kind) for a new mapping
    AwaitingPath { page: u32, rect: Rect },
    /// Ask for a path for a new loop column
    AwaitingLoopFieldPath { mapping: usize, rect: Rect },
    /// Ask for the row count of a new loop continuation
    AwaitingRowCount { mapping: usize, page: u32, rect: Rect },
    /// A gesture finished and the model changed
    Committed,
    /// The gesture was refused; the model is unchanged
    Rejected(ValidationError),
}
