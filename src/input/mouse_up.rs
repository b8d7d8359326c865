//! Pointer up - finalize gestures, stage new selections.

use crate::error::ValidationError;
use crate::geometry::{Point, Rect};
use crate::input::{AuthoringMode, InputResponse, InputState, Pending};
use crate::profile_scope;
use crate::session::EditorSession;
use tracing::{debug, trace};

impl EditorSession {
    /// Pointer released at a screen position.
    pub fn pointer_up(&mut self, screen: Point) -> InputResponse {
        profile_scope!("pointer_up");

        let doc = self.viewport.to_document(screen);

        match self.input.take() {
            InputState::Idle => InputResponse::Ignored,

            InputState::Selecting { anchor, .. } => {
                let rect = Rect::from_corners(anchor, doc);
                self.finish_selection(rect)
            }

            InputState::DraggingMove {
                target, snapshot, ..
            }
            | InputState::DraggingResize {
                target, snapshot, ..
            } => {
                self.invalidate();
                let changed = self
                    .editor
                    .template()
                    .mapping(target.mapping())
                    .is_some_and(|m| *m != snapshot);
                if changed {
                    debug!(?target, rect = ?self.editor.rect_of(target), "Gesture committed");
                    InputResponse::Committed
                } else {
                    InputResponse::Redraw
                }
            }
        }
    }

    fn finish_selection(&mut self, rect: Rect) -> InputResponse {
        let min_size = self.editor.min_size();
        if !rect.meets_minimum(min_size) {
            trace!(?rect, min_size, "Selection below minimum size, discarded");
            return InputResponse::Redraw;
        }

        let page = self.page;
        match self.mode {
            AuthoringMode::Normal => {
                self.pending = Some(Pending::Mapping { page, rect });
                InputResponse::AwaitingPath { page, rect }
            }

            AuthoringMode::LoopField { mapping } => {
                let seg = self
                    .editor
                    .template()
                    .mapping(mapping)
                    .and_then(|m| m.as_loop())
                    .and_then(|l| l.segment_on_page(page));
                let Some(seg) = seg else {
                    return InputResponse::Rejected(ValidationError::NoSegmentOnPage {
                        mapping,
                        page,
                    });
                };
                if !seg.area.contains_rect(&rect) {
                    debug!(mapping, ?rect, area = ?seg.area, "Loop field outside its loop");
                    return InputResponse::Rejected(ValidationError::OutsideLoopArea);
                }
                let relative = rect.relative_to(&seg.area);
                self.pending = Some(Pending::LoopField {
                    mapping,
                    segment: seg.segment,
                    rect: relative,
                });
                InputResponse::AwaitingLoopFieldPath {
                    mapping,
                    rect: relative,
                }
            }

            AuthoringMode::LoopPage { mapping } => {
                let covered = self
                    .editor
                    .template()
                    .mapping(mapping)
                    .and_then(|m| m.as_loop())
                    .is_some_and(|l| l.segment_on_page(page).is_some());
                if covered {
                    debug!(mapping, page, "Loop already continues on this page");
                    return InputResponse::Rejected(ValidationError::PageAlreadyCovered {
                        mapping,
                        page,
                    });
                }
                self.pending = Some(Pending::LoopPage {
                    mapping,
                    page,
                    rect,
                });
                InputResponse::AwaitingRowCount {
                    mapping,
                    page,
                    rect,
                }
            }
        }
    }
}
