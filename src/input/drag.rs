//! Pointer move - selection growth, move and resize, idle hover.
//!
//! Called for every pointer event the host sees, so the idle path only
//! reports a change when the hovered target does.
//!
//! Moves apply the per-event delta rounded to whole document units and
//! carry the rounding remainder into the next event, so the sum of the
//! applied steps matches the total pointer travel. Resizes are recomputed
//! from the rectangle captured at pointer down, which keeps them free of
//! accumulated error.

use crate::constants::{CURSOR_CROSSHAIR, CURSOR_DEFAULT};
use crate::editor::EditTarget;
use crate::geometry::{Point, Rect, point};
use crate::hit_test::Handle;
use crate::input::{InputResponse, InputState};
use crate::profile_scope;
use crate::session::EditorSession;
use tracing::warn;

impl EditorSession {
    /// Pointer moved to a screen position.
    pub fn pointer_move(&mut self, screen: Point) -> InputResponse {
        profile_scope!("pointer_move");

        let doc = self.viewport.to_document(screen);
        let min_size = self.editor.min_size();

        match &mut self.input {
            InputState::Idle => self.update_hover(doc),

            InputState::Selecting { current, .. } => {
                *current = doc;
                InputResponse::Redraw
            }

            InputState::DraggingMove {
                target,
                last,
                residual,
                ..
            } => {
                let target = *target;
                let travel = (doc - *last) + *residual;
                let dx = travel.x.round();
                let dy = travel.y.round();
                *last = doc;

                if dx == 0.0 && dy == 0.0 {
                    *residual = travel;
                    return InputResponse::Ignored;
                }

                let before = self.editor.rect_of(target);
                match self.editor.translate(target, dx as i32, dy as i32) {
                    Ok(after) => {
                        // Travel swallowed by the zero clamp is not owed later
                        let mut rest = point(travel.x - dx, travel.y - dy);
                        if let Some(before) = before {
                            if after.x != before.x + dx as i32 {
                                rest.x = 0.0;
                            }
                            if after.y != before.y + dy as i32 {
                                rest.y = 0.0;
                            }
                        }
                        if let InputState::DraggingMove { residual, .. } = &mut self.input {
                            *residual = rest;
                        }
                        self.invalidate();
                        InputResponse::Redraw
                    }
                    Err(e) => {
                        warn!(?target, error = %e, "Move target vanished");
                        InputResponse::Ignored
                    }
                }
            }

            InputState::DraggingResize {
                target,
                handle,
                anchor,
                origin,
                ..
            } => {
                let target: EditTarget = *target;
                let travel = doc - *anchor;
                let resized = resize_rect(
                    origin,
                    *handle,
                    travel.x.round() as i32,
                    travel.y.round() as i32,
                    min_size,
                );
                if self.editor.rect_of(target) == Some(resized) {
                    return InputResponse::Ignored;
                }
                match self.editor.set_rect(target, resized) {
                    Ok(()) => {
                        self.invalidate();
                        InputResponse::Redraw
                    }
                    Err(e) => {
                        warn!(?target, error = %e, "Resize target vanished");
                        InputResponse::Ignored
                    }
                }
            }
        }
    }

    fn update_hover(&mut self, doc: Point) -> InputResponse {
        if self.mode.is_authoring() {
            return InputResponse::Cursor(CURSOR_CROSSHAIR);
        }
        let hit = self.hit_at(doc);
        if hit == self.hover {
            return InputResponse::Ignored;
        }
        self.hover = hit;
        InputResponse::Cursor(hit.cursor().unwrap_or(CURSOR_DEFAULT))
    }
}

/// Move the edges `handle` controls by `(dx, dy)`.
///
/// Moving edges stop at `min_size` from the opposite edge and never go below
/// zero; edges the handle does not control keep their position.
pub(crate) fn resize_rect(origin: &Rect, handle: Handle, dx: i32, dy: i32, min_size: i32) -> Rect {
    let mut left = origin.x;
    let mut top = origin.y;
    let mut right = origin.right();
    let mut bottom = origin.bottom();

    if handle.moves_left() {
        left = (left + dx).min(right - min_size).max(0);
    }
    if handle.moves_right() {
        right = (right + dx).max(left + min_size);
    }
    if handle.moves_top() {
        top = (top + dy).min(bottom - min_size).max(0);
    }
    if handle.moves_bottom() {
        bottom = (bottom + dy).max(top + min_size);
    }

    Rect::new(left, top, right - left, bottom - top)
}
