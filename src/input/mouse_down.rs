//! Pointer down - selection start, move/resize initiation.
//!
//! Hit testing goes through the page's R-tree, so this stays cheap on pages
//! with many mappings. Enable profiling with `--features profiling`.

use crate::constants::CURSOR_CROSSHAIR;
use crate::editor::EditTarget;
use crate::geometry::Point;
use crate::hit_test::HitTarget;
use crate::input::InputResponse;
use crate::profile_scope;
use crate::session::EditorSession;
use tracing::{debug, trace};

impl EditorSession {
    /// Pointer pressed at a screen position.
    pub fn pointer_down(&mut self, screen: Point) -> InputResponse {
        profile_scope!("pointer_down");

        // A second button while a gesture is active is ignored
        if !self.input.is_idle() {
            return InputResponse::Ignored;
        }

        if self.pending.take().is_some() {
            debug!("Staged selection abandoned by a new gesture");
        }

        let doc = self.viewport.to_document(screen);

        // Authoring modes draw; existing geometry is not grabbed
        if self.mode.is_authoring() {
            self.input.start_selecting(doc);
            self.hover = HitTarget::None;
            return InputResponse::Cursor(CURSOR_CROSSHAIR);
        }

        let hit = self.hit_at(doc);
        self.hover = hit;

        let Some(target) = EditTarget::from_hit(&hit) else {
            trace!(x = doc.x, y = doc.y, "Selection started");
            self.input.start_selecting(doc);
            return InputResponse::Cursor(CURSOR_CROSSHAIR);
        };

        let (Some(snapshot), Some(origin)) = (
            self.editor.snapshot(target.mapping()),
            self.editor.rect_of(target),
        ) else {
            // Stale hit data; rebuild on the next event
            self.invalidate();
            return InputResponse::Ignored;
        };

        let cursor = hit.cursor().unwrap_or(CURSOR_CROSSHAIR);
        match hit.handle() {
            Some(handle) => {
                debug!(?target, handle = handle.tag(), "Resize started");
                self.input
                    .start_resizing(target, handle, doc, origin, snapshot);
            }
            None => {
                debug!(?target, "Move started");
                self.input.start_moving(target, doc, snapshot);
            }
        }
        InputResponse::Cursor(cursor)
    }
}
