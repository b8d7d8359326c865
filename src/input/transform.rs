//! Viewport changes - zoom, surface geometry, page switching.

use crate::error::ValidationResult;
use crate::geometry::Point;
use crate::hit_test::HitTarget;
use crate::input::InputResponse;
use crate::session::EditorSession;
use tracing::debug;

impl EditorSession {
    /// Convert a pointer position to document space.
    pub fn screen_to_document(&self, screen: Point) -> Point {
        self.viewport.to_document(screen)
    }

    /// Change the zoom factor. The page image has to be refetched at the new
    /// scale.
    pub fn set_scale(&mut self, scale: f32) -> ValidationResult<InputResponse> {
        if scale == self.viewport.scale() {
            return Ok(InputResponse::Ignored);
        }
        self.viewport.set_scale(scale)?;
        debug!(scale, "Zoom changed");
        Ok(InputResponse::Redraw)
    }

    /// Host moved or resized the drawing surface.
    pub fn set_surface(
        &mut self,
        origin: Point,
        display_size: (f32, f32),
        backing_size: (f32, f32),
    ) -> ValidationResult<InputResponse> {
        self.viewport.set_surface(origin, display_size, backing_size)?;
        Ok(InputResponse::Redraw)
    }

    /// Show another page. An active gesture is cancelled first.
    pub fn set_page(&mut self, page: u32) -> InputResponse {
        if page == self.page {
            return InputResponse::Ignored;
        }
        if !self.input.is_idle() {
            self.cancel();
        }
        self.page = page;
        self.hover = HitTarget::None;
        self.invalidate();
        debug!(page, "Page changed");
        InputResponse::Redraw
    }
}
