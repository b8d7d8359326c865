//! Coordinate conversion between pointer, surface and document space.
//!
//! - Screen space: pointer positions as delivered by the host.
//! - Surface space: pixels of the drawing surface's backing buffer. The
//!   surface may be displayed at a different size than its buffer (CSS
//!   scaling, HiDPI), hence the display/backing ratio.
//! - Document space: zoom-independent units the model is stored in.
//!
//! All conversions are pure. Rounding to integers happens only when a
//! rectangle enters the model (`rect_to_document`).

use crate::error::ValidationError;
use crate::geometry::{Point, Rect, ScreenRect, point};

/// Everything needed to convert between the three spaces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Zoom factor the page image was rendered at (surface px per document unit)
    scale: f32,
    /// Top-left of the displayed surface in screen space
    surface_origin: Point,
    /// Displayed size of the surface in screen pixels
    display_size: (f32, f32),
    /// Backing buffer size of the surface in pixels
    backing_size: (f32, f32),
}

impl Viewport {
    pub fn new(
        scale: f32,
        surface_origin: Point,
        display_size: (f32, f32),
        backing_size: (f32, f32),
    ) -> Result<Self, ValidationError> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(ValidationError::InvalidViewport(format!("scale {scale}")));
        }
        let sizes = [display_size.0, display_size.1, backing_size.0, backing_size.1];
        if sizes.iter().any(|v| !(v.is_finite() && *v > 0.0)) {
            return Err(ValidationError::InvalidViewport(format!(
                "display {display_size:?} backing {backing_size:?}"
            )));
        }
        Ok(Self {
            scale,
            surface_origin,
            display_size,
            backing_size,
        })
    }

    /// Surface displayed 1:1 with its buffer, anchored at the screen origin.
    pub fn unscaled(scale: f32) -> Result<Self, ValidationError> {
        Self::new(scale, Point::ZERO, (1.0, 1.0), (1.0, 1.0))
    }

    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: f32) -> Result<(), ValidationError> {
        *self = Self::new(scale, self.surface_origin, self.display_size, self.backing_size)?;
        Ok(())
    }

    /// Host resized or moved the drawing surface.
    pub fn set_surface(
        &mut self,
        surface_origin: Point,
        display_size: (f32, f32),
        backing_size: (f32, f32),
    ) -> Result<(), ValidationError> {
        *self = Self::new(self.scale, surface_origin, display_size, backing_size)?;
        Ok(())
    }

    /// Backing pixels per displayed pixel, per axis.
    #[inline]
    fn ratio(&self) -> (f32, f32) {
        (
            self.backing_size.0 / self.display_size.0,
            self.backing_size.1 / self.display_size.1,
        )
    }

    #[inline]
    pub fn screen_to_surface(&self, p: Point) -> Point {
        let (rx, ry) = self.ratio();
        point(
            (p.x - self.surface_origin.x) * rx,
            (p.y - self.surface_origin.y) * ry,
        )
    }

    #[inline]
    pub fn surface_to_screen(&self, p: Point) -> Point {
        let (rx, ry) = self.ratio();
        point(
            p.x / rx + self.surface_origin.x,
            p.y / ry + self.surface_origin.y,
        )
    }

    #[inline]
    pub fn surface_to_document(&self, p: Point) -> Point {
        point(p.x / self.scale, p.y / self.scale)
    }

    #[inline]
    pub fn document_to_surface(&self, p: Point) -> Point {
        point(p.x * self.scale, p.y * self.scale)
    }

    /// Convert a pointer position to document space (unrounded).
    #[inline]
    pub fn to_document(&self, screen: Point) -> Point {
        self.surface_to_document(self.screen_to_surface(screen))
    }

    /// Convert a document position to a pointer position.
    #[inline]
    pub fn to_screen(&self, doc: Point) -> Point {
        self.surface_to_screen(self.document_to_surface(doc))
    }

    /// Convert a screen-space delta to a document-space delta.
    #[inline]
    pub fn delta_to_document(&self, delta: Point) -> Point {
        let (rx, ry) = self.ratio();
        point(delta.x * rx / self.scale, delta.y * ry / self.scale)
    }

    /// Document rectangle as displayed on screen.
    pub fn rect_to_screen(&self, rect: &Rect) -> ScreenRect {
        let a = self.to_screen(point(rect.x as f32, rect.y as f32));
        let b = self.to_screen(point(rect.right() as f32, rect.bottom() as f32));
        ScreenRect::from_corners(a, b)
    }

    /// Screen rectangle converted and rounded into document units.
    pub fn rect_to_document(&self, rect: &ScreenRect) -> Rect {
        Rect::from_corners(self.to_document(rect.origin), self.to_document(rect.max()))
    }

    /// Document rectangle in surface pixels (what the renderer draws).
    pub fn rect_to_surface(&self, rect: &Rect) -> ScreenRect {
        ScreenRect::new(
            self.document_to_surface(point(rect.x as f32, rect.y as f32)),
            rect.width as f32 * self.scale,
            rect.height as f32 * self.scale,
        )
    }

    /// A fixed on-screen distance expressed in document units.
    pub fn tolerance_to_document(&self, px: f32) -> f32 {
        let (rx, ry) = self.ratio();
        px * rx.max(ry) / self.scale
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scale: 1.0,
            surface_origin: Point::ZERO,
            display_size: (1.0, 1.0),
            backing_size: (1.0, 1.0),
        }
    }
}
