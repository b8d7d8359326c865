//! Software compositing of a draw list onto an RGBA bitmap.
//!
//! For hosts without a vector canvas, and for tests. Fills and strokes are
//! alpha-blended; labels are skipped.

use crate::geometry::ScreenRect;
use crate::profile_scope;
use crate::render::{Color, DrawCommand};
use image::{Pixel, RgbaImage, imageops};

/// Paint `commands` in order onto `target`. `backdrop` is drawn for the
/// `Image` command.
pub fn rasterize(commands: &[DrawCommand], backdrop: Option<&RgbaImage>, target: &mut RgbaImage) {
    profile_scope!("rasterize");

    for command in commands {
        match command {
            DrawCommand::Image { .. } => {
                if let Some(backdrop) = backdrop {
                    imageops::replace(target, backdrop, 0, 0);
                }
            }
            DrawCommand::Rect {
                rect,
                fill,
                stroke,
                stroke_width,
                dash,
                ..
            } => {
                if let Some(fill) = fill {
                    fill_rect(target, rect, *fill);
                }
                stroke_rect(target, rect, *stroke, *stroke_width, *dash);
            }
            DrawCommand::Handle {
                rect, fill, stroke, ..
            } => {
                fill_rect(target, rect, *fill);
                stroke_rect(target, rect, *stroke, 1.0, None);
            }
            DrawCommand::Label { .. } => {}
        }
    }
}

/// Pixel span `[start, end)` covered by `[from, from + len)`, clipped to `limit`.
fn span(from: f32, len: f32, limit: u32) -> (u32, u32) {
    let start = from.round().max(0.0) as u32;
    let end = ((from + len).round().max(0.0) as u32).min(limit);
    (start.min(end), end)
}

fn blend(target: &mut RgbaImage, x: u32, y: u32, color: Color) {
    if x < target.width() && y < target.height() {
        target.get_pixel_mut(x, y).blend(&color);
    }
}

fn fill_rect(target: &mut RgbaImage, rect: &ScreenRect, color: Color) {
    let (x0, x1) = span(rect.origin.x, rect.width, target.width());
    let (y0, y1) = span(rect.origin.y, rect.height, target.height());
    for y in y0..y1 {
        for x in x0..x1 {
            blend(target, x, y, color);
        }
    }
}

/// Stroke drawn inside the rectangle's bounds.
fn stroke_rect(
    target: &mut RgbaImage,
    rect: &ScreenRect,
    color: Color,
    width: f32,
    dash: Option<f32>,
) {
    let (x0, x1) = span(rect.origin.x, rect.width, target.width());
    let (y0, y1) = span(rect.origin.y, rect.height, target.height());
    if x0 >= x1 || y0 >= y1 {
        return;
    }
    let band = (width.ceil().max(1.0) as u32).min((x1 - x0).min(y1 - y0));
    let dash = dash.map(|d| d.max(1.0));
    let on = |along: u32| dash.is_none_or(|d| ((along as f32 / d) as u32) % 2 == 0);

    for y in y0..y1 {
        let edge_row = y < y0 + band || y >= y1 - band;
        for x in x0..x1 {
            let edge_col = x < x0 + band || x >= x1 - band;
            if edge_row && on(x - x0) {
                blend(target, x, y, color);
            } else if !edge_row && edge_col && on(y - y0) {
                blend(target, x, y, color);
            }
        }
    }
}
