//! Overlay draw list - page image, mappings, loop rows, handles, selection.
//!
//! ## Performance Notes
//!
//! Built every frame. Only mappings on the active page are visited and the
//! list is a flat `Vec` the host can paint in order.
//!
//! Enable profiling with `cargo build --features profiling` to see timing.

use crate::config::{EditorConfig, OverlayTheme};
use crate::constants::{
    DEFAULT_HANDLE_COLOR, DEFAULT_LOOP_COLOR, DEFAULT_LOOP_FIELD_COLOR, DEFAULT_SELECTION_COLOR,
    DEFAULT_TEXT_COLOR, FILL_OPACITY, MAX_DRAWN_ROWS, OUTLINE_WIDTH_PX, ROW_GUIDE_OPACITY,
    SELECTION_DASH_PX,
};
use crate::geometry::{Point, Rect, ScreenRect, point};
use crate::hit_test::{Handle, HitTarget};
use crate::host::PageImage;
use crate::input::coords::Viewport;
use crate::profile_scope;
use crate::types::{FieldMapping, LoopMapping, SegmentView, Template};
use image::Rgba;

pub type Color = Rgba<u8>;

/// What a drawn rectangle represents, in paint order within a mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    TextArea,
    LoopArea,
    /// Outline of an implied loop row
    RowGuide,
    LoopField,
    /// Copy of a loop column on an implied row
    GhostField,
    Selection,
}

/// One drawing instruction. Coordinates are surface pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// The page image, drawn at the surface origin at its native size
    Image { page: u32, width: u32, height: u32 },
    Rect {
        layer: Layer,
        rect: ScreenRect,
        fill: Option<Color>,
        stroke: Color,
        stroke_width: f32,
        /// Dash length; solid when `None`
        dash: Option<f32>,
    },
    /// Bound path, drawn at the top-left of its rectangle
    Label { at: Point, text: String, color: Color },
    Handle {
        handle: Handle,
        rect: ScreenRect,
        fill: Color,
        stroke: Color,
    },
}

/// Everything one frame depends on.
pub struct OverlayInput<'a> {
    pub page_image: Option<&'a PageImage>,
    pub page: u32,
    pub template: &'a Template,
    pub viewport: &'a Viewport,
    /// In-progress selection in document units
    pub selection: Option<Rect>,
    pub hover: HitTarget,
    pub config: &'a EditorConfig,
}

/// Theme colors resolved once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayPalette {
    pub text: Color,
    pub loop_container: Color,
    pub loop_field: Color,
    pub selection: Color,
    pub handle: Color,
}

impl OverlayPalette {
    /// Resolve a theme, falling back to the default for unparsable entries.
    pub fn from_theme(theme: &OverlayTheme) -> Self {
        let resolve = |hex: &str, fallback: &str| {
            parse_hex_color(hex)
                .or_else(|| parse_hex_color(fallback))
                .unwrap_or(Rgba([0, 0, 0, 255]))
        };
        Self {
            text: resolve(&theme.text, DEFAULT_TEXT_COLOR),
            loop_container: resolve(&theme.loop_container, DEFAULT_LOOP_COLOR),
            loop_field: resolve(&theme.loop_field, DEFAULT_LOOP_FIELD_COLOR),
            selection: resolve(&theme.selection, DEFAULT_SELECTION_COLOR),
            handle: resolve(&theme.handle, DEFAULT_HANDLE_COLOR),
        }
    }
}

/// Parse a hex color string like "#1e88e5" (or "#1e88e5cc" with alpha).
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.trim().trim_start_matches('#');
    if hex.len() != 6 && hex.len() != 8 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    let alpha = if hex.len() == 8 { channel(6)? } else { 255 };
    Some(Rgba([channel(0)?, channel(2)?, channel(4)?, alpha]))
}

fn with_opacity(color: Color, opacity: f32) -> Color {
    let Rgba([r, g, b, a]) = color;
    Rgba([r, g, b, (a as f32 * opacity.clamp(0.0, 1.0)).round() as u8])
}

/// Build the draw list for one frame.
pub fn render_overlay(input: &OverlayInput<'_>) -> Vec<DrawCommand> {
    profile_scope!("render_overlay");

    let palette = OverlayPalette::from_theme(&input.config.theme);
    let mut commands = Vec::new();

    if let Some(image) = current_image(input) {
        commands.push(DrawCommand::Image {
            page: image.page,
            width: image.width(),
            height: image.height(),
        });
    }

    for mapping in input.template.mappings() {
        match mapping {
            FieldMapping::Text(text) if text.page == input.page => {
                push_area(
                    &mut commands,
                    input.viewport,
                    Layer::TextArea,
                    &text.area,
                    palette.text,
                    &text.path,
                );
            }
            FieldMapping::Text(_) => {}
            FieldMapping::Loop(l) => {
                for seg in l.segments().filter(|s| s.page == input.page) {
                    push_loop_segment(&mut commands, input, &palette, l, &seg);
                }
            }
        }
    }

    if let Some(rect) = input.hover.rect(input.template) {
        push_handles(&mut commands, input, &palette, &rect);
    }

    if let Some(selection) = input.selection {
        commands.push(DrawCommand::Rect {
            layer: Layer::Selection,
            rect: input.viewport.rect_to_surface(&selection),
            fill: None,
            stroke: palette.selection,
            stroke_width: OUTLINE_WIDTH_PX,
            dash: Some(SELECTION_DASH_PX),
        });
    }

    tracing::trace!(page = input.page, commands = commands.len(), "Overlay built");
    commands
}

/// The page image, if it was rendered for the active page at the current
/// scale. A stale bitmap is never drawn.
fn current_image<'a>(input: &OverlayInput<'a>) -> Option<&'a PageImage> {
    input
        .page_image
        .filter(|img| img.page == input.page && img.scale == input.viewport.scale())
}

/// Rows of a segment worth drawing: those starting above the bottom of the
/// page image, capped at `MAX_DRAWN_ROWS`.
fn drawn_rows(input: &OverlayInput<'_>, seg: &SegmentView) -> u32 {
    let rows = seg.rows.min(MAX_DRAWN_ROWS);
    let Some(image) = current_image(input) else {
        return rows;
    };
    let page_bottom = image.height() as f32 / image.scale;
    let fitting = ((page_bottom - seg.area.y as f32) / seg.area.height as f32).ceil();
    // Degenerate heights give NaN or negative counts; keep the stored row
    rows.min(fitting.max(1.0) as u32)
}

fn push_area(
    commands: &mut Vec<DrawCommand>,
    viewport: &Viewport,
    layer: Layer,
    rect: &Rect,
    color: Color,
    label: &str,
) {
    let surface = viewport.rect_to_surface(rect);
    commands.push(DrawCommand::Rect {
        layer,
        rect: surface,
        fill: Some(with_opacity(color, FILL_OPACITY)),
        stroke: color,
        stroke_width: OUTLINE_WIDTH_PX,
        dash: None,
    });
    commands.push(DrawCommand::Label {
        at: surface.origin,
        text: label.to_string(),
        color,
    });
}

fn push_loop_segment(
    commands: &mut Vec<DrawCommand>,
    input: &OverlayInput<'_>,
    palette: &OverlayPalette,
    l: &LoopMapping,
    seg: &SegmentView,
) {
    let viewport = input.viewport;
    let guides = input.config.show_row_guides;
    let rows = drawn_rows(input, seg);
    let faint = |c: Color| with_opacity(c, ROW_GUIDE_OPACITY);

    push_area(
        commands,
        viewport,
        Layer::LoopArea,
        &seg.area,
        palette.loop_container,
        &l.path,
    );

    if guides {
        for row in 1..rows {
            if let Some(row_area) = l.row_area(seg.segment, row) {
                commands.push(DrawCommand::Rect {
                    layer: Layer::RowGuide,
                    rect: viewport.rect_to_surface(&row_area),
                    fill: None,
                    stroke: faint(palette.loop_container),
                    stroke_width: OUTLINE_WIDTH_PX,
                    dash: None,
                });
            }
        }
    }

    for (i, field) in l.fields.iter().enumerate() {
        if let Some(rect) = l.field_rect(i, seg.segment, 0) {
            push_area(
                commands,
                viewport,
                Layer::LoopField,
                &rect,
                palette.loop_field,
                &field.path,
            );
        }
        if !guides {
            continue;
        }
        for row in 1..rows {
            if let Some(ghost) = l.field_rect(i, seg.segment, row) {
                commands.push(DrawCommand::Rect {
                    layer: Layer::GhostField,
                    rect: viewport.rect_to_surface(&ghost),
                    fill: Some(with_opacity(palette.loop_field, FILL_OPACITY * ROW_GUIDE_OPACITY)),
                    stroke: faint(palette.loop_field),
                    stroke_width: OUTLINE_WIDTH_PX,
                    dash: None,
                });
            }
        }
    }
}

fn push_handles(
    commands: &mut Vec<DrawCommand>,
    input: &OverlayInput<'_>,
    palette: &OverlayPalette,
    rect: &Rect,
) {
    let size = input.config.handle_size_px;
    for handle in Handle::ALL {
        let center = input.viewport.document_to_surface(handle.anchor(rect));
        commands.push(DrawCommand::Handle {
            handle,
            rect: ScreenRect::new(
                point(center.x - size / 2.0, center.y - size / 2.0),
                size,
                size,
            ),
            fill: palette.handle,
            stroke: palette.selection,
        });
    }
}
