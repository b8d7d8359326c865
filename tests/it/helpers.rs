//! Test helpers and builders for reducing boilerplate in tests.
//!
//! This module provides:
//! - `TestTemplateBuilder` - Builder pattern for templates with mappings
//! - `session_with` / `drag` - Session construction and gesture drivers
//! - `MemoryStore` / `SolidPageSource` - In-memory host boundaries

use fieldmap::error::{IoResult, TransientIoError};
use fieldmap::host::{MappingStore, PageImage, PageImageSource};
use fieldmap::input::InputResponse;
use fieldmap::{
    EditorConfig, EditorSession, FieldMapping, LoopField, LoopPage, Rect, Template, point,
};
use image::{Rgba, RgbaImage};
use serde_json::Value;

// ============================================================================
// TestTemplateBuilder
// ============================================================================

/// Builder for templates used across tests.
///
/// # Example
/// ```ignore
/// let template = TestTemplateBuilder::new("invoice.pdf")
///     .with_text(0, Rect::new(100, 100, 200, 20), "$.name")
///     .with_loop(0, Rect::new(50, 50, 300, 20), "$.righe", 6)
///     .with_loop_field("$.sezione", Rect::new(10, 2, 80, 16))
///     .build();
/// ```
pub struct TestTemplateBuilder {
    document: String,
    example_data: Value,
    mappings: Vec<FieldMapping>,
}

impl TestTemplateBuilder {
    pub fn new(document: &str) -> Self {
        Self {
            document: document.to_string(),
            example_data: Value::Null,
            mappings: Vec::new(),
        }
    }

    pub fn with_example_data(mut self, data: Value) -> Self {
        self.example_data = data;
        self
    }

    pub fn with_text(mut self, page: u32, area: Rect, path: &str) -> Self {
        self.mappings.push(FieldMapping::text(page, area, path));
        self
    }

    pub fn with_loop(mut self, page: u32, area: Rect, path: &str, rows: u32) -> Self {
        self.mappings
            .push(FieldMapping::looped(page, area, path, rows));
        self
    }

    /// Add a column to the most recently added loop.
    pub fn with_loop_field(mut self, path: &str, relative: Rect) -> Self {
        if let Some(l) = self.mappings.iter_mut().rev().find_map(FieldMapping::as_loop_mut) {
            l.fields.push(LoopField::new(path, relative));
        }
        self
    }

    /// Continue the most recently added loop on another page.
    pub fn with_loop_page(mut self, page: u32, area: Rect, rows: u32) -> Self {
        if let Some(l) = self.mappings.iter_mut().rev().find_map(FieldMapping::as_loop_mut) {
            l.continuations.push(LoopPage { page, area, rows });
        }
        self
    }

    pub fn build(self) -> Template {
        let mut template = Template::new(self.document).with_example_data(self.example_data);
        for mapping in self.mappings {
            template.push_mapping(mapping);
        }
        template
    }
}

// ============================================================================
// Session helpers
// ============================================================================

/// Session at scale 1 with the surface at the screen origin, so screen and
/// document coordinates coincide.
pub fn session_with(template: Template) -> EditorSession {
    EditorSession::new(template, EditorConfig::default())
}

pub fn empty_session() -> EditorSession {
    session_with(Template::new("invoice.pdf"))
}

/// Press, move once, release.
pub fn drag(session: &mut EditorSession, from: (f32, f32), to: (f32, f32)) -> InputResponse {
    session.pointer_down(point(from.0, from.1));
    session.pointer_move(point(to.0, to.1));
    session.pointer_up(point(to.0, to.1))
}

/// Assert the template holds exactly `expected` mappings.
pub fn assert_mapping_count(session: &EditorSession, expected: usize) {
    assert_eq!(
        session.template().len(),
        expected,
        "Expected {} mappings, found {}",
        expected,
        session.template().len()
    );
}

// ============================================================================
// Host boundary doubles
// ============================================================================

/// Store that keeps the last saved template in memory.
#[derive(Default)]
pub struct MemoryStore {
    pub saved: Option<Template>,
    pub fail: bool,
}

impl MappingStore for MemoryStore {
    fn load(&mut self) -> IoResult<Template> {
        if self.fail {
            return Err(TransientIoError::Io(std::io::Error::other("store offline")));
        }
        self.saved
            .clone()
            .ok_or_else(|| TransientIoError::Io(std::io::Error::other("nothing saved")))
    }

    fn save(&mut self, template: &Template) -> IoResult<()> {
        if self.fail {
            return Err(TransientIoError::Io(std::io::Error::other("store offline")));
        }
        self.saved = Some(template.clone());
        Ok(())
    }
}

/// Page source producing flat grey pages of `page_size * scale` pixels.
pub struct SolidPageSource {
    pub pages: u32,
    pub page_size: (f32, f32),
    pub requests: usize,
}

impl SolidPageSource {
    pub fn new(pages: u32) -> Self {
        Self {
            pages,
            page_size: (60.0, 40.0),
            requests: 0,
        }
    }
}

impl PageImageSource for SolidPageSource {
    fn page_count(&self) -> IoResult<u32> {
        Ok(self.pages)
    }

    fn page_image(&mut self, page: u32, scale: f32) -> IoResult<PageImage> {
        self.requests += 1;
        if page >= self.pages {
            return Err(TransientIoError::MissingPage(page));
        }
        let width = (self.page_size.0 * scale).round() as u32;
        let height = (self.page_size.1 * scale).round() as u32;
        let pixels = RgbaImage::from_pixel(width, height, Rgba([200, 200, 200, 255]));
        Ok(PageImage::new(page, scale, pixels))
    }
}
