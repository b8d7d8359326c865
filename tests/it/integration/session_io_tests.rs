//! Session host-boundary tests - load, save, page images, suggestions

use crate::helpers::{MemoryStore, SolidPageSource, TestTemplateBuilder, drag, empty_session, session_with};
use fieldmap::host::{JsonFileStore, PathKind, SchemaPathSuggester};
use fieldmap::render::{DrawCommand, rasterize};
use fieldmap::{EditorError, Rect, TransientIoError, ValidationError, point};
use image::{Rgba, RgbaImage};
use serde_json::json;
use tempfile::TempDir;

#[test]
fn test_save_and_reload_through_file_store() {
    let dir = TempDir::new().unwrap();
    let mut store = JsonFileStore::new(dir.path().join("invoice.template.json"));

    let mut s = empty_session();
    drag(&mut s, (100.0, 100.0), (300.0, 120.0));
    s.commit_text("$.name").unwrap();
    s.save(&mut store).unwrap();

    let mut reloaded = empty_session();
    reloaded.load(&mut store).unwrap();
    assert_eq!(reloaded.template(), s.template());
}

#[test]
fn test_failed_load_keeps_current_template() {
    let template = TestTemplateBuilder::new("invoice.pdf")
        .with_text(0, Rect::new(100, 100, 200, 20), "$.name")
        .build();
    let mut s = session_with(template.clone());
    let mut store = MemoryStore {
        fail: true,
        ..MemoryStore::default()
    };

    assert!(matches!(s.load(&mut store), Err(EditorError::Io(_))));
    assert_eq!(s.template(), &template);
}

#[test]
fn test_invalid_template_is_not_saved() {
    // Loaded data may predate the current minimum size
    let template = TestTemplateBuilder::new("invoice.pdf")
        .with_text(0, Rect::new(100, 100, 4, 4), "$.tiny")
        .build();
    let s = session_with(template);
    let mut store = MemoryStore::default();

    assert!(matches!(
        s.save(&mut store),
        Err(EditorError::Validation(ValidationError::TooSmall { .. }))
    ));
    assert!(store.saved.is_none());
}

#[test]
fn test_load_resets_gesture_state() {
    let mut store = MemoryStore {
        saved: Some(
            TestTemplateBuilder::new("other.pdf")
                .with_loop(0, Rect::new(0, 0, 100, 20), "$.rows", 2)
                .build(),
        ),
        fail: false,
    };
    let mut s = empty_session();
    drag(&mut s, (100.0, 100.0), (300.0, 120.0));
    assert!(s.pending().is_some());

    s.load(&mut store).unwrap();
    assert_eq!(s.pending(), None);
    assert_eq!(s.template().document, "other.pdf");
}

#[test]
fn test_page_image_cached_per_page_and_scale() {
    let mut s = empty_session();
    let mut source = SolidPageSource::new(2);

    s.refresh_page_image(&mut source).unwrap();
    s.refresh_page_image(&mut source).unwrap();
    assert_eq!(source.requests, 1);

    s.set_scale(2.0).unwrap();
    s.refresh_page_image(&mut source).unwrap();
    assert_eq!(source.requests, 2);
    assert_eq!(s.page_image().map(|img| img.width()), Some(120));

    s.set_page(5);
    assert!(matches!(
        s.refresh_page_image(&mut source),
        Err(TransientIoError::MissingPage(5))
    ));
    // Previous image kept, but it belongs to another page and is not drawn
    assert!(s.page_image().is_some());
    assert!(!s.render().iter().any(|c| matches!(c, DrawCommand::Image { .. })));
}

#[test]
fn test_rescaled_view_waits_for_new_image() {
    let mut s = empty_session();
    let mut source = SolidPageSource::new(1);
    s.refresh_page_image(&mut source).unwrap();
    let has_image = |s: &fieldmap::EditorSession| {
        s.render()
            .iter()
            .any(|c| matches!(c, DrawCommand::Image { .. }))
    };
    assert!(has_image(&s));

    s.set_scale(1.5).unwrap();
    assert!(!has_image(&s));

    s.refresh_page_image(&mut source).unwrap();
    assert!(matches!(
        s.render()[0],
        DrawCommand::Image { width: 90, height: 60, .. }
    ));
}

#[test]
fn test_render_and_rasterize_frame() {
    let template = TestTemplateBuilder::new("invoice.pdf")
        .with_text(0, Rect::new(10, 10, 20, 10), "$.name")
        .build();
    let mut s = session_with(template);
    let mut source = SolidPageSource::new(1);
    s.refresh_page_image(&mut source).unwrap();

    // Hover the mapping so its handles are drawn too
    s.pointer_move(point(20.0, 15.0));
    let commands = s.render();
    assert!(matches!(commands[0], DrawCommand::Image { page: 0, width: 60, height: 40 }));
    assert_eq!(
        commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Handle { .. }))
            .count(),
        8
    );

    let backdrop = s.page_image().map(|img| img.pixels.clone());
    let mut frame = RgbaImage::new(60, 40);
    rasterize(&commands, backdrop.as_ref(), &mut frame);
    assert_eq!(*frame.get_pixel(50, 35), Rgba([200, 200, 200, 255]));
    assert_ne!(*frame.get_pixel(20, 15), Rgba([200, 200, 200, 255]));
}

#[test]
fn test_path_suggestions_follow_pending_selection() {
    let template = TestTemplateBuilder::new("invoice.pdf")
        .with_example_data(json!({
            "cliente": "ACME",
            "righe": [ { "sezione": "A", "importo": 10 } ]
        }))
        .with_loop(0, Rect::new(50, 50, 300, 20), "$.righe", 6)
        .build();
    let mut s = session_with(template);
    let suggester = SchemaPathSuggester::default();

    let all = s.suggest_paths(&suggester, "righe");
    assert_eq!(all[0].path, "$.righe[]");
    assert_eq!(all[0].kind, PathKind::List);

    s.begin_loop_field_authoring(0).unwrap();
    drag(&mut s, (60.0, 52.0), (140.0, 68.0));
    let relative: Vec<String> = s
        .suggest_paths(&suggester, "")
        .into_iter()
        .map(|p| p.path)
        .collect();
    assert_eq!(relative, vec!["$.importo", "$.sezione"]);
}
