//! Facade validation tests - rejected operations never mutate

use crate::helpers::TestTemplateBuilder;
use fieldmap::types::parse_row_count;
use fieldmap::{MappingEditor, Rect, Segment, ValidationError};

fn invoice_editor() -> MappingEditor {
    MappingEditor::new(
        TestTemplateBuilder::new("invoice.pdf")
            .with_text(0, Rect::new(100, 20, 200, 20), "$.name")
            .with_loop(0, Rect::new(50, 50, 300, 20), "$.righe", 6)
            .build(),
    )
}

#[test]
fn test_rejections_leave_template_unchanged() {
    let mut ed = invoice_editor();
    let before = ed.template().clone();

    assert!(ed.add_text_field(0, Rect::new(0, 0, 10, 9), "$.a").is_err());
    assert!(ed.add_loop(0, Rect::new(0, 0, 50, 50), "", 3).is_err());
    assert!(ed.add_loop_field(0, Segment::Primary, Rect::new(0, 0, 10, 10), "$.a").is_err());
    assert!(ed.add_loop_field(7, Segment::Primary, Rect::new(0, 0, 10, 10), "$.a").is_err());
    assert!(ed.add_loop_field(1, Segment::Continuation(0), Rect::new(0, 0, 10, 10), "$.a").is_err());
    assert!(ed.add_loop_page(1, 1, Rect::new(0, 0, 50, 50), 0).is_err());
    assert!(ed.update_rows(0, Segment::Primary, 3).is_err());
    assert!(ed.update_path(1, "   ").is_err());
    assert!(ed.remove_loop_field(1, 0).is_err());

    assert_eq!(ed.template(), &before);
}

#[test]
fn test_error_kinds_name_the_constraint() {
    let mut ed = invoice_editor();
    assert_eq!(
        ed.add_loop_field(0, Segment::Primary, Rect::new(0, 0, 10, 10), "$.a"),
        Err(ValidationError::NotALoop(0))
    );
    assert_eq!(
        ed.add_loop_field(1, Segment::Continuation(2), Rect::new(0, 0, 10, 10), "$.a"),
        Err(ValidationError::NoSuchContinuation {
            mapping: 1,
            continuation: 2
        })
    );
    assert_eq!(ed.remove_field(9), Err(ValidationError::NoSuchMapping(9)));
}

#[test]
fn test_field_may_touch_loop_edges() {
    let mut ed = invoice_editor();
    // Exactly the loop area, relative
    assert_eq!(
        ed.add_loop_field(1, Segment::Primary, Rect::new(0, 0, 300, 20), "$.all"),
        Ok(0)
    );
    assert_eq!(
        ed.add_loop_field(1, Segment::Primary, Rect::new(1, 0, 300, 20), "$.over"),
        Err(ValidationError::OutsideLoopArea)
    );
}

#[test]
fn test_bring_to_front_reorders_only_on_request() {
    let mut ed = invoice_editor();
    let added = ed.add_text_field(0, Rect::new(0, 0, 20, 20), "$.late").unwrap();
    assert_eq!(added, 2);

    assert_eq!(ed.bring_to_front(0), Ok(2));
    let paths: Vec<&str> = ed.template().mappings().iter().map(|m| m.path()).collect();
    assert_eq!(paths, vec!["$.righe", "$.late", "$.name"]);
}

#[test]
fn test_row_count_input() {
    assert_eq!(parse_row_count(" 13 "), Ok(13));
    assert!(matches!(parse_row_count("0"), Err(ValidationError::InvalidRowCount(_))));
    assert!(matches!(parse_row_count("-2"), Err(ValidationError::InvalidRowCount(_))));
    assert!(matches!(parse_row_count("six"), Err(ValidationError::InvalidRowCount(_))));
    assert!(matches!(parse_row_count(""), Err(ValidationError::InvalidRowCount(_))));
}
