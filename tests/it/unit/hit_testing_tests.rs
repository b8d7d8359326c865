//! Hit-testing tests across text mappings, loops and continuations

use crate::helpers::TestTemplateBuilder;
use fieldmap::hit_test::{Handle, HitTarget, HitTester};
use fieldmap::{Rect, Segment, point};

fn invoice() -> fieldmap::Template {
    TestTemplateBuilder::new("invoice.pdf")
        .with_text(0, Rect::new(100, 20, 200, 20), "$.name")
        .with_loop(0, Rect::new(50, 100, 300, 20), "$.righe", 6)
        .with_loop_field("$.sezione", Rect::new(10, 2, 80, 16))
        .with_loop_page(1, Rect::new(50, 40, 300, 20), 13)
        .build()
}

#[test]
fn test_loop_field_wins_over_container() {
    let t = invoice();
    let tester = HitTester::new(&t, 0);
    let hit = tester.hit_test(&t, point(100.0, 110.0), 3.0);
    assert_eq!(
        hit,
        HitTarget::LoopField {
            mapping: 1,
            field: 0,
            segment: Segment::Primary,
            handle: None
        }
    );
}

#[test]
fn test_container_interior_outside_field() {
    let t = invoice();
    let tester = HitTester::new(&t, 0);
    let hit = tester.hit_test(&t, point(250.0, 110.0), 3.0);
    assert_eq!(
        hit,
        HitTarget::Mapping {
            mapping: 1,
            segment: Segment::Primary,
            handle: None
        }
    );
}

#[test]
fn test_implied_rows_are_not_hit_targets() {
    let t = invoice();
    let tester = HitTester::new(&t, 0);
    // Row 2 of the loop, below the stored area
    assert_eq!(tester.hit_test(&t, point(250.0, 150.0), 3.0), HitTarget::None);
}

#[test]
fn test_continuation_segment_on_its_page() {
    let t = invoice();
    let tester = HitTester::new(&t, 1);
    assert_eq!(tester.page(), 1);

    let hit = tester.hit_test(&t, point(250.0, 50.0), 3.0);
    assert_eq!(
        hit,
        HitTarget::Mapping {
            mapping: 1,
            segment: Segment::Continuation(0),
            handle: None
        }
    );
    // Column offsets apply relative to the continuation area
    let hit = tester.hit_test(&t, point(100.0, 50.0), 3.0);
    assert_eq!(
        hit,
        HitTarget::LoopField {
            mapping: 1,
            field: 0,
            segment: Segment::Continuation(0),
            handle: None
        }
    );
    // Page 0 geometry is not on page 1
    assert_eq!(tester.hit_test(&t, point(150.0, 30.0), 3.0), HitTarget::None);
}

#[test]
fn test_handle_tolerance() {
    let t = invoice();
    let tester = HitTester::new(&t, 0);

    let hit = tester.hit_test(&t, point(102.0, 22.0), 3.0);
    assert_eq!(hit.handle(), Some(Handle::NW));
    assert_eq!(hit.cursor(), Some("nwse-resize"));

    let hit = tester.hit_test(&t, point(106.0, 26.0), 3.0);
    assert_eq!(hit.handle(), None);
    assert_eq!(hit.mapping(), Some(0));
}

#[test]
fn test_target_rect_is_absolute() {
    let t = invoice();
    let tester = HitTester::new(&t, 1);
    let hit = tester.hit_test(&t, point(100.0, 50.0), 3.0);
    assert_eq!(hit.rect(&t), Some(Rect::new(60, 42, 80, 16)));
}
