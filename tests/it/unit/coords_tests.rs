//! Coordinate transform tests

use fieldmap::geometry::ScreenRect;
use fieldmap::input::coords::Viewport;
use fieldmap::{Rect, point};

fn hidpi(scale: f32) -> Viewport {
    // 2x backing buffer, surface placed below a toolbar
    Viewport::new(scale, point(0.0, 48.0), (500.0, 700.0), (1000.0, 1400.0)).unwrap()
}

#[test]
fn test_round_trip_grid() {
    for scale in [0.3, 0.75, 1.0, 1.25, 2.5] {
        let vp = hidpi(scale);
        for x in (0..600).step_by(37) {
            for w in [10, 11, 57, 240] {
                let rect = Rect::new(x, x / 2, w, w / 2 + 10);
                assert_eq!(
                    vp.rect_to_document(&vp.rect_to_screen(&rect)),
                    rect,
                    "scale {scale} rect {rect:?}"
                );
            }
        }
    }
}

#[test]
fn test_backing_ratio_is_applied() {
    let vp = hidpi(1.0);
    // One displayed pixel is two backing pixels, i.e. two document units
    let doc = vp.to_document(point(10.0, 58.0));
    assert_eq!(doc, point(20.0, 20.0));
    assert_eq!(vp.delta_to_document(point(1.0, 1.0)), point(2.0, 2.0));
}

#[test]
fn test_selection_rounds_to_document_units() {
    let vp = Viewport::unscaled(1.5).unwrap();
    let screen = ScreenRect::from_corners(point(15.2, 30.1), point(165.4, 60.2));
    assert_eq!(vp.rect_to_document(&screen), Rect::new(10, 20, 100, 20));
}

#[test]
fn test_invalid_viewports_rejected() {
    assert!(Viewport::unscaled(0.0).is_err());
    assert!(Viewport::unscaled(f32::NAN).is_err());
    assert!(Viewport::new(1.0, point(0.0, 0.0), (0.0, 10.0), (10.0, 10.0)).is_err());
}

#[test]
fn test_tolerance_shrinks_when_zoomed_in() {
    let vp = Viewport::unscaled(2.0).unwrap();
    assert_eq!(vp.tolerance_to_document(6.0), 3.0);
}
