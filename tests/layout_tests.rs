use bci_core::{CoreError, LayoutKind, LayoutParams, TargetLayout, TargetShape};
use glam::Vec2;

#[test]
fn ring_layout_places_targets_at_equal_angles() {
    let layout = TargetLayout::for_window(&LayoutParams::default(), 1200.0, 800.0).unwrap();
    assert_eq!(layout.len(), 8);
    assert_eq!(layout.center, Vec2::new(600.0, 400.0));
    // min(1200, 800 - 60) = 740
    assert!((layout.circle_radius - 185.0).abs() < 1e-3);
    for t in &layout.targets {
        let d = t.center.distance(layout.center);
        assert!((d - 333.0).abs() < 1e-2, "target {} at distance {d}", t.id);
        assert_eq!(t.shape, TargetShape::Circle);
    }
    // Target 1 sits at 0 degrees, target 3 at 90 degrees (screen y grows downward).
    assert!((layout.get(1).unwrap().center - Vec2::new(933.0, 400.0)).length() < 1e-2);
    assert!((layout.get(3).unwrap().center - Vec2::new(600.0, 733.0)).length() < 1e-2);
}

#[test]
fn ring_layout_honours_target_count() {
    let params = LayoutParams {
        target_count: 5,
        ..LayoutParams::default()
    };
    let layout = TargetLayout::for_window(&params, 1000.0, 1000.0).unwrap();
    assert_eq!(layout.ids().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
}

#[test]
fn box_layout_scales_with_window() {
    let params = LayoutParams {
        kind: LayoutKind::Boxes,
        ..LayoutParams::default()
    };
    let base = TargetLayout::for_window(&params, 1200.0, 700.0).unwrap();
    assert_eq!(base.get(5).unwrap().center, Vec2::new(980.0, 350.0));
    assert_eq!(base.circle_radius, 120.0);

    let small = TargetLayout::for_window(&params, 600.0, 350.0).unwrap();
    assert_eq!(small.get(5).unwrap().center, Vec2::new(490.0, 175.0));
    // Clamped to the minimum circle radius.
    assert_eq!(small.circle_radius, 60.0);
}

#[test]
fn invalid_dimensions_are_rejected() {
    let params = LayoutParams::default();
    for (w, h) in [(0.0, 800.0), (1200.0, -1.0), (f32::NAN, 10.0)] {
        match TargetLayout::for_window(&params, w, h) {
            Err(CoreError::InvalidDimensions { .. }) => {}
            other => panic!("expected InvalidDimensions for {w}x{h}, got {other:?}"),
        }
    }
}

#[test]
fn lookup_by_id_is_one_based() {
    let layout = TargetLayout::for_window(&LayoutParams::default(), 1200.0, 800.0).unwrap();
    assert!(layout.get(0).is_none());
    assert_eq!(layout.get(8).map(|t| t.id), Some(8));
    assert!(layout.get(9).is_none());
}
