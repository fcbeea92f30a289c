// Focus resolution: neutral zone and nearest-target selection.

use bci_core::focus::{neutral_radius, resolve};
use bci_core::{LayoutKind, LayoutParams, TargetLayout};
use glam::Vec2;

fn two_targets() -> TargetLayout {
    TargetLayout::from_points(
        Vec2::ZERO,
        50.0,
        &[Vec2::new(100.0, 0.0), Vec2::new(-100.0, 0.0)],
        20.0,
    )
}

#[test]
fn pointer_inside_neutral_zone_resolves_to_none() {
    let layout = two_targets();
    let neutral = 40.0;
    for i in 0..36 {
        let angle = (i as f32).to_radians() * 10.0;
        for r in [0.0, 10.0, 25.0, 39.9] {
            let p = Vec2::new(angle.cos(), angle.sin()) * r;
            assert_eq!(
                resolve(p, layout.center, neutral, &layout.targets),
                None,
                "pointer {p:?} is inside the neutral zone"
            );
        }
    }
}

#[test]
fn pointer_at_center_is_never_focused() {
    let layout = two_targets();
    assert_eq!(resolve(Vec2::ZERO, Vec2::ZERO, 1.0, &layout.targets), None);
}

#[test]
fn nearest_target_wins_outside_neutral_zone() {
    let layout = two_targets();
    let hit = resolve(Vec2::new(50.0, 0.0), layout.center, 40.0, &layout.targets);
    assert_eq!(hit, Some(1));
    let hit = resolve(Vec2::new(-45.0, 10.0), layout.center, 40.0, &layout.targets);
    assert_eq!(hit, Some(2));
}

#[test]
fn ties_go_to_the_lowest_id() {
    let layout = two_targets();
    // Equidistant from both targets.
    let hit = resolve(Vec2::new(0.0, 60.0), layout.center, 40.0, &layout.targets);
    assert_eq!(hit, Some(1));
}

#[test]
fn empty_layout_resolves_to_none() {
    assert_eq!(resolve(Vec2::new(500.0, 0.0), Vec2::ZERO, 10.0, &[]), None);
}

#[test]
fn ring_layout_resolves_every_target_at_its_center() {
    let layout = TargetLayout::for_window(&LayoutParams::default(), 1200.0, 800.0).unwrap();
    let neutral = neutral_radius(layout.circle_radius, 0.7);
    for t in &layout.targets {
        assert_eq!(resolve(t.center, layout.center, neutral, &layout.targets), Some(t.id));
    }
}

#[test]
fn box_layout_resolves_every_target_at_its_center() {
    let params = LayoutParams {
        kind: LayoutKind::Boxes,
        ..LayoutParams::default()
    };
    let layout = TargetLayout::for_window(&params, 1200.0, 700.0).unwrap();
    assert_eq!(layout.len(), 8);
    let neutral = neutral_radius(layout.circle_radius, 0.7);
    for t in &layout.targets {
        assert_eq!(resolve(t.center, layout.center, neutral, &layout.targets), Some(t.id));
    }
}
