use crate::layout::{Target, TargetId};
use glam::Vec2;

/// Resolve which target the pointer is aiming at.
///
/// Returns `None` inside the neutral zone around `center`. Outside it, the
/// target whose center is nearest the pointer wins; ties keep the first
/// encountered minimum, which is the lowest id for layouts built in id order.
#[inline]
pub fn resolve(
    pointer: Vec2,
    center: Vec2,
    neutral_radius: f32,
    targets: &[Target],
) -> Option<TargetId> {
    if pointer.distance(center) < neutral_radius {
        return None;
    }
    let mut best = None::<(TargetId, f32)>;
    for t in targets {
        let d = pointer.distance(t.center);
        match best {
            Some((_, bd)) if d >= bd => {}
            _ => best = Some((t.id, d)),
        }
    }
    best.map(|(id, _)| id)
}

/// Neutral radius derived from the center circle radius.
#[inline]
pub fn neutral_radius(circle_radius: f32, ratio: f32) -> f32 {
    (circle_radius * ratio).max(0.0)
}
