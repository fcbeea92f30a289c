//! Target geometry: where the stimulus targets sit around the center circle.
//!
//! Two arrangements exist. The ring places `N` circular targets at equal
//! angles around the center; the box layout places the eight labelled boxes
//! at fixed offsets scaled with the window. Both recompute from the window
//! size, so a resize is just building a new layout.

use crate::constants::*;
use crate::error::{CoreError, CoreResult};
use glam::Vec2;

/// 1-based target identifier.
pub type TargetId = usize;

/// Marker shape. Only the renderer cares; focus and swarm logic are shape-agnostic.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TargetShape {
    Circle,
    Box { width: f32, height: f32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Target {
    pub id: TargetId,
    pub center: Vec2,
    pub radius: f32,
    pub shape: TargetShape,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LayoutKind {
    Ring,
    Boxes,
}

#[derive(Clone, Debug)]
pub struct LayoutParams {
    pub kind: LayoutKind,
    pub target_count: usize,
    pub target_radius: f32,
    pub panel_height: f32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            kind: LayoutKind::Ring,
            target_count: TARGET_COUNT,
            target_radius: TARGET_RADIUS,
            panel_height: CONTROL_PANEL_HEIGHT,
        }
    }
}

/// Targets plus the center circle they surround.
#[derive(Clone, Debug)]
pub struct TargetLayout {
    pub center: Vec2,
    pub circle_radius: f32,
    pub targets: Vec<Target>,
}

impl TargetLayout {
    /// Build the layout for a window of `width` x `height` pixels.
    pub fn for_window(params: &LayoutParams, width: f32, height: f32) -> CoreResult<Self> {
        if !(width > 0.0 && height > 0.0) || !width.is_finite() || !height.is_finite() {
            return Err(CoreError::InvalidDimensions { width, height });
        }
        Ok(match params.kind {
            LayoutKind::Ring => Self::ring(params, width, height),
            LayoutKind::Boxes => Self::boxes(width, height),
        })
    }

    fn ring(params: &LayoutParams, width: f32, height: f32) -> Self {
        let center = Vec2::new(width * 0.5, height * 0.5);
        let min_dim = width.min(height - params.panel_height).max(1.0);
        let distance = min_dim * TARGET_DISTANCE_RATIO;
        let count = params.target_count.max(1);
        let step = std::f32::consts::TAU / count as f32;
        let targets = (0..count)
            .map(|i| {
                let angle = step * i as f32;
                Target {
                    id: i + 1,
                    center: center + Vec2::new(angle.cos(), angle.sin()) * distance,
                    radius: params.target_radius,
                    shape: TargetShape::Circle,
                }
            })
            .collect();
        Self {
            center,
            circle_radius: min_dim * CENTER_RADIUS_RATIO,
            targets,
        }
    }

    fn boxes(width: f32, height: f32) -> Self {
        let center = Vec2::new(width * 0.5, height * 0.5);
        let scale = Vec2::new(width / BOX_BASE_WIDTH, height / BOX_BASE_HEIGHT);
        let circle_radius = (BOX_CIRCLE_RADIUS * scale.min_element()).max(BOX_MIN_CIRCLE_RADIUS);
        let targets = BOX_OFFSETS
            .iter()
            .enumerate()
            .map(|(i, [dx, dy])| Target {
                id: i + 1,
                center: center + Vec2::new(*dx, *dy) * scale,
                radius: BOX_WIDTH.min(BOX_HEIGHT) * 0.5,
                shape: TargetShape::Box {
                    width: BOX_WIDTH,
                    height: BOX_HEIGHT,
                },
            })
            .collect();
        Self {
            center,
            circle_radius,
            targets,
        }
    }

    /// Layout from explicit target centers, ids assigned in order.
    pub fn from_points(center: Vec2, circle_radius: f32, points: &[Vec2], radius: f32) -> Self {
        let targets = points
            .iter()
            .enumerate()
            .map(|(i, p)| Target {
                id: i + 1,
                center: *p,
                radius,
                shape: TargetShape::Circle,
            })
            .collect();
        Self {
            center,
            circle_radius,
            targets,
        }
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn get(&self, id: TargetId) -> Option<&Target> {
        id.checked_sub(1).and_then(|i| self.targets.get(i))
    }
}
