//! Per-tick output handed to the renderer.
//!
//! These types avoid referencing any UI toolkit. A frontend reads a `Frame`
//! after each tick and draws target outlines, progress bars and dots from it.

use crate::calibration::{CalibrationEvent, CalibrationView};
use crate::layout::{TargetId, TargetShape};
use glam::Vec2;

#[derive(Clone, Debug, PartialEq)]
pub struct TargetView {
    pub id: TargetId,
    pub center: Vec2,
    pub radius: f32,
    pub shape: TargetShape,
    pub focused: bool,
    pub held_long_enough: bool,
    /// Lit by the calibration sequencer.
    pub glow: bool,
    /// Picked by the manual neuro trigger.
    pub neuro: bool,
    /// 0..=100
    pub progress: f32,
    /// Focus highlight fade, 0..=1.
    pub highlight: f32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SwarmView {
    pub center: Vec2,
    pub radius: f32,
    pub positions: Vec<Vec2>,
    pub coherence: f32,
}

/// GPU-ready instance record for one dot.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DotInstance {
    pub pos: [f32; 2],
    pub scale: f32,
    pub glow: f32,
}

impl SwarmView {
    /// Dot instances with a uniform `scale`; glow follows coherence.
    pub fn instances(&self, scale: f32) -> Vec<DotInstance> {
        self.positions
            .iter()
            .map(|p| DotInstance {
                pos: p.to_array(),
                scale,
                glow: self.coherence,
            })
            .collect()
    }
}

/// Raw bytes of an instance slice, ready for a vertex buffer upload.
pub fn instance_bytes(instances: &[DotInstance]) -> &[u8] {
    bytemuck::cast_slice(instances)
}

#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub now: f64,
    pub dt: f32,
    pub pointer: Vec2,
    pub targets: Vec<TargetView>,
    pub swarm: SwarmView,
    pub calibration: Option<CalibrationView>,
    pub events: Vec<CalibrationEvent>,
}

impl Frame {
    pub fn target(&self, id: TargetId) -> Option<&TargetView> {
        self.targets.iter().find(|t| t.id == id)
    }

    pub fn focused(&self) -> Option<TargetId> {
        self.targets.iter().find(|t| t.focused).map(|t| t.id)
    }
}
