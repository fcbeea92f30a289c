use crate::constants::*;
use crate::dwell::sanitize_duration;

/// How the focused target's bar fills.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ProgressRate {
    /// Full after exactly one dwell threshold of continuous focus.
    DwellThreshold,
    /// Proportional to swarm coherence; `per_sec` at coherence 1.0.
    Coherence { per_sec: f32 },
}

impl ProgressRate {
    /// Coherence-driven fill at the stock rate.
    pub const fn coherence() -> Self {
        ProgressRate::Coherence {
            per_sec: COHERENCE_FILL_PER_SEC,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ProgressParams {
    pub rate: ProgressRate,
    pub decay_per_sec: f32,
    pub highlight_rise_per_sec: f32,
    pub highlight_fall_per_sec: f32,
}

impl Default for ProgressParams {
    fn default() -> Self {
        Self {
            rate: ProgressRate::DwellThreshold,
            decay_per_sec: PROGRESS_DECAY_PER_SEC,
            highlight_rise_per_sec: HIGHLIGHT_RISE_PER_SEC,
            highlight_fall_per_sec: HIGHLIGHT_FALL_PER_SEC,
        }
    }
}

impl ProgressParams {
    pub fn sanitized(mut self) -> Self {
        if let ProgressRate::Coherence { per_sec } = &mut self.rate {
            *per_sec = non_negative(*per_sec);
        }
        self.decay_per_sec = non_negative(self.decay_per_sec);
        self.highlight_rise_per_sec = non_negative(self.highlight_rise_per_sec);
        self.highlight_fall_per_sec = non_negative(self.highlight_fall_per_sec);
        self
    }
}

#[inline]
fn non_negative(v: f32) -> f32 {
    if v.is_finite() {
        v.max(0.0)
    } else {
        0.0
    }
}

/// Per-target progress bar plus the fade of its focus highlight.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ProgressBar {
    pub progress: f32,
    pub highlight: f32,
}

impl ProgressBar {
    /// Fill while `active`, decay otherwise. Always stays in `0..=100`.
    pub fn update(
        &mut self,
        params: &ProgressParams,
        active: bool,
        coherence: f32,
        dwell_threshold: f64,
        dt: f32,
    ) {
        let dt = non_negative(dt);
        if active {
            let per_sec = match params.rate {
                ProgressRate::DwellThreshold => {
                    PROGRESS_MAX / sanitize_duration(dwell_threshold) as f32
                }
                ProgressRate::Coherence { per_sec } => per_sec * coherence.clamp(0.0, 1.0),
            };
            self.progress = (self.progress + per_sec * dt).min(PROGRESS_MAX);
        } else {
            self.progress = (self.progress - params.decay_per_sec * dt).max(0.0);
        }
    }

    pub fn update_highlight(&mut self, params: &ProgressParams, lit: bool, dt: f32) {
        let dt = non_negative(dt);
        self.highlight = if lit {
            (self.highlight + params.highlight_rise_per_sec * dt).min(1.0)
        } else {
            (self.highlight - params.highlight_fall_per_sec * dt).max(0.0)
        };
    }
}
