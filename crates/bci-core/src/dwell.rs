//! Dwell selection: how long a target has been focused, and whether the
//! swarm should still be pulled toward it.
//!
//! Evaluated once per tick with the target resolved for that tick. The grace
//! timer (`lost_focus_at`) runs independently of the three dwell states so a
//! momentary pointer slip keeps the swarm heading to the last held target for
//! `return_delay` seconds before it relaxes home. A target that was never held
//! gets no grace period.

use crate::constants::MIN_TIME_STEP;
use crate::layout::TargetId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DwellPhase {
    Neutral,
    Entering,
    Held,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DwellState {
    pub focused: Option<TargetId>,
    pub focus_start: Option<f64>,
    pub held_long_enough: bool,
    pub lost_focus_at: Option<f64>,
    /// Last held target that lost focus; the grace period pulls toward it.
    /// Cleared when focus leaves a target that was never held.
    pub released: Option<TargetId>,
}

#[derive(Clone, Debug)]
pub struct DwellStateMachine {
    state: DwellState,
    dwell_threshold: f64,
    return_delay: f64,
}

impl DwellStateMachine {
    pub fn new(dwell_threshold: f64, return_delay: f64) -> Self {
        Self {
            state: DwellState::default(),
            dwell_threshold: sanitize_duration(dwell_threshold),
            return_delay: return_delay.max(0.0),
        }
    }

    pub fn state(&self) -> &DwellState {
        &self.state
    }

    pub fn dwell_threshold(&self) -> f64 {
        self.dwell_threshold
    }

    pub fn return_delay(&self) -> f64 {
        self.return_delay
    }

    pub fn set_dwell_threshold(&mut self, seconds: f64) {
        self.dwell_threshold = sanitize_duration(seconds);
    }

    pub fn set_return_delay(&mut self, seconds: f64) {
        self.return_delay = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
    }

    pub fn focused(&self) -> Option<TargetId> {
        self.state.focused
    }

    pub fn held_long_enough(&self) -> bool {
        self.state.held_long_enough
    }

    pub fn phase(&self) -> DwellPhase {
        match (self.state.focused, self.state.held_long_enough) {
            (None, _) => DwellPhase::Neutral,
            (Some(_), false) => DwellPhase::Entering,
            (Some(_), true) => DwellPhase::Held,
        }
    }

    /// Advance with the target resolved this tick. Returns `true` when focus changed.
    pub fn update(&mut self, now: f64, resolved: Option<TargetId>) -> bool {
        let s = &mut self.state;
        if resolved != s.focused {
            log::debug!("[dwell] focus {:?} -> {:?} at {:.3}", s.focused, resolved, now);
            s.released = if s.held_long_enough { s.focused } else { None };
            s.focused = resolved;
            s.focus_start = resolved.map(|_| now);
            s.held_long_enough = false;
            s.lost_focus_at = if resolved.is_none() { Some(now) } else { None };
            return true;
        }
        match (s.focused, s.focus_start) {
            (Some(id), Some(start)) => {
                if now - start >= self.dwell_threshold {
                    if !s.held_long_enough {
                        log::debug!("[dwell] target {} held for {:.2}s", id, now - start);
                    }
                    s.held_long_enough = true;
                    s.lost_focus_at = None;
                }
            }
            (None, _) => {
                if s.lost_focus_at.is_none() {
                    s.lost_focus_at = Some(now);
                }
            }
            (Some(_), None) => {}
        }
        false
    }

    /// Whether the swarm should be pulled toward a target this tick.
    pub fn should_track_target(&self, now: f64) -> bool {
        let s = &self.state;
        if s.held_long_enough && s.focused.is_some() {
            return true;
        }
        match (s.lost_focus_at, s.released) {
            (Some(lost), Some(_)) => now - lost < self.return_delay,
            _ => false,
        }
    }

    /// Target the swarm should head to: the held target, or during the grace
    /// period the one that was just released.
    pub fn tracked_target(&self, now: f64) -> Option<TargetId> {
        if !self.should_track_target(now) {
            return None;
        }
        if self.state.held_long_enough {
            self.state.focused
        } else {
            self.state.released
        }
    }

    pub fn reset(&mut self) {
        self.state = DwellState::default();
    }
}

#[inline]
pub(crate) fn sanitize_duration(seconds: f64) -> f64 {
    if seconds.is_finite() {
        seconds.max(MIN_TIME_STEP)
    } else {
        MIN_TIME_STEP
    }
}
