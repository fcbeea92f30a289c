//! Calibration sequencing.
//!
//! A session visits every target once per round, in a freshly shuffled order
//! each round. Each visit is a glow phase (the target lights up and, late in
//! the glow, the swarm is pulled toward it) followed by a gap phase with the
//! swarm back home.

use crate::constants::*;
use crate::dwell::sanitize_duration;
use crate::error::{CoreError, CoreResult};
use crate::layout::{TargetId, TargetLayout};
use crate::swarm::SwarmSimulator;
use rand::seq::SliceRandom;
use rand::Rng;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CalibrationPhase {
    Idle,
    Glow,
    Gap,
    Done,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CalibrationEvent {
    Started { rounds: usize },
    /// 1-based round that just began (emitted from round 2 on).
    RoundStarted { round: usize },
    Completed,
    Stopped,
}

pub type CalibrationEvents = SmallVec<[CalibrationEvent; 2]>;

#[derive(Clone, Debug)]
pub struct CalibrationParams {
    pub rounds: usize,
    pub focus_time: f64,
    pub gap_time: f64,
    pub move_trigger_ratio: f64,
}

impl Default for CalibrationParams {
    fn default() -> Self {
        Self {
            rounds: DEFAULT_ROUNDS,
            focus_time: DEFAULT_FOCUS_TIME,
            gap_time: DEFAULT_GAP_TIME,
            move_trigger_ratio: MOVE_TRIGGER_RATIO,
        }
    }
}

impl CalibrationParams {
    pub fn sanitized(mut self) -> Self {
        self.focus_time = sanitize_duration(self.focus_time);
        self.gap_time = if self.gap_time.is_finite() {
            self.gap_time.max(0.0)
        } else {
            0.0
        };
        self.move_trigger_ratio = if self.move_trigger_ratio.is_finite() {
            self.move_trigger_ratio.clamp(0.0, 1.0)
        } else {
            MOVE_TRIGGER_RATIO
        };
        self
    }
}

/// Snapshot for the on-screen status line and timer.
#[derive(Clone, Debug, PartialEq)]
pub struct CalibrationView {
    pub phase: CalibrationPhase,
    pub active_target: Option<TargetId>,
    /// 1-based round in progress (0 while idle).
    pub round: usize,
    pub rounds: usize,
    pub index: usize,
    pub elapsed_session: f64,
    pub done: bool,
}

/// Concatenate `rounds` independent shuffles of `1..=target_count`.
pub fn generate_sequence<R: Rng + ?Sized>(
    rounds: usize,
    target_count: usize,
    rng: &mut R,
) -> Vec<TargetId> {
    let mut sequence = Vec::with_capacity(rounds * target_count);
    let mut round: Vec<TargetId> = (1..=target_count).collect();
    for _ in 0..rounds {
        round.shuffle(rng);
        sequence.extend_from_slice(&round);
    }
    sequence
}

pub struct CalibrationSequencer {
    params: CalibrationParams,
    target_count: usize,
    sequence: Vec<TargetId>,
    index: usize,
    phase: CalibrationPhase,
    phase_start: f64,
    session_start: f64,
    session_end: Option<f64>,
}

impl CalibrationSequencer {
    pub fn new(params: CalibrationParams, target_count: usize) -> Self {
        Self {
            params: params.sanitized(),
            target_count,
            sequence: Vec::new(),
            index: 0,
            phase: CalibrationPhase::Idle,
            phase_start: 0.0,
            session_start: 0.0,
            session_end: None,
        }
    }

    pub fn phase(&self) -> CalibrationPhase {
        self.phase
    }

    pub fn params(&self) -> &CalibrationParams {
        &self.params
    }

    pub fn sequence(&self) -> &[TargetId] {
        &self.sequence
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, CalibrationPhase::Glow | CalibrationPhase::Gap)
    }

    pub fn set_target_count(&mut self, target_count: usize) {
        self.target_count = target_count;
    }

    /// Target currently glowing, if any.
    pub fn active_target(&self) -> Option<TargetId> {
        match self.phase {
            CalibrationPhase::Glow => self.sequence.get(self.index).copied(),
            _ => None,
        }
    }

    /// Begin a session. The sequence is drawn from `rng`.
    pub fn start<R: Rng + ?Sized>(
        &mut self,
        rounds: usize,
        focus_time: f64,
        gap_time: f64,
        now: f64,
        rng: &mut R,
    ) -> CoreResult<CalibrationEvents> {
        if rounds == 0 || self.target_count == 0 {
            return Err(CoreError::EmptySequence);
        }
        self.params = CalibrationParams {
            rounds,
            focus_time,
            gap_time,
            move_trigger_ratio: self.params.move_trigger_ratio,
        }
        .sanitized();
        self.sequence = generate_sequence(rounds, self.target_count, rng);
        self.index = 0;
        self.phase = CalibrationPhase::Glow;
        self.phase_start = now;
        self.session_start = now;
        self.session_end = None;
        log::info!(
            "[calibration] start: {} rounds x {} targets, focus {:.2}s gap {:.2}s",
            rounds,
            self.target_count,
            self.params.focus_time,
            self.params.gap_time
        );
        let mut events = CalibrationEvents::new();
        events.push(CalibrationEvent::Started { rounds });
        Ok(events)
    }

    /// Force back to idle. Returns `true` if a session was actually interrupted.
    pub fn stop(&mut self, swarm: &mut SwarmSimulator) -> bool {
        let was_running = self.is_running();
        self.phase = CalibrationPhase::Idle;
        self.sequence.clear();
        self.index = 0;
        self.session_end = None;
        swarm.return_home();
        if was_running {
            log::info!("[calibration] stopped");
        }
        was_running
    }

    /// Advance the state machine and steer the swarm for this tick.
    pub fn update(
        &mut self,
        now: f64,
        layout: &TargetLayout,
        swarm: &mut SwarmSimulator,
    ) -> CalibrationEvents {
        let mut events = CalibrationEvents::new();
        let elapsed = now - self.phase_start;
        match self.phase {
            CalibrationPhase::Idle | CalibrationPhase::Done => {}
            CalibrationPhase::Glow => {
                let focus_time = self.params.focus_time;
                let trigger = focus_time * self.params.move_trigger_ratio;
                if elapsed >= trigger {
                    if let Some(target) = self.active_target().and_then(|id| layout.get(id)) {
                        let window = focus_time - trigger;
                        let progress = if window > 0.0 {
                            ((elapsed - trigger) / window).clamp(0.0, 1.0)
                        } else {
                            1.0
                        };
                        swarm.pull_toward(target.center, progress as f32);
                    }
                }
                if elapsed >= focus_time {
                    self.phase = CalibrationPhase::Gap;
                    self.phase_start = now;
                    swarm.return_home();
                }
            }
            CalibrationPhase::Gap => {
                if elapsed >= self.params.gap_time {
                    self.index += 1;
                    if self.index >= self.sequence.len() {
                        self.phase = CalibrationPhase::Done;
                        self.session_end = Some(now);
                        swarm.return_home();
                        log::info!(
                            "[calibration] complete after {:.1}s",
                            now - self.session_start
                        );
                        events.push(CalibrationEvent::Completed);
                    } else {
                        self.phase = CalibrationPhase::Glow;
                        self.phase_start = now;
                        if self.index % self.target_count == 0 {
                            let round = self.index / self.target_count + 1;
                            log::info!("[calibration] round {}/{}", round, self.params.rounds);
                            events.push(CalibrationEvent::RoundStarted { round });
                        }
                    }
                }
            }
        }
        events
    }

    /// 1-based round in progress; 0 when idle.
    pub fn round(&self) -> usize {
        match self.phase {
            CalibrationPhase::Idle => 0,
            CalibrationPhase::Done => self.params.rounds,
            _ => self.index / self.target_count.max(1) + 1,
        }
    }

    pub fn elapsed_session(&self, now: f64) -> f64 {
        match self.phase {
            CalibrationPhase::Idle => 0.0,
            CalibrationPhase::Done => self.session_end.unwrap_or(now) - self.session_start,
            _ => now - self.session_start,
        }
    }

    pub fn view(&self, now: f64) -> CalibrationView {
        CalibrationView {
            phase: self.phase,
            active_target: self.active_target(),
            round: self.round(),
            rounds: self.params.rounds,
            index: self.index,
            elapsed_session: self.elapsed_session(now),
            done: self.phase == CalibrationPhase::Done,
        }
    }
}
