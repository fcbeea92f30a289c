//! Session controller: owns every piece of core state and runs one tick at a time.
//!
//! Tick order is fixed: pointer sample, focus resolution, dwell update, swarm
//! target, physics, progress. The dwell state computed in a tick picks the
//! swarm target used by that same tick's physics.

use crate::calibration::{CalibrationEvent, CalibrationSequencer};
use crate::config::SessionConfig;
use crate::dwell::DwellStateMachine;
use crate::error::{CoreError, CoreResult};
use crate::focus;
use crate::layout::{TargetId, TargetLayout};
use crate::progress::ProgressBar;
use crate::state::{Frame, SwarmView, TargetView};
use crate::swarm::SwarmSimulator;
use glam::Vec2;
use rand::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Free pointing; the swarm follows dwell selections.
    Testing,
    /// Sequencer-driven; the pointer is ignored.
    Calibration,
    /// Ready for use; behaves like testing.
    Start,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputMode {
    Mouse,
    EyeTracker,
}

pub struct SessionController {
    config: SessionConfig,
    layout: TargetLayout,
    dwell: DwellStateMachine,
    swarm: SwarmSimulator,
    calibration: CalibrationSequencer,
    bars: Vec<ProgressBar>,
    rng: StdRng,
    phase: Phase,
    input_mode: InputMode,
    mouse: Vec2,
    gaze: Vec2,
    neuro: Option<TargetId>,
    last_now: Option<f64>,
    pending_events: Vec<CalibrationEvent>,
}

impl SessionController {
    pub fn new(config: SessionConfig) -> CoreResult<Self> {
        let config = config.sanitized();
        let [width, height] = config.window;
        let layout = TargetLayout::for_window(&config.layout, width, height)?;
        let swarm = SwarmSimulator::new(layout.center, layout.circle_radius, config.swarm.clone());
        let dwell = DwellStateMachine::new(config.focus.dwell_threshold, config.focus.return_delay);
        let calibration = CalibrationSequencer::new(config.calibration.clone(), layout.len());
        log::info!(
            "[session] {}x{} window, {} targets, dwell {:.2}s",
            width,
            height,
            layout.len(),
            dwell.dwell_threshold()
        );
        Ok(Self {
            bars: vec![ProgressBar::default(); layout.len()],
            rng: StdRng::seed_from_u64(config.seed),
            mouse: layout.center,
            gaze: layout.center,
            layout,
            dwell,
            swarm,
            calibration,
            config,
            phase: Phase::Testing,
            input_mode: InputMode::Mouse,
            neuro: None,
            last_now: None,
            pending_events: Vec::new(),
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn layout(&self) -> &TargetLayout {
        &self.layout
    }

    pub fn dwell(&self) -> &DwellStateMachine {
        &self.dwell
    }

    pub fn swarm(&self) -> &SwarmSimulator {
        &self.swarm
    }

    pub fn calibration(&self) -> &CalibrationSequencer {
        &self.calibration
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    pub fn neuro_target(&self) -> Option<TargetId> {
        self.neuro
    }

    pub fn progress(&self, id: TargetId) -> Option<f32> {
        id.checked_sub(1)
            .and_then(|i| self.bars.get(i))
            .map(|b| b.progress)
    }

    pub fn neutral_radius(&self) -> f32 {
        focus::neutral_radius(self.layout.circle_radius, self.config.focus.neutral_ratio)
    }

    // ---------------- Input ----------------

    pub fn on_mouse_move(&mut self, pos: Vec2) {
        self.mouse = pos;
    }

    /// Gaze sample in normalized window coordinates (0..=1 on both axes).
    pub fn on_gaze(&mut self, norm_x: f32, norm_y: f32) {
        let [w, h] = self.config.window;
        self.gaze = Vec2::new(norm_x * w, norm_y * h);
    }

    /// Position used by the next tick, per the current input mode.
    pub fn current_pointer(&self) -> Vec2 {
        match self.input_mode {
            InputMode::Mouse => self.mouse,
            InputMode::EyeTracker => self.gaze,
        }
    }

    /// Switch input source. Eye tracking is refused when the tracker is not available.
    pub fn set_input_mode(&mut self, mode: InputMode, tracker_available: bool) -> CoreResult<()> {
        if mode == InputMode::EyeTracker && !tracker_available {
            log::warn!("[input] eye tracker unavailable, staying on {:?}", self.input_mode);
            return Err(CoreError::EyeTrackerUnavailable);
        }
        if mode != self.input_mode {
            log::info!("[input] mode {:?} -> {:?}", self.input_mode, mode);
        }
        self.input_mode = mode;
        Ok(())
    }

    /// Manual stand-in for a neural selection: mark whatever the pointer aims at.
    pub fn neuro_trigger(&mut self) -> Option<TargetId> {
        self.neuro = focus::resolve(
            self.current_pointer(),
            self.layout.center,
            self.neutral_radius(),
            &self.layout.targets,
        );
        log::info!("[neuro] trigger -> {:?}", self.neuro);
        self.neuro
    }

    // ---------------- Commands ----------------

    pub fn set_dwell_threshold(&mut self, seconds: f64) {
        self.dwell.set_dwell_threshold(seconds);
        self.config.focus.dwell_threshold = self.dwell.dwell_threshold();
        log::info!("[dwell] threshold {:.2}s", self.dwell.dwell_threshold());
    }

    pub fn reseed(&mut self, seed: u64) {
        self.config.seed = seed;
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Switch phase. Any running calibration is stopped and all derived
    /// state is reset before the next tick.
    pub fn set_phase(&mut self, phase: Phase) {
        self.stop_calibration();
        self.dwell.reset();
        self.neuro = None;
        self.swarm.return_home();
        if phase != self.phase {
            log::info!("[session] phase {:?} -> {:?}", self.phase, phase);
        }
        self.phase = phase;
    }

    pub fn start_calibration(
        &mut self,
        rounds: usize,
        focus_time: f64,
        gap_time: f64,
        now: f64,
    ) -> CoreResult<()> {
        if self.phase != Phase::Calibration {
            log::warn!("[calibration] start refused in {:?} phase", self.phase);
            return Err(CoreError::WrongPhase {
                expected: Phase::Calibration,
                actual: self.phase,
            });
        }
        let events = self
            .calibration
            .start(rounds, focus_time, gap_time, now, &mut self.rng)?;
        self.config.calibration = self.calibration.params().clone();
        self.swarm.return_home();
        self.pending_events.extend(events);
        Ok(())
    }

    /// Stop calibration. Safe to call any number of times.
    pub fn stop_calibration(&mut self) {
        if self.calibration.stop(&mut self.swarm) {
            self.pending_events.push(CalibrationEvent::Stopped);
        }
    }

    /// Rebuild the layout for a new window size and recenter the swarm.
    pub fn resize(&mut self, width: f32, height: f32) -> CoreResult<()> {
        let layout = TargetLayout::for_window(&self.config.layout, width, height)?;
        self.swarm.recenter(layout.center, layout.circle_radius);
        if layout.len() != self.bars.len() {
            self.bars.resize(layout.len(), ProgressBar::default());
            self.calibration.set_target_count(layout.len());
        }
        self.layout = layout;
        self.config.window = [width, height];
        log::info!("[session] resize {}x{}", width, height);
        Ok(())
    }

    // ---------------- Tick ----------------

    /// Advance one tick using the pointer of the current input mode.
    pub fn tick(&mut self, now: f64) -> Frame {
        let pointer = self.current_pointer();
        self.tick_with_pointer(pointer, now)
    }

    /// Advance one tick with an explicit pointer sample.
    pub fn tick_with_pointer(&mut self, pointer: Vec2, now: f64) -> Frame {
        let now = match self.last_now {
            Some(last) if now < last || !now.is_finite() => last,
            _ => now,
        };
        let dt = self.last_now.map_or(0.0, |last| (now - last) as f32);
        self.last_now = Some(now);

        let mut events = std::mem::take(&mut self.pending_events);
        let resolved = focus::resolve(
            pointer,
            self.layout.center,
            self.neutral_radius(),
            &self.layout.targets,
        );

        match self.phase {
            Phase::Calibration => {
                events.extend(self.calibration.update(now, &self.layout, &mut self.swarm));
            }
            Phase::Testing | Phase::Start => {
                self.dwell.update(now, resolved);
                match self
                    .dwell
                    .tracked_target(now)
                    .and_then(|id| self.layout.get(id))
                {
                    Some(target) => self.swarm.set_target(target.center, true),
                    None => self.swarm.return_home(),
                }
            }
        }

        let coherence = self.swarm.tick(dt);

        let glowing = self.calibration.active_target();
        let (active, fill_threshold) = match self.phase {
            Phase::Calibration => (glowing, self.calibration.params().focus_time),
            Phase::Testing | Phase::Start => (self.dwell.focused(), self.dwell.dwell_threshold()),
        };
        let progress_params = &self.config.progress;
        for (bar, target) in self.bars.iter_mut().zip(&self.layout.targets) {
            let is_active = active == Some(target.id);
            bar.update(progress_params, is_active, coherence, fill_threshold, dt);
            bar.update_highlight(progress_params, is_active || self.neuro == Some(target.id), dt);
        }

        self.frame(now, dt, pointer, coherence, events)
    }

    fn frame(
        &self,
        now: f64,
        dt: f32,
        pointer: Vec2,
        coherence: f32,
        events: Vec<CalibrationEvent>,
    ) -> Frame {
        let focused = self.dwell.focused();
        let held = self.dwell.held_long_enough();
        let glowing = self.calibration.active_target();
        let targets = self
            .layout
            .targets
            .iter()
            .zip(&self.bars)
            .map(|(t, bar)| TargetView {
                id: t.id,
                center: t.center,
                radius: t.radius,
                shape: t.shape,
                focused: focused == Some(t.id),
                held_long_enough: held && focused == Some(t.id),
                glow: glowing == Some(t.id),
                neuro: self.neuro == Some(t.id),
                progress: bar.progress,
                highlight: bar.highlight,
            })
            .collect();
        Frame {
            now,
            dt,
            pointer,
            targets,
            swarm: SwarmView {
                center: self.swarm.center(),
                radius: self.swarm.radius(),
                positions: self.swarm.positions().collect(),
                coherence,
            },
            calibration: (self.phase == Phase::Calibration).then(|| self.calibration.view(now)),
            events,
        }
    }
}
