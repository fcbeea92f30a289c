use crate::events::keyboard::{apply_command, command_for_key};
use crate::events::pointer::{normalize_to_window, PointerScript};
use bci_core::{CalibrationEvent, Frame, InputMode, SessionController, TimeSource};
use std::time::Duration;

/// Summary of a finished run, mostly for logging.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunStats {
    pub ticks: u64,
    pub held_ticks: u64,
    pub peak_coherence: f32,
    pub max_progress: f32,
    pub rounds_started: usize,
    pub calibration_completed: bool,
}

pub struct FrameContext<'a, C: TimeSource> {
    pub controller: SessionController,
    pub clock: &'a C,
    pub script: PointerScript,
    /// Key presses as (time, key), sorted by time.
    pub keys: Vec<(f64, String)>,
    pub tracker_available: bool,
    pub stats: RunStats,
    next_key: usize,
    last_log: f64,
}

impl<'a, C: TimeSource> FrameContext<'a, C> {
    pub fn new(controller: SessionController, clock: &'a C, script: PointerScript) -> Self {
        Self {
            controller,
            clock,
            script,
            keys: Vec::new(),
            tracker_available: false,
            stats: RunStats::default(),
            next_key: 0,
            last_log: f64::NEG_INFINITY,
        }
    }

    pub fn with_keys(mut self, mut keys: Vec<(f64, String)>) -> Self {
        keys.sort_by(|a, b| a.0.total_cmp(&b.0));
        self.keys = keys;
        self
    }

    /// Run one tick: feed the scripted pointer, apply due key presses, advance the session.
    pub fn frame(&mut self) -> Frame {
        let now = self.clock.now_sec();
        if let Some(pos) = self.script.sample(now) {
            match self.controller.input_mode() {
                InputMode::Mouse => self.controller.on_mouse_move(pos),
                InputMode::EyeTracker => {
                    let [w, h] = self.controller.config().window;
                    let [nx, ny] = normalize_to_window(pos, w, h);
                    self.controller.on_gaze(nx, ny);
                }
            }
        }
        while let Some((at, key)) = self.keys.get(self.next_key) {
            if *at > now {
                break;
            }
            if let Some(cmd) = command_for_key(key) {
                log::info!("[keys] {:?} at {:.2}s", cmd, now);
                apply_command(&mut self.controller, cmd, now, self.tracker_available);
            }
            self.next_key += 1;
        }

        let frame = self.controller.tick(now);
        self.record(&frame);
        frame
    }

    fn record(&mut self, frame: &Frame) {
        let s = &mut self.stats;
        s.ticks += 1;
        if frame.targets.iter().any(|t| t.held_long_enough) {
            s.held_ticks += 1;
        }
        s.peak_coherence = s.peak_coherence.max(frame.swarm.coherence);
        for t in &frame.targets {
            s.max_progress = s.max_progress.max(t.progress);
        }
        for ev in &frame.events {
            match ev {
                CalibrationEvent::RoundStarted { .. } => s.rounds_started += 1,
                CalibrationEvent::Completed => s.calibration_completed = true,
                _ => {}
            }
            log::info!("[frame] {:?}", ev);
        }
        if frame.now - self.last_log >= 1.0 {
            self.last_log = frame.now;
            log::debug!(
                "[frame] t={:.2} focus={:?} coherence={:.2}",
                frame.now,
                frame.focused(),
                frame.swarm.coherence
            );
        }
    }
}

/// Drive `ctx` until `until_sec`, stepping the clock with `advance`.
/// `advance` either sleeps (wall clock) or bumps a manual clock.
pub fn run_until<C: TimeSource>(
    ctx: &mut FrameContext<'_, C>,
    until_sec: f64,
    mut advance: impl FnMut(Duration),
    tick: Duration,
) -> RunStats {
    while ctx.clock.now_sec() < until_sec {
        ctx.frame();
        advance(tick);
    }
    ctx.stats.clone()
}
