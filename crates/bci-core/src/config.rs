use crate::calibration::CalibrationParams;
use crate::constants::*;
use crate::dwell::sanitize_duration;
use crate::layout::LayoutParams;
use crate::progress::ProgressParams;
use crate::swarm::SwarmParams;

#[derive(Clone, Debug)]
pub struct FocusParams {
    /// Neutral zone radius as a fraction of the center circle radius.
    pub neutral_ratio: f32,
    pub dwell_threshold: f64,
    pub return_delay: f64,
}

impl Default for FocusParams {
    fn default() -> Self {
        Self {
            neutral_ratio: NEUTRAL_ZONE_RATIO,
            dwell_threshold: DEFAULT_DWELL_THRESHOLD,
            return_delay: RETURN_DELAY,
        }
    }
}

/// Everything a session needs, passed in at construction instead of living
/// in process-wide state.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub window: [f32; 2],
    pub layout: LayoutParams,
    pub focus: FocusParams,
    pub swarm: SwarmParams,
    pub calibration: CalibrationParams,
    pub progress: ProgressParams,
    /// Seed for calibration sequences.
    pub seed: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            window: [WINDOW_WIDTH, WINDOW_HEIGHT],
            layout: LayoutParams::default(),
            focus: FocusParams::default(),
            swarm: SwarmParams::default(),
            calibration: CalibrationParams::default(),
            progress: ProgressParams::default(),
            seed: DEFAULT_SEED,
        }
    }
}

impl SessionConfig {
    /// Clamp out-of-range values to safe minimums. Never fails.
    pub fn sanitized(mut self) -> Self {
        self.focus.neutral_ratio = if self.focus.neutral_ratio.is_finite() {
            self.focus.neutral_ratio.max(0.0)
        } else {
            NEUTRAL_ZONE_RATIO
        };
        self.focus.dwell_threshold = sanitize_duration(self.focus.dwell_threshold);
        self.focus.return_delay = if self.focus.return_delay.is_finite() {
            self.focus.return_delay.max(0.0)
        } else {
            RETURN_DELAY
        };
        self.layout.target_count = self.layout.target_count.max(1);
        self.swarm = self.swarm.sanitized();
        self.calibration = self.calibration.sanitized();
        self.progress = self.progress.sanitized();
        self
    }

    pub fn with_window(mut self, width: f32, height: f32) -> Self {
        self.window = [width, height];
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
