use instant::Instant;
use std::cell::Cell;

/// Source of tick timestamps in seconds. Must not run backwards; the
/// controller treats a regression as zero elapsed time.
pub trait TimeSource {
    fn now_sec(&self) -> f64;
}

/// Wall clock measured from construction.
pub struct InstantClock {
    origin: Instant,
}

impl InstantClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for InstantClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for InstantClock {
    fn now_sec(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Hand-advanced clock for scripted runs and tests.
#[derive(Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(start: f64) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn advance(&self, seconds: f64) -> f64 {
        let t = self.now.get() + seconds.max(0.0);
        self.now.set(t);
        t
    }

    pub fn set(&self, seconds: f64) {
        self.now.set(seconds);
    }
}

impl TimeSource for ManualClock {
    fn now_sec(&self) -> f64 {
        self.now.get()
    }
}
