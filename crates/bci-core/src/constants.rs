// Shared tuning constants. `SessionConfig::default()` is built from these.

// Window
pub const WINDOW_WIDTH: f32 = 1200.0;
pub const WINDOW_HEIGHT: f32 = 800.0;
pub const CONTROL_PANEL_HEIGHT: f32 = 60.0; // reserved strip above the canvas

// Ring layout (calibration-style stimulus circles)
pub const TARGET_COUNT: usize = 8;
pub const CENTER_RADIUS_RATIO: f32 = 0.25; // of min(width, height - panel)
pub const TARGET_DISTANCE_RATIO: f32 = 0.45; // of min(width, height - panel)
pub const TARGET_RADIUS: f32 = 30.0;

// Box layout (eight labelled boxes around the circle)
pub const BOX_BASE_WIDTH: f32 = 1200.0;
pub const BOX_BASE_HEIGHT: f32 = 700.0;
pub const BOX_CIRCLE_RADIUS: f32 = 120.0;
pub const BOX_MIN_CIRCLE_RADIUS: f32 = 60.0;
pub const BOX_WIDTH: f32 = 130.0;
pub const BOX_HEIGHT: f32 = 90.0;
pub const BOX_OFFSETS: [[f32; 2]; 8] = [
    [-280.0, -240.0],
    [0.0, -240.0],
    [280.0, -240.0],
    [-380.0, 0.0],
    [380.0, 0.0],
    [-280.0, 240.0],
    [0.0, 240.0],
    [280.0, 240.0],
];

// Focus / dwell
pub const NEUTRAL_ZONE_RATIO: f32 = 0.7; // neutral radius as a fraction of the circle radius
pub const DEFAULT_DWELL_THRESHOLD: f64 = 2.0; // seconds
pub const DWELL_THRESHOLD_OPTIONS: [f64; 5] = [1.0, 1.5, 2.0, 2.5, 3.0];
pub const RETURN_DELAY: f64 = 0.3; // seconds the swarm keeps pulling after focus is lost
pub const MIN_TIME_STEP: f64 = 0.001; // floor for any configured duration

// Swarm physics
pub const PARTICLE_COUNT: usize = 19;
pub const SPRING_STRENGTH: f32 = 8.0;
pub const DAMPING: f32 = 0.85; // per tick, not per second
pub const MAX_SPEED: f32 = 300.0; // px per second
pub const BOUNDARY_RATIO: f32 = 0.95;
pub const BOUNDARY_DAMPING: f32 = 0.7;
pub const PUSH_FACTOR: f32 = 0.5;
pub const MIN_DIRECTION_DISTANCE: f32 = 10.0; // px; below this no direction is derived
pub const SETTLE_DISTANCE: f32 = 0.5; // px
pub const SETTLE_DAMPING: f32 = 0.5;
pub const HOME_RATIO: f32 = 0.85; // homes sit inside this fraction of the radius
pub const SNAP_RADIUS_MULTIPLIER: f32 = 2.0; // resize snaps particles further than this many radii
pub const COHERENCE_EPSILON: f32 = 1e-6;
pub const DEFAULT_SEED: u64 = 42;

// Jittered grid home pattern
pub const GRID_SIDE: usize = 7;
pub const GRID_SPAN: f32 = 1.6; // grid width as a multiple of the radius
pub const GRID_JITTER: f32 = 0.2; // fraction of the cell spacing

// EEG 10-20 electrode positions, normalized to the unit circle
pub const ELECTRODE_POSITIONS: [[f32; 2]; 19] = [
    [-0.22, -0.82], // Fp1
    [0.22, -0.82],  // Fp2
    [-0.65, -0.50], // F7
    [-0.35, -0.50], // F3
    [0.0, -0.50],   // Fz
    [0.35, -0.50],  // F4
    [0.65, -0.50],  // F8
    [-0.85, 0.0],   // T3
    [-0.42, 0.0],   // C3
    [0.0, 0.0],     // Cz
    [0.42, 0.0],    // C4
    [0.85, 0.0],    // T4
    [-0.65, 0.50],  // T5
    [-0.35, 0.50],  // P3
    [0.0, 0.50],    // Pz
    [0.35, 0.50],   // P4
    [0.65, 0.50],   // T6
    [-0.22, 0.78],  // O1
    [0.22, 0.78],   // O2
];

// Calibration
pub const DEFAULT_ROUNDS: usize = 5;
pub const ROUNDS_OPTIONS: [usize; 10] = [5, 10, 15, 20, 25, 30, 35, 40, 45, 50];
pub const DEFAULT_FOCUS_TIME: f64 = 3.0;
pub const DEFAULT_GAP_TIME: f64 = 2.0;
pub const MOVE_TRIGGER_RATIO: f64 = 0.83; // swarm starts moving at 83% of the glow

// Progress bars
pub const PROGRESS_MAX: f32 = 100.0;
pub const PROGRESS_DECAY_PER_SEC: f32 = 30.0;
pub const COHERENCE_FILL_PER_SEC: f32 = 60.0; // at coherence 1.0
pub const HIGHLIGHT_RISE_PER_SEC: f32 = 3.0;
pub const HIGHLIGHT_FALL_PER_SEC: f32 = 5.0;

// Tick loop
pub const TICK_INTERVAL_MS: u64 = 16;
