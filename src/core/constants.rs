// Shared layout/detector tuning constants used by the web frontend.

// Cake surface (percent of the cake element)
pub const CANDLE_COUNT: usize = 67;
pub const CENTER_X_PCT: f64 = 50.0;
pub const CENTER_Y_PCT: f64 = 28.0;
pub const SQUASH: f64 = 0.45; // vertical squash of the elliptical top
pub const RING_OUTER_PCT: f64 = 46.0;
pub const RING_INNER_PCT: f64 = 8.0;

// Candle footprint (px)
pub const CANDLE_PX: f64 = 10.0;
pub const GAP_RATIO: f64 = 0.022; // gap as a share of surface width
pub const GAP_MIN_PX: f64 = 8.0;
pub const GAP_MAX_PX: f64 = 12.0;

// Ring packing
pub const RING_STEP_SLACK: f64 = 1.05;
pub const INNER_RING_DENSITY: f64 = 0.92;
pub const MIN_RING_FILL: usize = 4;

// Candle appearance, cycled by placement index
pub const CANDLE_PALETTE: [&str; 10] = [
    "#7B020B", "#2E86AB", "#82CAFF", "#A0E39A", "#FF9ECD", "#FFD166", "#6C63FF", "#FF6F61",
    "#FFA07A", "#7F00FF",
];
pub const CANDLE_HEIGHT_BASE_PX: f64 = 26.0;
pub const CANDLE_HEIGHT_STEP_PX: f64 = 2.0;
pub const CANDLE_HEIGHT_BUCKETS: usize = 4;
pub const FLICKER_BASE_SEC: f64 = 0.85;
pub const FLICKER_STEP_SEC: f64 = 0.08;
pub const FLICKER_BUCKETS: usize = 5;

// Blow detection
pub const METER_TARGET_RMS: f32 = 0.25; // rms that fills the meter
pub const NOISE_FLOOR_ALPHA: f32 = 0.02;
pub const CALIBRATION_MS: f64 = 300.0;
pub const MAX_TICK_MS: f64 = 120.0; // clamp for stalled frames
pub const STRONG_MULT: f32 = 1.35;
pub const STRONG_PEAK: f32 = 0.55;
pub const ACCUM_DECAY_RATE: f64 = 0.5;
pub const MAX_WEIGHT_BOOST: f32 = 1.0;

// Melody timing (seconds)
pub const QUARTER_SEC: f64 = 0.42;
pub const NOTE_SPACING: f64 = 1.04;
pub const MELODY_TAIL_SEC: f64 = 0.25;
pub const FINISH_EPSILON_SEC: f64 = 0.02;
