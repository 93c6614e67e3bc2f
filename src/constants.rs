// Page wiring and WebAudio tuning constants.
// Element ids match the markup shipped with the page.

// Page elements
pub const CAKE_SELECTOR: &str = ".cake";
pub const MIC_STATUS_ID: &str = "micStatus";
pub const TAP_TO_BLOW_ID: &str = "tapToBlow";
pub const RELIGHT_ID: &str = "relightBtn";
pub const SONG_TOGGLE_ID: &str = "songToggle";
pub const SONG_PROGRESS_FILL_ID: &str = "songProgressFill";
pub const SONG_TIME_ID: &str = "songTime";
pub const MIC_METER_ID: &str = "micMeter";
pub const MIC_METER_FILL_ID: &str = "micMeterFill";
pub const MIC_METER_THRESH_ID: &str = "micMeterThresh";

// CSS classes
pub const CANDLE_CLASS: &str = "candle";
pub const FLAME_CLASS: &str = "flame";
pub const CANDLE_OUT_CLASS: &str = "out";
pub const LISTENING_CLASS: &str = "listening";

// Output bus
pub const MASTER_GAIN: f32 = 0.9;
pub const SCHEDULE_LEAD_SEC: f64 = 0.05; // headroom before the first note

// Note envelope
pub const NOTE_FLOOR_GAIN: f32 = 0.0001; // exponential ramps cannot reach 0
pub const NOTE_PEAK_GAIN: f32 = 0.6;
pub const NOTE_ATTACK_SEC: f64 = 0.02;
pub const NOTE_RELEASE_PAD_SEC: f64 = 0.05;

// Mic analyser
pub const ANALYSER_FFT_SIZE: u32 = 2048;
pub const ANALYSER_SMOOTHING: f64 = 0.6; // faster response, more sensitive
