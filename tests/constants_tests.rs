// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod core_constants {
    include!("../src/core/constants.rs");
}

use constants::*;
use core_constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn ring_bounds_fit_the_surface() {
    assert!(RING_INNER_PCT > 0.0 && RING_INNER_PCT < RING_OUTER_PCT);
    assert!(CENTER_X_PCT + RING_OUTER_PCT <= 100.0);
    assert!(CENTER_X_PCT - RING_OUTER_PCT >= 0.0);
    assert!(SQUASH > 0.0 && SQUASH <= 1.0);
    assert!(GAP_MIN_PX <= GAP_MAX_PX);
    assert!(RING_STEP_SLACK >= 1.0);
    assert!(INNER_RING_DENSITY > 0.0 && INNER_RING_DENSITY <= 1.0);
}

#[test]
fn palette_entries_are_hex_colors() {
    assert_eq!(CANDLE_PALETTE.len(), 10);
    for c in CANDLE_PALETTE {
        assert_eq!(c.len(), 7, "{}", c);
        assert!(c.starts_with('#'));
        assert!(c[1..].chars().all(|ch| ch.is_ascii_hexdigit()), "{}", c);
    }
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn detector_tuning_is_consistent() {
    assert!(NOISE_FLOOR_ALPHA > 0.0 && NOISE_FLOOR_ALPHA < 1.0);
    assert!(STRONG_MULT > 1.0);
    assert!(ACCUM_DECAY_RATE > 0.0 && ACCUM_DECAY_RATE < 1.0);
    assert!(MAX_TICK_MS < CALIBRATION_MS);
    assert!(METER_TARGET_RMS > 0.0 && METER_TARGET_RMS <= 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn note_envelope_is_audible_and_short() {
    // Exponential ramps need a strictly positive floor
    assert!(NOTE_FLOOR_GAIN > 0.0 && NOTE_FLOOR_GAIN < NOTE_PEAK_GAIN);
    assert!(NOTE_PEAK_GAIN <= 1.0 && MASTER_GAIN <= 1.0);
    assert!(NOTE_ATTACK_SEC < QUARTER_SEC);
    assert!(NOTE_SPACING >= 1.0);
    assert!(FINISH_EPSILON_SEC < MELODY_TAIL_SEC);
    assert!(ANALYSER_FFT_SIZE.is_power_of_two());
    assert!((0.0..1.0).contains(&ANALYSER_SMOOTHING));
}

#[test]
fn element_ids_are_distinct() {
    let ids = [
        MIC_STATUS_ID,
        TAP_TO_BLOW_ID,
        RELIGHT_ID,
        SONG_TOGGLE_ID,
        SONG_PROGRESS_FILL_ID,
        SONG_TIME_ID,
        MIC_METER_ID,
        MIC_METER_FILL_ID,
        MIC_METER_THRESH_ID,
    ];
    for (i, a) in ids.iter().enumerate() {
        assert!(!a.is_empty());
        assert!(ids[i + 1..].iter().all(|b| b != a), "duplicate id {}", a);
    }
}
