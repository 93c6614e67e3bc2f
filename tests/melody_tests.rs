// Host-side tests for the tune and the song toggle state machine.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod cake_core {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod melody {
        include!("../src/core/melody.rs");
    }
    pub mod playback {
        include!("../src/core/playback.rs");
    }
}

use cake_core::melody::*;
use cake_core::playback::*;

#[test]
fn happy_birthday_has_expected_shape() {
    let m = Melody::happy_birthday();
    assert_eq!(m.notes.len(), 25);
    assert_eq!(m.notes[0].frequency_hz, G4);
    assert_eq!(m.notes[24].frequency_hz, C5);
    assert_eq!(m.notes[0].start_sec, 0.0);
    // 35 quarters of 0.42s, spaced by 4%, plus the tail
    assert!((m.total_sec - 15.538).abs() < 1e-6, "{}", m.total_sec);
}

#[test]
fn notes_are_back_to_back_with_spacing() {
    let m = Melody::happy_birthday();
    for pair in m.notes.windows(2) {
        let gap = pair[1].start_sec - pair[0].start_sec;
        assert!((gap - pair[0].duration_sec * 1.04).abs() < 1e-9);
        assert!(gap > pair[0].duration_sec);
    }
    let last = m.notes[24];
    assert!(last.start_sec + last.duration_sec < m.total_sec);
}

#[test]
fn from_sequence_of_nothing_is_just_the_tail() {
    let m = Melody::from_sequence(&[]);
    assert!(m.notes.is_empty());
    assert!((m.total_sec - 0.25).abs() < 1e-9);
}

#[test]
fn progress_and_finish() {
    let m = Melody::happy_birthday();
    assert_eq!(m.progress(-1.0), 0.0);
    assert!((m.progress(m.total_sec / 2.0) - 0.5).abs() < 1e-9);
    assert_eq!(m.progress(m.total_sec + 10.0), 1.0);
    assert!(!m.is_finished(m.total_sec - 0.5));
    assert!(m.is_finished(m.total_sec - 0.01));
    assert!(m.is_finished(m.total_sec + 3.0));
    assert_eq!(m.clamp_elapsed(99.0), m.total_sec);
}

#[test]
fn clock_format() {
    assert_eq!(format_clock(0.0), "0:00");
    assert_eq!(format_clock(7.9), "0:07");
    assert_eq!(format_clock(15.538), "0:15");
    assert_eq!(format_clock(61.0), "1:01");
    assert_eq!(format_clock(-3.0), "0:00");
    assert_eq!(format_clock(f64::NAN), "0:00");
}

#[test]
fn toggle_cycles_play_pause_resume() {
    let mut p = Playback::new();
    assert_eq!(p.state(), PlaybackState::Idle);
    assert_eq!(p.button_label(), "▶️ Play");

    assert_eq!(p.toggle(), PlaybackAction::Start);
    assert!(p.is_playing());
    assert_eq!(p.button_label(), "⏸️ Pause");

    assert_eq!(p.toggle(), PlaybackAction::Pause);
    assert_eq!(p.state(), PlaybackState::Paused);
    assert!(!p.is_playing());
    assert_eq!(p.button_label(), "▶️ Resume");

    assert_eq!(p.toggle(), PlaybackAction::Resume);
    assert!(p.is_playing());
}

#[test]
fn finish_offers_play_again() {
    let mut p = Playback::default();
    assert!(!p.finish());
    p.toggle();
    assert!(p.finish());
    assert_eq!(p.state(), PlaybackState::Idle);
    assert_eq!(p.button_label(), "▶️ Play again");
    // Finishing twice is a no-op
    assert!(!p.finish());
    // Play again starts from the top
    assert_eq!(p.toggle(), PlaybackAction::Start);
}

#[test]
fn paused_tune_does_not_finish() {
    let mut p = Playback::new();
    p.toggle();
    p.toggle();
    assert!(!p.finish());
    assert_eq!(p.state(), PlaybackState::Paused);
}
