use super::constants::{FINISH_EPSILON_SEC, MELODY_TAIL_SEC, NOTE_SPACING, QUARTER_SEC};

// Pitches used by the tune (Hz)
pub const C5: f32 = 523.25;
pub const D5: f32 = 587.33;
pub const E5: f32 = 659.25;
pub const F5: f32 = 698.46;
pub const G5: f32 = 783.99;
pub const G4: f32 = 392.0;
pub const A4: f32 = 440.0;
pub const B4: f32 = 493.88;

/// A note of the fixed tune, timed relative to playback start.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MelodyNote {
    pub frequency_hz: f32,
    pub duration_sec: f64,
    pub start_sec: f64,
}

#[derive(Clone, Debug)]
pub struct Melody {
    pub notes: Vec<MelodyNote>,
    pub total_sec: f64,
}

/// Note lengths in quarters: 1 = quarter, 1.5 = dotted, 2 = half.
const HAPPY_BIRTHDAY: [(f32, f64); 25] = [
    (G4, 1.0),
    (G4, 1.0),
    (A4, 1.5),
    (G4, 1.5),
    (C5, 1.5),
    (B4, 2.0),
    (G4, 1.0),
    (G4, 1.0),
    (A4, 1.5),
    (G4, 1.5),
    (D5, 1.5),
    (C5, 2.0),
    (G4, 1.0),
    (G4, 1.0),
    (G5, 1.5),
    (E5, 1.5),
    (C5, 1.5),
    (B4, 1.0),
    (A4, 2.0),
    (F5, 1.0),
    (F5, 1.0),
    (E5, 1.5),
    (C5, 1.5),
    (D5, 1.5),
    (C5, 2.0),
];

impl Melody {
    /// Lay out `(frequency, duration)` pairs back to back with a small gap.
    pub fn from_sequence(seq: &[(f32, f64)]) -> Self {
        let mut notes = Vec::with_capacity(seq.len());
        let mut t = 0.0;
        for &(frequency_hz, duration_sec) in seq {
            notes.push(MelodyNote {
                frequency_hz,
                duration_sec,
                start_sec: t,
            });
            t += duration_sec * NOTE_SPACING;
        }
        Self {
            notes,
            total_sec: t + MELODY_TAIL_SEC,
        }
    }

    pub fn happy_birthday() -> Self {
        let seq: Vec<(f32, f64)> = HAPPY_BIRTHDAY
            .iter()
            .map(|&(f, quarters)| (f, quarters * QUARTER_SEC))
            .collect();
        Self::from_sequence(&seq)
    }

    /// Elapsed playback time clamped to the tune length.
    pub fn clamp_elapsed(&self, elapsed_sec: f64) -> f64 {
        elapsed_sec.clamp(0.0, self.total_sec)
    }

    pub fn progress(&self, elapsed_sec: f64) -> f64 {
        if self.total_sec <= 0.0 {
            return 1.0;
        }
        self.clamp_elapsed(elapsed_sec) / self.total_sec
    }

    pub fn is_finished(&self, elapsed_sec: f64) -> bool {
        self.clamp_elapsed(elapsed_sec) >= self.total_sec - FINISH_EPSILON_SEC
    }
}

/// `m:ss` for the song bar.
pub fn format_clock(seconds: f64) -> String {
    let s = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
    let m = (s / 60.0).floor() as u64;
    let sec = (s % 60.0).floor() as u64;
    format!("{}:{:02}", m, sec)
}
