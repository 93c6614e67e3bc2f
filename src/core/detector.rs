use super::constants::*;

/// Which microphone preset to use. Handheld mics pick up more of a blow,
/// so mobile gates lower and triggers sooner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceClass {
    Desktop,
    Mobile,
}

impl DeviceClass {
    pub fn from_user_agent(user_agent: &str) -> Self {
        let ua = user_agent.to_ascii_lowercase();
        let mobile = ["android", "iphone", "ipad", "ipod"]
            .iter()
            .any(|needle| ua.contains(needle));
        if mobile {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        }
    }
}

/// Gate and burst tuning for one device class.
///
/// Fields:
/// - `margin`: added to the noise floor to form the gate
/// - `abs_min`: lowest gate allowed, so a silent room does not arm on hiss
/// - `burst_soft_ms`: accumulated time needed for a burst just over the gate
/// - `burst_strong_ms`: accumulated time needed for a strong burst
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetectorProfile {
    pub margin: f32,
    pub abs_min: f32,
    pub burst_soft_ms: f64,
    pub burst_strong_ms: f64,
}

impl DetectorProfile {
    pub const DESKTOP: Self = Self {
        margin: 0.025,
        abs_min: 0.045,
        burst_soft_ms: 160.0,
        burst_strong_ms: 120.0,
    };

    pub const MOBILE: Self = Self {
        margin: 0.02,
        abs_min: 0.04,
        burst_soft_ms: 120.0,
        burst_strong_ms: 90.0,
    };

    pub fn for_device(class: DeviceClass) -> Self {
        match class {
            DeviceClass::Desktop => Self::DESKTOP,
            DeviceClass::Mobile => Self::MOBILE,
        }
    }

    pub fn gate(&self, noise_floor: f32) -> f32 {
        (noise_floor + self.margin).max(self.abs_min)
    }
}

impl Default for DetectorProfile {
    fn default() -> Self {
        Self::DESKTOP
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetectorPhase {
    Disabled,
    Calibrating,
    ArmedIdle,
    ArmedAccumulating,
    Triggered,
}

/// Amplitude statistics of one analyser frame, both in 0..1.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Levels {
    pub rms: f32,
    pub peak: f32,
}

/// Normalized values for the on-page meter bar and its threshold marker.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MeterReading {
    pub level: f32,
    pub gate: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickOutcome {
    pub meter: MeterReading,
    pub blown: bool,
}

/// RMS and peak of an unsigned 8-bit time-domain buffer (128 = silence).
pub fn measure(samples: &[u8]) -> Levels {
    if samples.is_empty() {
        return Levels::default();
    }
    let mut sum_sq = 0.0f32;
    let mut peak = 0.0f32;
    for &b in samples {
        let v = (b as f32 - 128.0) / 128.0;
        sum_sq += v * v;
        peak = peak.max(v.abs());
    }
    Levels {
        rms: (sum_sq / samples.len() as f32).sqrt(),
        peak,
    }
}

pub fn meter_reading(rms: f32, gate: f32) -> MeterReading {
    MeterReading {
        level: (rms / METER_TARGET_RMS).clamp(0.0, 1.0),
        gate: (gate / METER_TARGET_RMS).clamp(0.0, 1.0),
    }
}

/// Adaptive blow detector fed once per animation frame.
///
/// The noise floor follows the input slowly so the blow itself barely moves
/// the gate. Time spent above the gate is accumulated (weighted by how far
/// above) and only decays at half speed, so a blow with short breaks still
/// counts. Fires once, then stays in `Triggered` until re-armed.
#[derive(Clone, Debug)]
pub struct BlowDetector {
    profile: DetectorProfile,
    phase: DetectorPhase,
    noise_floor: Option<f32>,
    calibration_ms: f64,
    accum_ms: f64,
    last_ms: f64,
}

impl BlowDetector {
    pub fn new(profile: DetectorProfile) -> Self {
        Self {
            profile,
            phase: DetectorPhase::Disabled,
            noise_floor: None,
            calibration_ms: 0.0,
            accum_ms: 0.0,
            last_ms: 0.0,
        }
    }

    pub fn phase(&self) -> DetectorPhase {
        self.phase
    }

    pub fn noise_floor(&self) -> Option<f32> {
        self.noise_floor
    }

    pub fn accumulated_ms(&self) -> f64 {
        self.accum_ms
    }

    /// The calibration window has elapsed for the current session. Runs on
    /// even while `Triggered`, so a relight never skips it.
    pub fn is_calibrated(&self) -> bool {
        self.calibration_ms > CALIBRATION_MS
    }

    pub fn is_armed(&self) -> bool {
        matches!(
            self.phase,
            DetectorPhase::ArmedIdle | DetectorPhase::ArmedAccumulating
        )
    }

    /// Begin a monitoring session: forget the old floor and recalibrate.
    pub fn start(&mut self, now_ms: f64) {
        self.phase = DetectorPhase::Calibrating;
        self.noise_floor = None;
        self.calibration_ms = 0.0;
        self.accum_ms = 0.0;
        self.last_ms = now_ms;
    }

    pub fn stop(&mut self) {
        self.phase = DetectorPhase::Disabled;
        self.accum_ms = 0.0;
    }

    /// Allow another trigger after the candles were relit mid-session.
    /// Goes back to `Calibrating` if the window has not elapsed yet.
    pub fn rearm(&mut self) {
        if self.phase == DetectorPhase::Triggered {
            self.phase = if self.is_calibrated() {
                DetectorPhase::ArmedIdle
            } else {
                DetectorPhase::Calibrating
            };
            self.accum_ms = 0.0;
        }
    }

    /// Record an extinguish that came from the manual fallback.
    pub fn mark_triggered(&mut self) {
        if self.phase != DetectorPhase::Disabled {
            self.phase = DetectorPhase::Triggered;
            self.accum_ms = 0.0;
        }
    }

    /// Feed one analyser frame. `None` means the input is not available yet;
    /// the detector waits without changing state.
    pub fn tick(
        &mut self,
        now_ms: f64,
        samples: Option<&[u8]>,
        session_active: bool,
    ) -> Option<TickOutcome> {
        let samples = samples?;
        self.tick_levels(now_ms, measure(samples), session_active)
    }

    pub fn tick_levels(
        &mut self,
        now_ms: f64,
        levels: Levels,
        session_active: bool,
    ) -> Option<TickOutcome> {
        if self.phase == DetectorPhase::Disabled {
            return None;
        }
        let dt = (now_ms - self.last_ms).clamp(0.0, MAX_TICK_MS);
        self.last_ms = now_ms;
        let rms = levels.rms;

        let floor = match self.noise_floor {
            None => rms,
            Some(prev) => rms * NOISE_FLOOR_ALPHA + prev * (1.0 - NOISE_FLOOR_ALPHA),
        };
        self.noise_floor = Some(floor);

        if !self.is_calibrated() {
            self.calibration_ms += dt;
        } else if self.phase == DetectorPhase::Calibrating {
            self.phase = DetectorPhase::ArmedIdle;
            log::debug!("[detector] armed, floor={:.4}", floor);
        }

        let gate = self.profile.gate(floor);
        let mut blown = false;

        if session_active && self.is_armed() && rms > gate {
            let strong = rms > gate * STRONG_MULT || levels.peak > STRONG_PEAK;
            let weight = 1.0 + ((rms - gate) / gate).min(MAX_WEIGHT_BOOST);
            self.accum_ms += dt * weight as f64;
            let need = if strong {
                self.profile.burst_strong_ms
            } else {
                self.profile.burst_soft_ms
            };
            if self.accum_ms >= need {
                log::info!(
                    "[detector] blow detected rms={:.3} gate={:.3} strong={}",
                    rms,
                    gate,
                    strong
                );
                self.phase = DetectorPhase::Triggered;
                self.accum_ms = 0.0;
                blown = true;
            } else {
                self.phase = DetectorPhase::ArmedAccumulating;
            }
        } else {
            self.accum_ms = (self.accum_ms - dt * ACCUM_DECAY_RATE).max(0.0);
            if self.phase == DetectorPhase::ArmedAccumulating {
                self.phase = DetectorPhase::ArmedIdle;
            }
        }

        Some(TickOutcome {
            meter: meter_reading(rms, gate),
            blown,
        })
    }
}

impl Default for BlowDetector {
    fn default() -> Self {
        Self::new(DetectorProfile::default())
    }
}
