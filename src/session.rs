use crate::audio::{self, MusicOut};
use crate::cake::CakeView;
use crate::core::{BlowDetector, DetectorProfile, Melody, Playback, PlaybackAction};
use crate::frame::FrameLoop;
use crate::mic::{self, MicInput};
use crate::ui::{StatusKind, Ui};
use std::cell::RefCell;
use std::rc::Rc;

pub type SharedSession = Rc<RefCell<Session>>;

/// Everything the page mutates: candles, playback, detector, mic and the
/// two frame loops. One instance per page, shared through `SharedSession`;
/// never borrowed across an `.await`.
pub struct Session {
    ui: Ui,
    cake: CakeView,
    melody: Melody,
    playback: Playback,
    detector: BlowDetector,
    music: Option<MusicOut>,
    mic: Option<MicInput>,
    meter_loop: Option<FrameLoop>,
    progress_loop: Option<FrameLoop>,
    start_at: f64,
    blown: bool,
    mic_epoch: u32,
    layout_width: f64,
}

impl Session {
    pub fn new(ui: Ui, cake: CakeView, profile: DetectorProfile) -> Self {
        Self {
            ui,
            cake,
            melody: Melody::happy_birthday(),
            playback: Playback::new(),
            detector: BlowDetector::new(profile),
            music: None,
            mic: None,
            meter_loop: None,
            progress_loop: None,
            start_at: 0.0,
            blown: false,
            mic_epoch: 0,
            layout_width: 0.0,
        }
    }

    pub fn layout_candles(&mut self) {
        self.layout_width = self.cake.width_px();
        self.cake.relayout(self.blown);
    }

    /// Re-run the layout when the cake's rendered width actually changed.
    pub fn on_resize(&mut self) {
        if (self.cake.width_px() - self.layout_width).abs() >= 1.0 {
            self.layout_candles();
        }
    }

    pub fn extinguish(&mut self) {
        if self.blown {
            return;
        }
        self.blown = true;
        self.detector.mark_triggered();
        self.cake.extinguish();
        self.ui.set_relight_enabled(true);
        self.ui.set_status("Make a wish! Candles are out 🎉", StatusKind::Good);
        log::info!("[cake] candles out");
    }

    pub fn relight(&mut self) {
        self.blown = false;
        self.detector.rearm();
        self.cake.relight();
        self.ui.set_relight_enabled(false);
        if self.playback.is_playing() {
            self.ui.set_status("Candles relit. Blow again!", StatusKind::Good);
        } else {
            self.ui.set_status("Press Play to enable blowing again.", StatusKind::Good);
        }
    }

    /// Manual fallback for pages without mic access.
    pub fn tap_to_blow(&mut self) {
        if self.playback.is_playing() {
            self.extinguish();
        }
    }

    fn ensure_music(&mut self) -> anyhow::Result<MusicOut> {
        if let Some(m) = &self.music {
            return Ok(m.clone());
        }
        let m = audio::build_music_out()?;
        self.ui.set_song_progress(0.0, self.melody.total_sec, 0.0);
        self.music = Some(m.clone());
        Ok(m)
    }

    /// Cancel the meter loop and release the microphone. Also invalidates
    /// any acquisition still waiting on a permission prompt.
    pub fn stop_mic(&mut self) {
        self.mic_epoch = self.mic_epoch.wrapping_add(1);
        if let Some(meter) = self.meter_loop.take() {
            meter.cancel();
        }
        if let Some(mut input) = self.mic.take() {
            input.release();
        }
        self.detector.stop();
        self.ui.set_listening(false);
    }

    fn stop_progress(&mut self) {
        if let Some(progress) = self.progress_loop.take() {
            progress.cancel();
        }
    }

    /// Page teardown: release the device and close the audio output.
    pub fn teardown(&mut self) {
        self.stop_progress();
        self.stop_mic();
        if let Some(m) = &self.music {
            m.close();
        }
    }

    fn meter_tick(&mut self) -> bool {
        let active = self.playback.is_playing();
        let frame = self.mic.as_mut().and_then(|m| m.read_frame());
        if let Some(out) = self.detector.tick(instant::now(), frame, active) {
            self.ui.set_meter(out.meter);
            if out.blown {
                self.extinguish();
            }
        }
        true
    }

    fn progress_tick(&mut self) -> bool {
        let Some(music) = &self.music else {
            return false;
        };
        let elapsed = self
            .melody
            .clamp_elapsed(music.current_time() - self.start_at);
        self.ui.set_song_progress(
            elapsed,
            self.melody.total_sec,
            self.melody.progress(elapsed),
        );
        if self.melody.is_finished(elapsed) && self.playback.finish() {
            log::info!("[song] finished");
            self.ui.set_song_label(self.playback.button_label());
            self.stop_mic();
            return false;
        }
        true
    }
}

fn start_meter_loop(session: &SharedSession) -> anyhow::Result<FrameLoop> {
    let weak = Rc::downgrade(session);
    FrameLoop::start(move || match weak.upgrade() {
        Some(s) => s.borrow_mut().meter_tick(),
        None => false,
    })
}

fn start_progress_loop(session: &SharedSession) {
    let weak = Rc::downgrade(session);
    let started = FrameLoop::start(move || match weak.upgrade() {
        Some(s) => s.borrow_mut().progress_tick(),
        None => false,
    });
    match started {
        Ok(progress) => {
            let mut s = session.borrow_mut();
            s.stop_progress();
            s.progress_loop = Some(progress);
        }
        Err(e) => log::error!("[song] progress loop: {:?}", e),
    }
}

async fn start_mic(session: &SharedSession, music: &MusicOut) {
    let epoch = {
        let mut s = session.borrow_mut();
        s.mic_epoch = s.mic_epoch.wrapping_add(1);
        s.mic_epoch
    };
    let acquired = mic::acquire(&music.ctx).await;

    let mut s = session.borrow_mut();
    match acquired {
        Ok(input) => {
            if s.mic_epoch != epoch || !s.playback.is_playing() {
                // Paused while the permission prompt was open.
                drop(input);
                return;
            }
            s.mic = Some(input);
            s.detector.start(instant::now());
            if s.blown {
                s.detector.mark_triggered();
            }
            s.ui.set_status(
                "Microphone: listening… blow to put out the candles",
                StatusKind::Good,
            );
            s.ui.show_tap_to_blow();
            s.ui.set_listening(true);
            match start_meter_loop(session) {
                Ok(meter) => {
                    if let Some(old) = s.meter_loop.replace(meter) {
                        old.cancel();
                    }
                }
                Err(e) => log::error!("[mic] meter loop: {:?}", e),
            }
        }
        Err(e) => {
            log::warn!("[mic] {}", e);
            s.ui.set_status(
                "Microphone blocked. Use the backup “Tap to blow”.",
                StatusKind::Warn,
            );
            s.ui.show_tap_to_blow();
            s.ui.set_listening(false);
        }
    }
}

/// Song toggle: Play / Pause / Resume / Play again.
pub async fn toggle_song(session: SharedSession) {
    let (music, action) = {
        let mut s = session.borrow_mut();
        let music = match s.ensure_music() {
            Ok(m) => m,
            Err(e) => {
                log::error!("[song] audio init: {:?}", e);
                s.ui.set_status(
                    "Audio is not available in this browser.",
                    StatusKind::Warn,
                );
                return;
            }
        };
        let action = s.playback.toggle();
        let label = s.playback.button_label();
        s.ui.set_song_label(label);
        (music, action)
    };
    log::info!("[song] {:?}", action);

    match action {
        PlaybackAction::Start | PlaybackAction::Resume => {
            if music.is_suspended() {
                if let Err(e) = music.resume().await {
                    log::warn!("[song] {:?}", e);
                }
            }
            if action == PlaybackAction::Start {
                let mut s = session.borrow_mut();
                let start_at = music.schedule_melody(&s.melody);
                s.start_at = start_at;
            }
            start_mic(&session, &music).await;
            if session.borrow().playback.is_playing() {
                start_progress_loop(&session);
            }
        }
        PlaybackAction::Pause => {
            {
                let mut s = session.borrow_mut();
                s.stop_progress();
                s.stop_mic();
            }
            if music.is_running() {
                if let Err(e) = music.suspend().await {
                    log::warn!("[song] {:?}", e);
                }
            }
        }
    }
}
