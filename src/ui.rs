use crate::constants::*;
use crate::core::{format_clock, MeterReading};
use crate::dom;
use web_sys as web;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusKind {
    Good,
    Warn,
}

/// Status line, mic meter and song bar. Every element is optional so a
/// trimmed-down page still works.
pub struct Ui {
    document: web::Document,
    mic_status: Option<web::HtmlElement>,
    tap_to_blow: Option<web::HtmlElement>,
    song_toggle: Option<web::HtmlElement>,
    progress_fill: Option<web::HtmlElement>,
    song_time: Option<web::HtmlElement>,
    meter: Option<web::HtmlElement>,
    meter_fill: Option<web::HtmlElement>,
    meter_thresh: Option<web::HtmlElement>,
}

impl Ui {
    pub fn new(document: &web::Document) -> Self {
        let by_id = |id: &str| dom::html_by_id(document, id);
        Self {
            document: document.clone(),
            mic_status: by_id(MIC_STATUS_ID),
            tap_to_blow: by_id(TAP_TO_BLOW_ID),
            song_toggle: by_id(SONG_TOGGLE_ID),
            progress_fill: by_id(SONG_PROGRESS_FILL_ID),
            song_time: by_id(SONG_TIME_ID),
            meter: by_id(MIC_METER_ID),
            meter_fill: by_id(MIC_METER_FILL_ID),
            meter_thresh: by_id(MIC_METER_THRESH_ID),
        }
    }

    pub fn set_status(&self, text: &str, kind: StatusKind) {
        if let Some(el) = &self.mic_status {
            dom::set_text(el, text);
            el.set_class_name(match kind {
                StatusKind::Good => "status good",
                StatusKind::Warn => "status warn",
            });
        }
    }

    pub fn show_tap_to_blow(&self) {
        if let Some(el) = &self.tap_to_blow {
            dom::set_style(el, "display", "inline-flex");
        }
    }

    pub fn set_relight_enabled(&self, enabled: bool) {
        dom::set_button_disabled(&self.document, RELIGHT_ID, !enabled);
    }

    pub fn set_song_label(&self, label: &str) {
        if let Some(el) = &self.song_toggle {
            dom::set_text(el, label);
        }
    }

    pub fn set_song_progress(&self, elapsed_sec: f64, total_sec: f64, fraction: f64) {
        if let Some(el) = &self.progress_fill {
            dom::set_style(el, "width", &format!("{}%", fraction * 100.0));
        }
        if let Some(el) = &self.song_time {
            let text = format!("{} / {}", format_clock(elapsed_sec), format_clock(total_sec));
            dom::set_text(el, &text);
        }
    }

    pub fn set_listening(&self, listening: bool) {
        if let Some(el) = &self.meter {
            let cl = el.class_list();
            _ = if listening {
                cl.add_1(LISTENING_CLASS)
            } else {
                cl.remove_1(LISTENING_CLASS)
            };
        }
        if !listening {
            if let Some(el) = &self.meter_fill {
                dom::set_style(el, "width", "0%");
            }
        }
    }

    pub fn set_meter(&self, reading: MeterReading) {
        if let Some(el) = &self.meter_fill {
            dom::set_style(el, "width", &format!("{:.1}%", reading.level * 100.0));
        }
        if let Some(el) = &self.meter_thresh {
            dom::set_style(el, "left", &format!("{:.1}%", reading.gate * 100.0));
        }
    }
}
