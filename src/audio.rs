use crate::constants::{
    MASTER_GAIN, NOTE_ATTACK_SEC, NOTE_FLOOR_GAIN, NOTE_PEAK_GAIN, NOTE_RELEASE_PAD_SEC,
    SCHEDULE_LEAD_SEC,
};
use crate::core::Melody;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// The page's audio context and the bus every note is routed through.
#[derive(Clone)]
pub struct MusicOut {
    pub ctx: web::AudioContext,
    pub master_gain: web::GainNode,
}

fn create_gain(
    audio_ctx: &web::AudioContext,
    value: f32,
    label: &str,
) -> anyhow::Result<web::GainNode> {
    let g = web::GainNode::new(audio_ctx)
        .map_err(|e| anyhow::anyhow!("{} GainNode error: {:?}", label, e))?;
    g.gain().set_value(value);
    Ok(g)
}

pub fn build_music_out() -> anyhow::Result<MusicOut> {
    let ctx =
        web::AudioContext::new().map_err(|e| anyhow::anyhow!("AudioContext error: {:?}", e))?;
    let master_gain = create_gain(&ctx, MASTER_GAIN, "Master")?;
    master_gain
        .connect_with_audio_node(&ctx.destination())
        .map_err(|e| anyhow::anyhow!("connect error: {:?}", e))?;
    Ok(MusicOut { ctx, master_gain })
}

impl MusicOut {
    pub fn current_time(&self) -> f64 {
        self.ctx.current_time()
    }

    pub fn is_running(&self) -> bool {
        self.ctx.state() == web::AudioContextState::Running
    }

    pub fn is_suspended(&self) -> bool {
        self.ctx.state() == web::AudioContextState::Suspended
    }

    /// Schedule every note of the tune; returns the context time of note 0.
    pub fn schedule_melody(&self, melody: &Melody) -> f64 {
        let base = self.ctx.current_time() + SCHEDULE_LEAD_SEC;
        let mut failed = 0usize;
        for note in &melody.notes {
            let start = base + note.start_sec;
            if let Err(e) = self.play_note(note.frequency_hz, start, note.duration_sec) {
                failed += 1;
                log::warn!("[song] note at {:.2}s not scheduled: {:?}", note.start_sec, e);
            }
        }
        log::info!(
            "[song] scheduled {} notes ({} failed), length {:.2}s",
            melody.notes.len(),
            failed,
            melody.total_sec
        );
        base
    }

    // One triangle-wave note with a short exponential attack and release
    fn play_note(&self, frequency_hz: f32, start: f64, dur: f64) -> anyhow::Result<()> {
        let js_err = |e: wasm_bindgen::JsValue| anyhow::anyhow!("{:?}", e);
        let osc = web::OscillatorNode::new(&self.ctx).map_err(js_err)?;
        let env = web::GainNode::new(&self.ctx).map_err(js_err)?;
        osc.set_type(web::OscillatorType::Triangle);
        osc.frequency().set_value_at_time(frequency_hz, start).map_err(js_err)?;
        let gain = env.gain();
        gain.set_value_at_time(NOTE_FLOOR_GAIN, start).map_err(js_err)?;
        gain.exponential_ramp_to_value_at_time(NOTE_PEAK_GAIN, start + NOTE_ATTACK_SEC)
            .map_err(js_err)?;
        gain.exponential_ramp_to_value_at_time(NOTE_FLOOR_GAIN, start + dur)
            .map_err(js_err)?;
        osc.connect_with_audio_node(&env).map_err(js_err)?;
        env.connect_with_audio_node(&self.master_gain).map_err(js_err)?;
        osc.start_with_when(start).map_err(js_err)?;
        osc.stop_with_when(start + dur + NOTE_RELEASE_PAD_SEC).map_err(js_err)?;
        Ok(())
    }

    pub async fn resume(&self) -> anyhow::Result<()> {
        let promise = self.ctx.resume().map_err(|e| anyhow::anyhow!("{:?}", e))?;
        JsFuture::from(promise)
            .await
            .map_err(|e| anyhow::anyhow!("resume rejected: {:?}", e))?;
        Ok(())
    }

    pub async fn suspend(&self) -> anyhow::Result<()> {
        let promise = self.ctx.suspend().map_err(|e| anyhow::anyhow!("{:?}", e))?;
        JsFuture::from(promise)
            .await
            .map_err(|e| anyhow::anyhow!("suspend rejected: {:?}", e))?;
        Ok(())
    }

    /// Fire-and-forget close used on page teardown.
    pub fn close(&self) {
        if self.ctx.state() != web::AudioContextState::Closed {
            _ = self.ctx.close();
        }
    }
}
