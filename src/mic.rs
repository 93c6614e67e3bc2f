use crate::constants::{ANALYSER_FFT_SIZE, ANALYSER_SMOOTHING};
use js_sys::Reflect;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

#[derive(Debug, thiserror::Error)]
pub enum MicError {
    #[error("microphone API unavailable: {0}")]
    Unsupported(String),
    #[error("microphone access denied: {0}")]
    Denied(String),
    #[error("audio graph error: {0}")]
    Graph(String),
}

/// An acquired microphone feeding an analyser.
///
/// Owns the media stream; `release` stops every track. Dropping without
/// calling `release` also stops the tracks.
pub struct MicInput {
    stream: Option<web::MediaStream>,
    source: web::MediaStreamAudioSourceNode,
    analyser: web::AnalyserNode,
    buf: Vec<u8>,
}

impl MicInput {
    /// Copy the latest time-domain frame; `None` once released.
    pub fn read_frame(&mut self) -> Option<&[u8]> {
        self.stream.as_ref()?;
        self.analyser.get_byte_time_domain_data(&mut self.buf);
        Some(&self.buf)
    }

    pub fn release(&mut self) {
        if let Some(stream) = self.stream.take() {
            _ = self.source.disconnect();
            stop_tracks(&stream);
            log::info!("[mic] released");
        }
    }
}

impl Drop for MicInput {
    fn drop(&mut self) {
        self.release();
    }
}

fn stop_tracks(stream: &web::MediaStream) {
    for track in stream.get_tracks().iter() {
        if let Ok(track) = track.dyn_into::<web::MediaStreamTrack>() {
            track.stop();
        }
    }
}

fn build_graph(
    audio_ctx: &web::AudioContext,
    stream: &web::MediaStream,
) -> Result<(web::MediaStreamAudioSourceNode, web::AnalyserNode), JsValue> {
    let source = audio_ctx.create_media_stream_source(stream)?;
    let analyser = audio_ctx.create_analyser()?;
    analyser.set_fft_size(ANALYSER_FFT_SIZE);
    analyser.set_smoothing_time_constant(ANALYSER_SMOOTHING);
    source.connect_with_audio_node(&analyser)?;
    Ok((source, analyser))
}

fn raw_audio_constraints() -> Result<JsValue, JsValue> {
    let audio = js_sys::Object::new();
    for key in ["echoCancellation", "noiseSuppression", "autoGainControl"] {
        Reflect::set(&audio, &JsValue::from_str(key), &JsValue::FALSE)?;
    }
    Ok(audio.into())
}

async fn request_stream(
    devices: &web::MediaDevices,
    audio: &JsValue,
) -> Result<web::MediaStream, JsValue> {
    let constraints = web::MediaStreamConstraints::new();
    constraints.set_audio(audio);
    let promise = devices.get_user_media_with_constraints(&constraints)?;
    let stream = JsFuture::from(promise).await?;
    stream.dyn_into::<web::MediaStream>()
}

/// Ask for the microphone without browser voice processing, falling back to
/// plain `{audio: true}` when the browser rejects those constraints.
pub async fn acquire(audio_ctx: &web::AudioContext) -> Result<MicInput, MicError> {
    let window = web::window().ok_or_else(|| MicError::Unsupported("no window".into()))?;
    let devices = window
        .navigator()
        .media_devices()
        .map_err(|e| MicError::Unsupported(format!("{:?}", e)))?;

    let first = match raw_audio_constraints() {
        Ok(raw) => request_stream(&devices, &raw).await,
        Err(e) => Err(e),
    };
    let stream = match first {
        Ok(s) => s,
        Err(e1) => {
            log::warn!("[mic] raw constraints rejected: {:?}", e1);
            request_stream(&devices, &JsValue::TRUE)
                .await
                .map_err(|e2| MicError::Denied(format!("{:?}", e2)))?
        }
    };

    let (source, analyser) = match build_graph(audio_ctx, &stream) {
        Ok(nodes) => nodes,
        Err(e) => {
            stop_tracks(&stream);
            return Err(MicError::Graph(format!("{:?}", e)));
        }
    };

    log::info!("[mic] listening (fft={})", ANALYSER_FFT_SIZE);
    Ok(MicInput {
        stream: Some(stream),
        source,
        analyser,
        buf: vec![128u8; ANALYSER_FFT_SIZE as usize],
    })
}
