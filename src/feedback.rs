//! Scan Feedback
//!
//! Audible acknowledgment for a forwarded scan: a pre-recorded sound when
//! it plays, otherwise a short synthesized tone, otherwise nothing.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::task::spawn_local;
use scan_core::{ScanEvent, ScanFeedback};
use tracing::debug;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AudioContext, HtmlAudioElement, OscillatorType};

use crate::js_error;

const TONE_HZ: f32 = 1200.0;
const TONE_SECONDS: f64 = 0.15;
const TONE_GAIN: f32 = 0.2;

pub struct BeepFeedback {
    asset: Option<String>,
    // One context for the whole session; browsers cap how many can exist
    context: Rc<RefCell<Option<AudioContext>>>,
}

impl BeepFeedback {
    pub fn new(asset: Option<String>) -> Self {
        Self {
            asset,
            context: Rc::new(RefCell::new(None)),
        }
    }
}

impl ScanFeedback for BeepFeedback {
    fn acknowledge(&self, _event: &ScanEvent) {
        let asset = self.asset.clone();
        let context = Rc::clone(&self.context);
        spawn_local(async move {
            if let Some(src) = asset {
                match play_asset(&src).await {
                    Ok(()) => return,
                    Err(e) => debug!(src = %src, error = %js_error::message(&e), "beep asset failed, using tone"),
                }
            }
            if let Err(e) = play_tone(&context) {
                debug!(error = %js_error::message(&e), "no audio output available");
            }
        });
    }
}

async fn play_asset(src: &str) -> Result<(), JsValue> {
    let audio = HtmlAudioElement::new_with_src(src)?;
    JsFuture::from(audio.play()?).await?;
    Ok(())
}

fn play_tone(context: &RefCell<Option<AudioContext>>) -> Result<(), JsValue> {
    let mut slot = context.borrow_mut();
    if slot.is_none() {
        *slot = Some(AudioContext::new()?);
    }
    let Some(ctx) = slot.as_ref() else {
        return Ok(());
    };

    let oscillator = ctx.create_oscillator()?;
    oscillator.set_type(OscillatorType::Sine);
    oscillator.frequency().set_value(TONE_HZ);

    let gain = ctx.create_gain()?;
    gain.gain().set_value(TONE_GAIN);

    oscillator.connect_with_audio_node(&gain)?;
    gain.connect_with_audio_node(&ctx.destination())?;

    let now = ctx.current_time();
    oscillator.start()?;
    oscillator.stop_with_when(now + TONE_SECONDS)?;
    Ok(())
}
