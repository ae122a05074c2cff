use std::{cell::RefCell, rc::Rc};

use wasm_bindgen::JsValue;
use web_sys::{AudioContext, AudioContextState, OscillatorType};

use crate::cursor::Tone;

/// One lazily created `AudioContext` shared by every sound on the page.
#[derive(Clone, Default)]
pub struct Audio {
    context: Rc<RefCell<Option<AudioContext>>>,
}

impl PartialEq for Audio {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.context, &other.context)
    }
}

impl Audio {
    fn context(&self) -> Result<AudioContext, JsValue> {
        if let Some(context) = self.context.borrow().as_ref() {
            return Ok(context.clone());
        }
        let context = AudioContext::new()?;
        log::debug!("audio context created");
        *self.context.borrow_mut() = Some(context.clone());
        Ok(context)
    }

    /// Plays a sine blip that decays exponentially over `tone.duration`.
    pub fn play(&self, tone: Tone) {
        if let Err(err) = self.try_play(tone) {
            log::warn!("audio playback failed: {err:?}");
        }
    }

    fn try_play(&self, tone: Tone) -> Result<(), JsValue> {
        let context = self.context()?;
        if context.state() == AudioContextState::Suspended {
            let _ = context.resume()?;
        }

        let oscillator = context.create_oscillator()?;
        let gain = context.create_gain()?;
        oscillator.connect_with_audio_node(&gain)?;
        gain.connect_with_audio_node(&context.destination())?;

        oscillator.set_type(OscillatorType::Sine);
        oscillator.frequency().set_value(tone.frequency);

        let now = context.current_time();
        let end = now + f64::from(tone.duration);
        gain.gain().set_value_at_time(tone.gain, now)?;
        gain.gain().exponential_ramp_to_value_at_time(0.001, end)?;

        oscillator.start()?;
        oscillator.stop_with_when(end)?;
        Ok(())
    }

    pub fn close(&self) {
        if let Some(context) = self.context.borrow_mut().take() {
            if context.close().is_err() {
                log::warn!("audio context did not close cleanly");
            }
        }
    }
}
