//! Background music and the confetti burst. Both are best-effort: autoplay
//! policy may block the audio and the confetti script may not be loaded, and
//! neither failure affects the interaction state.

use js_sys::{Function, Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{Element, HtmlAudioElement};
use tracing::{debug, warn};

use crate::config::CelebrationConfig;
use crate::error::ProposalError;

pub(crate) struct Audio {
    element: HtmlAudioElement,
}

impl Audio {
    pub fn attach(parent: &Element, src: &str) -> Result<Self, ProposalError> {
        let element = HtmlAudioElement::new_with_src(src)?;
        element.set_loop(true);
        parent.append_child(&element)?;
        Ok(Self { element })
    }

    /// Start and immediately pause playback so a later `restart` is allowed
    /// to play without another user gesture.
    pub fn unlock(&self) {
        self.play_quietly();
        if let Err(err) = self.element.pause() {
            debug!(error = ?err, "audio pause failed");
        }
    }

    pub fn restart(&self) {
        self.element.set_current_time(0.0);
        self.play_quietly();
    }

    fn play_quietly(&self) {
        match self.element.play() {
            Ok(promise) => spawn_local(async move {
                if let Err(err) = JsFuture::from(promise).await {
                    debug!(error = ?err, "audio playback blocked");
                }
            }),
            Err(err) => debug!(error = ?err, "audio playback unavailable"),
        }
    }

    pub fn detach(&self) {
        self.element.pause().ok();
        self.element.remove();
    }
}

/// Call `window.confetti(...)` (canvas-confetti) once. Returns whether the
/// burst was launched.
pub(crate) fn fire_confetti(cfg: &CelebrationConfig) -> bool {
    let Some(win) = web_sys::window() else {
        return false;
    };
    let launcher = match Reflect::get(&win, &JsValue::from_str("confetti")) {
        Ok(value) => value,
        Err(err) => {
            warn!(error = ?err, "confetti lookup failed");
            return false;
        }
    };
    let Some(launcher) = launcher.dyn_ref::<Function>() else {
        warn!("confetti script not loaded; skipping celebration effect");
        return false;
    };
    let options = Object::new();
    Reflect::set(&options, &JsValue::from_str("particleCount"), &JsValue::from(cfg.particle_count)).ok();
    Reflect::set(&options, &JsValue::from_str("spread"), &JsValue::from(cfg.spread)).ok();
    match launcher.call1(&JsValue::NULL, &options) {
        Ok(_) => true,
        Err(err) => {
            warn!(error = ?err, "confetti call failed");
            false
        }
    }
}
