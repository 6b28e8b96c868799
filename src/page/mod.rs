//! Web shell around `ProposalEngine`.
//!
//! Builds the page, turns DOM events and timer ticks into engine calls, and
//! re-renders after each one. All state sits in one thread-local `PageState`;
//! handlers borrow it for the duration of the event and never block.
//!
//! Listener lifetimes follow ownership: the control listeners live as long as
//! the page, the window `mousemove` listener only between the end of the intro
//! and acceptance. Dropping an `EventListener` detaches it.

use std::cell::RefCell;

use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::{Interval, Timeout};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{debug, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{Element, MouseEvent, window};

use crate::config::ProposalConfig;
use crate::engine::{Activation, CountdownTick, Evasion, Motion, Point, ProposalEngine, Rejection};
use crate::error::ProposalError;

mod dom;
mod media;
pub mod scene;

use dom::View;
use media::Audio;

struct PageState {
    engine: ProposalEngine,
    config: ProposalConfig,
    rng: SmallRng,
    view: View,
    audio: Audio,
    controls: Vec<EventListener>,
    proximity: Option<EventListener>,
    countdown: Option<Interval>,
    blink: Option<Timeout>,
}

thread_local! {
    static PAGE: RefCell<Option<PageState>> = RefCell::new(None);
}

/// Run `f` against the mounted page, if any. Re-entrant events (a handler
/// firing while another still holds the state) are dropped.
fn with_page<F: FnOnce(&mut PageState)>(f: F) {
    PAGE.with(|cell| match cell.try_borrow_mut() {
        Ok(mut guard) => {
            if let Some(page) = guard.as_mut() {
                f(page);
            }
        }
        Err(_) => debug!("page state busy; dropping re-entrant event"),
    });
}

pub fn mount(config: ProposalConfig) -> Result<(), ProposalError> {
    unmount();

    let win = window().ok_or(ProposalError::NoWindow)?;
    let doc = win.document().ok_or(ProposalError::NoDocument)?;
    let root: Element = match &config.mount_id {
        Some(id) => doc
            .get_element_by_id(id)
            .ok_or_else(|| ProposalError::NoMountPoint(format!("no element with id '{id}'")))?,
        None => doc
            .body()
            .ok_or_else(|| ProposalError::NoMountPoint("document has no body".to_string()))?
            .into(),
    };

    let mut rng = SmallRng::from_entropy();
    let view = View::build(&doc, &root, &config)?;
    let audio = match scene::plant(&doc, &view.page, config.scene.star_count, &config.copy.credit, &mut rng)
        .and_then(|()| Audio::attach(&view.page, &config.scene.audio_src))
    {
        Ok(audio) => audio,
        Err(err) => {
            view.remove();
            return Err(err);
        }
    };
    let controls = bind_controls(&view);
    let engine = ProposalEngine::from_config(&config);
    view.render(engine.state());

    info!(
        stars = config.scene.star_count,
        proximity_px = config.evasion.proximity_px,
        "proposal page mounted"
    );
    PAGE.with(|cell| {
        *cell.borrow_mut() = Some(PageState {
            engine,
            config,
            rng,
            view,
            audio,
            controls,
            proximity: None,
            countdown: None,
            blink: None,
        });
    });
    Ok(())
}

/// Tear down the mounted page: listeners, timers, audio and DOM.
pub fn unmount() {
    let previous = PAGE.with(|cell| match cell.try_borrow_mut() {
        Ok(mut guard) => guard.take(),
        Err(_) => {
            warn!("unmount requested while the page is handling an event");
            None
        }
    });
    if let Some(page) = previous {
        page.teardown();
    }
}

/// JSON snapshot of the interaction state of the mounted page.
pub fn state_json() -> Option<String> {
    PAGE.with(|cell| {
        cell.try_borrow()
            .ok()
            .and_then(|guard| guard.as_ref().and_then(|p| serde_json::to_string(p.engine.state()).ok()))
    })
}

fn bind_controls(view: &View) -> Vec<EventListener> {
    vec![
        EventListener::new(&view.ready_button, "click", |_| with_page(PageState::on_ready)),
        EventListener::new(&view.yes_button, "click", |_| with_page(PageState::on_accept)),
        EventListener::new(&view.no_button, "click", |_| {
            with_page(|p| p.on_rejection(Activation::Press))
        }),
        EventListener::new(&view.no_button, "mouseenter", |_| {
            with_page(|p| p.on_rejection(Activation::Hover))
        }),
        // Non-passive so a tap does not also produce emulated mouseenter/click.
        EventListener::new_with_options(
            &view.no_button,
            "touchstart",
            EventListenerOptions::enable_prevent_default(),
            |event| {
                event.prevent_default();
                with_page(|p| p.on_rejection(Activation::Press));
            },
        ),
    ]
}

impl PageState {
    fn render(&self) {
        self.view.render(self.engine.state());
    }

    fn on_ready(&mut self) {
        if !self.engine.confirm_ready() {
            return;
        }
        self.audio.unlock();
        self.countdown = Some(Interval::new(self.engine.tick_ms(), || with_page(PageState::on_tick)));
        self.render();
    }

    fn on_tick(&mut self) {
        if self.engine.tick() == CountdownTick::Finished {
            // Dropping the interval clears it before another tick can fire.
            self.countdown = None;
            self.audio.restart();
            self.arm_proximity();
        }
        self.render();
    }

    fn arm_proximity(&mut self) {
        if !self.engine.proximity_armed() || self.proximity.is_some() {
            return;
        }
        let Some(win) = window() else {
            return;
        };
        self.proximity = Some(EventListener::new(&win, "mousemove", |event| {
            let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let pointer = Point::new(mouse.client_x() as f64, mouse.client_y() as f64);
            with_page(|p| p.on_pointer_move(pointer));
        }));
        debug!("proximity evasion armed");
    }

    fn on_pointer_move(&mut self, pointer: Point) {
        let (Some(control), Some(container)) = (self.view.rejection_rect(), self.view.container_size()) else {
            return;
        };
        if let Some(evasion) = self.engine.pointer_moved(pointer, control, container, &mut self.rng) {
            self.apply_evasion(evasion);
        }
    }

    fn on_rejection(&mut self, activation: Activation) {
        let (Some(control), Some(container)) = (self.view.rejection_rect(), self.view.container_size()) else {
            return;
        };
        match self.engine.activate_rejection(activation, container, control.size(), &mut self.rng) {
            Rejection::Evaded(evasion) => self.apply_evasion(evasion),
            Rejection::Accepted => self.celebrate(),
            Rejection::Ignored => {}
        }
    }

    fn on_accept(&mut self) {
        if self.engine.accept() {
            self.celebrate();
        }
    }

    fn apply_evasion(&mut self, evasion: Evasion) {
        match evasion.step.motion {
            Motion::Surrender => {
                if let Err(err) = self.view.merge_rejection() {
                    warn!(error = %err, "could not attach rejection control to accept control");
                }
            }
            Motion::Blink => {
                self.view.set_motion(Motion::Blink);
                self.view.set_rejection_visible(false);
                self.blink = Some(Timeout::new(self.engine.blink_ms(), || {
                    with_page(|p| p.view.set_rejection_visible(true))
                }));
            }
            motion => self.view.set_motion(motion),
        }
        info!(attempts = evasion.attempts, tier = evasion.step.tier, "rejection attempt");
        self.render();
    }

    fn celebrate(&mut self) {
        self.proximity = None;
        self.blink = None;
        if !media::fire_confetti(&self.config.celebration) {
            debug!("celebration rendered without confetti");
        }
        self.render();
    }

    fn teardown(self) {
        drop(self.controls);
        drop(self.proximity);
        drop(self.countdown);
        drop(self.blink);
        self.audio.detach();
        self.view.remove();
        info!("proposal page unmounted");
    }
}
