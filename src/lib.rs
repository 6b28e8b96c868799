//! Valentine proposal page core crate.
//!
//! A countdown intro, a "No" button that runs away from the pointer while the
//! taunts escalate, and a confetti finale once the answer is yes. The
//! interaction rules live in [`engine`] as plain Rust and are tested natively;
//! [`page`] is the wasm-bindgen shell that mounts the DOM and feeds the engine.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod engine;
pub mod error;
mod logging;
pub mod page;

pub use config::ProposalConfig;
pub use engine::{InteractionState, ProposalEngine};
pub use error::ProposalError;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// -----------------------------------------------------------------------------
// JS entrypoints
// -----------------------------------------------------------------------------

/// Mount the page with the default configuration.
#[wasm_bindgen]
pub fn start_proposal() -> Result<(), JsValue> {
    start(ProposalConfig::default())
}

/// Mount the page with a JSON configuration; omitted fields keep their defaults.
#[wasm_bindgen]
pub fn start_proposal_with_config(config_json: &str) -> Result<(), JsValue> {
    start(ProposalConfig::from_json(config_json)?)
}

#[wasm_bindgen]
pub fn stop_proposal() {
    page::unmount();
}

/// Current interaction state as JSON, or `undefined` when nothing is mounted.
#[wasm_bindgen]
pub fn proposal_state_json() -> Option<String> {
    page::state_json()
}

fn start(config: ProposalConfig) -> Result<(), JsValue> {
    config.validate()?;
    logging::init(config.log_filter()?);
    page::mount(config)?;
    Ok(())
}
