//! Proposal interaction engine.
//!
//! Pure state machine behind the page: the intro countdown, the evasive
//! rejection control with its escalation ladder, and the one-way acceptance.
//! Nothing here touches the DOM; the web shell (`crate::page`) feeds it events
//! and measured geometry, then renders whatever `state()` says.
//!
//! The controllers are split across submodules as `impl ProposalEngine` blocks
//! so they share one `InteractionState` record:
//! - `intro`: `confirm_ready` / `tick`
//! - `evasion`: `register_attempt` / `relocate` / `evade` / `pointer_moved` /
//!   `activate_rejection`
//! - acceptance (`accept`) lives here

use serde::Serialize;
use tracing::info;

use crate::config::{EvasionConfig, IntroConfig, ProposalConfig};

pub mod evasion;
pub mod geometry;
pub mod intro;
pub mod ladder;

pub use evasion::{Activation, Evasion, Rejection};
pub use geometry::{Point, Rect, Size};
pub use intro::{CountdownTick, IntroPhase};
pub use ladder::{EscalationStep, Motion};

/// Everything the view needs to draw the page. Mutated only through
/// `ProposalEngine` operations.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InteractionState {
    pub accepted: bool,
    pub rejection_attempts: u32,
    pub escalation_message: Option<&'static str>,
    /// `None` while the control sits in its natural flow position.
    pub rejection_position: Option<Point>,
    pub surrendered: bool,
    pub intro_phase: IntroPhase,
    pub countdown_value: u32,
}

impl InteractionState {
    fn new(countdown_from: u32) -> Self {
        Self {
            accepted: false,
            rejection_attempts: 0,
            escalation_message: None,
            rejection_position: None,
            surrendered: false,
            intro_phase: IntroPhase::Warning,
            countdown_value: countdown_from,
        }
    }
}

pub struct ProposalEngine {
    state: InteractionState,
    intro: IntroConfig,
    evasion: EvasionConfig,
}

impl Default for ProposalEngine {
    fn default() -> Self {
        Self::new(IntroConfig::default(), EvasionConfig::default())
    }
}

impl ProposalEngine {
    pub fn new(intro: IntroConfig, evasion: EvasionConfig) -> Self {
        Self { state: InteractionState::new(intro.countdown_from), intro, evasion }
    }

    pub fn from_config(config: &ProposalConfig) -> Self {
        Self::new(config.intro, config.evasion)
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn accepted(&self) -> bool {
        self.state.accepted
    }

    pub fn rejection_attempts(&self) -> u32 {
        self.state.rejection_attempts
    }

    pub fn escalation_message(&self) -> Option<&'static str> {
        self.state.escalation_message
    }

    pub fn rejection_position(&self) -> Option<Point> {
        self.state.rejection_position
    }

    pub fn surrendered(&self) -> bool {
        self.state.surrendered
    }

    pub fn intro_phase(&self) -> IntroPhase {
        self.state.intro_phase
    }

    pub fn countdown_value(&self) -> u32 {
        self.state.countdown_value
    }

    /// Ladder entry for the current attempt count.
    pub fn current_step(&self) -> Option<&'static EscalationStep> {
        ladder::step_for(self.state.rejection_attempts)
    }

    /// Whether raw pointer movement should be listened to at all.
    pub fn proximity_armed(&self) -> bool {
        self.state.intro_phase == IntroPhase::Done && !self.state.accepted
    }

    /// Enter the terminal state. Returns true only on the first call, which is
    /// when the celebration should fire.
    pub fn accept(&mut self) -> bool {
        if self.state.accepted {
            return false;
        }
        self.state.accepted = true;
        info!(attempts = self.state.rejection_attempts, surrendered = self.state.surrendered, "proposal accepted");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_state_defaults() {
        let engine = ProposalEngine::default();
        let s = engine.state();
        assert!(!s.accepted);
        assert_eq!(s.rejection_attempts, 0);
        assert!(s.escalation_message.is_none());
        assert!(s.rejection_position.is_none());
        assert!(!s.surrendered);
        assert_eq!(s.intro_phase, IntroPhase::Warning);
        assert_eq!(s.countdown_value, 3);
        assert!(!engine.proximity_armed());
    }

    #[test]
    fn test_accept_fires_once() {
        let mut engine = ProposalEngine::default();
        assert!(engine.accept());
        assert!(!engine.accept());
        assert!(engine.accepted());
        assert_eq!(engine.rejection_attempts(), 0);
    }

    #[test]
    fn test_state_serializes() {
        let engine = ProposalEngine::default();
        let json = serde_json::to_string(engine.state()).unwrap();
        assert!(json.contains("\"intro_phase\":\"Warning\""));
        assert!(json.contains("\"rejection_position\":null"));
    }
}
