//! Intro overlay: a warning screen, then a once-per-tick countdown, then the
//! page proper. The timer itself belongs to the shell; this only counts.

use serde::Serialize;
use tracing::{debug, info};

use super::ProposalEngine;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum IntroPhase {
    Warning,
    Countdown,
    Done,
}

/// Outcome of one countdown timer tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountdownTick {
    /// Not counting down (still on the warning screen, or already done).
    Ignored,
    /// Still counting; carries the value now on screen.
    Counted(u32),
    /// The countdown ran out; stop the timer and reveal the page.
    Finished,
}

impl ProposalEngine {
    /// Leave the warning screen. Only valid once; returns false otherwise.
    pub fn confirm_ready(&mut self) -> bool {
        if self.state.intro_phase != IntroPhase::Warning {
            return false;
        }
        self.state.intro_phase = IntroPhase::Countdown;
        self.state.countdown_value = self.intro.countdown_from;
        info!(from = self.intro.countdown_from, "countdown started");
        true
    }

    pub fn tick(&mut self) -> CountdownTick {
        if self.state.intro_phase != IntroPhase::Countdown {
            return CountdownTick::Ignored;
        }
        if self.state.countdown_value == 0 {
            self.state.intro_phase = IntroPhase::Done;
            info!("countdown finished");
            return CountdownTick::Finished;
        }
        self.state.countdown_value -= 1;
        debug!(value = self.state.countdown_value, "countdown tick");
        CountdownTick::Counted(self.state.countdown_value)
    }

    /// Tick interval the shell should use.
    pub fn tick_ms(&self) -> u32 {
        self.intro.tick_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EvasionConfig, IntroConfig};

    #[test]
    fn test_ticks_ignored_before_ready() {
        let mut engine = ProposalEngine::default();
        assert_eq!(engine.tick(), CountdownTick::Ignored);
        assert_eq!(engine.intro_phase(), IntroPhase::Warning);
        assert_eq!(engine.countdown_value(), 3);
    }

    #[test]
    fn test_countdown_runs_exactly_four_ticks() {
        let mut engine = ProposalEngine::default();
        assert!(engine.confirm_ready());
        assert_eq!(engine.tick(), CountdownTick::Counted(2));
        assert_eq!(engine.tick(), CountdownTick::Counted(1));
        assert_eq!(engine.tick(), CountdownTick::Counted(0));
        assert_eq!(engine.tick(), CountdownTick::Finished);
        assert_eq!(engine.intro_phase(), IntroPhase::Done);
        assert_eq!(engine.tick(), CountdownTick::Ignored);
        assert!(!engine.confirm_ready());
        assert_eq!(engine.intro_phase(), IntroPhase::Done);
    }

    #[test]
    fn test_confirm_ready_twice_does_not_restart() {
        let mut engine = ProposalEngine::default();
        assert!(engine.confirm_ready());
        engine.tick();
        assert!(!engine.confirm_ready());
        assert_eq!(engine.countdown_value(), 2);
    }

    #[test]
    fn test_custom_countdown_length() {
        let intro = IntroConfig { countdown_from: 1, tick_ms: 250 };
        let mut engine = ProposalEngine::new(intro, EvasionConfig::default());
        assert_eq!(engine.tick_ms(), 250);
        engine.confirm_ready();
        assert_eq!(engine.tick(), CountdownTick::Counted(0));
        assert_eq!(engine.tick(), CountdownTick::Finished);
    }
}
