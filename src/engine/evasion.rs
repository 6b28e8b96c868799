//! Evasive rejection control: every attempt climbs the escalation ladder and
//! throws the control to a random spot inside its container, until the
//! surrender tier turns it into a second accept control.

use rand::Rng;
use tracing::{debug, info};

use super::geometry::{self, Point, Rect, Size};
use super::ladder::{self, EscalationStep, SURRENDER_TIER};
use super::ProposalEngine;

/// Direct interaction with the rejection control.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Activation {
    /// Click or touch start.
    Press,
    /// Pointer entered the control.
    Hover,
}

/// One completed dodge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Evasion {
    pub attempts: u32,
    pub step: &'static EscalationStep,
    /// New position, or `None` when this attempt was the surrender.
    pub position: Option<Point>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Rejection {
    Evaded(Evasion),
    /// The surrendered control was pressed, which counts as a yes.
    Accepted,
    Ignored,
}

impl ProposalEngine {
    fn evasion_frozen(&self) -> bool {
        self.state.accepted || self.state.surrendered
    }

    /// Count one rejection attempt and refresh the escalation message.
    /// Returns the attempt count, unchanged once accepted or surrendered.
    pub fn register_attempt(&mut self) -> u32 {
        if self.evasion_frozen() {
            return self.state.rejection_attempts;
        }
        self.state.rejection_attempts += 1;
        let attempts = self.state.rejection_attempts;
        self.state.escalation_message = ladder::step_for(attempts).map(|s| s.message);
        if attempts >= SURRENDER_TIER {
            self.state.surrendered = true;
            info!(attempts, "rejection control surrendered");
        }
        attempts
    }

    /// Draw a new position for the control inside `container`.
    pub fn relocate<R: Rng>(&mut self, container: Size, control: Size, rng: &mut R) -> Option<Point> {
        if self.evasion_frozen() {
            return None;
        }
        let pos = geometry::draw_position(container, control, self.evasion.margin_px, rng)?;
        self.state.rejection_position = Some(pos);
        Some(pos)
    }

    /// `register_attempt` followed by `relocate`. No-op on unmeasurable sizes.
    pub fn evade<R: Rng>(&mut self, container: Size, control: Size, rng: &mut R) -> Option<Evasion> {
        if self.evasion_frozen() || !container.is_measurable() || !control.is_measurable() {
            return None;
        }
        let attempts = self.register_attempt();
        let step = ladder::step_for(attempts)?;
        let position = self.relocate(container, control, rng);
        debug!(attempts, tier = step.tier, ?position, "rejection control evaded");
        Some(Evasion { attempts, step, position })
    }

    /// Raw pointer movement anywhere on the page. Dodges when the pointer comes
    /// within `proximity_px` of the control's centre.
    pub fn pointer_moved<R: Rng>(
        &mut self,
        pointer: Point,
        control: Rect,
        container: Size,
        rng: &mut R,
    ) -> Option<Evasion> {
        if !self.proximity_armed() || self.state.surrendered {
            return None;
        }
        if pointer.distance_to(control.center()) >= self.evasion.proximity_px {
            return None;
        }
        self.evade(container, control.size(), rng)
    }

    /// Click, touch or hover on the rejection control.
    pub fn activate_rejection<R: Rng>(
        &mut self,
        activation: Activation,
        container: Size,
        control: Size,
        rng: &mut R,
    ) -> Rejection {
        if self.state.accepted {
            return Rejection::Ignored;
        }
        if self.state.surrendered {
            return match activation {
                Activation::Press if self.accept() => Rejection::Accepted,
                _ => Rejection::Ignored,
            };
        }
        self.evade(container, control, rng).map_or(Rejection::Ignored, Rejection::Evaded)
    }

    pub fn blink_ms(&self) -> u32 {
        self.evasion.blink_ms
    }
}
