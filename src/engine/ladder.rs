// Escalation ladder definition
// One entry per rejection tier; the last entry is the surrender tier and also
// covers every attempt past it.

use serde::Serialize;

/// How the rejection control moves (or stops moving) at a given tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Motion {
    /// Animated slide to the new position over `ms` milliseconds.
    Glide { ms: u32 },
    /// Instant jump, no transition.
    Teleport,
    /// Instant jump, hidden for a short moment before reappearing.
    Blink,
    /// Evasion is over: the control attaches itself to the accept control.
    Surrender,
}

impl Motion {
    /// CSS `transition` value to apply before moving the control.
    pub fn transition_css(&self) -> String {
        match self {
            Motion::Glide { ms } => format!("left {ms}ms ease, top {ms}ms ease"),
            Motion::Teleport | Motion::Blink | Motion::Surrender => "none".to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct EscalationStep {
    pub tier: u32,
    pub message: &'static str,
    pub motion: Motion,
}

pub const SURRENDER_TIER: u32 = 6;

pub static LADDER: [EscalationStep; SURRENDER_TIER as usize] = [
    EscalationStep {
        tier: 1,
        message: "Hmm… that felt like a wrong click 😌",
        motion: Motion::Glide { ms: 400 },
    },
    EscalationStep {
        tier: 2,
        message: "Hmm… are you sure? My heart says try again 💕",
        motion: Motion::Glide { ms: 150 },
    },
    EscalationStep {
        tier: 3,
        message: "System detected extreme cuteness… retry required 😏",
        motion: Motion::Teleport,
    },
    EscalationStep {
        tier: 4,
        message: "Dil toh pagal hai… phir try karega 💕",
        motion: Motion::Blink,
    },
    EscalationStep {
        tier: 5,
        message: "Background me romantic music baj raha hai 🎶",
        motion: Motion::Teleport,
    },
    EscalationStep {
        tier: SURRENDER_TIER,
        message: "Thukaraaoge thukara lo.... 🥹 Ham thhokar kha kar bhi tumhaare dar pe aenge 💖",
        motion: Motion::Surrender,
    },
];

/// Ladder entry for a cumulative attempt count; `None` before the first attempt.
pub fn step_for(attempts: u32) -> Option<&'static EscalationStep> {
    if attempts == 0 {
        return None;
    }
    let tier = attempts.min(SURRENDER_TIER);
    LADDER.get(tier as usize - 1)
}
