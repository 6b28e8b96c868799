//! Page configuration. Every field has a default, so an empty JSON object (or
//! no config at all) gives the stock page; hosts override only what they need.

use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;

use crate::error::ProposalError;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProposalConfig {
    pub intro: IntroConfig,
    pub evasion: EvasionConfig,
    pub celebration: CelebrationConfig,
    pub scene: SceneConfig,
    pub copy: PageCopy,
    /// Element id to mount into; the document body when unset.
    pub mount_id: Option<String>,
    pub log_level: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntroConfig {
    pub countdown_from: u32,
    pub tick_ms: u32,
}

impl Default for IntroConfig {
    fn default() -> Self {
        Self { countdown_from: 3, tick_ms: 1000 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvasionConfig {
    /// Pointer distance (px) from the control's centre that triggers a dodge.
    pub proximity_px: f64,
    /// Gap kept between the control and the container's right/bottom edge.
    pub margin_px: f64,
    /// How long the control stays hidden on a blink tier.
    pub blink_ms: u32,
}

impl Default for EvasionConfig {
    fn default() -> Self {
        Self { proximity_px: 100.0, margin_px: 10.0, blink_ms: 800 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CelebrationConfig {
    pub particle_count: u32,
    pub spread: u32,
}

impl Default for CelebrationConfig {
    fn default() -> Self {
        Self { particle_count: 300, spread: 160 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub star_count: u32,
    pub audio_src: String,
    pub card_image: String,
    pub accepted_image: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            star_count: 80,
            audio_src: "/music/romantic.mp3".to_string(),
            card_image: "/images/bear.gif".to_string(),
            accepted_image: "/images/bear4.gif".to_string(),
        }
    }
}

/// All user-visible strings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageCopy {
    pub warning_title: String,
    pub warning_text: String,
    pub ready_label: String,
    pub countdown_title: String,
    pub title: String,
    pub question: String,
    pub yes_label: String,
    pub no_label: String,
    pub forever_title: String,
    pub forever_text: String,
    pub forever_banner: String,
    pub credit: String,
}

impl Default for PageCopy {
    fn default() -> Self {
        Self {
            warning_title: "⚠️ Warning… Hold Your Heart…".to_string(),
            warning_text: "A thief is coming… ❤️".to_string(),
            ready_label: "READY 💫".to_string(),
            countdown_title: "Get Ready...".to_string(),
            title: "My Valentine ✨".to_string(),
            question: "Under this moonlit sky, where every heartbeat whispers your name, will you be my Valentine? 💖".to_string(),
            yes_label: "YES 💕".to_string(),
            no_label: "NO 😜".to_string(),
            forever_title: "Forever Begins 💖".to_string(),
            forever_text: "You are the destiny my heart was always searching for ✨ And it chose you before I even knew 💕".to_string(),
            forever_banner: "✨ YOU ARE MY FOREVER ✨".to_string(),
            credit: "Made with love 💖".to_string(),
        }
    }
}

impl ProposalConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ProposalError> {
        let config: ProposalConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ProposalError> {
        let ev = &self.evasion;
        if !ev.proximity_px.is_finite() || ev.proximity_px < 0.0 {
            return Err(ProposalError::InvalidConfig(format!(
                "evasion.proximity_px must be a non-negative number, got {}",
                ev.proximity_px
            )));
        }
        if !ev.margin_px.is_finite() || ev.margin_px < 0.0 {
            return Err(ProposalError::InvalidConfig(format!(
                "evasion.margin_px must be a non-negative number, got {}",
                ev.margin_px
            )));
        }
        if self.intro.tick_ms == 0 {
            return Err(ProposalError::InvalidConfig("intro.tick_ms must be positive".to_string()));
        }
        self.log_filter()?;
        Ok(())
    }

    /// Parsed `log_level`; an empty string means "info".
    pub fn log_filter(&self) -> Result<LevelFilter, ProposalError> {
        if self.log_level.trim().is_empty() {
            return Ok(LevelFilter::INFO);
        }
        self.log_level
            .trim()
            .parse::<LevelFilter>()
            .map_err(|_| ProposalError::InvalidConfig(format!("unknown log level '{}'", self.log_level)))
    }
}
