//! # Effect Settings
//!
//! Loaded once at startup from TOML. Every field has a default, so an empty
//! file is a valid settings file.
//!
//! ```toml
//! fx_directory = "data/fx"
//! seed = 42
//!
//! [lifetimes]
//! blood_ms = 1000
//! dust_ms = 600
//! rocket_ms = 500
//! explosion_ms = 800
//! ```

use std::path::Path;

use ember_fx::EffectKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The settings file could not be read.
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file is not valid TOML for [`EffectSettings`].
    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;

/// How long each effect's object lives before the world removes it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lifetimes {
    /// Blood spray object lifetime (ms).
    pub blood_ms: u64,
    /// Dust puff object lifetime (ms).
    pub dust_ms: u64,
    /// Rocket trail object lifetime (ms).
    pub rocket_ms: u64,
    /// Explosion flash object lifetime (ms).
    pub explosion_ms: u64,
}

impl Default for Lifetimes {
    fn default() -> Self {
        Self {
            blood_ms: 1000,
            dust_ms: 600,
            rocket_ms: 500,
            explosion_ms: 800,
        }
    }
}

/// Runtime settings for the effects subsystem.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectSettings {
    /// Directory holding the effect textures.
    pub fx_directory: String,
    /// Seed for the world's random source; `None` seeds from the clock.
    pub seed: Option<u64>,
    /// Per-effect object lifetimes.
    pub lifetimes: Lifetimes,
}

impl Default for EffectSettings {
    fn default() -> Self {
        Self {
            fx_directory: "fx".to_string(),
            seed: None,
            lifetimes: Lifetimes::default(),
        }
    }
}

impl EffectSettings {
    /// Parses settings from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Parse`] if the text is not valid TOML or a
    /// field has the wrong type.
    pub fn from_toml_str(text: &str) -> SettingsResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Loads settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Io`] if the file cannot be read, or
    /// [`SettingsError::Parse`] if its contents are invalid.
    pub fn load(path: impl AsRef<Path>) -> SettingsResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let settings = Self::from_toml_str(&text)?;
        tracing::info!("Loaded effect settings from {}", path.display());
        Ok(settings)
    }

    /// Object lifetime for `kind`, in milliseconds.
    #[must_use]
    pub const fn lifetime_ms(&self, kind: EffectKind) -> u64 {
        match kind {
            EffectKind::Blood => self.lifetimes.blood_ms,
            EffectKind::Dust => self.lifetimes.dust_ms,
            EffectKind::Rocket => self.lifetimes.rocket_ms,
            EffectKind::Explosion => self.lifetimes.explosion_ms,
        }
    }
}
