//! Mover tuning
//!
//! Persisted as JSON next to the host. Missing fields fall back to defaults,
//! so older files keep loading.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{DEFAULT_HORIZONTAL_INSET, DEFAULT_VERTICAL_INSET, LEDGE_BUMP_DEFLECTION};

/// Errors raised while reading or writing settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings io: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Collider insets and ledge handling for a `MapMover`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoverSettings {
    /// Trimmed off the left and right of vertical swept rects so walls
    /// beside us are not mistaken for floor or ceiling
    pub collider_horizontal_inset: f32,
    /// Trimmed off the top and bottom of horizontal swept rects so floor and
    /// ceiling are not mistaken for walls
    pub collider_vertical_inset: f32,
    /// Pushed below a ceiling found by the head check
    pub ledge_bump_deflection: f32,
}

impl Default for MoverSettings {
    fn default() -> Self {
        Self {
            collider_horizontal_inset: DEFAULT_HORIZONTAL_INSET,
            collider_vertical_inset: DEFAULT_VERTICAL_INSET,
            ledge_bump_deflection: LEDGE_BUMP_DEFLECTION,
        }
    }
}

impl MoverSettings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from `path`, falling back to defaults when the file is
    /// missing or unreadable
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let loaded = std::fs::read_to_string(path)
            .map_err(SettingsError::from)
            .and_then(|json| Self::from_json(&json));

        match loaded {
            Ok(settings) => {
                log::info!("Loaded mover settings from {}", path.display());
                settings
            }
            Err(err) => {
                log::warn!("Using default mover settings ({}: {err})", path.display());
                Self::default()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?)?;
        log::info!("Mover settings saved to {}", path.display());
        Ok(())
    }
}
