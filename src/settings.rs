use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("config directory not found")]
    NoConfigDir,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Cycle length used until enough history exists to average.
    pub default_cycle_length: i32,
    pub default_period_length: i32,
    pub show_fertility: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_cycle_length: 28,
            default_period_length: 5,
            show_fertility: true,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let raw = fs::read(path)?;
        let settings: Settings = serde_json::from_slice(&raw)?;
        tracing::debug!(path = %path.display(), ?settings, "loaded settings");
        Ok(settings)
    }

    /// Load from the platform config directory, or defaults if nothing was saved there.
    pub fn load_or_default() -> Result<Self, SettingsError> {
        let path = settings_file_path()?;
        if !path.exists() {
            tracing::info!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }
        Self::load(&path)
    }
}

/// Get the path to the settings file.
pub fn settings_file_path() -> Result<PathBuf, SettingsError> {
    let dir = dirs::config_dir()
        .ok_or(SettingsError::NoConfigDir)?
        .join("cycle-predictor");
    Ok(dir.join("settings.json"))
}
