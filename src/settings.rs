//! User preferences, persisted as `settings.json` in the data directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};


pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("could not write settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not encode settings: {0}")]
    Json(#[from] serde_json::Error),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Name attached to leaderboard submissions
    pub player_name: String,
    /// Silence the sound board
    pub muted: bool,
    /// Target frame period for the arcade loop (16 ms ≈ 60 Hz)
    pub frame_ms: u64,
    /// Show the controls line under the playfield
    pub show_hints: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            player_name: "guest".to_string(),
            muted: false,
            frame_ms: 16,
            show_hints: true,
        }
    }
}

impl Settings {
    /// Load settings from `dir`, falling back to defaults when the file is
    /// missing or unreadable.
    pub fn load(dir: &Path) -> Self {
        let path = dir.join(SETTINGS_FILE);
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(_) => {
                log::info!("Using default settings");
                return Self::default();
            }
        };

        match serde_json::from_str(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring malformed {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self, dir: &Path) -> Result<PathBuf, SettingsError> {
        let path = dir.join(SETTINGS_FILE);
        fs::write(&path, serde_json::to_string_pretty(self)?)?;
        log::info!("Settings saved");
        Ok(path)
    }

    /// Frame period, never below 1 ms.
    pub fn frame_period(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.frame_ms.max(1))
    }
}
