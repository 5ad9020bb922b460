//! User settings persistence.
//!
//! Output preferences for the `vaglog` command, stored as JSON in the
//! platform config directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Output preferences that persist across runs
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    /// Settings file version for migration support
    #[serde(default = "default_version")]
    pub version: u32,
    /// Pretty-print JSON output
    #[serde(default = "default_pretty_json")]
    pub pretty_json: bool,
    /// Add a 1-based row index column to merged tables
    #[serde(default)]
    pub include_index: bool,
}

fn default_version() -> u32 {
    1
}

fn default_pretty_json() -> bool {
    true
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            version: default_version(),
            pretty_json: default_pretty_json(),
            include_index: false,
        }
    }
}

impl UserSettings {
    /// Get the config directory path for vaglog
    pub fn get_config_dir() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::data_dir().map(|p| p.join("vaglog"))
        }
        #[cfg(not(target_os = "macos"))]
        {
            dirs::config_dir().map(|p| p.join("vaglog"))
        }
    }

    /// Get the path to the settings JSON file
    pub fn get_settings_path() -> Option<PathBuf> {
        Self::get_config_dir().map(|p| p.join("settings.json"))
    }

    /// Load settings from the default location
    pub fn load() -> Self {
        match Self::get_settings_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load settings from a file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Failed to read settings file {:?}: {}", path, e);
                return Self::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Failed to parse settings file {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Save settings to a file
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize settings: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write settings file: {}", e))?;

        Ok(())
    }
}
