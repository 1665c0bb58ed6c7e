//! Widget settings persisted as a small JSON document.
//!
//! Loading never fails: a missing or corrupt store yields defaults, and a
//! partially present store is merged under defaults so old files keep
//! working. Saving goes through a temp file plus rename so a torn write
//! never leaves a half-written store behind.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use hoodie_weather::Location;

/// Last dragged window position, restored on startup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowPosition {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// User-chosen location, overriding IP auto-detection when set.
    pub manual_location: Option<Location>,

    /// Background refresh cadence.
    pub update_interval_secs: u64,

    pub window_position: Option<WindowPosition>,

    /// Window opacity in [0, 1].
    pub transparency: f64,

    pub theme: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            manual_location: None,
            update_interval_secs: 600,
            window_position: None,
            transparency: 0.95,
            theme: "dark".to_string(),
        }
    }
}

impl Settings {
    /// Platform settings path: `<config_dir>/hoodie-widget/settings.json`.
    ///
    /// # Errors
    /// Fails only when the platform reports no config directory.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Failed to get config directory")?;
        Ok(config_dir.join("hoodie-widget").join("settings.json"))
    }

    /// Load settings from `path`; any failure falls back to defaults.
    /// Unknown keys in the store are ignored, missing keys take their
    /// default values.
    pub fn load(path: &Path) -> Self {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::debug!(
                    "Settings not read from {} ({}); using defaults",
                    path.display(),
                    e
                );
                return Self::default();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(
                    "Corrupt settings at {} ({}); using defaults",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save settings to `path`, creating parent directories as needed.
    /// The caller logs a failed save and carries on; it must not abort
    /// the operation that triggered it.
    ///
    /// # Errors
    /// Serialization or filesystem failures.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create settings directory")?;
        }

        let contents =
            serde_json::to_string_pretty(self).context("Failed to serialize settings")?;

        // Write-then-rename keeps a torn write from clobbering the store.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, contents).context("Failed to write settings")?;
        fs::rename(&tmp, path).context("Failed to replace settings file")?;

        tracing::debug!("Settings saved to {}", path.display());
        Ok(())
    }
}
