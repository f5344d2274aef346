//! Game settings and preferences
//!
//! Stored as JSON next to the binary. Every field has a default, so partial
//! files load and a missing or broken file falls back to defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{MOUSE_SENSITIVITY, PITCH_LIMIT};
use crate::sim::CameraMode;

/// Default settings file name
pub const SETTINGS_FILE: &str = "ruins_run_settings.json";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Look ===
    /// Radians of yaw/pitch per pixel of pointer motion
    pub mouse_sensitivity: f32,
    /// Maximum camera pitch either side of the horizon (radians)
    pub pitch_limit: f32,
    /// Camera mode at startup
    pub camera_mode: CameraMode,

    // === Simulation ===
    /// Fixed RNG seed; a time-based seed is used when absent
    pub seed: Option<u64>,

    // === Assets ===
    /// OBJ mesh for the player avatar
    pub player_mesh: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mouse_sensitivity: MOUSE_SENSITIVITY,
            pitch_limit: PITCH_LIMIT,
            camera_mode: CameraMode::ThirdPerson,
            seed: None,
            player_mesh: PathBuf::from("player.obj"),
        }
    }
}

impl Settings {
    /// Parse settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load settings from a file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 42, "camera_mode": "FirstPerson" }"#)
            .expect("valid json");
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.camera_mode, CameraMode::FirstPerson);
        assert_eq!(settings.mouse_sensitivity, MOUSE_SENSITIVITY);
        assert_eq!(settings.pitch_limit, PITCH_LIMIT);
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(Settings::from_json("{ seed: ").is_err());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let path = Path::new("definitely/not/here/settings.json");
        assert!(matches!(Settings::load(path), Err(SettingsError::Io { .. })));
        let settings = Settings::load_or_default(path);
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("ruins_run_settings_{}.json", std::process::id()));
        let settings = Settings {
            seed: Some(7),
            mouse_sensitivity: 0.01,
            ..Default::default()
        };
        settings.save(&path).expect("save");
        let loaded = Settings::load(&path).expect("load");
        assert_eq!(loaded.seed, Some(7));
        assert_eq!(loaded.mouse_sensitivity, 0.01);
        let _ = std::fs::remove_file(&path);
    }
}
