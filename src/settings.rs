//! Game settings and tuning
//!
//! Everything a player or host page may adjust: aim sensitivity, fire
//! debouncing, mouth calibration and the spawn cadence table. Persisted as
//! JSON (LocalStorage on web, a file on native).

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::signal::{MAX_SENSITIVITY, MIN_SENSITIVITY};
use crate::sim::SpawnTable;

/// Settings load/validation failure
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting: {0}")]
    Invalid(String),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Aim ===
    /// Head movement multiplier (1-8)
    pub sensitivity: u8,
    /// Weight of the newest sample in aim smoothing (0-1]
    pub smoothing: f32,

    // === Fire ===
    /// Consecutive mouth-open frames needed for one shot
    pub fire_frames: u32,
    /// Samples collected before the closed-mouth baseline is taken
    pub mouth_window: usize,
    /// Mouth counts as open above `baseline × multiplier`
    pub mouth_multiplier: f32,
    /// Open threshold (normalized lip distance) before calibration
    pub mouth_fallback_threshold: f32,

    // === Spawning ===
    /// Spawn interval per level in ms (index 0 = level 1)
    pub spawn_intervals_ms: Vec<u32>,
    /// Spawn interval for levels past the table
    pub spawn_fallback_ms: u32,

    /// Seed for the enemy spawner (0 = pick one at session start)
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        let spawn = SpawnTable::default();
        Self {
            sensitivity: 4,
            smoothing: 0.7,

            fire_frames: 6,
            mouth_window: 10,
            mouth_multiplier: 2.2,
            mouth_fallback_threshold: 0.04,

            spawn_intervals_ms: spawn.intervals_ms,
            spawn_fallback_ms: spawn.fallback_ms,

            seed: 0,
        }
    }
}

impl Settings {
    /// Parse and validate a JSON document; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load from a JSON file on disk
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Reject values the core can't work with
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(MIN_SENSITIVITY..=MAX_SENSITIVITY).contains(&self.sensitivity) {
            return Err(SettingsError::Invalid(format!(
                "sensitivity {} outside {}-{}",
                self.sensitivity, MIN_SENSITIVITY, MAX_SENSITIVITY
            )));
        }
        if !(self.smoothing > 0.0 && self.smoothing <= 1.0) {
            return Err(SettingsError::Invalid(format!(
                "smoothing {} outside (0, 1]",
                self.smoothing
            )));
        }
        if self.fire_frames == 0 {
            return Err(SettingsError::Invalid("fire_frames must be at least 1".into()));
        }
        if self.mouth_window == 0 {
            return Err(SettingsError::Invalid("mouth_window must be at least 1".into()));
        }
        if !(self.mouth_multiplier > 1.0) {
            return Err(SettingsError::Invalid(format!(
                "mouth_multiplier {} must exceed 1",
                self.mouth_multiplier
            )));
        }
        if !(self.mouth_fallback_threshold > 0.0) {
            return Err(SettingsError::Invalid(
                "mouth_fallback_threshold must be positive".into(),
            ));
        }
        if self.spawn_fallback_ms == 0 || self.spawn_intervals_ms.contains(&0) {
            return Err(SettingsError::Invalid("spawn intervals must be positive".into()));
        }
        Ok(())
    }

    /// Spawn cadence table built from these settings
    pub fn spawn_table(&self) -> SpawnTable {
        SpawnTable {
            intervals_ms: self.spawn_intervals_ms.clone(),
            fallback_ms: self.spawn_fallback_ms,
        }
    }

    /// Set sensitivity, clamped to the accepted range
    pub fn set_sensitivity(&mut self, sensitivity: u8) {
        self.sensitivity = sensitivity.clamp(MIN_SENSITIVITY, MAX_SENSITIVITY);
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "face_blaster_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match self.to_json() {
                Ok(json) => {
                    let _ = storage.set_item(Self::STORAGE_KEY, &json);
                    log::info!("Settings saved");
                }
                Err(e) => log::warn!("Settings not saved: {}", e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.sensitivity, 4);
        assert_eq!(settings.fire_frames, 6);
        assert_eq!(settings.mouth_multiplier, 2.2);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "sensitivity": 6, "fire_frames": 3 }"#).unwrap();
        assert_eq!(settings.sensitivity, 6);
        assert_eq!(settings.fire_frames, 3);
        assert_eq!(settings.smoothing, 0.7);
        assert_eq!(settings.spawn_table(), SpawnTable::default());
    }

    #[test]
    fn test_json_round_trip() {
        let mut settings = Settings::default();
        settings.spawn_intervals_ms = vec![1500, 900];
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_rejects_out_of_range_sensitivity() {
        let err = Settings::from_json(r#"{ "sensitivity": 9 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Settings::from_json("{ sensitivity: ").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_rejects_degenerate_values() {
        for json in [
            r#"{ "fire_frames": 0 }"#,
            r#"{ "smoothing": 0.0 }"#,
            r#"{ "mouth_multiplier": 0.9 }"#,
            r#"{ "spawn_intervals_ms": [1000, 0] }"#,
        ] {
            assert!(Settings::from_json(json).is_err(), "{json} should be rejected");
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Settings::load_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }

    #[test]
    fn test_set_sensitivity_clamps() {
        let mut settings = Settings::default();
        settings.set_sensitivity(20);
        assert_eq!(settings.sensitivity, 8);
        settings.set_sensitivity(0);
        assert_eq!(settings.sensitivity, 1);
    }
}
