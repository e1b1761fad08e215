use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::{Result, SpinError};
use crate::range_config::RangeConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Appearance
    pub theme: Theme,
    pub window_size: (f32, f32),

    // Number formatting
    pub locale: String,

    // Spin boxes shown at startup
    pub presets: Vec<SpinPreset>,

    // Diagnostics
    pub debug_logging: bool,
    pub max_event_log: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            window_size: (900.0, 600.0),

            locale: "en_US".to_string(),

            presets: vec![
                SpinPreset::new("Percent", RangeConfig::new(0.0, 100.0, 2), 42.5),
                SpinPreset::new("Count", RangeConfig::new(0.0, 1000.0, 0).with_step_size(5.0), 10.0),
                SpinPreset::new(
                    "Offset (inverted)",
                    RangeConfig::new(10.0, -10.0, 1).with_step_size(0.5),
                    0.0,
                ),
                SpinPreset::new(
                    "Gain (fixed)",
                    RangeConfig::new(0.0, 4.0, 3)
                        .with_step_size(0.125)
                        .with_editable(false),
                    1.0,
                ),
            ],

            debug_logging: false,
            max_event_log: 200,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn visuals(self) -> egui::Visuals {
        match self {
            Theme::Dark => egui::Visuals::dark(),
            Theme::Light => egui::Visuals::light(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinPreset {
    pub label: String,
    pub config: RangeConfig,
    pub value: f64,
}

impl SpinPreset {
    pub fn new(label: &str, config: RangeConfig, value: f64) -> Self {
        Self {
            label: label.to_string(),
            config,
            value,
        }
    }
}

impl Settings {
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "decimalspin", "DecimalSpin")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load from the platform config dir, falling back to defaults.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring settings at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path().ok_or_else(|| SpinError::SettingsError {
            message: "no config directory for this platform".to_string(),
        })?;
        self.save_to(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Insert a preset, replacing any with the same label.
    pub fn upsert_preset(&mut self, preset: SpinPreset) {
        match self.presets.iter_mut().find(|p| p.label == preset.label) {
            Some(existing) => *existing = preset,
            None => self.presets.push(preset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut settings = Settings::default();
        settings.locale = "de_DE".to_string();
        settings.upsert_preset(SpinPreset::new("Percent", RangeConfig::new(0.0, 1.0, 4), 0.5));
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded.locale, "de_DE");
        assert_eq!(loaded.presets.len(), settings.presets.len());
        assert_eq!(loaded.presets[0].config.decimals, 4);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "locale": "fr_FR" }"#).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded.locale, "fr_FR");
        assert_eq!(loaded.max_event_log, 200);
        assert!(!loaded.presets.is_empty());
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = Settings::load_from(&path).unwrap_err();
        assert_eq!(err.error_code(), "JSON_ERROR");
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_upsert_appends_new_label() {
        let mut settings = Settings::default();
        let before = settings.presets.len();
        settings.upsert_preset(SpinPreset::new("Extra", RangeConfig::default(), 1.0));
        assert_eq!(settings.presets.len(), before + 1);
    }
}
