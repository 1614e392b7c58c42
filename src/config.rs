/// Application settings
///
/// The backend address is fixed at compile time. Display tuning is optional:
/// defaults are compiled in and a JSON file at
/// `<config dir>/visual-qa/settings.json` may override any subset of them.
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::SettingsError;

/// Where the VQA backend listens
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/predict";

/// How long a toast stays on screen
const DEFAULT_TOAST_SECS: u64 = 4;

/// Number of suggested questions offered for a fresh image
const DEFAULT_SUGGESTION_COUNT: usize = 3;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Toast lifetime in seconds
    pub toast_secs: u64,
    /// How many canned questions to suggest
    pub suggestion_count: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            toast_secs: DEFAULT_TOAST_SECS,
            suggestion_count: DEFAULT_SUGGESTION_COUNT,
        }
    }
}

impl Settings {
    /// Load settings from the user's config directory, falling back to
    /// defaults when the file is missing or broken.
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            return Self::default();
        };

        match Self::load_from(&path) {
            Ok(Some(settings)) => {
                tracing::info!(path = %path.display(), "loaded settings");
                settings
            }
            Ok(None) => Self::default(),
            Err(e) => {
                tracing::warn!("{e}; using defaults");
                Self::default()
            }
        }
    }

    /// Read a settings file. `Ok(None)` means there is no file.
    pub fn load_from(path: &Path) -> Result<Option<Self>, SettingsError> {
        if !path.exists() {
            return Ok(None);
        }

        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Some(Self::from_json(&json)?))
    }

    /// Parse from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_secs(self.toast_secs)
    }

    /// Get the path where the settings file lives
    /// - Linux: ~/.config/visual-qa/settings.json
    /// - macOS: ~/Library/Application Support/visual-qa/settings.json
    /// - Windows: %APPDATA%\visual-qa\settings.json
    fn settings_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir().or_else(dirs::home_dir)?;
        path.push("visual-qa");
        path.push("settings.json");
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.toast_duration(), Duration::from_secs(4));
        assert_eq!(settings.suggestion_count, 3);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{"suggestion_count": 2}"#).unwrap();
        assert_eq!(settings.suggestion_count, 2);
        assert_eq!(settings.toast_secs, 4);
    }

    #[test]
    fn test_endpoint_key_is_ignored() {
        let settings = Settings::from_json(
            r#"{"endpoint": "http://vqa.local:8080/predict", "toast_secs": 6}"#,
        )
        .unwrap();
        assert_eq!(settings, Settings { toast_secs: 6, ..Settings::default() });
        assert_eq!(DEFAULT_ENDPOINT, "http://127.0.0.1:5000/predict");
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(matches!(
            Settings::from_json("{ toast_secs"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_none() {
        let path = std::env::temp_dir().join("visual-qa-no-such-settings.json");
        assert!(Settings::load_from(&path).unwrap().is_none());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "visual-qa-settings-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{"toast_secs": 10}"#).unwrap();

        let settings = Settings::load_from(&path).unwrap().unwrap();
        assert_eq!(settings.toast_duration(), Duration::from_secs(10));
        assert_eq!(settings.suggestion_count, 3);

        std::fs::remove_file(&path).unwrap();
    }
}
