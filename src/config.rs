//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use crate::models::LayoutParams;
use crate::narration::{Narration, NarrationOptions};

/// Environment variable that overrides the config directory (used by tests).
pub const CONFIG_DIR_ENV: &str = "LAZYCOUNT_CONFIG_DIR";

/// Theme display mode preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ThemeMode {
    /// Automatically detect OS theme (dark/light)
    #[default]
    Auto,
    /// Always use dark theme
    Dark,
    /// Always use light theme
    Light,
}

impl FromStr for ThemeMode {
    type Err = anyhow::Error;

    /// Parses "auto", "dark" or "light" (case-insensitive).
    fn from_str(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            other => anyhow::bail!("Invalid theme mode '{other}', expected auto, dark or light"),
        }
    }
}

impl ThemeMode {
    /// Lowercase name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

/// Spoken feedback settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrationConfig {
    /// Speak feedback at all
    pub enabled: bool,
    /// Speaking rate (0.1 - 10.0, 1.0 = normal)
    pub rate: f32,
    /// Voice pitch (0.0 - 2.0, 1.0 = normal)
    pub pitch: f32,
    /// Speech program template (e.g. "espeak-ng -s {wpm} -p {pitch}")
    pub speech_command: Option<String>,
}

impl Default for NarrationConfig {
    fn default() -> Self {
        let options = NarrationOptions::default();
        Self {
            enabled: true,
            rate: options.rate,
            pitch: options.pitch,
            speech_command: None,
        }
    }
}

impl NarrationConfig {
    /// Narration settings for the engine.
    #[must_use]
    pub const fn narration(&self) -> Narration {
        Narration {
            enabled: self.enabled,
            options: NarrationOptions {
                rate: self.rate,
                pitch: self.pitch,
            },
        }
    }
}

/// UI preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Show the key help line in the lesson player
    #[serde(default = "default_show_help")]
    pub show_help: bool,
    /// Theme mode preference (Auto/Dark/Light)
    #[serde(default)]
    pub theme_mode: ThemeMode,
}

fn default_show_help() -> bool {
    true
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_help: default_show_help(),
            theme_mode: ThemeMode::default(),
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/LazyCount/config.toml`
/// - macOS: `~/Library/Application Support/LazyCount/config.toml`
/// - Windows: `%APPDATA%\LazyCount\config.toml`
///
/// `LAZYCOUNT_CONFIG_DIR` replaces the directory when set.
///
/// # Validation
///
/// - narration rate in 0.1..=10.0, pitch in 0.0..=2.0
/// - speech command, if set, is not blank
/// - layout spacings positive and finite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Spoken feedback
    #[serde(default)]
    pub narration: NarrationConfig,
    /// Canvas origins and spacings
    #[serde(default)]
    pub layout: LayoutParams,
    /// UI preferences
    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the platform-specific config directory path.
    ///
    /// - Linux: `~/.config/LazyCount/`
    /// - macOS: `~/Library/Application Support/LazyCount/`
    /// - Windows: `%APPDATA%\LazyCount\`
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join("LazyCount");

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Gets the path of the log file written while the lesson player runs.
    pub fn log_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("lazycount.log"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(&config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        Self::from_toml(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save(&self) -> Result<()> {
        self.validate()?;

        // Ensure config directory exists
        let config_dir = Self::config_dir()?;
        fs::create_dir_all(&config_dir).context(format!(
            "Failed to create config directory: {}",
            config_dir.display()
        ))?;

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let config_path = Self::config_file_path()?;
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        // Atomic rename
        fs::rename(&temp_path, &config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        let narration = &self.narration;
        if !(0.1..=10.0).contains(&narration.rate) {
            anyhow::bail!(
                "Narration rate must be between 0.1 and 10.0, got {}",
                narration.rate
            );
        }
        if !(0.0..=2.0).contains(&narration.pitch) {
            anyhow::bail!(
                "Narration pitch must be between 0.0 and 2.0, got {}",
                narration.pitch
            );
        }
        if let Some(command) = &narration.speech_command {
            if command.trim().is_empty() {
                anyhow::bail!("Speech command must not be blank");
            }
        }

        self.layout.validate()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_new() {
        let config = Config::new();
        assert!(config.narration.enabled);
        assert!((config.narration.rate - 0.8).abs() < f32::EPSILON);
        assert!((config.narration.pitch - 1.1).abs() < f32::EPSILON);
        assert_eq!(config.narration.speech_command, None);
        assert_eq!(config.ui.theme_mode, ThemeMode::Auto);
        assert!(config.ui.show_help);
    }

    #[test]
    fn test_config_validate() {
        let config = Config::new();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validate_rate_and_pitch() {
        let mut config = Config::new();
        config.narration.rate = 0.0;
        assert!(config.validate().is_err());

        config.narration.rate = 1.0;
        config.narration.pitch = 2.5;
        assert!(config.validate().is_err());

        config.narration.pitch = 1.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validate_blank_speech_command() {
        let mut config = Config::new();
        config.narration.speech_command = Some("  ".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");

        let mut config = Config::new();
        config.narration.rate = 1.2;
        config.narration.speech_command = Some("espeak-ng -s {wpm}".to_string());
        config.ui.theme_mode = ThemeMode::Dark;

        // Manually save to temp location for testing
        let content = toml::to_string_pretty(&config).unwrap();
        fs::write(&config_file, content).unwrap();

        let content = fs::read_to_string(&config_file).unwrap();
        let loaded = Config::from_toml(&content).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_config_partial_file_uses_defaults() {
        let loaded = Config::from_toml("[narration]\nrate = 1.0\n").unwrap();
        assert!((loaded.narration.pitch - 1.1).abs() < f32::EPSILON);
        assert!(loaded.narration.enabled);
        assert_eq!(loaded.layout, LayoutParams::default());
    }

    #[test]
    fn test_config_invalid_layout_rejected() {
        assert!(Config::from_toml("[layout]\nline_spacing = -5.0\n").is_err());
    }

    #[test]
    fn test_theme_mode_parse() {
        assert_eq!("Dark".parse::<ThemeMode>().unwrap(), ThemeMode::Dark);
        assert_eq!(ThemeMode::from_str("auto").unwrap(), ThemeMode::Auto);
        assert!("purple".parse::<ThemeMode>().is_err());
    }

    #[test]
    fn test_narration_from_config() {
        let mut config = NarrationConfig::default();
        config.enabled = false;
        let narration = config.narration();
        assert!(!narration.enabled);
        assert!((narration.options.rate - 0.8).abs() < f32::EPSILON);
    }
}
