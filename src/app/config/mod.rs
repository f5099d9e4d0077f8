// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration: user preferences
//! read from a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! The configuration is organized into logical sections:
//! - `[general]` - UI language
//! - `[slideshow]` - Autoplay slide duration
//! - `[music]` - Background music volume and starting track
//! - `[story]` - Story generator model, temperature and endpoint
//!
//! The story API key is never read from the file; see [`story_api_key`].
//!
//! # Path Resolution
//!
//! The config file location can be customized for testing or portable deployments:
//! 1. Use `load_from_path()` with explicit path
//! 2. Pass `--config-dir` or set `WONDER_LENS_CONFIG_DIR`
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use wonder_lens::app::config;
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (config, _warning) = config::load();
//! let slide = config.slide_duration();
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::domain::music::Volume;
use crate::domain::ui::SlideDuration;
use crate::error::{Error, Result};
use crate::infrastructure::gemini::GeminiSettings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Slideshow settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SlideshowConfig {
    /// Time each photo stays on screen during autoplay (milliseconds).
    #[serde(
        default = "default_slide_duration_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub slide_duration_ms: Option<u64>,
}

impl Default for SlideshowConfig {
    fn default() -> Self {
        Self {
            slide_duration_ms: default_slide_duration_ms(),
        }
    }
}

/// Background music settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MusicConfig {
    /// Playback volume (0.0 to 1.0).
    #[serde(default = "default_volume", skip_serializing_if = "Option::is_none")]
    pub volume: Option<f32>,

    /// Index of the track loaded at startup.
    #[serde(
        default = "default_start_track",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_track: Option<usize>,
}

impl Default for MusicConfig {
    fn default() -> Self {
        Self {
            volume: default_volume(),
            start_track: default_start_track(),
        }
    }
}

/// Story generator settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoryConfig {
    #[serde(default = "default_story_model")]
    pub model: String,

    #[serde(
        default = "default_story_temperature",
        skip_serializing_if = "Option::is_none"
    )]
    pub temperature: Option<f32>,

    /// Root of the REST API.
    #[serde(default = "default_story_endpoint")]
    pub endpoint: String,
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            model: default_story_model(),
            temperature: default_story_temperature(),
            endpoint: default_story_endpoint(),
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub slideshow: SlideshowConfig,

    #[serde(default)]
    pub music: MusicConfig,

    #[serde(default)]
    pub story: StoryConfig,
}

impl Config {
    /// Slide duration, clamped to the supported range.
    #[must_use]
    pub fn slide_duration(&self) -> SlideDuration {
        SlideDuration::from_millis(
            self.slideshow
                .slide_duration_ms
                .unwrap_or(DEFAULT_SLIDE_DURATION_MS),
        )
    }

    #[must_use]
    pub fn music_volume(&self) -> Volume {
        Volume::new(self.music.volume.unwrap_or(DEFAULT_MUSIC_VOLUME))
    }

    /// Starting track; the music controller clamps it into the playlist.
    #[must_use]
    pub fn start_track(&self) -> usize {
        self.music.start_track.unwrap_or(DEFAULT_START_TRACK)
    }

    /// Story temperature, clamped to what the API accepts.
    #[must_use]
    pub fn story_temperature(&self) -> f32 {
        let temperature = self
            .story
            .temperature
            .filter(|t| t.is_finite())
            .unwrap_or(DEFAULT_STORY_TEMPERATURE);
        temperature.clamp(MIN_STORY_TEMPERATURE, MAX_STORY_TEMPERATURE)
    }

    /// Builds the story client settings around `api_key`.
    #[must_use]
    pub fn gemini_settings(&self, api_key: Option<String>) -> GeminiSettings {
        GeminiSettings {
            endpoint: self.story.endpoint.clone(),
            model: self.story.model.clone(),
            temperature: self.story_temperature(),
            api_key,
        }
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_slide_duration_ms() -> Option<u64> {
    Some(DEFAULT_SLIDE_DURATION_MS)
}

fn default_volume() -> Option<f32> {
    Some(DEFAULT_MUSIC_VOLUME)
}

fn default_start_track() -> Option<usize> {
    Some(DEFAULT_START_TRACK)
}

fn default_story_model() -> String {
    DEFAULT_STORY_MODEL.to_string()
}

fn default_story_temperature() -> Option<f32> {
    Some(DEFAULT_STORY_TEMPERATURE)
}

fn default_story_endpoint() -> String {
    DEFAULT_STORY_ENDPOINT.to_string()
}

// =============================================================================
// Story API Key
// =============================================================================

/// Reads the story API key from the environment.
///
/// Returns the first non-empty value of [`STORY_API_KEY_VARS`].
#[must_use]
pub fn story_api_key() -> Option<String> {
    story_api_key_from(|name| std::env::var(name).ok())
}

fn story_api_key_from(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    STORY_API_KEY_VARS
        .iter()
        .filter_map(|name| lookup(name))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config file path with an optional override.
fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with the i18n key of a warning.
#[must_use]
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
#[must_use]
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "config could not be loaded");
                    return (
                        Config::default(),
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Writes configuration to a specific path, creating parent directories.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;
    use std::time::Duration;
    use tempfile::tempdir;

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.slide_duration().as_duration(), Duration::from_secs(3));
        assert_abs_diff_eq!(config.music_volume().value(), 0.5);
        assert_eq!(config.start_track(), 0);
        assert_abs_diff_eq!(config.story_temperature(), 0.8);
        assert_eq!(config.story.model, "gemini-3-flash-preview");
        assert!(config.general.language.is_none());
    }

    #[test]
    fn missing_sections_take_defaults() {
        let config: Config = toml::from_str("[music]\nvolume = 0.25\n").expect("valid toml");
        assert_abs_diff_eq!(config.music_volume().value(), 0.25);
        assert_eq!(config.start_track(), 0);
        assert_eq!(config.slideshow, SlideshowConfig::default());
        assert_eq!(config.story, StoryConfig::default());
    }

    #[test]
    fn out_of_range_values_are_clamped_on_use() {
        let config: Config = toml::from_str(
            "[slideshow]\nslide_duration_ms = 10\n[music]\nvolume = 4.0\n[story]\ntemperature = 9.0\n",
        )
        .expect("valid toml");
        assert_eq!(config.slide_duration().as_duration(), Duration::from_secs(1));
        assert_abs_diff_eq!(config.music_volume().value(), 1.0);
        assert_abs_diff_eq!(config.story_temperature(), MAX_STORY_TEMPERATURE);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&path, "[music\nvolume = ").expect("write");
        assert!(matches!(load_from_path(&path), Err(Error::Config(_))));
    }

    #[test]
    fn load_with_override_warns_on_broken_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "not = [valid").expect("write");
        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert_eq!(warning.as_deref(), Some("notification-config-load-error"));
    }

    #[test]
    fn load_with_override_without_file_is_silent() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn api_key_lookup_order_and_blank_values() {
        let key = story_api_key_from(|name| match name {
            "GEMINI_API_KEY" => Some("  ".to_string()),
            "API_KEY" => Some("fallback".to_string()),
            _ => None,
        });
        assert_eq!(key.as_deref(), Some("fallback"));

        let key = story_api_key_from(|name| (name == "GEMINI_API_KEY").then(|| "primary".into()));
        assert_eq!(key.as_deref(), Some("primary"));

        assert!(story_api_key_from(|_| None).is_none());
    }

    #[test]
    fn gemini_settings_carry_story_section() {
        let mut config = Config::default();
        config.story.endpoint = "http://localhost:8080".into();
        let settings = config.gemini_settings(Some("k".into()));
        assert_eq!(settings.endpoint, "http://localhost:8080");
        assert_eq!(settings.api_key.as_deref(), Some("k"));
        assert_abs_diff_eq!(settings.temperature, 0.8);
    }
}
