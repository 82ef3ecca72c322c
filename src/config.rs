//! Configuration loading and types for vibevox
//!
//! Configuration is loaded in layers:
//! 1. Built-in defaults
//! 2. Config file (~/.config/vibevox/config.toml)
//! 3. CLI arguments (highest priority, applied in main.rs)

use crate::error::VibevoxError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub audio: AudioConfig,
    #[serde(default)]
    pub whisper: WhisperConfig,
}

/// Audio capture configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AudioConfig {
    /// Input device name or "default"
    #[serde(default = "default_device")]
    pub device: String,

    /// Target sample rate in Hz
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            device: default_device(),
            sample_rate: default_sample_rate(),
        }
    }
}

/// Whisper transcription configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WhisperConfig {
    /// Model size name (validated against ModelSize at startup)
    #[serde(default = "default_model")]
    pub model: String,

    /// Language code, or "auto" for auto-detection
    #[serde(default = "default_language")]
    pub language: String,

    /// Number of CPU threads for inference (None = auto)
    #[serde(default)]
    pub threads: Option<usize>,
}

impl Default for WhisperConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            language: default_language(),
            threads: None,
        }
    }
}

fn default_device() -> String {
    "default".to_string()
}

fn default_sample_rate() -> u32 {
    16000
}

fn default_model() -> String {
    "base".to_string()
}

fn default_language() -> String {
    "auto".to_string()
}

impl Config {
    /// Default config file path (~/.config/vibevox/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("vibevox").join("config.toml"))
    }

    /// Directory where downloaded ggml models are stored
    pub fn models_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vibevox")
            .join("models")
    }
}

/// Load configuration from the given path, or the default location.
///
/// A missing config file is not an error; defaults apply. A file that
/// exists but fails to parse is a configuration error.
pub fn load_config(path: Option<&Path>) -> Result<Config, VibevoxError> {
    let path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => Config::default_path(),
    };

    let Some(path) = path else {
        return Ok(Config::default());
    };

    if !path.exists() {
        tracing::debug!("No config file at {:?}, using defaults", path);
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(&path)?;
    let config: Config = toml::from_str(&content)
        .map_err(|e| VibevoxError::Config(format!("{}: {}", path.display(), e)))?;

    tracing::debug!("Loaded config from {:?}", path);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The annotated template documented in the README
    const CONFIG_TEMPLATE: &str = r#"# Vibevox Configuration
#
# Location: ~/.config/vibevox/config.toml
# All settings can be overridden via CLI flags

[audio]
# Audio input device ("default" uses the system default)
# List devices with: vibevox --list-devices
device = "default"

# Sample rate in Hz (whisper expects 16000)
sample_rate = 16000

[whisper]
# Model size: tiny, base, small, medium, large, large-v2, large-v3
model = "base"

# Language code to force (e.g. "en"), or "auto" for auto-detection
language = "auto"

# Number of CPU threads for inference (omit for auto-detection)
# threads = 4
"#;

    #[test]
    fn test_documented_template_matches_defaults() {
        let config: Config = toml::from_str(CONFIG_TEMPLATE).unwrap();
        assert_eq!(config.audio.device, "default");
        assert_eq!(config.audio.sample_rate, 16000);
        assert_eq!(config.whisper.model, "base");
        assert_eq!(config.whisper.language, "auto");
        assert!(config.whisper.threads.is_none());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.audio.sample_rate, 16000);
        assert_eq!(config.whisper.model, "base");
    }

    #[test]
    fn test_partial_config() {
        let config: Config = toml::from_str("[whisper]\nmodel = \"small\"\nthreads = 2\n").unwrap();
        assert_eq!(config.whisper.model, "small");
        assert_eq!(config.whisper.threads, Some(2));
        assert_eq!(config.audio.device, "default");
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let config = load_config(Some(Path::new("/nonexistent/vibevox.toml"))).unwrap();
        assert_eq!(config.whisper.model, "base");
    }
}
