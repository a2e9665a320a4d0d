//! Configuration management for kousei
//!
//! Handles loading and parsing of the `kousei.toml` configuration file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = "kousei.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// User dictionary settings
    #[serde(default)]
    pub dictionary: DictionaryConfig,

    /// Which checkers run
    #[serde(default)]
    pub checker: CheckerConfig,

    /// Readability thresholds and rule toggles
    #[serde(default)]
    pub readability: ReadabilityConfig,
}

/// User dictionary configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct DictionaryConfig {
    /// Path to a YAML, JSON or plain word-list dictionary
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Checker selection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckerConfig {
    /// Technical term typos and Japanese phrase corrections
    #[serde(default = "default_true")]
    pub typo: bool,

    /// Proper nouns from the built-in and user dictionary
    #[serde(default = "default_true")]
    pub proper_noun: bool,

    /// Per-line readability rules
    #[serde(default = "default_true")]
    pub readability: bool,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            typo: true,
            proper_noun: true,
            readability: true,
        }
    }
}

/// Readability rule configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReadabilityConfig {
    /// Longest accepted sentence, in characters
    #[serde(default = "default_max_sentence_length")]
    pub max_sentence_length: usize,

    /// Most 、 accepted on one line
    #[serde(default = "default_max_commas")]
    pub max_commas: usize,

    #[serde(default = "default_true")]
    pub sentence_length: bool,

    /// Runs like 「がを」
    #[serde(default = "default_true")]
    pub consecutive_particles: bool,

    /// Same particle used twice on a line
    #[serde(default = "default_true")]
    pub duplicate_particle: bool,

    #[serde(default = "default_true")]
    pub comma_density: bool,

    #[serde(default = "default_true")]
    pub long_vowel: bool,

    /// Half-width next to full-width digits or letters
    #[serde(default = "default_true")]
    pub mixed_width: bool,

    /// Space after ！ and ？
    #[serde(default = "default_true")]
    pub punctuation_spacing: bool,

    /// Space between Japanese and ASCII alphanumerics
    #[serde(default = "default_true")]
    pub alphanumeric_spacing: bool,
}

impl Default for ReadabilityConfig {
    fn default() -> Self {
        Self {
            max_sentence_length: default_max_sentence_length(),
            max_commas: default_max_commas(),
            sentence_length: true,
            consecutive_particles: true,
            duplicate_particle: true,
            comma_density: true,
            long_vowel: true,
            mixed_width: true,
            punctuation_spacing: true,
            alphanumeric_spacing: true,
        }
    }
}

fn default_max_sentence_length() -> usize {
    120
}

fn default_max_commas() -> usize {
    4
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from file; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        // Dictionary paths are relative to the config file
        if let (Some(dict), Some(dir)) = (config.dictionary.path.as_mut(), path.parent()) {
            if dict.is_relative() && !dir.as_os_str().is_empty() {
                *dict = dir.join(&*dict);
            }
        }

        Ok(config)
    }

    /// Get default config file path
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "kousei").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the working directory or the user config dir
    pub fn load_from_default() -> Self {
        // Try workspace path first
        let workspace_path = PathBuf::from(CONFIG_FILE_NAME);
        if workspace_path.exists() {
            match Self::load(&workspace_path) {
                Ok(config) => return config,
                Err(e) => tracing::warn!("Ignoring {}: {}", workspace_path.display(), e),
            }
        }

        // Try user config directory
        if let Some(default_path) = Self::default_path() {
            match Self::load(&default_path) {
                Ok(config) => return config,
                Err(e) => tracing::warn!("Ignoring {}: {}", default_path.display(), e),
            }
        }

        Config::default()
    }
}
