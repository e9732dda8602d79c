//! Configuration file parser for ~/.config/podview/config.toml.
//!
//! The config file is optional. A missing or empty file yields
//! `Config::default()`. Unknown keys are ignored with a warning.
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::feed::DEFAULT_MAX_DEPTH;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file")]
    Parse(#[from] toml::de::Error),

    /// SEC-014: Config file exceeds maximum allowed size.
    #[error("Config file too large: {0}")]
    TooLarge(String),
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// How the resolved podcast list is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed JSON array
    #[default]
    Json,
    /// Human-readable listing
    Text,
}

/// Top-level configuration. Any subset of keys may be given.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output format when `--format` is not passed.
    pub format: OutputFormat,

    /// Sort podcasts by title before printing.
    pub sort_by_title: bool,

    /// Column budget for podcast and episode titles in text output.
    pub title_width: usize,

    /// Maximum element nesting accepted in an OPML document.
    pub max_outline_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            sort_by_title: false,
            title_width: 60,
            max_outline_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Config {
    /// SEC-014: Maximum config file size (64 KiB).
    const MAX_FILE_SIZE: u64 = 65_536;

    const KNOWN_KEYS: [&'static str; 4] = [
        "format",
        "sort_by_title",
        "title_width",
        "max_outline_depth",
    ];

    /// Default location, `$HOME/.config/podview/config.toml`.
    ///
    /// `None` when `HOME` is unset.
    pub fn default_path() -> Option<PathBuf> {
        let home = std::env::var_os("HOME")?;
        Some(
            PathBuf::from(home)
                .join(".config")
                .join("podview")
                .join("config.toml"),
        )
    }

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)`
    /// - Unknown keys → accepted, logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            for key in raw.keys() {
                if !Self::KNOWN_KEYS.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(&content)?;
        tracing::info!(path = %path.display(), format = ?config.format, "Loaded configuration");
        Ok(config)
    }
}

// ============================================================================
// Tests
// ============================================================================
