//! Configuration file parser for ~/.config/bookfeed/config.toml.
//!
//! The config file is optional — a missing file yields `Config::default()`.
//! Unknown keys are silently ignored by serde, though we log a warning when
//! the file contains potential typos.
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config file exceeds the maximum allowed size.
    #[error("Config file too large: {0}")]
    TooLarge(String),
}

// ============================================================================
// Configuration Struct
// ============================================================================

/// Top-level application configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be
/// specified. Missing keys fall back to `Default::default()`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Stories appended per page load.
    pub page_size: usize,

    /// Page cap per session; the feed exhausts once a load would exceed it.
    pub max_pages: u32,

    /// Simulated load latency in milliseconds. 0 = instant.
    pub load_delay_ms: u64,

    /// Starting category filter label ("전체" or a category name).
    pub category: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_size: crate::feed::DEFAULT_PAGE_SIZE,
            max_pages: crate::feed::DEFAULT_MAX_PAGES,
            load_delay_ms: 1000,
            category: crate::feed::ALL_LABEL.to_string(),
        }
    }
}

impl Config {
    /// Maximum config file size (1 MB). Guards against reading a corrupted
    /// or maliciously large file into memory.
    const MAX_FILE_SIZE: u64 = 1_048_576;

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Unknown keys → accepted, logged as a warning
    ///
    /// Out-of-range values are clamped by [`Config::validated`], which this
    /// calls before returning.
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

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // Race: file deleted between metadata and read
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Ok(Self::default());
        }

        // Parse as a raw table first to warn about unknown keys
        if let Ok(raw) = content.parse::<toml::Table>() {
            let known_keys = ["page_size", "max_pages", "load_delay_ms", "category"];
            for key in raw.keys() {
                if !known_keys.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(&content)?;
        tracing::info!(
            path = %path.display(),
            page_size = config.page_size,
            max_pages = config.max_pages,
            "Loaded configuration"
        );
        Ok(config.validated())
    }

    /// Clamp out-of-range values to usable ones, warning about each fix.
    ///
    /// A zero page size or page cap would make the feed degenerate (no
    /// stories could ever load), so both are floored at 1.
    pub fn validated(mut self) -> Self {
        if self.page_size == 0 {
            tracing::warn!("page_size must be at least 1, using 1");
            self.page_size = 1;
        }
        if self.max_pages == 0 {
            tracing::warn!("max_pages must be at least 1, using 1");
            self.max_pages = 1;
        }
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
