use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::timecode;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Start of the synthesized timeline for inputs without timing
    #[serde(default = "default_start_time")]
    pub start_time: String,

    /// Duration in milliseconds assigned to each untimed entry
    #[serde(default = "default_duration_per_entry_ms")]
    pub duration_per_entry_ms: u64,

    /// Whether to synthesize timecodes for entries lacking them
    #[serde(default = "default_synthesize_timecodes")]
    pub synthesize_timecodes: bool,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log level configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    // @level: Errors only
    Error,
    // @level: Errors and warnings
    Warn,
    // @level: Default level
    #[default]
    Info,
    // @level: Verbose diagnostics
    Debug,
    // @level: Everything
    Trace,
}

impl LogLevel {
    // @returns: Matching log crate filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_start_time() -> String {
    timecode::DEFAULT_START_TIME.to_string()
}

fn default_duration_per_entry_ms() -> u64 {
    timecode::DEFAULT_ENTRY_DURATION_MS
}

fn default_synthesize_timecodes() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Config {
            start_time: default_start_time(),
            duration_per_entry_ms: default_duration_per_entry_ms(),
            synthesize_timecodes: default_synthesize_timecodes(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Validate the configuration values
    pub fn validate(&self) -> Result<()> {
        if !timecode::TIMESTAMP_PATTERN.is_match(&self.start_time) {
            return Err(anyhow!(
                "Invalid start_time '{}', expected HH:MM:SS,mmm",
                self.start_time
            ));
        }

        if self.duration_per_entry_ms == 0 {
            return Err(anyhow!("duration_per_entry_ms must be greater than zero"));
        }

        Ok(())
    }
}
