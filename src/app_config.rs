use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use clap::ValueEnum;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::chunking::Model;
use crate::timestamp_format::TimestampFormat;

/// Application configuration module
/// This module handles the application configuration including loading
/// and validating configuration settings shared by both tools.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Subtitle conversion settings
    #[serde(default)]
    pub subtitle: SubtitleConfig,

    /// Chunking settings
    #[serde(default)]
    pub chunking: ChunkingConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Configuration for subtitle conversion
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SubtitleConfig {
    /// JSON indentation width
    #[serde(default = "default_indent")]
    pub indent: usize,

    /// Timestamp pattern for text output
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,

    /// Whether to round timestamps to whole seconds
    #[serde(default)]
    pub round_to_seconds: bool,

    /// Merge entries into windows of this many seconds
    #[serde(default)]
    pub merge_window_secs: Option<u64>,
}

impl Default for SubtitleConfig {
    fn default() -> Self {
        Self {
            indent: default_indent(),
            timestamp_format: default_timestamp_format(),
            round_to_seconds: false,
            merge_window_secs: None,
        }
    }
}

/// Configuration for token-aware chunking
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChunkingConfig {
    /// Maximum tokens per chunk
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,

    /// Model whose tokenizer measures chunks
    #[serde(default)]
    pub model: Model,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_tokens: default_max_tokens(),
            model: Model::default(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

// @const: Widest JSON indent we accept
const MAX_INDENT: usize = 16;

fn default_indent() -> usize {
    2
}

fn default_timestamp_format() -> String {
    "HH:MM:SS".to_string()
}

fn default_max_tokens() -> usize {
    800
}

impl Config {
    /// Load configuration from `path`, falling back to defaults when the file is absent
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("Config file not found at {:?}, using defaults", path);
            return Ok(Config::default());
        }

        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {:?}", path))?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.chunking.max_tokens == 0 {
            return Err(anyhow!("chunking.max_tokens must be positive"));
        }

        if self.subtitle.merge_window_secs == Some(0) {
            return Err(anyhow!("subtitle.merge_window_secs must be positive"));
        }

        if self.subtitle.indent > MAX_INDENT {
            return Err(anyhow!(
                "subtitle.indent must be at most {}, got {}",
                MAX_INDENT,
                self.subtitle.indent
            ));
        }

        self.subtitle
            .timestamp_format
            .parse::<TimestampFormat>()
            .map_err(|e| anyhow!("subtitle.timestamp_format: {}", e))?;

        Ok(())
    }
}
