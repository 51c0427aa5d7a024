/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use svb2json::app_config::{Config, LogLevel};
use svb2json::chunking::Model;

use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.subtitle.indent, 2);
    assert_eq!(config.subtitle.timestamp_format, "HH:MM:SS");
    assert!(!config.subtitle.round_to_seconds);
    assert_eq!(config.subtitle.merge_window_secs, None);
    assert_eq!(config.chunking.max_tokens, 800);
    assert_eq!(config.chunking.model, Model::Gpt5);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

/// Test configuration validation
#[test]
fn test_config_validation_withInvalidValues_shouldFail() {
    let mut config = Config::default();
    config.chunking.max_tokens = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.subtitle.merge_window_secs = Some(0);
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.subtitle.timestamp_format = "YY".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.subtitle.indent = 40;
    assert!(config.validate().is_err());
}

#[test]
fn test_load_or_default_withMissingFile_shouldUseDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = Config::load_or_default(temp_dir.path().join("missing.json"))?;
    assert_eq!(config.chunking.max_tokens, 800);
    Ok(())
}

#[test]
fn test_load_or_default_withPartialFile_shouldFillDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "conf.json",
        r#"{"chunking": {"model": "GPT-4", "max_tokens": 500}, "log_level": "debug"}"#,
    )?;

    let config = Config::load_or_default(&path)?;

    assert_eq!(config.chunking.model, Model::Gpt4);
    assert_eq!(config.chunking.max_tokens, 500);
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.subtitle.indent, 2);
    Ok(())
}

#[test]
fn test_load_or_default_withMalformedFile_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{ not json")?;
    assert!(Config::load_or_default(&path).is_err());
    Ok(())
}

#[test]
fn test_config_serialization_shouldRoundTrip() -> Result<()> {
    let mut config = Config::default();
    config.subtitle.merge_window_secs = Some(20);
    config.chunking.model = Model::Codex;

    let json = serde_json::to_string_pretty(&config)?;
    let parsed: Config = serde_json::from_str(&json)?;

    assert_eq!(parsed.subtitle.merge_window_secs, Some(20));
    assert_eq!(parsed.chunking.model, Model::Codex);
    Ok(())
}
