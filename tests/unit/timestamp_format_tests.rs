/*!
 * Tests for timestamp pattern parsing and formatting
 */

use anyhow::Result;
use svb2json::errors::SubtitleError;
use svb2json::timestamp_format::{TimestampFormat, TimestampLayout};

fn format(pattern: &str, ms: u64) -> Result<String> {
    let format: TimestampFormat = pattern.parse()?;
    Ok(format.format(ms))
}

#[test]
fn test_format_withHoursMinutesSeconds_shouldPadFields() -> Result<()> {
    assert_eq!(format("HH:MM:SS", 3_661_000)?, "01:01:01");
    assert_eq!(format("HH:MM:SS", 0)?, "00:00:00");
    Ok(())
}

#[test]
fn test_format_withLargeHours_shouldGrowHoursField() -> Result<()> {
    assert_eq!(format("HH:MM:SS", 360_000_000)?, "100:00:00");
    Ok(())
}

#[test]
fn test_format_withMillisSuffix_shouldAppendMillis() -> Result<()> {
    assert_eq!(format("HH:MM:SS.Mi", 3_661_042)?, "01:01:01.042");
    assert_eq!(format("HH:MM.Mi", 3_661_042)?, "01:01.042");
    assert_eq!(format("SS.Mi", 5_007)?, "05.007");
    Ok(())
}

#[test]
fn test_format_withTotalUnits_shouldUseTotals() -> Result<()> {
    assert_eq!(format("SS", 3_661_000)?, "3661");
    assert_eq!(format("SS", 5_000)?, "05");
    assert_eq!(format("MM", 3_661_000)?, "61");
    assert_eq!(format("HH:MM", 3_661_000)?, "01:01");
    Ok(())
}

#[test]
fn test_format_withRawMillis_shouldNotPad() -> Result<()> {
    assert_eq!(format("Mi", 1000)?, "1000");
    assert_eq!(format("Mi", 7)?, "7");
    Ok(())
}

#[test]
fn test_parse_withEveryOfferedPattern_shouldSucceed() {
    for pattern in TimestampFormat::PATTERNS {
        assert!(pattern.parse::<TimestampFormat>().is_ok(), "{} should parse", pattern);
    }
}

#[test]
fn test_parse_withDefault_shouldBeHoursMinutesSeconds() {
    let format = TimestampFormat::default();
    assert_eq!(format.layout, TimestampLayout::HoursMinutesSeconds);
    assert!(!format.with_millis);
}

#[test]
fn test_parse_withUnknownBase_shouldNameToken() {
    match "HH:XX:SS".parse::<TimestampFormat>() {
        Err(SubtitleError::Format { token }) => assert_eq!(token, "HH:XX:SS"),
        other => panic!("expected a format error, got {:?}", other),
    }
}

#[test]
fn test_parse_withUnknownSuffix_shouldNameSuffix() {
    match "HH:MM:SS.ms".parse::<TimestampFormat>() {
        Err(SubtitleError::Format { token }) => assert_eq!(token, "ms"),
        other => panic!("expected a format error, got {:?}", other),
    }
}

#[test]
fn test_parse_withEmptyPattern_shouldFail() {
    assert!("".parse::<TimestampFormat>().is_err());
}
