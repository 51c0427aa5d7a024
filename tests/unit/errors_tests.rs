/*!
 * Tests for error types and conversions
 */

use svb2json::errors::{ChunkError, SubtitleError};

#[test]
fn test_subtitleError_parse_shouldDisplayLineAndContent() {
    let error = SubtitleError::Parse {
        line: 12,
        content: "0:00:01.000-0:00:02.000".to_string(),
        reason: "expected a timestamp line".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("line 12"));
    assert!(display.contains("0:00:01.000-0:00:02.000"));
}

#[test]
fn test_subtitleError_format_shouldNameToken() {
    let error = SubtitleError::Format { token: "XX".to_string() };
    assert!(format!("{}", error).contains("\"XX\""));
}

#[test]
fn test_chunkError_unsupportedStructure_shouldNameKind() {
    let error = ChunkError::UnsupportedStructure { kind: "number" };
    assert!(format!("{}", error).contains("number"));
}

#[test]
fn test_chunkError_fromSerdeError_shouldWrapAsInvalidJson() {
    let source = serde_json::from_str::<serde_json::Value>("[1,").unwrap_err();
    let error: ChunkError = source.into();
    assert!(matches!(error, ChunkError::InvalidJson(_)));
    assert!(format!("{}", error).starts_with("Invalid JSON"));
}

#[test]
fn test_subtitleError_intoAnyhow_shouldKeepMessage() {
    let error: anyhow::Error = SubtitleError::InvalidMergeWindow(-5).into();
    assert!(format!("{}", error).contains("-5"));
    assert!(error.downcast_ref::<SubtitleError>().is_some());
}
