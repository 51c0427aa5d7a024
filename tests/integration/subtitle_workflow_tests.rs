/*!
 * Integration tests for subtitle conversion workflow
 */

use anyhow::Result;

use svb2json::file_utils::FileManager;
use svb2json::subtitle_processor::SubtitleCollection;
use svb2json::timestamp_format::TimestampFormat;

use crate::common;

/// Load, merge and render a subtitle file the way the CLI does
#[test]
fn test_subtitle_workflow_withMerge_shouldProduceOneLine() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_subtitle(temp_dir.path(), "test.sbv")?;

    let content = FileManager::read_to_string(&path)?;
    let collection = SubtitleCollection::from_sbv(path.clone(), &content)?.merged(10);
    let text = collection.to_text(&TimestampFormat::default(), false);

    assert_eq!(text, "[00:00:01–00:00:09] First subtitle Second subtitle Third subtitle");
    Ok(())
}

#[test]
fn test_subtitle_workflow_withJsonOutput_shouldRoundTripThroughSerde() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_subtitle(temp_dir.path(), "test.sbv")?;

    let content = FileManager::read_to_string(&path)?;
    let collection = SubtitleCollection::from_sbv(path.clone(), &content)?;
    let output = temp_dir.path().join("out").join("test.json");
    FileManager::write_to_file(&output, &collection.to_json(2, false)?)?;

    let value: serde_json::Value = serde_json::from_str(&FileManager::read_to_string(&output)?)?;
    let entries = value.as_array().cloned().unwrap_or_default();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["id"], 1);
    assert_eq!(entries[0]["text"], "First subtitle");
    assert_eq!(entries[2]["start"], 7000);
    assert_eq!(entries[2]["end"], 9000);
    Ok(())
}

#[test]
fn test_subtitle_workflow_withSecondsAndWindows_shouldCombineOptions() -> Result<()> {
    let content = "0:00:00.500,0:00:01.200\nOne\n\n0:00:01.500,0:00:04.000\nTwo\n\n0:00:25.000,0:00:26.400\nThree\n";
    let collection = SubtitleCollection::from_sbv("talk.sbv".into(), content)?.merged(20);

    let value: serde_json::Value = serde_json::from_str(&collection.to_json(2, true)?)?;
    assert_eq!(value[0]["start"], 1);
    assert_eq!(value[0]["end"], 4);
    assert_eq!(value[0]["text"], "One Two");
    assert_eq!(value[1]["id"], 2);
    assert_eq!(value[1]["end"], 26);
    Ok(())
}
