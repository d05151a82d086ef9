/*!
 * Tests for subtitle loading and parsing
 */

use std::path::Path;
use anyhow::Result;
use submerger::errors::SubtitleError;
use submerger::subtitle_processor::{EventKind, SubtitleEvent, SubtitleFormat, SubtitleTrack};
use crate::common;

/// Test format selection by extension
#[test]
fn test_format_from_path_withKnownExtensions_shouldIgnoreCase() {
    assert_eq!(SubtitleFormat::from_path(Path::new("a/b.srt")).unwrap(), SubtitleFormat::Srt);
    assert_eq!(SubtitleFormat::from_path(Path::new("b.SRT")).unwrap(), SubtitleFormat::Srt);
    assert_eq!(SubtitleFormat::from_path(Path::new("b.Ass")).unwrap(), SubtitleFormat::Ass);
}

#[test]
fn test_format_from_path_withUnknownExtension_shouldFailUnsupported() {
    let result = SubtitleFormat::from_path(Path::new("movie.vtt"));
    match result {
        Err(SubtitleError::UnsupportedFormat { extension, .. }) => assert_eq!(extension, "vtt"),
        other => panic!("expected UnsupportedFormat, got {:?}", other),
    }
    assert!(SubtitleFormat::from_path(Path::new("noext")).is_err());
}

/// Test ASS timestamp formatting
#[test]
fn test_format_ass_timestamp_withMilliseconds_shouldTruncateToCentiseconds() {
    assert_eq!(SubtitleEvent::format_ass_timestamp(3_723_456), "1:02:03.45");
    assert_eq!(SubtitleEvent::format_ass_timestamp(999), "0:00:00.99");
    assert_eq!(SubtitleEvent::format_ass_timestamp(-40), "0:00:00.00");
}

#[test]
fn test_parse_timestamp_withSrtAndAssNotation_shouldReturnMilliseconds() {
    assert_eq!(SubtitleEvent::parse_timestamp("01:23:45,678"), Some(5_025_678));
    assert_eq!(SubtitleEvent::parse_timestamp("1:23:45.67"), Some(5_025_670));
    assert_eq!(SubtitleEvent::parse_timestamp("not a time"), None);
}

#[test]
fn test_parse_timestamp_withHugeHourField_shouldReturnNone() {
    assert_eq!(SubtitleEvent::parse_timestamp("9999999999999:00:00.00"), None);
    assert_eq!(SubtitleEvent::parse_timestamp("99999999999999999999999:00:00.00"), None);
}

/// Test event display as an ASS line
#[test]
fn test_event_display_withStyle_shouldRenderDialogueLine() {
    let event = SubtitleEvent::new(500, 1500, "Hi\\Nthere").with_style("Right");
    assert_eq!(event.to_string(), "Dialogue: 0,0:00:00.50,0:00:01.50,Right,,0,0,0,,Hi\\Nthere");
}

/// Test SRT parsing
#[test]
fn test_parse_srt_string_withSampleContent_shouldNormalizeLineBreaks() {
    let events = SubtitleTrack::parse_srt_string(common::SAMPLE_SRT);

    assert_eq!(events.len(), 3);
    assert_eq!(events[0].start_ms, 1000);
    assert_eq!(events[0].end_ms, 4000);
    assert_eq!(events[0].text, "This is a test subtitle.");
    assert_eq!(events[1].text, "It contains\\Nmultiple lines.");
    assert_eq!(events[2].start_ms, 10_000);
    assert!(events.iter().all(|e| e.style == "Default" && e.kind == EventKind::Dialogue));
}

#[test]
fn test_parse_srt_string_withCrlfAndMissingIndex_shouldStillParse() {
    let content = "\u{feff}1\r\n00:00:01.500 --> 00:00:02,000\r\nFirst\r\n\r\n00:00:03,000 --> 00:00:04,000\r\nSecond\r\n";
    let events = SubtitleTrack::parse_srt_string(content);

    assert_eq!(events.len(), 2);
    assert_eq!(events[0].start_ms, 1500);
    assert_eq!(events[0].text, "First");
    assert_eq!(events[1].text, "Second");
}

#[test]
fn test_parse_srt_string_withBlockWithoutTimecode_shouldSkipIt() {
    let content = "1\nno timecode here\n\n2\n00:00:05,000 --> 00:00:06,000\nKept\n";
    let events = SubtitleTrack::parse_srt_string(content);

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].text, "Kept");
}

#[test]
fn test_parse_srt_string_withOverflowingHours_shouldSkipBlock() {
    let content = "1\n9999999999999:00:00,000 --> 9999999999999:00:01,000\nToo late\n\n2\n00:00:05,000 --> 00:00:06,000\nKept\n";
    let events = SubtitleTrack::parse_srt_string(content);

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].text, "Kept");
}

#[test]
fn test_parse_ass_string_withOverflowingHours_shouldSkipEvent() {
    let content = "[Events]\nFormat: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text\n\
Dialogue: 0,9999999999999:00:00.00,9999999999999:00:01.00,Default,,0,0,0,,Too late\n\
Dialogue: 0,0:00:01.00,0:00:02.00,Default,,0,0,0,,Kept\n";
    let events = SubtitleTrack::parse_ass_string(content);

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].text, "Kept");
}

#[test]
fn test_parse_srt_string_withUnorderedEntries_shouldKeepFileOrder() {
    let content = "1\n00:00:05,000 --> 00:00:06,000\nLater\n\n2\n00:00:01,000 --> 00:00:02,000\nEarlier\n";
    let events = SubtitleTrack::parse_srt_string(content);

    assert_eq!(events[0].text, "Later");
    assert_eq!(events[1].text, "Earlier");
}

/// Test ASS parsing
#[test]
fn test_parse_ass_string_withSampleContent_shouldKeepEventFields() {
    let events = SubtitleTrack::parse_ass_string(common::SAMPLE_ASS);

    assert_eq!(events.len(), 3);
    assert_eq!(events[0].start_ms, 2000);
    assert_eq!(events[0].end_ms, 3500);
    assert_eq!(events[0].text, "これはテストです。");

    assert_eq!(events[1].kind, EventKind::Comment);

    assert_eq!(events[2].layer, 1);
    assert_eq!(events[2].name, "Alice");
    assert_eq!(events[2].start_ms, 6250);
    assert_eq!(events[2].text, "Hello, world\\Nsecond line");
}

#[test]
fn test_parse_ass_string_withCustomFormatOrder_shouldFollowFormatLine() {
    let content = "[Events]\nFormat: Start, End, Text\nDialogue: 0:00:01.00,0:00:02.00,Short, sweet\n";
    let events = SubtitleTrack::parse_ass_string(content);

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].start_ms, 1000);
    assert_eq!(events[0].text, "Short, sweet");
}

#[test]
fn test_parse_ass_string_withoutEventsSection_shouldReturnEmpty() {
    let content = "[Script Info]\nDialogue: 0,0:00:01.00,0:00:02.00,Default,,0,0,0,,ignored\n";
    assert!(SubtitleTrack::parse_ass_string(content).is_empty());
}

/// Test loading from disk
#[test]
fn test_load_withUtf8Srt_shouldDetectAndParse() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "ja.srt", "1\n00:00:00,500 --> 00:00:01,500\nこんにちは\n")?;

    let track = SubtitleTrack::load(&path)?;

    assert_eq!(track.format, SubtitleFormat::Srt);
    assert_eq!(track.encoding, "UTF-8");
    assert_eq!(track.events.len(), 1);
    assert_eq!(track.events[0].text, "こんにちは");
    Ok(())
}

#[test]
fn test_load_withUtf16Bom_shouldDecodeWithBomEncoding() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let mut bytes = vec![0xFF, 0xFE];
    bytes.extend(common::SAMPLE_SRT.encode_utf16().flat_map(|unit| unit.to_le_bytes()));
    let path = temp_dir.path().join("wide.srt");
    std::fs::write(&path, bytes)?;

    let track = SubtitleTrack::load(&path)?;

    assert_eq!(track.encoding, "UTF-16LE");
    assert_eq!(track.events.len(), 3);
    assert_eq!(track.events[0].text, "This is a test subtitle.");
    Ok(())
}

#[test]
fn test_load_withWindows1252Srt_shouldDecodeLatinText() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let text = "Le café était très bon. C'était une journée agréable près de la fenêtre, déjà à l'été.";
    let (encoded, _, _) = encoding_rs::WINDOWS_1252.encode(text);
    let mut bytes = b"1\n00:00:01,000 --> 00:00:02,000\n".to_vec();
    bytes.extend_from_slice(&encoded);
    bytes.push(b'\n');
    let path = temp_dir.path().join("fr.srt");
    std::fs::write(&path, bytes)?;

    let track = SubtitleTrack::load(&path)?;

    assert_eq!(track.events.len(), 1);
    assert_eq!(track.events[0].text, text);
    Ok(())
}

#[test]
fn test_load_withInvalidUtf8AfterBom_shouldFailEncoding() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("broken.srt");
    std::fs::write(&path, [0xEF, 0xBB, 0xBF, b'1', b'\n', 0xC3, 0x28, 0xFF])?;

    match SubtitleTrack::load(&path) {
        Err(SubtitleError::Encoding { encoding, .. }) => assert_eq!(encoding, "UTF-8"),
        other => panic!("expected Encoding error, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_load_withEmptyFile_shouldFailEmptyFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "empty.srt", "")?;

    assert!(matches!(SubtitleTrack::load(&path), Err(SubtitleError::EmptyFile(_))));
    Ok(())
}

#[test]
fn test_load_withMissingFile_shouldFailIo() {
    let result = SubtitleTrack::load("definitely/not/here.srt");
    assert!(matches!(result, Err(SubtitleError::Io { .. })));
}

#[test]
fn test_load_withUnsupportedExtension_shouldFailBeforeReading() {
    let result = SubtitleTrack::load("definitely/not/here.sub");
    assert!(matches!(result, Err(SubtitleError::UnsupportedFormat { .. })));
}

#[test]
fn test_load_withAssFile_shouldUseAssParser() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_ass(temp_dir.path(), "ja.ass")?;

    let track = SubtitleTrack::load(&path)?;

    assert_eq!(track.format, SubtitleFormat::Ass);
    assert_eq!(track.events.len(), 3);
    Ok(())
}
