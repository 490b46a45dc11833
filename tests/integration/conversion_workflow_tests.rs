/*!
 * End-to-end conversion workflow tests
 */

use anyhow::Result;
use srtext::app_config::Config;
use srtext::app_controller::{Controller, Direction};
use srtext::file_utils::FileManager;
use srtext::srt_processor::{convert_to_text, parse_srt, SubtitleEntry};
use srtext::text_processor::{convert_to_srt, generate_time_codes, parse_text};
use crate::common;

/// Test the SRT -> text -> SRT round-trip is stable on content and timing
/// for single-line cues
#[test]
fn test_round_trip_withSingleLineCues_shouldPreserveTextAndTiming() {
    let entries = vec![
        SubtitleEntry::new(1, "00:00:01,000", "00:00:03,500", "Hello world"),
        SubtitleEntry::new(2, "00:00:04,000", "00:00:06,000", "Second cue"),
    ];

    let annotated = convert_to_text(&entries);
    let text_entries = parse_text(&annotated);
    let srt = convert_to_srt(&text_entries);

    let reparsed = parse_srt(&srt);
    assert_eq!(reparsed.len(), entries.len());
    for (before, after) in entries.iter().zip(&reparsed) {
        assert_eq!(before.text, after.text);
        assert_eq!(before.start_time, after.start_time);
        assert_eq!(before.end_time, after.end_time);
    }
}

/// Test the annotated round-trip is idempotent after one application:
/// converting annotated text to SRT, back to annotated text through the SRT
/// parser, and to SRT again reproduces the first SRT output exactly
#[test]
fn test_round_trip_withAnnotatedText_shouldBeIdempotent() {
    let input = "Time: 00:00:01,000 --> 00:00:03,000\nContent: Hello\nSubtitle: Hello\n\nTime: 00:00:04.000 --> 00:00:06.000\nSubtitle: World\n";

    let first_srt = convert_to_srt(&parse_text(input));
    let annotated = convert_to_text(&parse_srt(&first_srt));
    let second_srt = convert_to_srt(&parse_text(&annotated));

    assert_eq!(first_srt, second_srt);
}

/// Test text to SRT with missing times and explicit synthesis parameters
#[test]
fn test_text_to_srt_withSynthesizedTimes_shouldMatchExpectedOutput() {
    let entries = parse_text("Subtitle: Hi\n\nSubtitle: There");
    let timed = generate_time_codes(&entries, "00:00:00,000", 2000);
    let srt = convert_to_srt(&timed);

    assert_eq!(
        srt,
        "1\n00:00:00,000 --> 00:00:02,000\nHi\n\n2\n00:00:02,000 --> 00:00:04,000\nThere"
    );
}

/// Test no transformation panics or errors on adversarial inputs
#[test]
fn test_all_transformations_withAdversarialInput_shouldNeverPanic() {
    let inputs = [
        "",
        "\n\n\n",
        "1",
        "1\n2\n3\n4",
        "Time:",
        "字幕:",
        "Time: 99:99:99,999 --> 00:00:00,000\nSubtitle: backwards",
        "1\n00:00:01,000 --> 00:00:02,000\n\n\n2",
        "🎬\u{0}\u{7f}\nTime: --> \nContent:",
        "1\n00:00:01,000 --> 00:00:02,000\nokay\n\nnot okay at all",
        "9999999999999999:00:00,000",
        "Time: 9999999999999999:00:00,000 --> 00:00:05,000\nSubtitle: huge",
        "1\n18446744073709551615:00:00,000 --> 00:00:02,000\nhuge hours",
    ];

    for input in inputs {
        let srt_entries = parse_srt(input);
        let _ = convert_to_text(&srt_entries);

        let text_entries = parse_text(input);
        let timed = generate_time_codes(&text_entries, "00:00:00,000", 3000);
        let _ = convert_to_srt(&timed);

        // Overflowing synthesis parameters must degrade, never panic
        let timed = generate_time_codes(&text_entries, "9999999999999999:00:00,000", u64::MAX);
        let _ = convert_to_srt(&timed);
    }
}

/// Test converting an SRT file to annotated text through the controller
#[test]
fn test_controller_run_withSrtFile_shouldWriteAnnotatedText() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let input = common::create_test_subtitle(&dir, "movie.srt")?;

    let controller = Controller::new_for_test()?;
    let output = controller.run(&input, None, None, false)?;

    assert_eq!(output, dir.join("movie.txt"));
    let content = FileManager::read_to_string(&output)?;
    assert!(content.starts_with("Time: 00:00:01,000 --> 00:00:04,000"));
    assert!(content.contains("Subtitle: This is a test subtitle."));
    Ok(())
}

/// Test converting an untimed text file to SRT with default synthesis
#[test]
fn test_controller_run_withUntimedTextFile_shouldSynthesizeTimeline() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let input = common::create_test_file(&dir, "notes.txt", "Subtitle: Hi\n\nSubtitle: There\n")?;

    let controller = Controller::new_for_test()?;
    let output = controller.run(&input, None, None, false)?;

    let content = FileManager::read_to_string(&output)?;
    assert_eq!(
        content,
        "1\n00:00:00,000 --> 00:00:03,000\nHi\n\n2\n00:00:03,000 --> 00:00:06,000\nThere"
    );
    Ok(())
}

/// Test an existing output is left untouched without the force flag
#[test]
fn test_controller_run_withExistingOutput_shouldSkipWithoutForce() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let input = common::create_test_subtitle(&dir, "movie.srt")?;
    let existing = common::create_test_file(&dir, "movie.txt", "sentinel")?;

    let controller = Controller::new_for_test()?;
    controller.run(&input, None, None, false)?;
    assert_eq!(FileManager::read_to_string(&existing)?, "sentinel");

    controller.run(&input, None, None, true)?;
    assert_ne!(FileManager::read_to_string(&existing)?, "sentinel");
    Ok(())
}

/// Test an unusable input file surfaces as the invalid-file condition
#[test]
fn test_controller_run_withUnusableInput_shouldReturnError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let input = common::create_test_file(&dir, "broken.srt", "no structure here at all")?;

    let controller = Controller::new_for_test()?;
    assert!(controller.run(&input, None, None, false).is_err());
    Ok(())
}

/// Test an explicit direction overrides extension inference
#[test]
fn test_controller_run_withExplicitDirection_shouldOverrideInference() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    // SRT content in a .dat file: inference would pick TextToSrt
    let input = common::create_test_file(
        &dir,
        "movie.dat",
        "1\n00:00:01,000 --> 00:00:02,000\nHello\n",
    )?;

    let controller = Controller::new_for_test()?;
    let output = controller.run(&input, None, Some(Direction::SrtToText), false)?;

    assert_eq!(output, dir.join("movie.txt"));
    let content = FileManager::read_to_string(&output)?;
    assert!(content.contains("Subtitle: Hello"));
    Ok(())
}

/// Test directory conversion processes every matching file
#[test]
fn test_controller_run_folder_withMixedFiles_shouldConvertAll() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    common::create_test_subtitle(&dir, "one.srt")?;
    common::create_test_annotated(&dir, "two.txt")?;
    common::create_test_file(&dir, "ignored.mp4", "binary")?;

    let controller = Controller::new_for_test()?;
    let converted = controller.run_folder(temp_dir.path(), false)?;

    assert_eq!(converted, 2);
    assert!(FileManager::file_exists(dir.join("one.txt")));
    assert!(FileManager::file_exists(dir.join("two.srt")));
    Ok(())
}

/// Test synthesis disabled: untimed entries are dropped, timed ones kept
#[test]
fn test_controller_convert_withSynthesisDisabled_shouldDropUntimedEntries() -> Result<()> {
    let config = Config {
        synthesize_timecodes: false,
        ..Default::default()
    };
    let controller = Controller::with_config(config)?;

    let input = "Time: 00:00:01,000 --> 00:00:02,000\nSubtitle: Timed\n\nSubtitle: Untimed\n";
    let srt = controller.convert_string(input, Direction::TextToSrt)?;

    assert_eq!(srt, "1\n00:00:01,000 --> 00:00:02,000\nTimed");
    Ok(())
}
