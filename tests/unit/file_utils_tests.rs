/*!
 * Tests for file and folder utilities
 */

use anyhow::Result;
use std::path::PathBuf;
use srtext::file_utils::FileManager;
use crate::common;

/// Test output path derivation swaps the extension
#[test]
fn test_generate_output_path_withSrtInput_shouldSwapExtension() {
    let output = FileManager::generate_output_path(
        PathBuf::from("/videos/movie.srt"),
        PathBuf::from("/out"),
        "txt",
    );
    assert_eq!(output, PathBuf::from("/out/movie.txt"));
}

/// Test read and write round-trip through a temp directory
#[test]
fn test_write_and_read_withTempFile_shouldRoundTrip() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("nested").join("file.txt");

    FileManager::write_to_file(&path, "subtitle content")?;
    assert!(FileManager::file_exists(&path));

    let content = FileManager::read_to_string(&path)?;
    assert_eq!(content, "subtitle content");
    Ok(())
}

/// Test extension-filtered discovery ignores other file types
#[test]
fn test_find_files_withMixedExtensions_shouldFilterAndSort() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();

    common::create_test_file(&dir, "b.srt", "x")?;
    common::create_test_file(&dir, "a.txt", "x")?;
    common::create_test_file(&dir, "c.mp4", "x")?;

    let found = FileManager::find_files(&dir, &["srt", "txt"])?;
    let names: Vec<_> = found
        .iter()
        .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
        .collect();

    assert_eq!(names, vec!["a.txt", "b.srt"]);
    Ok(())
}

/// Test directory existence helpers
#[test]
fn test_dir_helpers_withTempDir_shouldReportExistence() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("sub");

    assert!(FileManager::dir_exists(temp_dir.path()));
    assert!(!FileManager::dir_exists(&nested));

    FileManager::ensure_dir(&nested)?;
    assert!(FileManager::dir_exists(&nested));
    Ok(())
}
