/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use chrono::{Local, TimeZone};
use std::fs;

use proptrans::file_utils::FileManager;

use crate::common;

/// Line terminators survive splitting
#[test]
fn test_splitLines_shouldKeepTerminators() {
    let lines = FileManager::split_lines("a=1\r\n\nb=2");
    assert_eq!(lines, vec!["a=1\r\n", "\n", "b=2"]);
}

/// Files are read line by line with terminators
#[test]
fn test_readLines_withValidFile_shouldReturnLines() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "input.txt", "a=1\n\nb=2\n")?;

    assert_eq!(FileManager::read_lines(&path)?, vec!["a=1\n", "\n", "b=2\n"]);
    Ok(())
}

/// Output names carry languages, timestamp and suffix
#[test]
fn test_outputFileName_shouldFollowNamingScheme() {
    let timestamp = Local.with_ymd_and_hms(2024, 5, 1, 12, 30, 5).unwrap();

    assert_eq!(
        FileManager::output_file_name(None, "pl", "en", timestamp, "abc123"),
        "pl_en_2024-05-01_12-30-05_abc123.txt"
    );
    assert_eq!(
        FileManager::output_file_name(Some("messages"), "en", "pl", timestamp, "zz9"),
        "messages_en_pl_2024-05-01_12-30-05_zz9.txt"
    );
}

/// Suffixes are short lowercase alphanumerics
#[test]
fn test_randomSuffix_shouldBeLowercaseAlphanumeric() {
    let suffix = FileManager::random_suffix();
    assert_eq!(suffix.len(), 6);
    assert!(suffix.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
}

/// Generated paths land in the output directory
#[test]
fn test_generateOutputPath_shouldBeInsideOutputDir() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = FileManager::generate_output_path(temp_dir.path(), None, "pl", "en");

    assert_eq!(path.parent(), Some(temp_dir.path()));
    Ok(())
}

/// New files are written but never overwritten
#[test]
fn test_writeNewFile_shouldRefuseToOverwrite() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("nested").join("out.txt");

    FileManager::write_new_file(&path, ["a=1\n", "\n"])?;
    assert_eq!(fs::read_to_string(&path)?, "a=1\n\n");

    assert!(FileManager::write_new_file(&path, ["b=2\n"]).is_err());
    assert_eq!(fs::read_to_string(&path)?, "a=1\n\n");
    Ok(())
}

/// Only the wanted extensions are found, in sorted order
#[test]
fn test_findFiles_shouldFilterByExtension() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let sub_dir = temp_dir.path().join("sub");
    fs::create_dir_all(&sub_dir)?;
    common::create_test_file(temp_dir.path(), "b.TXT", "a=1")?;
    common::create_test_file(&sub_dir, "a.properties", "a=1")?;
    common::create_test_file(temp_dir.path(), "c.json", "{}")?;

    let extensions = vec!["txt".to_string(), ".properties".to_string()];
    let files = FileManager::find_files(temp_dir.path(), &extensions)?;

    assert_eq!(files.len(), 2);
    assert!(files.iter().any(|p| p.ends_with("b.TXT")));
    assert!(files.iter().any(|p| p.ends_with("sub/a.properties")));
    Ok(())
}

/// Test that ensure_dir creates directories as needed
#[test]
fn test_ensure_dir_withNonExistentDir_shouldCreateDirectory() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_subdir = temp_dir.path().join("output");

    FileManager::ensure_dir(&test_subdir)?;

    assert!(FileManager::dir_exists(&test_subdir));
    Ok(())
}
