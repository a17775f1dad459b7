/*!
 * Common test utilities for the proptrans test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

use proptrans::app_config::{Config, TranslationProvider};
use proptrans::dictionary::{Dictionary, Direction};
use proptrans::providers::mock::MockProvider;
use proptrans::resolver::{Resolver, RetryPolicy, RunOptions};

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Resolver for en -> pl with no backoff between attempts
pub fn en_pl_resolver(dictionary: Dictionary, provider: &MockProvider) -> Resolver {
    let options = RunOptions::new("en", "pl")
        .with_direction(Some(Direction::Forward))
        .with_retry(RetryPolicy::new(3, Duration::ZERO));
    Resolver::new(dictionary, Arc::new(provider.clone()), options)
}

/// Configuration whose dictionary and output live in `dir`, using the mock
/// provider and no retry backoff
pub fn test_config(dir: &Path, dictionary_json: Option<&str>) -> Result<Config> {
    let mut config = Config::default();
    config.source_language = "en".to_string();
    config.target_language = "pl".to_string();
    config.translation.provider = TranslationProvider::Mock;
    config.translation.common.retry_backoff_ms = 0;
    config.output.directory = dir.join("output").to_string_lossy().to_string();

    let dictionary_path = dir.join("custom_dict.json");
    if let Some(json) = dictionary_json {
        fs::write(&dictionary_path, json)?;
    }
    config.dictionary.path = dictionary_path.to_string_lossy().to_string();

    Ok(config)
}

/// Files currently in a directory, sorted
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .collect();
    files.sort();
    Ok(files)
}
