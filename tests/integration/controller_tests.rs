/*!
 * Tests for the controller workflows
 */

use anyhow::Result;
use std::fs;
use std::sync::Arc;

use proptrans::app_config::Config;
use proptrans::app_controller::Controller;
use proptrans::dictionary::Direction;
use proptrans::providers::mock::MockProvider;

use crate::common;

fn controller(config: Config, provider: &MockProvider) -> Controller {
    Controller::with_provider(config, Arc::new(provider.clone()))
}

/// A file run writes a fresh, correctly named output file
#[tokio::test]
async fn test_run_withFile_shouldWriteTimestampedOutput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = common::test_config(temp_dir.path(), Some(r#"{"cat": "kot"}"#))?;
    let input = common::create_test_file(temp_dir.path(), "messages.txt", "animal=cat\n\nverb=run\n")?;
    let provider = MockProvider::working().with_translation("run", "biegać");

    let summary = controller(config, &provider).run(input).await?;

    let name = summary.output_path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("en_pl_"));
    assert!(name.ends_with(".txt"));
    assert_eq!(fs::read_to_string(&summary.output_path)?, "animal=kot\n\nverb=biegać\n");
    assert_eq!(summary.output.report.exact_hits, 1);
    assert_eq!(provider.call_count(), 1);
    Ok(())
}

/// A failed run leaves no output file behind
#[tokio::test]
async fn test_run_withDuplicateKey_shouldNotWriteOutput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = common::test_config(temp_dir.path(), None)?;
    let output_dir = temp_dir.path().join("output");
    let input = common::create_test_file(temp_dir.path(), "dup.txt", "a=1\nb=2\na=3\n")?;
    let provider = MockProvider::working();

    let result = controller(config, &provider).run(input).await;

    assert!(result.is_err());
    assert!(format!("{:#}", result.unwrap_err()).contains("Duplicate key 'a' on line 3"));
    assert!(common::list_files(&output_dir)?.is_empty());
    Ok(())
}

/// Text input is split into lines and written like a file
#[tokio::test]
async fn test_runText_shouldTranslatePastedText() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = common::test_config(temp_dir.path(), None)?;
    let provider = MockProvider::working();

    let summary = controller(config, &provider).run_text("a=one\r\nb=two").await?;

    assert!(summary.input.is_none());
    assert_eq!(fs::read_to_string(&summary.output_path)?, "a=[pl] one\nb=[pl] two\n");
    Ok(())
}

/// Empty text is rejected before any work is done
#[tokio::test]
async fn test_translateText_withBlankText_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = common::test_config(temp_dir.path(), None)?;
    let provider = MockProvider::working();

    assert!(controller(config, &provider).translate_text("  \n ").await.is_err());
    assert_eq!(provider.call_count(), 0);
    Ok(())
}

/// A missing dictionary is tolerated unless strict mode is on
#[tokio::test]
async fn test_loadDictionary_missingFile_shouldDependOnStrictMode() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let mut config = common::test_config(temp_dir.path(), None)?;
    let provider = MockProvider::working();

    let lenient = controller(config.clone(), &provider);
    assert!(lenient.load_dictionary()?.is_empty());

    config.dictionary.strict = true;
    let strict = controller(config, &provider);
    assert!(strict.load_dictionary().is_err());
    Ok(())
}

/// A corrupt dictionary degrades to no dictionary matches
#[tokio::test]
async fn test_translateText_withCorruptDictionary_shouldFallBackToProvider() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = common::test_config(temp_dir.path(), Some("{not json"))?;
    let provider = MockProvider::working();

    let output = controller(config, &provider).translate_text("x=cat").await?;

    assert_eq!(output.text(), "x=[pl] cat\n");
    Ok(())
}

/// The dictionary direction follows the configured language pair
#[test]
fn test_direction_shouldFollowConfiguredLanguages() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let mut config = common::test_config(temp_dir.path(), None)?;
    let provider = MockProvider::working();

    assert_eq!(controller(config.clone(), &provider).direction(), Some(Direction::Forward));

    config.source_language = "pl".to_string();
    config.target_language = "en".to_string();
    assert_eq!(controller(config.clone(), &provider).direction(), Some(Direction::Reverse));

    config.target_language = "de".to_string();
    assert_eq!(controller(config, &provider).direction(), None);
    Ok(())
}

/// Every matching file in a directory is translated; failures are collected
#[tokio::test]
async fn test_runFolder_shouldTranslateEachFileAndCollectFailures() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = common::test_config(temp_dir.path(), None)?;
    let input_dir = temp_dir.path().join("input");
    fs::create_dir_all(&input_dir)?;
    common::create_test_file(&input_dir, "good.properties", "a=1\n")?;
    common::create_test_file(&input_dir, "bad.txt", "oops\n")?;
    common::create_test_file(&input_dir, "ignored.json", "{}")?;
    let provider = MockProvider::working();

    let summary = controller(config, &provider).run_folder(input_dir).await?;

    assert_eq!(summary.translated.len(), 1);
    assert_eq!(summary.failed.len(), 1);
    assert!(summary.failed[0].0.ends_with("bad.txt"));

    let output_name = summary.translated[0]
        .output_path
        .file_name()
        .unwrap()
        .to_string_lossy()
        .to_string();
    assert!(output_name.starts_with("good_en_pl_"));
    Ok(())
}

/// Configured marker is appended to values that stayed untranslated
#[tokio::test]
async fn test_translateText_withMarker_shouldMarkDegradedValues() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let mut config = common::test_config(temp_dir.path(), None)?;
    config.translation.common.untranslated_marker = Some(" #TODO".to_string());
    config.translation.common.retry_count = 2;
    let provider = MockProvider::failing();

    let output = controller(config, &provider).translate_text("a=Hello").await?;

    assert_eq!(output.text(), "a=Hello #TODO\n");
    assert_eq!(provider.call_count(), 2);
    Ok(())
}
