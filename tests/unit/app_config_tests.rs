/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use std::time::Duration;

use proptrans::app_config::{Config, LogLevel, TranslationProvider};

use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.source_language, "pl");
    assert_eq!(config.target_language, "en");
    assert_eq!(config.translation.provider, TranslationProvider::Google);
    assert_eq!(config.dictionary.path, "custom_dict.json");
    assert_eq!(config.dictionary.from_language, "en");
    assert_eq!(config.dictionary.to_language, "pl");
    assert!(!config.dictionary.strict);
    assert_eq!(config.output.directory, "output");
    assert_eq!(config.translation.common.retry_count, 3);
    assert_eq!(config.translation.common.retry_backoff(), Duration::from_secs(1));
    assert!(config.translation.common.untranslated_marker.is_none());
    assert_eq!(config.log_level, LogLevel::Info);

    let ollama_config = config
        .translation
        .get_provider_config(&TranslationProvider::Ollama)
        .expect("Ollama provider config should exist");
    assert_eq!(ollama_config.model, "llama3.2:3b");
    assert_eq!(ollama_config.timeout_secs, 120);
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    // Invalid source language
    config.source_language = "zz".to_string();
    assert!(config.validate().is_err());
    config.source_language = "pl".to_string();

    // Same language on both sides, even when spelled differently
    config.target_language = "pol".to_string();
    assert!(config.validate().is_err());
    config.target_language = "en".to_string();

    // No attempts at all
    config.translation.common.retry_count = 0;
    assert!(config.validate().is_err());
    config.translation.common.retry_count = 1;

    // Broken endpoint
    config.translation.available_providers[0].endpoint = "not a url".to_string();
    assert!(config.validate().is_err());

    // The mock provider has no endpoint to check
    config.translation.provider = TranslationProvider::Mock;
    assert!(config.validate().is_ok());
}

/// Partial config files fall back to defaults for missing fields
#[test]
fn test_config_deserialize_withPartialJson_shouldUseDefaults() -> Result<()> {
    let json = r#"{
        "source_language": "en",
        "target_language": "pl",
        "translation": { "provider": "ollama", "common": { "retry_count": 5 } }
    }"#;

    let config: Config = serde_json::from_str(json)?;

    assert_eq!(config.translation.provider, TranslationProvider::Ollama);
    assert_eq!(config.translation.common.retry_count, 5);
    assert_eq!(config.translation.common.retry_backoff_ms, 1000);
    assert_eq!(config.translation.get_model(), "llama3.2:3b");
    assert_eq!(config.translation.get_endpoint(), "http://localhost:11434");
    assert_eq!(config.dictionary.path, "custom_dict.json");
    Ok(())
}

/// Missing config files are created with defaults and then reloaded
#[test]
fn test_loadOrCreate_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let created = Config::load_or_create(&path)?;
    assert!(path.exists());

    let reloaded = Config::load_or_create(&path)?;
    assert_eq!(reloaded.source_language, created.source_language);
    assert_eq!(reloaded.translation.available_providers.len(), 2);
    Ok(())
}

/// Setting a model for a provider without an entry adds one
#[test]
fn test_activeProviderConfigMut_withMissingEntry_shouldInsertDefaults() {
    let mut config = Config::default();
    config.translation.available_providers.clear();
    config.translation.provider = TranslationProvider::Ollama;

    config.translation.active_provider_config_mut().model = "mistral".to_string();

    assert_eq!(config.translation.available_providers.len(), 1);
    assert_eq!(config.translation.get_model(), "mistral");
    assert_eq!(config.translation.get_timeout(), Duration::from_secs(120));
}

/// Provider names parse case-insensitively
#[test]
fn test_translationProvider_fromStr_shouldParseKnownNames() {
    assert_eq!("Google".parse::<TranslationProvider>().unwrap(), TranslationProvider::Google);
    assert_eq!("ollama".parse::<TranslationProvider>().unwrap(), TranslationProvider::Ollama);
    assert!("deepl".parse::<TranslationProvider>().is_err());
    assert_eq!(TranslationProvider::Google.to_string(), "google");
}
