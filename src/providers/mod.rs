/*!
 * Provider implementations for machine translation services.
 *
 * The resolver only needs one capability from the outside world:
 * `translate(text, source, target) -> text`, which may fail. Each provider
 * implements that contract:
 * - Google: the public Google Translate web endpoint
 * - Ollama: a local LLM server
 * - Mock: in-process provider with scripted failures, for tests
 */

use anyhow::Result;
use async_trait::async_trait;
use std::fmt::Debug;

use crate::app_config::{TranslationConfig, TranslationProvider};
use crate::errors::ProviderError;

/// Common trait for all translation providers
///
/// This trait defines the interface that all provider implementations must follow,
/// allowing them to be used interchangeably by the fallback translator.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Short provider name used in log messages
    fn name(&self) -> &str;

    /// Translate a single phrase
    ///
    /// # Arguments
    /// * `text` - The phrase to translate
    /// * `source_language` - ISO code of the phrase's language
    /// * `target_language` - ISO code of the wanted language
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The translated phrase or an error
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError>;
}

/// Build the provider selected in the translation config
pub fn create_provider(config: &TranslationConfig) -> Result<Box<dyn Provider>> {
    let provider: Box<dyn Provider> = match config.provider {
        TranslationProvider::Google => Box::new(google::GoogleTranslate::new(
            config.get_endpoint(),
            config.get_timeout(),
        )?),
        TranslationProvider::Ollama => Box::new(ollama::Ollama::new(
            config.get_endpoint(),
            config.get_model(),
            config.common.system_prompt.clone(),
            config.common.temperature,
            config.get_timeout(),
        )?),
        TranslationProvider::Mock => Box::new(mock::MockProvider::working()),
    };

    Ok(provider)
}

pub mod google;
pub mod mock;
pub mod ollama;
