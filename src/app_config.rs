use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::language_utils;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code (ISO)
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Target language code (ISO)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Dictionary settings
    #[serde(default)]
    pub dictionary: DictionaryConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    // @provider: Google Translate web endpoint
    #[default]
    Google,
    // @provider: Ollama
    Ollama,
    // @provider: In-process mock, for tests and dry runs
    Mock,
}

impl TranslationProvider {
    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Google => "google".to_string(),
            Self::Ollama => "ollama".to_string(),
            Self::Mock => "mock".to_string(),
        }
    }
}

impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for TranslationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "ollama" => Ok(Self::Ollama),
            "mock" => Ok(Self::Mock),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Provider configuration wrapper
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type")]
    pub provider_type: String,

    // @field: Model name (LLM providers only)
    #[serde(default = "String::new")]
    pub model: String,

    // @field: Service URL
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ProviderConfig {
    // @param provider_type: Provider enum
    // @returns: Provider config with defaults
    pub fn new(provider_type: TranslationProvider) -> Self {
        match provider_type {
            TranslationProvider::Google => Self {
                provider_type: "google".to_string(),
                model: String::new(),
                endpoint: default_google_endpoint(),
                timeout_secs: default_timeout_secs(),
            },
            TranslationProvider::Ollama => Self {
                provider_type: "ollama".to_string(),
                model: default_ollama_model(),
                endpoint: default_ollama_endpoint(),
                timeout_secs: default_ollama_timeout_secs(),
            },
            TranslationProvider::Mock => Self {
                provider_type: "mock".to_string(),
                model: String::new(),
                endpoint: String::new(),
                timeout_secs: default_timeout_secs(),
            },
        }
    }
}

/// Dictionary configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DictionaryConfig {
    /// Path of the JSON phrase table
    #[serde(default = "default_dictionary_path")]
    pub path: String,

    /// Language the dictionary keys are written in
    #[serde(default = "default_dictionary_from")]
    pub from_language: String,

    /// Language the dictionary values are written in
    #[serde(default = "default_dictionary_to")]
    pub to_language: String,

    /// Fail the run when the dictionary cannot be loaded instead of
    /// continuing with an empty one
    #[serde(default)]
    pub strict: bool,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            path: default_dictionary_path(),
            from_language: default_dictionary_from(),
            to_language: default_dictionary_to(),
            strict: false,
        }
    }
}

/// Output file configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OutputConfig {
    /// Directory translated files are written to
    #[serde(default = "default_output_directory")]
    pub directory: String,

    /// File extensions picked up when the input is a directory
    #[serde(default = "default_input_extensions")]
    pub extensions: Vec<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
            extensions: default_input_extensions(),
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Translation provider to use
    #[serde(default)]
    pub provider: TranslationProvider,

    /// Available translation providers
    #[serde(default)]
    pub available_providers: Vec<ProviderConfig>,

    /// Common translation settings
    #[serde(default)]
    pub common: TranslationCommonConfig,
}

/// Common translation settings applicable to all providers
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationCommonConfig {
    /// System prompt template for LLM providers
    /// Placeholders: {source_language}, {target_language}
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// Maximum translation attempts per value
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    /// Fixed wait between attempts (in milliseconds)
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    /// Suffix appended to values that could not be translated
    #[serde(default)]
    pub untranslated_marker: Option<String>,

    /// Temperature parameter for LLM providers (0.0 to 1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for TranslationCommonConfig {
    fn default() -> Self {
        Self {
            system_prompt: default_system_prompt(),
            retry_count: default_retry_count(),
            retry_backoff_ms: default_retry_backoff_ms(),
            untranslated_marker: None,
            temperature: default_temperature(),
        }
    }
}

impl TranslationCommonConfig {
    /// Backoff as a duration
    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Matching filter for the `log` facade
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_source_language() -> String {
    "pl".to_string()
}

fn default_target_language() -> String {
    "en".to_string()
}

fn default_dictionary_path() -> String {
    "custom_dict.json".to_string()
}

fn default_dictionary_from() -> String {
    "en".to_string()
}

fn default_dictionary_to() -> String {
    "pl".to_string()
}

fn default_output_directory() -> String {
    "output".to_string()
}

fn default_input_extensions() -> Vec<String> {
    vec!["txt".to_string(), "properties".to_string()]
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_ollama_timeout_secs() -> u64 {
    120
}

fn default_retry_count() -> u32 {
    3
}

fn default_retry_backoff_ms() -> u64 {
    1000
}

fn default_temperature() -> f32 {
    0.1
}

fn default_google_endpoint() -> String {
    "https://translate.googleapis.com".to_string()
}

fn default_ollama_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_ollama_model() -> String {
    "llama3.2:3b".to_string()
}

fn default_system_prompt() -> String {
    "You are a professional translator. Translate the user's text from {source_language} to {target_language}. Reply with the translation only, without quotes or explanations.".to_string()
}

impl Config {
    /// Load a configuration file, writing the defaults there first when it
    /// does not exist yet.
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {:?}", path))?;
            let reader = BufReader::new(file);
            return serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {:?}", path));
        }

        log::warn!("Config file not found at {:?}, creating default config.", path);

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write default config to file: {:?}", path))?;

        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        language_utils::validate_language_code(&self.source_language)
            .context("Invalid source language")?;
        language_utils::validate_language_code(&self.target_language)
            .context("Invalid target language")?;

        if language_utils::language_codes_match(&self.source_language, &self.target_language) {
            return Err(anyhow!(
                "Source and target language are both '{}'",
                self.source_language
            ));
        }

        language_utils::validate_language_code(&self.dictionary.from_language)
            .context("Invalid dictionary source language")?;
        language_utils::validate_language_code(&self.dictionary.to_language)
            .context("Invalid dictionary target language")?;

        if self.translation.common.retry_count == 0 {
            return Err(anyhow!("retry_count must allow at least one attempt"));
        }

        if self.output.directory.trim().is_empty() {
            return Err(anyhow!("Output directory cannot be empty"));
        }

        match self.translation.provider {
            TranslationProvider::Google | TranslationProvider::Ollama => {
                let endpoint = self.translation.get_endpoint();
                Url::parse(&endpoint)
                    .with_context(|| format!("Invalid provider endpoint: {}", endpoint))?;
            }
            TranslationProvider::Mock => {}
        }

        if self.translation.provider == TranslationProvider::Ollama
            && self.translation.get_model().is_empty()
        {
            return Err(anyhow!("A model is required for the Ollama provider"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: default_source_language(),
            target_language: default_target_language(),
            dictionary: DictionaryConfig::default(),
            output: OutputConfig::default(),
            translation: TranslationConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl TranslationConfig {
    /// Get the active provider configuration from the available_providers array
    pub fn get_active_provider_config(&self) -> Option<&ProviderConfig> {
        self.get_provider_config(&self.provider)
    }

    /// Get a specific provider configuration by type
    pub fn get_provider_config(&self, provider_type: &TranslationProvider) -> Option<&ProviderConfig> {
        let provider_str = provider_type.to_lowercase_string();
        self.available_providers
            .iter()
            .find(|p| p.provider_type == provider_str)
    }

    /// Mutable access to the active provider configuration, inserting the
    /// defaults when it is missing
    pub fn active_provider_config_mut(&mut self) -> &mut ProviderConfig {
        let provider_str = self.provider.to_lowercase_string();
        let index = match self
            .available_providers
            .iter()
            .position(|p| p.provider_type == provider_str)
        {
            Some(index) => index,
            None => {
                self.available_providers
                    .push(ProviderConfig::new(self.provider.clone()));
                self.available_providers.len() - 1
            }
        };
        &mut self.available_providers[index]
    }

    /// Get the model for the active provider
    pub fn get_model(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.model.is_empty() {
                return provider_config.model.clone();
            }
        }

        match self.provider {
            TranslationProvider::Ollama => default_ollama_model(),
            TranslationProvider::Google | TranslationProvider::Mock => String::new(),
        }
    }

    /// Get the endpoint for the active provider
    pub fn get_endpoint(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.endpoint.is_empty() {
                return provider_config.endpoint.clone();
            }
        }

        match self.provider {
            TranslationProvider::Google => default_google_endpoint(),
            TranslationProvider::Ollama => default_ollama_endpoint(),
            TranslationProvider::Mock => String::new(),
        }
    }

    /// Get the request timeout for the active provider
    pub fn get_timeout(&self) -> Duration {
        let secs = self
            .get_active_provider_config()
            .map(|p| p.timeout_secs)
            .filter(|secs| *secs > 0)
            .unwrap_or_else(default_timeout_secs);
        Duration::from_secs(secs)
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            provider: TranslationProvider::default(),
            available_providers: vec![
                ProviderConfig::new(TranslationProvider::Google),
                ProviderConfig::new(TranslationProvider::Ollama),
            ],
            common: TranslationCommonConfig::default(),
        }
    }
}
