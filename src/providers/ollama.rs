use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::ProviderError;
use crate::language_utils;
use crate::providers::Provider;

/// Ollama client for translating phrases with a local LLM
#[derive(Debug)]
pub struct Ollama {
    /// Base URL of the Ollama API
    base_url: String,
    /// HTTP client for making requests
    client: Client,
    /// Model name to use for generation
    model: String,
    /// System prompt template with {source_language} and {target_language}
    system_prompt: String,
    /// Sampling temperature
    temperature: f32,
}

/// Generate request for the Ollama API
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Model name to use for generation
    model: String,
    /// Prompt to generate from
    prompt: String,
    /// System message to guide the model
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    /// Additional model parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<GenerationOptions>,
    /// Whether to stream the response
    #[serde(skip_serializing_if = "Option::is_none")]
    stream: Option<bool>,
}

/// Generation options for the Ollama API
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Temperature for generation
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

/// Generation response from the Ollama API
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Model name
    pub model: String,
    /// Generated text
    pub response: String,
    /// Whether the generation is complete
    pub done: bool,
}

impl GenerationRequest {
    /// Create a new non-streaming generation request
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            system: None,
            options: None,
            stream: Some(false),
        }
    }

    /// Set the system prompt
    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.options = Some(GenerationOptions {
            temperature: Some(temperature),
        });
        self
    }
}

/// Fill the prompt template with human-readable language names
pub fn render_system_prompt(template: &str, source_language: &str, target_language: &str) -> String {
    let source_name = language_utils::get_language_name(source_language)
        .unwrap_or_else(|_| source_language.to_string());
    let target_name = language_utils::get_language_name(target_language)
        .unwrap_or_else(|_| target_language.to_string());

    template
        .replace("{source_language}", &source_name)
        .replace("{target_language}", &target_name)
}

/// LLMs like to wrap short answers in quotes; strip one matching pair.
fn clean_completion(text: &str) -> String {
    let trimmed = text.trim();
    for (open, close) in [('"', '"'), ('\'', '\''), ('“', '”')] {
        if trimmed.len() >= 2 && trimmed.starts_with(open) && trimmed.ends_with(close) {
            let inner = &trimmed[open.len_utf8()..trimmed.len() - close.len_utf8()];
            return inner.trim().to_string();
        }
    }
    trimmed.to_string()
}

impl Ollama {
    /// Create a new Ollama client
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        system_prompt: impl Into<String>,
        temperature: f32,
        timeout: Duration,
    ) -> Result<Self> {
        let endpoint = endpoint.into();
        let base_url = if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            endpoint
        } else {
            format!("http://{}", endpoint)
        };

        let client = Client::builder()
            .timeout(timeout)
            // Ollama uses HTTP/1.1
            .http1_only()
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            model: model.into(),
            system_prompt: system_prompt.into(),
            temperature,
        })
    }

    /// Send one generation request
    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, ProviderError> {
        let url = format!("{}/api/generate", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(ProviderError::from_reqwest)?;

        let status = response.status();
        let body = response.text().await.map_err(ProviderError::from_reqwest)?;

        if !status.is_success() {
            return Err(ProviderError::from_status(status.as_u16(), body));
        }

        serde_json::from_str::<GenerationResponse>(&body).map_err(|e| {
            let snippet: String = body.chars().take(200).collect();
            ProviderError::ParseError(format!("{} (body: {})", e, snippet))
        })
    }
}

#[async_trait]
impl Provider for Ollama {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError> {
        let request = GenerationRequest::new(&self.model, text)
            .system(render_system_prompt(
                &self.system_prompt,
                source_language,
                target_language,
            ))
            .temperature(self.temperature);

        debug!("Requesting Ollama translation for '{}' with {}", text, self.model);
        let response = self.generate(&request).await?;

        let translated = clean_completion(&response.response);
        if translated.is_empty() {
            return Err(ProviderError::ParseError("Model returned an empty answer".to_string()));
        }

        Ok(translated)
    }
}
