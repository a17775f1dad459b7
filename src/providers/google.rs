use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use crate::errors::ProviderError;
use crate::language_utils;
use crate::providers::Provider;

/// Client for the public Google Translate web endpoint
///
/// This is the keyless `translate_a/single` endpoint used by the browser
/// widget. It answers with a nested JSON array whose first element holds the
/// translated sentences.
#[derive(Debug)]
pub struct GoogleTranslate {
    /// Base URL, e.g. `https://translate.googleapis.com`
    base_url: Url,
    /// HTTP client for making requests
    client: Client,
}

impl GoogleTranslate {
    /// Create a new client for the given endpoint
    pub fn new(endpoint: impl AsRef<str>, timeout: Duration) -> Result<Self> {
        let endpoint = endpoint.as_ref();
        let mut base_url = Url::parse(endpoint)
            .with_context(|| format!("Invalid Google Translate endpoint: {}", endpoint))?;
        // `join` replaces the last path segment unless the path ends in `/`
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { base_url, client })
    }

    /// Build the request URL for one phrase
    pub fn request_url(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<Url, ProviderError> {
        let mut url = self
            .base_url
            .join("translate_a/single")
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        url.query_pairs_mut()
            .append_pair("client", "gtx")
            .append_pair("sl", &service_code(source_language))
            .append_pair("tl", &service_code(target_language))
            .append_pair("dt", "t")
            .append_pair("q", text);

        Ok(url)
    }
}

/// Google expects ISO 639-1 codes where one exists
fn service_code(code: &str) -> String {
    language_utils::normalize_to_part1(code).unwrap_or_else(|_| code.trim().to_lowercase())
}

/// Extract the translated text from a `translate_a/single` response body.
///
/// The body looks like `[[["kot","cat",null,null,10]],null,"en",...]`; long
/// inputs are split into several sentence arrays that must be concatenated.
pub fn parse_response(body: &str) -> Result<String, ProviderError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| ProviderError::ParseError(e.to_string()))?;

    let sentences = value
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| ProviderError::ParseError("Missing sentence array".to_string()))?;

    let translated: String = sentences
        .iter()
        .filter_map(|sentence| sentence.get(0).and_then(Value::as_str))
        .collect();

    if translated.trim().is_empty() {
        return Err(ProviderError::ParseError(
            "Response contained no translated text".to_string(),
        ));
    }

    Ok(translated)
}

#[async_trait]
impl Provider for GoogleTranslate {
    fn name(&self) -> &str {
        "google"
    }

    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError> {
        let url = self.request_url(text, source_language, target_language)?;
        debug!("Requesting Google translation for '{}'", text);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(ProviderError::from_reqwest)?;

        let status = response.status();
        let body = response.text().await.map_err(ProviderError::from_reqwest)?;

        if !status.is_success() {
            let snippet: String = body.chars().take(200).collect();
            return Err(ProviderError::from_status(status.as_u16(), snippet));
        }

        parse_response(&body)
    }
}
