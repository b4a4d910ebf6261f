//! Google Cloud Translation (v2) client.

use async_trait::async_trait;
use newsdeck_core::{Error, Result, Translator};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::{build_client, DEFAULT_TIMEOUT};

/// Public v2 endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://translation.googleapis.com/language/translate/v2";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "TRANSLATE_API_KEY";

/// Environment variable overriding the endpoint.
pub const ENDPOINT_ENV: &str = "NEWSDECK_TRANSLATE_URL";

#[derive(Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    target: &'a str,
    format: &'a str,
}

#[derive(Deserialize, Default)]
struct TranslateResponse {
    #[serde(default)]
    data: TranslationList,
}

#[derive(Deserialize, Default)]
struct TranslationList {
    #[serde(default)]
    translations: Vec<Translation>,
}

#[derive(Deserialize)]
struct Translation {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

/// Translator backed by the Google Cloud Translation v2 REST API.
///
/// A missing API key is only reported when a translation is requested, so
/// articles already in the target script never need one.
pub struct GoogleTranslator {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl GoogleTranslator {
    /// Create a translator using the public endpoint.
    pub fn new(api_key: Option<String>) -> Result<Self> {
        let client = build_client(DEFAULT_TIMEOUT).map_err(|e| {
            Error::TranslationFailed(format!("failed to build HTTP client: {}", e))
        })?;
        Ok(Self {
            client,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }

    /// Create a translator from `TRANSLATE_API_KEY` and, if set,
    /// `NEWSDECK_TRANSLATE_URL`.
    pub fn from_env() -> Result<Self> {
        let translator = Self::new(std::env::var(API_KEY_ENV).ok())?;
        Ok(match std::env::var(ENDPOINT_ENV) {
            Ok(endpoint) if !endpoint.trim().is_empty() => translator.with_endpoint(endpoint),
            _ => translator,
        })
    }

    /// Send requests to `endpoint` instead of the public API.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Give up on requests after `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.client = build_client(timeout).map_err(|e| {
            Error::TranslationFailed(format!("failed to build HTTP client: {}", e))
        })?;
        Ok(self)
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str, target: &str) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| Error::TranslationFailed(format!("missing {}", API_KEY_ENV)))?;

        if text.is_empty() {
            return Err(Error::TranslationFailed("missing text".to_string()));
        }

        log::debug!("Translating {} chars into {:?}", text.chars().count(), target);

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", api_key)])
            .json(&TranslateRequest {
                q: text,
                target,
                format: "text",
            })
            .send()
            .await
            .map_err(|e| Error::TranslationFailed(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::TranslationFailed(format!(
                "{} {}",
                status.as_u16(),
                body.trim()
            )));
        }

        let parsed: TranslateResponse = response
            .json()
            .await
            .map_err(|e| Error::TranslationFailed(format!("invalid response: {}", e)))?;

        Ok(parsed
            .data
            .translations
            .into_iter()
            .map(|t| t.translated_text)
            .collect::<Vec<_>>()
            .join("\n"))
    }
}
