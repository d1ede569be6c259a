//! HTTP client for the Gemini `generateContent` endpoint.

mod request;

use std::time::Duration;

use leadminer_core::{AppConfig, GeoPoint, SearchPage};
use reqwest::{Client, Url};

use crate::error::GeminiError;
use crate::grounding::extract_sources;
use crate::parse::parse_contacts;
use crate::types::{ErrorEnvelope, GenerateContentResponse};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Request tuning shared by every page of a search.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub model: String,
    pub timeout_secs: u64,
    pub max_output_tokens: u32,
    /// `None` (or `Some(0)`) sends no thinking configuration.
    pub thinking_budget: Option<u32>,
}

impl ClientOptions {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            model: config.gemini_model.clone(),
            timeout_secs: config.gemini_request_timeout_secs,
            max_output_tokens: config.gemini_max_output_tokens,
            thinking_budget: Some(config.gemini_thinking_budget),
        }
    }
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            timeout_secs: 120,
            max_output_tokens: 8192,
            thinking_budget: Some(4096),
        }
    }
}

/// Client for the Gemini API, built once with its credential and shared by
/// reference for the duration of a search.
///
/// Each [`GeminiClient::fetch_page`] call is one request with no retries;
/// failures are returned to the caller unchanged.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    endpoint: Url,
    options: ClientOptions,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("api_key", &"[redacted]")
            .field("endpoint", &self.endpoint.as_str())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Creates a client pointed at the production Gemini API.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, options: ClientOptions) -> Result<Self, GeminiError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL, options)
    }

    /// Creates a client with a custom API root (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`GeminiError::InvalidBaseUrl`] if `base_url` or the
    /// model id does not form a valid endpoint URL.
    pub fn with_base_url(
        api_key: &str,
        base_url: &str,
        options: ClientOptions,
    ) -> Result<Self, GeminiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("leadminer/0.1 (lead-generation)")
            .build()?;

        let endpoint = request::endpoint_url(base_url, &options.model)?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            endpoint,
            options,
        })
    }

    /// Builds a client from the loaded application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::MissingApiKey`] when no key is configured, plus
    /// any error from [`GeminiClient::with_base_url`].
    pub fn from_app_config(config: &AppConfig) -> Result<Self, GeminiError> {
        let api_key = config
            .gemini_api_key
            .as_deref()
            .ok_or(GeminiError::MissingApiKey)?;
        Self::with_base_url(
            api_key,
            &config.gemini_base_url,
            ClientOptions::from_app_config(config),
        )
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.options.model
    }

    /// Asks the model for one page of leads and parses its table.
    ///
    /// `page` is 1-based and selects the prompt strategy and temperature.
    /// `location`, when known, biases the maps grounding tool.
    ///
    /// # Errors
    ///
    /// - [`GeminiError::RateLimited`]: HTTP 429.
    /// - [`GeminiError::Api`]: non-2xx response with a Google error body.
    /// - [`GeminiError::UnexpectedStatus`]: any other non-2xx response.
    /// - [`GeminiError::Http`]: network, TLS or timeout failure.
    /// - [`GeminiError::Deserialize`]: 2xx body that is not a valid response.
    pub async fn fetch_page(
        &self,
        query: &str,
        location: Option<GeoPoint>,
        page: u32,
    ) -> Result<SearchPage, GeminiError> {
        let body = request::build_request(query, location, page, &self.options);
        let response = self.send(&body, page).await?;

        let raw_text = response.text();
        let contacts = parse_contacts(&raw_text);
        let sources = extract_sources(response.grounding_chunks());

        tracing::debug!(
            page,
            contacts = contacts.len(),
            sources = sources.len(),
            text_len = raw_text.len(),
            finish_reason = ?response.candidates.first().and_then(|c| c.finish_reason.as_deref()),
            "gemini page parsed"
        );

        Ok(SearchPage {
            contacts,
            sources,
            raw_text,
        })
    }

    async fn send(
        &self,
        body: &crate::types::GenerateContentRequest,
        page: u32,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(API_KEY_HEADER, &self.api_key)
            .json(body)
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(60);
            return Err(GeminiError::RateLimited { retry_after_secs });
        }

        let text = response.text().await?;

        if !status.is_success() {
            return Err(match serde_json::from_str::<ErrorEnvelope>(&text) {
                Ok(envelope) => GeminiError::Api {
                    status: status.as_u16(),
                    message: envelope.error.status.map_or_else(
                        || envelope.error.message.clone(),
                        |s| format!("{s}: {}", envelope.error.message),
                    ),
                },
                Err(_) => GeminiError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: self.endpoint.to_string(),
                },
            });
        }

        serde_json::from_str::<GenerateContentResponse>(&text).map_err(|e| {
            GeminiError::Deserialize {
                context: format!("generateContent page {page}"),
                source: e,
            }
        })
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
