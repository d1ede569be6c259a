//! Request construction for one page of a lead search.

use leadminer_core::GeoPoint;
use reqwest::Url;

use crate::error::GeminiError;
use crate::prompt::{build_prompt, page_temperature, SYSTEM_INSTRUCTION};
use crate::types::{
    Content, GenerateContentRequest, GenerationConfig, LatLng, RetrievalConfig, ThinkingConfig,
    Tool, ToolConfig,
};

use super::ClientOptions;

/// Resolves `{base_url}/models/{model}:generateContent`.
///
/// # Errors
///
/// Returns [`GeminiError::InvalidBaseUrl`] if the base URL does not parse or
/// the model id is blank.
pub(super) fn endpoint_url(base_url: &str, model: &str) -> Result<Url, GeminiError> {
    let invalid = |reason: String| GeminiError::InvalidBaseUrl {
        base_url: base_url.to_owned(),
        reason,
    };

    let model = model.trim();
    if model.is_empty() {
        return Err(invalid("model id must be non-empty".to_owned()));
    }

    // Exactly one trailing slash so `join` appends instead of replacing the
    // last path segment.
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    let base = Url::parse(&normalised).map_err(|e| invalid(e.to_string()))?;
    base.join(&format!("models/{model}:generateContent"))
        .map_err(|e| invalid(e.to_string()))
}

pub(super) fn build_request(
    query: &str,
    location: Option<GeoPoint>,
    page: u32,
    options: &ClientOptions,
) -> GenerateContentRequest {
    let tool_config = location.map(|point| ToolConfig {
        retrieval_config: RetrievalConfig {
            lat_lng: LatLng {
                latitude: point.latitude,
                longitude: point.longitude,
            },
        },
    });

    let thinking_config = options
        .thinking_budget
        .filter(|budget| *budget > 0)
        .map(|thinking_budget| ThinkingConfig { thinking_budget });

    GenerateContentRequest {
        contents: vec![Content::user_text(build_prompt(query, page))],
        system_instruction: Content::system_text(SYSTEM_INSTRUCTION),
        tools: vec![Tool::GoogleMaps {}, Tool::GoogleSearch {}],
        tool_config,
        generation_config: GenerationConfig {
            temperature: page_temperature(page),
            max_output_tokens: options.max_output_tokens,
            thinking_config,
        },
    }
}
