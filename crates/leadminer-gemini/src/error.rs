use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("rate limited by Gemini API (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    /// Non-2xx response carrying Google's structured error body.
    #[error("Gemini API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("GEMINI_API_KEY is not set")]
    MissingApiKey,

    #[error("invalid Gemini base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
