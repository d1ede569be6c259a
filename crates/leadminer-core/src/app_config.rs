use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Credential for the Gemini API. Only needed by commands that search.
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub gemini_request_timeout_secs: u64,
    pub gemini_max_output_tokens: u32,
    /// `0` disables the thinking budget.
    pub gemini_thinking_budget: u32,
    /// Pause between consecutive page requests of one search.
    pub page_delay_ms: u64,
    pub preferences_path: PathBuf,
    pub export_dir: PathBuf,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field(
                "gemini_api_key",
                &self.gemini_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("gemini_model", &self.gemini_model)
            .field("gemini_base_url", &self.gemini_base_url)
            .field(
                "gemini_request_timeout_secs",
                &self.gemini_request_timeout_secs,
            )
            .field("gemini_max_output_tokens", &self.gemini_max_output_tokens)
            .field("gemini_thinking_budget", &self.gemini_thinking_budget)
            .field("page_delay_ms", &self.page_delay_ms)
            .field("preferences_path", &self.preferences_path)
            .field("export_dir", &self.export_dir)
            .finish()
    }
}
