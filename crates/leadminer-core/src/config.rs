use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Parses and validates configuration through an injected env-var lookup so
/// tests can drive it from a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("LEADMINER_ENV", "development"));
    let bind_addr = parse_addr("LEADMINER_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("LEADMINER_LOG_LEVEL", "info");

    let gemini_api_key = lookup("GEMINI_API_KEY")
        .ok()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty());
    let gemini_model = or_default("GEMINI_MODEL", "gemini-2.5-flash");
    if gemini_model.trim().is_empty() {
        return Err(invalid("GEMINI_MODEL", "model id must be non-empty".into()));
    }
    let gemini_base_url = or_default(
        "GEMINI_BASE_URL",
        "https://generativelanguage.googleapis.com/v1beta/",
    );
    let gemini_request_timeout_secs = parse_u64("GEMINI_REQUEST_TIMEOUT_SECS", "120")?;
    if gemini_request_timeout_secs == 0 {
        return Err(invalid(
            "GEMINI_REQUEST_TIMEOUT_SECS",
            "timeout must be greater than zero".into(),
        ));
    }
    let gemini_max_output_tokens = parse_u32("GEMINI_MAX_OUTPUT_TOKENS", "8192")?;
    let gemini_thinking_budget = parse_u32("GEMINI_THINKING_BUDGET", "4096")?;

    let page_delay_ms = parse_u64("LEADMINER_PAGE_DELAY_MS", "1000")?;
    let preferences_path = PathBuf::from(or_default(
        "LEADMINER_PREFERENCES_PATH",
        "./.leadminer/preferences.yaml",
    ));
    let export_dir = PathBuf::from(or_default("LEADMINER_EXPORT_DIR", "."));

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        gemini_api_key,
        gemini_model,
        gemini_base_url,
        gemini_request_timeout_secs,
        gemini_max_output_tokens,
        gemini_thinking_budget,
        page_delay_ms,
        preferences_path,
        export_dir,
    })
}

/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
