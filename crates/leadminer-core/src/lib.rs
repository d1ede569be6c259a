pub mod app_config;
pub mod config;
pub mod contacts;
pub mod preferences;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use contacts::{
    unique_sources, BusinessContact, DedupKey, GeoPoint, GroundingSource, SearchPage,
    SearchResult, DEFAULT_KIND, NOT_AVAILABLE, PLACEHOLDER_URI,
};
pub use preferences::{load_preferences, save_preferences, Preferences, PreferencesError, Theme};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
