//! User preferences persisted between sessions.
//!
//! The only durable state is the display theme, stored as a small YAML file.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("failed to access preferences file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse preferences file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to serialize preferences: {0}")]
    Serialize(#[source] serde_yaml::Error),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{other}'; expected light or dark")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub theme: Theme,
}

/// Reads preferences from `path`. A missing file yields the defaults.
///
/// # Errors
///
/// Returns [`PreferencesError`] if the file exists but cannot be read or parsed.
pub fn load_preferences(path: &Path) -> Result<Preferences, PreferencesError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(Preferences::default());
        }
        Err(e) => {
            return Err(PreferencesError::Io {
                path: path.display().to_string(),
                source: e,
            })
        }
    };

    if content.trim().is_empty() {
        return Ok(Preferences::default());
    }

    serde_yaml::from_str(&content).map_err(|e| PreferencesError::Parse {
        path: path.display().to_string(),
        source: e,
    })
}

/// Writes preferences to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`PreferencesError`] if serialization or any filesystem write fails.
pub fn save_preferences(path: &Path, prefs: &Preferences) -> Result<(), PreferencesError> {
    let io_err = |source| PreferencesError::Io {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }

    let yaml = serde_yaml::to_string(prefs).map_err(PreferencesError::Serialize)?;
    std::fs::write(path, yaml).map_err(io_err)
}
