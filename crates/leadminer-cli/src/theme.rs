//! `leadminer theme`: show or change the saved theme.

use std::path::Path;

use clap::ValueEnum;
use leadminer_core::{load_preferences, save_preferences, Theme};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeAction {
    Light,
    Dark,
    /// Switch between light and dark
    Toggle,
}

impl ThemeAction {
    fn apply(self, current: Theme) -> Theme {
        match self {
            ThemeAction::Light => Theme::Light,
            ThemeAction::Dark => Theme::Dark,
            ThemeAction::Toggle => current.toggled(),
        }
    }
}

/// Prints the saved theme, or updates it when `action` is given.
///
/// # Errors
///
/// Returns an error if the preferences file cannot be read or written.
pub(crate) fn run_theme(path: &Path, action: Option<ThemeAction>) -> anyhow::Result<()> {
    let theme = update_theme(path, action)?;
    println!("{theme}");
    Ok(())
}

fn update_theme(path: &Path, action: Option<ThemeAction>) -> anyhow::Result<Theme> {
    let mut prefs = load_preferences(path)?;
    let Some(action) = action else {
        return Ok(prefs.theme);
    };

    prefs.theme = action.apply(prefs.theme);
    save_preferences(path, &prefs)?;
    tracing::info!(theme = %prefs.theme, path = %path.display(), "theme saved");
    Ok(prefs.theme)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reads_as_light() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.yaml");
        assert_eq!(update_theme(&path, None).unwrap(), Theme::Light);
        assert!(!path.exists());
    }

    #[test]
    fn toggle_persists_across_calls() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.yaml");

        assert_eq!(update_theme(&path, Some(ThemeAction::Toggle)).unwrap(), Theme::Dark);
        assert_eq!(update_theme(&path, None).unwrap(), Theme::Dark);
        assert_eq!(update_theme(&path, Some(ThemeAction::Toggle)).unwrap(), Theme::Light);
    }

    #[test]
    fn explicit_theme_overrides_current() {
        assert_eq!(ThemeAction::Dark.apply(Theme::Dark), Theme::Dark);
        assert_eq!(ThemeAction::Light.apply(Theme::Dark), Theme::Light);
    }
}
