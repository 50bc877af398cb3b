//! Persisted language preference.
//!
//! Read once at startup; written back every time the language changes. A
//! missing, unreadable or invalid file yields the default language.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{Language, Translator};
use crate::config::config_dir;

#[derive(Debug, Default, Serialize, Deserialize)]
struct PreferencesFile {
    language: Option<String>,
}

/// The user's persisted interface preferences.
#[derive(Debug)]
pub struct Preferences {
    path: PathBuf,
    language: Language,
}

impl Preferences {
    /// Load preferences from `path`.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        let language = std::fs::read_to_string(path)
            .ok()
            .and_then(|contents| match toml::from_str::<PreferencesFile>(&contents) {
                Ok(file) => file.language,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Ignoring unreadable preferences");
                    None
                }
            })
            .and_then(|code| Language::from_code(&code))
            .unwrap_or_default();

        tracing::debug!(%language, "Loaded language preference");
        Self { path: path.to_path_buf(), language }
    }

    /// Active language.
    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    /// Translator for the active language.
    #[must_use]
    pub fn translator(&self) -> Translator {
        Translator::new(self.language)
    }

    /// Switch language and persist the choice.
    ///
    /// The in-memory language changes even if writing fails.
    ///
    /// # Errors
    ///
    /// Returns an error if the preferences file cannot be written.
    pub fn set_language(&mut self, language: Language) -> Result<(), std::io::Error> {
        self.language = language;
        let file = PreferencesFile { language: Some(language.code().to_string()) };
        let contents = toml::to_string(&file).map_err(std::io::Error::other)?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, contents)
    }
}

/// Preferences path: `IMAGE_STUDIO_PREFERENCES`, else
/// `~/.config/image-studio/preferences.toml`.
#[must_use]
pub fn discover_preferences_path() -> PathBuf {
    std::env::var("IMAGE_STUDIO_PREFERENCES")
        .map_or_else(|_| config_dir().join("preferences.toml"), PathBuf::from)
}
