//! Key-based string localization.
//!
//! Lookup order is: active language, then English, then the key itself, so
//! a missing translation never renders as an empty string.

mod preferences;
mod translations;

use std::fmt;

pub use preferences::{discover_preferences_path, Preferences};

/// Supported interface languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    /// English.
    En,
    /// Indonesian, the default.
    #[default]
    Id,
}

impl Language {
    /// Two-letter code, as persisted.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Id => "id",
        }
    }

    /// Parse a two-letter code. Anything else is rejected.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "en" => Some(Self::En),
            "id" => Some(Self::Id),
            _ => None,
        }
    }

    fn table(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::En => translations::EN,
            Self::Id => translations::ID,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Parse a language code for the command line.
///
/// # Errors
///
/// Returns an error for anything other than `en` or `id`.
pub fn parse_language(code: &str) -> Result<Language, String> {
    Language::from_code(code).ok_or_else(|| format!("Unsupported language '{code}'. Valid: en, id"))
}

/// Resolves translation keys for one language.
#[derive(Debug, Clone, Copy)]
pub struct Translator {
    language: Language,
}

impl Translator {
    /// Create a translator for `language`.
    #[must_use]
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    /// Active language.
    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    /// Translate `key`, falling back to English and then to the key itself.
    #[must_use]
    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        lookup(self.language.table(), key)
            .or_else(|| lookup(translations::EN, key))
            .unwrap_or(key)
    }
}

fn lookup(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}
