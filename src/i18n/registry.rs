//! Language registry: single source of truth for all supported languages.
//!
//! Uses a singleton with `OnceLock` so the set of languages is initialized
//! once and immutable thereafter. Pipeline stages receive languages through
//! this registry instead of hardcoding codes.

use std::sync::OnceLock;

/// Configuration for a supported language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// ISO 639-1-style language code (e.g., "en", "ru", "ua")
    pub code: &'static str,

    /// English name of the language (e.g., "German")
    pub name: &'static str,

    /// Native name of the language (e.g., "Deutsch")
    pub native_name: &'static str,

    /// Whether this is the canonical/source language (only one should be true)
    pub is_canonical: bool,

    /// Rendered page filename for this language (`index.html` for canonical)
    pub page_filename: &'static str,
}

/// Global language registry singleton.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get a language configuration by its code.
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// All languages, canonical first, in declaration order.
    pub fn list_all(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().collect()
    }

    /// All non-canonical (derived) languages, in declaration order.
    pub fn list_derived(&self) -> Vec<&LanguageConfig> {
        self.languages
            .iter()
            .filter(|lang| !lang.is_canonical)
            .collect()
    }

    /// Get the canonical language configuration.
    ///
    /// # Panics
    /// Panics if zero or multiple canonical languages are defined; that is a
    /// configuration error, not a runtime condition.
    pub fn canonical(&self) -> &LanguageConfig {
        let canonical_langs: Vec<_> = self
            .languages
            .iter()
            .filter(|lang| lang.is_canonical)
            .collect();

        match canonical_langs.len() {
            0 => panic!("No canonical language found in registry"),
            1 => canonical_langs[0],
            _ => panic!("Multiple canonical languages found in registry"),
        }
    }
}

/// The fixed language set: English (canonical) plus seven derived languages.
fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: "en",
            name: "English",
            native_name: "English",
            is_canonical: true,
            page_filename: "index.html",
        },
        LanguageConfig {
            code: "ru",
            name: "Russian",
            native_name: "Русский",
            is_canonical: false,
            page_filename: "ru.html",
        },
        LanguageConfig {
            code: "ua",
            name: "Ukrainian",
            native_name: "Українська",
            is_canonical: false,
            page_filename: "ua.html",
        },
        LanguageConfig {
            code: "de",
            name: "German",
            native_name: "Deutsch",
            is_canonical: false,
            page_filename: "de.html",
        },
        LanguageConfig {
            code: "es",
            name: "Spanish",
            native_name: "Español",
            is_canonical: false,
            page_filename: "es.html",
        },
        LanguageConfig {
            code: "it",
            name: "Italian",
            native_name: "Italiano",
            is_canonical: false,
            page_filename: "it.html",
        },
        LanguageConfig {
            code: "hr",
            name: "Croatian",
            native_name: "Hrvatski",
            is_canonical: false,
            page_filename: "hr.html",
        },
        LanguageConfig {
            code: "hu",
            name: "Hungarian",
            native_name: "Magyar",
            is_canonical: false,
            page_filename: "hu.html",
        },
    ]
}
