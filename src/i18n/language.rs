//! Language type: flexible, validated language representation.
//!
//! A `Language` can only be constructed for a code present in the registry,
//! so downstream code never has to re-validate language codes.

use crate::i18n::{LanguageConfig, LanguageRegistry};
use anyhow::{bail, Result};

/// A validated language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    code: &'static str,
}

impl Language {
    /// The canonical English language.
    pub const ENGLISH: Language = Language { code: "en" };

    /// Create a Language from a language code string.
    ///
    /// # Returns
    /// * `Ok(Language)` if the code is declared in the registry
    /// * `Err` otherwise
    pub fn from_code(code: &str) -> Result<Language> {
        let registry = LanguageRegistry::get();

        match registry.get_by_code(code) {
            // Use the static str from the registry
            Some(config) => Ok(Language { code: config.code }),
            None => bail!("Unknown language code: '{}'", code),
        }
    }

    /// Get the canonical (source) language.
    ///
    /// All content originates in this language; every other block is derived
    /// from it.
    pub fn canonical() -> Language {
        let config = LanguageRegistry::get().canonical();
        Language { code: config.code }
    }

    /// All declared languages, canonical first.
    pub fn all() -> Vec<Language> {
        LanguageRegistry::get()
            .list_all()
            .iter()
            .map(|config| Language { code: config.code })
            .collect()
    }

    /// All derived (non-canonical) languages.
    pub fn derived() -> Vec<Language> {
        LanguageRegistry::get()
            .list_derived()
            .iter()
            .map(|config| Language { code: config.code })
            .collect()
    }

    /// Get the language code.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the full language configuration from the registry.
    ///
    /// # Panics
    /// Panics if the code is missing from the registry; cannot happen for a
    /// properly constructed `Language`.
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .get_by_code(self.code)
            .expect("Language code should always be valid")
    }

    /// Get the English name of the language.
    pub fn name(&self) -> &'static str {
        self.config().name
    }

    /// Filename of the rendered page for this language.
    pub fn page_filename(&self) -> &'static str {
        self.config().page_filename
    }

    /// Check if this is the canonical language.
    pub fn is_canonical(&self) -> bool {
        self.config().is_canonical
    }
}
