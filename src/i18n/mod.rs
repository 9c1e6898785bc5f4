//! Internationalization (i18n) module for multi-language support.
//!
//! All language-related logic and localized template data is contained here.
//!
//! - `registry`: single source of truth for the supported languages
//! - `language`: type-safe, registry-validated `Language` value
//! - `strings`: per-language phrase packs (section headings, meta labels,
//!   description/history templates, boilerplate)
//!
//! English is the canonical language: every other block is derived from the
//! `en` block by the localizer, never the reverse.

mod language;
mod registry;
mod strings;

pub use language::Language;
pub use registry::{LanguageConfig, LanguageRegistry};
pub use strings::{fill, pack, LanguagePack, HISTORY_STAGE_LABELS};
