use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One entry of a product's brand/product history timeline.
///
/// `year` is a display label rather than a number: generated content uses
/// stage labels ("Origins", "Development", "Today") and enriched content
/// may use a real year or an em-dash placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub text: String,
}

/// A reference to a web source the enricher actually used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// Localized content for one language.
///
/// The `en` block is the source of truth; every other language block is
/// derived from it by the localizer and shares its key structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    /// Product name, copied verbatim into every language (never translated).
    #[serde(default)]
    pub title: String,

    /// Section-key -> localized heading (description_title, ingredients_title, ...).
    #[serde(default)]
    pub sections: BTreeMap<String, String>,

    /// Field-key -> localized metadata label (brand, country_of_origin, ...).
    #[serde(default)]
    pub meta: BTreeMap<String, String>,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub ingredients: String,

    #[serde(default)]
    pub precautions: String,

    #[serde(default)]
    pub history: Vec<HistoryEntry>,

    /// Only populated on the English/enriched block.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<SourceRef>,
}

/// A product record: one per SKU, persisted as one JSON document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub sku: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub brand: String,

    #[serde(default)]
    pub country_of_origin: String,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub size: String,

    #[serde(default)]
    pub alcohol_content: String,

    #[serde(default)]
    pub image: String,

    #[serde(default)]
    pub tags: Vec<String>,

    /// Language code -> localized content block. Always contains "en".
    #[serde(default)]
    pub i18n: BTreeMap<String, ContentBlock>,
}

impl Product {
    /// The canonical English block, if present.
    pub fn en(&self) -> Option<&ContentBlock> {
        self.i18n.get("en")
    }

    /// Mutable access to the English block, creating it if absent.
    pub fn en_mut(&mut self) -> &mut ContentBlock {
        self.i18n.entry("en".to_string()).or_default()
    }
}
