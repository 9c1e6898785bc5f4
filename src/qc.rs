//! Post-QC normalizer.
//!
//! Two independent passes over every stored record's `en` block: a source
//! relevance filter, and a sparkling/still wording fix for Water records.
//! Both passes reach a fixed point, so re-running is a no-op.

use crate::config::Config;
use crate::product::{Product, SourceRef};
use crate::store::ContentStore;
use anyhow::Result;
use regex::Regex;
use std::sync::OnceLock;
use tracing::{info, warn};
use url::Url;

/// Generic encyclopedia/social/known-noise domains never kept as sources.
const BAD_DOMAINS: &[&str] = &[
    "wikipedia.org",
    "facebook.com",
    "instagram.com",
    "twitter.com",
    "pinterest.com",
    "opentermsarchive.org",
    "cbsox.com",
];

/// Retailer domains trusted to carry real product data.
const RETAILER_KEYS: &[&str] = &[
    "amazon",
    "walmart",
    "publix",
    "metro",
    "winndixie",
    "totalwine",
    "instacart",
    "bakkal",
    "gastronom",
];

const PLACEHOLDER_SOURCE_NAME: &str = "Public product information";

/// Counters for one QC run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct QcStats {
    pub files: usize,
    pub sources_cleaned: usize,
    pub water_fixed: usize,
}

fn alnum_key(value: &str) -> String {
    value
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

/// Whether a source URL is worth keeping for this brand.
///
/// Denylisted domains are dropped. Otherwise a domain is kept when a prefix
/// of the brand reads through it, or when it belongs to a known retailer.
pub fn is_relevant_source(url: &str, brand: &str) -> bool {
    if url.is_empty() {
        return false;
    }
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    let domain = parsed.host_str().unwrap_or_default().to_lowercase();

    if BAD_DOMAINS.iter().any(|bad| domain.contains(bad)) {
        return false;
    }

    let brand_key = alnum_key(brand);
    let domain_key = alnum_key(&domain);

    if !brand_key.is_empty() {
        let prefix: String = brand_key.chars().take(6).collect();
        if domain_key.contains(&prefix) {
            return true;
        }
    }

    RETAILER_KEYS.iter().any(|key| domain_key.contains(key))
}

fn sparkling_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bsparkling\b").expect("static regex"))
}

fn still_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bstill\b").expect("static regex"))
}

/// Correct sparkling/still wording in a Water description using title
/// markers (keywords and the BLUE/GREEN label color codes).
pub fn fix_water_description(description: &str, title: &str) -> String {
    let t = title.to_uppercase();
    let mut out = description.to_string();

    if ["NON-CARBONATED", "STILL", "BLUE"].iter().any(|k| t.contains(k)) {
        out = sparkling_regex().replace_all(&out, "still").into_owned();
    }
    if ["SPARKLING", "CARBONATED", "GREEN"].iter().any(|k| t.contains(k)) {
        out = still_regex().replace_all(&out, "sparkling").into_owned();
    }

    out
}

/// Apply both QC passes to one record. Returns (sources_changed, water_changed).
pub fn qc_product(product: &mut Product) -> (bool, bool) {
    let brand = product.brand.clone();
    let category = product.category.clone();

    let Some(en) = product.i18n.get_mut("en") else {
        return (false, false);
    };

    let mut sources_changed = false;
    if !en.sources.is_empty() {
        let mut kept: Vec<SourceRef> = en
            .sources
            .iter()
            .filter(|s| is_relevant_source(&s.url, &brand))
            .cloned()
            .collect();
        if kept.is_empty() {
            kept = vec![SourceRef {
                name: PLACEHOLDER_SOURCE_NAME.to_string(),
                url: String::new(),
            }];
        }

        // comparing against the result (not the filter count) keeps the
        // placeholder stable across repeated runs
        if kept != en.sources {
            en.sources = kept;
            sources_changed = true;
        }
    }

    let mut water_changed = false;
    if category == "Water" {
        let fixed = fix_water_description(&en.description, &en.title);
        if fixed != en.description {
            en.description = fixed;
            water_changed = true;
        }
    }

    (sources_changed, water_changed)
}

/// Run post-QC over the whole content store, writing back only changed files.
pub fn run_qc(config: &Config) -> Result<QcStats> {
    let store = ContentStore::new(&config.content_dir);
    let mut stats = QcStats::default();

    for sku in store.list_skus()? {
        let mut product = match store.load(&sku) {
            Ok(product) => product,
            Err(error) => {
                warn!("Skipping {}: {:#}", sku, error);
                continue;
            }
        };
        stats.files += 1;

        let (sources_changed, water_changed) = qc_product(&mut product);
        if sources_changed {
            stats.sources_cleaned += 1;
        }
        if water_changed {
            stats.water_fixed += 1;
        }
        if sources_changed || water_changed {
            store.save(&product)?;
        }
    }

    info!(
        "Post-QC done: {} files, {} sources cleaned, {} water descriptions fixed",
        stats.files, stats.sources_cleaned, stats.water_fixed
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::ContentBlock;

    #[test]
    fn test_denylisted_domains_rejected() {
        assert!(!is_relevant_source("https://en.wikipedia.org/wiki/Krinos", "KRINOS"));
        assert!(!is_relevant_source("https://facebook.com/krinos", "KRINOS"));
    }

    #[test]
    fn test_brand_prefix_in_domain_accepted() {
        assert!(is_relevant_source("https://krinos.com/products", "KRINOS"));
        assert!(is_relevant_source("https://shop.krinosfoods.ca/", "Krinos Foods"));
    }

    #[test]
    fn test_retailers_accepted() {
        assert!(is_relevant_source("https://www.amazon.com/dp/B000", "KRINOS"));
        assert!(is_relevant_source("https://www.totalwine.com/p/1", "Leffe"));
    }

    #[test]
    fn test_unrelated_domain_rejected() {
        assert!(!is_relevant_source("https://random-blog.example.com/post", "KRINOS"));
        assert!(!is_relevant_source("", "KRINOS"));
        assert!(!is_relevant_source("not a url", "KRINOS"));
    }

    #[test]
    fn test_water_fix_still_title_rewrites_sparkling() {
        let out = fix_water_description(
            "A refreshing sparkling mineral water.",
            "SPRING WATER STILL 1L BLUE",
        );
        assert!(out.contains("still mineral water"));
        assert!(!out.to_lowercase().contains("sparkling"));
    }

    #[test]
    fn test_water_fix_sparkling_title_rewrites_still() {
        let out = fix_water_description(
            "A classic still mineral water.",
            "SPARKLING WATER 1L GREEN",
        );
        assert!(out.contains("sparkling mineral water"));
        // whole-word replacement only
        assert!(!out.to_lowercase().contains(" still "));
    }

    #[test]
    fn test_water_fix_no_markers_unchanged() {
        let desc = "A classic still mineral water.";
        assert_eq!(fix_water_description(desc, "MINERAL WATER 1L"), desc);
    }

    fn product_with_sources(sources: Vec<SourceRef>) -> Product {
        let mut product = Product {
            sku: "K100".to_string(),
            brand: "KRINOS".to_string(),
            category: "Pickled / Olives".to_string(),
            ..Default::default()
        };
        product.i18n.insert(
            "en".to_string(),
            ContentBlock {
                sources,
                ..Default::default()
            },
        );
        product
    }

    fn source(url: &str) -> SourceRef {
        SourceRef {
            name: "Source".to_string(),
            url: url.to_string(),
        }
    }

    #[test]
    fn test_qc_filters_sources_and_keeps_relevant() {
        let mut product = product_with_sources(vec![
            source("https://krinos.com/olives"),
            source("https://en.wikipedia.org/wiki/Olive"),
        ]);

        let (sources_changed, _) = qc_product(&mut product);
        assert!(sources_changed);

        let sources = &product.en().unwrap().sources;
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].url, "https://krinos.com/olives");
    }

    #[test]
    fn test_qc_substitutes_placeholder_when_all_filtered() {
        let mut product = product_with_sources(vec![
            source("https://en.wikipedia.org/wiki/Olive"),
            source("https://random-blog.example.com/post"),
        ]);

        let (sources_changed, _) = qc_product(&mut product);
        assert!(sources_changed);

        let sources = &product.en().unwrap().sources;
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].name, PLACEHOLDER_SOURCE_NAME);
        assert_eq!(sources[0].url, "");
    }

    #[test]
    fn test_qc_water_description_corrected() {
        let mut product = Product {
            sku: "W1".to_string(),
            brand: "AQUA".to_string(),
            category: "Water".to_string(),
            ..Default::default()
        };
        product.i18n.insert(
            "en".to_string(),
            ContentBlock {
                title: "SPARKLING WATER 1L".to_string(),
                description: "A smooth still mineral water.".to_string(),
                ..Default::default()
            },
        );

        let (_, water_changed) = qc_product(&mut product);
        assert!(water_changed);
        assert!(product.en().unwrap().description.contains("sparkling"));
    }

    #[test]
    fn test_qc_is_idempotent() {
        let mut product = product_with_sources(vec![
            source("https://en.wikipedia.org/wiki/Olive"),
        ]);
        product.en_mut().title = "SPARKLING WATER".to_string();
        product.en_mut().description = "A crisp still water.".to_string();
        product.category = "Water".to_string();

        qc_product(&mut product);
        let after_first = product.clone();

        let (sources_changed, water_changed) = qc_product(&mut product);
        assert!(!sources_changed);
        assert!(!water_changed);
        assert_eq!(product, after_first);
    }

    #[test]
    fn test_qc_missing_en_block_untouched() {
        let mut product = Product {
            sku: "K100".to_string(),
            ..Default::default()
        };
        assert_eq!(qc_product(&mut product), (false, false));
    }
}
