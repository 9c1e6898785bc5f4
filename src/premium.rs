//! Premium pass: pads under-length `en` content with generic filler.
//!
//! Never shortens or removes adequate content, and never invents content
//! where a field is empty. Repeated runs are a no-op: a filler sentence is
//! appended at most once even when the padded result is still short.

use crate::config::Config;
use crate::product::{HistoryEntry, Product};
use crate::store::ContentStore;
use anyhow::Result;
use tracing::{info, warn};

const MIN_DESCRIPTION_CHARS: usize = 180;
const MIN_INGREDIENTS_CHARS: usize = 60;
const MIN_HISTORY_ENTRIES: usize = 3;

/// Category-keyed filler sentences for short descriptions.
const DESCRIPTION_FILLERS: &[(&str, &str)] = &[
    (
        "WATER",
        "Carefully sourced and valued for its purity and everyday refreshment, \
it is well suited for daily hydration at home or on the go.",
    ),
    (
        "CEREAL",
        "Prepared using traditional methods, this product is appreciated for its \
consistent quality and versatility in everyday home cooking.",
    ),
    (
        "BEER",
        "Brewed with attention to balance and character, it reflects the heritage \
and craftsmanship associated with its style.",
    ),
    (
        "PASTA",
        "Made to deliver reliable texture and taste, it is suitable for a wide \
range of classic and modern recipes.",
    ),
];

const GENERIC_DESCRIPTION_FILLER: &str =
    "Valued for its consistent quality and suitability for everyday use.";

const INGREDIENTS_SUFFIX: &str = "Commonly used in traditional recipes and everyday cooking.";

fn description_filler(category: &str) -> &'static str {
    let key = category.to_uppercase();
    DESCRIPTION_FILLERS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, filler)| *filler)
        .unwrap_or(GENERIC_DESCRIPTION_FILLER)
}

/// Pad a short description with a category-keyed filler sentence.
/// Empty descriptions are left alone.
pub fn enhance_description(description: &str, category: &str) -> String {
    if description.is_empty() || description.len() > MIN_DESCRIPTION_CHARS {
        return description.to_string();
    }

    let filler = description_filler(category);
    if description.contains(filler) {
        return description.to_string();
    }

    format!("{} {}", description.trim(), filler)
}

/// Pad a short ingredients line with a fixed suffix.
pub fn enhance_ingredients(ingredients: &str) -> String {
    if ingredients.is_empty() || ingredients.len() > MIN_INGREDIENTS_CHARS {
        return ingredients.to_string();
    }
    if ingredients.contains(INGREDIENTS_SUFFIX) {
        return ingredients.to_string();
    }

    format!("{} {}", ingredients.trim(), INGREDIENTS_SUFFIX)
}

/// Regenerate a too-short history as the fixed 3-stage template.
/// Empty histories and histories of 3+ entries are returned unchanged.
pub fn enhance_history(
    history: &[HistoryEntry],
    brand: &str,
    category: &str,
    country: &str,
) -> Vec<HistoryEntry> {
    if history.is_empty() || history.len() >= MIN_HISTORY_ENTRIES {
        return history.to_vec();
    }

    let origin = if country.is_empty() {
        "its region of production"
    } else {
        country
    };

    vec![
        HistoryEntry {
            year: "Origins".to_string(),
            text: format!(
                "The {} brand originates from {}, reflecting local traditions and expertise.",
                brand, origin
            ),
        },
        HistoryEntry {
            year: "Production".to_string(),
            text: format!(
                "Over time, {} has focused on maintaining consistent quality and careful \
production standards within the {} category.",
                brand,
                category.to_lowercase()
            ),
        },
        HistoryEntry {
            year: "Today".to_string(),
            text: format!(
                "Today, {} products are appreciated for their reliability and suitability \
for everyday use.",
                brand
            ),
        },
    ]
}

/// Apply the premium pass to one record. Returns true when anything changed.
pub fn premium_product(product: &mut Product) -> bool {
    let brand = if product.brand.is_empty() {
        "the brand".to_string()
    } else {
        product.brand.clone()
    };
    let category = product.category.clone();
    let country = product.country_of_origin.clone();

    let Some(en) = product.i18n.get_mut("en") else {
        return false;
    };

    let mut changed = false;

    let new_description = enhance_description(&en.description, &category);
    if new_description != en.description {
        en.description = new_description;
        changed = true;
    }

    let new_ingredients = enhance_ingredients(&en.ingredients);
    if new_ingredients != en.ingredients {
        en.ingredients = new_ingredients;
        changed = true;
    }

    let new_history = enhance_history(&en.history, &brand, &category, &country);
    if new_history != en.history {
        en.history = new_history;
        changed = true;
    }

    changed
}

/// Run the premium pass over the whole content store.
pub fn run_premium(config: &Config) -> Result<usize> {
    let store = ContentStore::new(&config.content_dir);
    let mut updated = 0;

    for sku in store.list_skus()? {
        let mut product = match store.load(&sku) {
            Ok(product) => product,
            Err(error) => {
                warn!("Skipping {}: {:#}", sku, error);
                continue;
            }
        };

        if premium_product(&mut product) {
            store.save(&product)?;
            updated += 1;
        }
    }

    info!("Premium pass done: {} products enhanced", updated);
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_description_untouched() {
        let long = "x".repeat(200);
        assert_eq!(enhance_description(&long, "WATER"), long);
    }

    #[test]
    fn test_short_description_gets_category_filler() {
        let out = enhance_description("A crisp still water.", "Water");
        assert!(out.starts_with("A crisp still water."));
        assert!(out.contains("everyday refreshment"));
    }

    #[test]
    fn test_short_description_generic_fallback() {
        let out = enhance_description("Tasty olives.", "Pickled / Olives");
        assert!(out.ends_with(GENERIC_DESCRIPTION_FILLER));
    }

    #[test]
    fn test_empty_description_left_alone() {
        assert_eq!(enhance_description("", "WATER"), "");
    }

    #[test]
    fn test_description_padding_is_idempotent() {
        let once = enhance_description("Tasty olives.", "Pickled / Olives");
        let twice = enhance_description(&once, "Pickled / Olives");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_short_ingredients_padded() {
        let out = enhance_ingredients("Ingredients: olives, salt.");
        assert!(out.ends_with(INGREDIENTS_SUFFIX));
        assert_eq!(enhance_ingredients(&out), out);
    }

    #[test]
    fn test_long_ingredients_untouched() {
        let long = format!("Ingredients: {}.", "olives, ".repeat(20));
        assert_eq!(enhance_ingredients(&long), long);
    }

    #[test]
    fn test_empty_ingredients_left_alone() {
        assert_eq!(enhance_ingredients(""), "");
    }

    fn entry(year: &str) -> HistoryEntry {
        HistoryEntry {
            year: year.to_string(),
            text: "text".to_string(),
        }
    }

    #[test]
    fn test_short_history_regenerated_with_three_stages() {
        let history = vec![entry("—")];
        let out = enhance_history(&history, "KRINOS", "Pickled / Olives", "Greece");

        assert_eq!(out.len(), 3);
        assert_eq!(out[0].year, "Origins");
        assert_eq!(out[1].year, "Production");
        assert_eq!(out[2].year, "Today");
        assert!(out[0].text.contains("Greece"));
        assert!(out[1].text.contains("pickled / olives"));
    }

    #[test]
    fn test_history_missing_country_fallback() {
        let out = enhance_history(&[entry("—")], "KRINOS", "Grocery", "");
        assert!(out[0].text.contains("its region of production"));
    }

    #[test]
    fn test_adequate_history_untouched() {
        let history = vec![entry("Origins"), entry("Development"), entry("Today")];
        assert_eq!(enhance_history(&history, "KRINOS", "Grocery", "Greece"), history);
    }

    #[test]
    fn test_empty_history_left_alone() {
        assert!(enhance_history(&[], "KRINOS", "Grocery", "Greece").is_empty());
    }

    fn short_product() -> Product {
        let mut product = Product {
            sku: "K100".to_string(),
            brand: "KRINOS".to_string(),
            category: "Pickled / Olives".to_string(),
            country_of_origin: "Greece".to_string(),
            ..Default::default()
        };
        let en = product.en_mut();
        en.description = "Tasty olives.".to_string();
        en.ingredients = "Ingredients: olives.".to_string();
        en.history = vec![entry("—")];
        product
    }

    #[test]
    fn test_premium_product_is_idempotent() {
        let mut product = short_product();

        assert!(premium_product(&mut product));
        let after_first = product.clone();

        assert!(!premium_product(&mut product));
        assert_eq!(product, after_first);
    }

    #[test]
    fn test_premium_never_truncates_history() {
        let mut product = short_product();
        product.en_mut().history = vec![
            entry("1950"),
            entry("1980"),
            entry("2000"),
            entry("2020"),
        ];

        premium_product(&mut product);
        assert_eq!(product.en().unwrap().history.len(), 4);
    }

    #[test]
    fn test_premium_missing_en_block_untouched() {
        let mut product = Product {
            sku: "K100".to_string(),
            ..Default::default()
        };
        assert!(!premium_product(&mut product));
    }
}
