//! Text generation for enriched content.
//!
//! Produces short, consistent "premium grocery" copy from phrase banks and
//! the extracted facts. Phrase selection is driven by a caller-supplied RNG
//! so output is deterministic under a seeded generator in tests.

use crate::enrich::category::Category;
use crate::product::HistoryEntry;
use rand::seq::SliceRandom;
use rand::Rng;

pub const SAFE_DEFAULT_INGREDIENTS: &str =
    "Ingredients: see manufacturer's labeling on the package.";

pub const WATER_DEFAULT_INGREDIENTS: &str = "Ingredients: natural water.";

pub const SAFE_DEFAULT_PRECAUTIONS: &str =
    "Store as directed on the label. Keep in a cool, dry place unless otherwise noted.";

pub const ALCOHOL_PRECAUTIONS: &str = "Alcoholic beverage: intended for adults 21+. \
Do not drink during pregnancy. Enjoy responsibly; do not drink and drive.";

const SAFE_DEFAULT_HISTORY: &str =
    "Produced under the {brand} name; refer to the manufacturer for brand and product background.";

const OPENERS: &[&str] = &[
    "A well-balanced",
    "A classic",
    "A refreshing",
    "A flavorful",
    "A smooth",
    "A bright and satisfying",
];

const FINISHES: &[&str] = &[
    "Great chilled or served as directed on the label.",
    "Perfect for everyday enjoyment.",
    "An easy pick for your pantry and your table.",
    "Ideal for sharing, pairing, or snacking.",
    "A convenient choice for quick meals and moments.",
];

fn size_hint(size: &str) -> String {
    let s = size.trim();
    if s.is_empty() {
        String::new()
    } else {
        format!(" ({})", s)
    }
}

/// Generate a category-specific description from the phrase banks.
pub fn generate_description<R: Rng + ?Sized>(
    rng: &mut R,
    category: Category,
    sku_name: &str,
    size: &str,
    abv: Option<&str>,
) -> String {
    let opener = OPENERS.choose(rng).expect("non-empty bank");
    let finish = FINISHES.choose(rng).expect("non-empty bank");
    let hint = size_hint(size);
    let abv_part = abv.map(|a| format!(" ({})", a)).unwrap_or_default();

    match category {
        Category::Water => {
            let n = sku_name.to_uppercase();
            let sparkle = if n.contains("SPARKLING") || n.contains("CARBONATED") {
                "sparkling"
            } else {
                "still"
            };
            format!(
                "{} {} mineral water{} with a clean, crisp finish. {}",
                opener, sparkle, hint, finish
            )
        }
        Category::Beer => format!(
            "{} beer{}{} with a lively character and a smooth finish. {}",
            opener, abv_part, hint, finish
        ),
        Category::Wine => format!(
            "{} wine{}{} crafted for easy sipping and food pairing. {}",
            opener, abv_part, hint, finish
        ),
        Category::Spirits => format!(
            "{} spirit{}{} with a clean profile and a warming finish. {}",
            opener, abv_part, hint, finish
        ),
        Category::Confectionery => format!(
            "{} sweet treat{} that is rich, comforting, and perfect with coffee or tea. {}",
            opener, hint, finish
        ),
        Category::Dairy => format!(
            "{} dairy item{} with a creamy texture and a clean, fresh taste. {}",
            opener, hint, finish
        ),
        Category::Seasoning => format!(
            "{} kitchen staple{} designed to mix, dissolve, and perform reliably in cooking and baking. {}",
            opener, hint, finish
        ),
        Category::PickledOlives => format!(
            "{} brined bite{} with a firm texture and bold, savory flavor. {}",
            opener, hint, finish
        ),
        Category::Juice | Category::SoftDrink | Category::Grocery => format!(
            "{} grocery item{} made for convenient everyday use. {}",
            opener, hint, finish
        ),
    }
}

/// Generate precautions: allergen disclosure, alcohol boilerplate when
/// applicable, then category-specific storage guidance.
pub fn generate_precautions(category: Category, allergens: &[String], alcohol: bool) -> String {
    let mut parts: Vec<String> = Vec::new();

    if !allergens.is_empty() {
        parts.push(format!(
            "Allergen information: contains {}.",
            allergens.join(", ")
        ));
    }
    if alcohol {
        parts.push(ALCOHOL_PRECAUTIONS.to_string());
    }

    let storage = match category {
        Category::Dairy => "Keep refrigerated; follow storage instructions on the label.",
        Category::Confectionery | Category::Seasoning | Category::Grocery | Category::PickledOlives => {
            "Store in a cool, dry place. Refrigerate after opening if indicated."
        }
        Category::Water => "Store in a cool, dark place. Serve chilled.",
        _ => SAFE_DEFAULT_PRECAUTIONS,
    };
    parts.push(storage.to_string());

    parts.join(" ")
}

/// Generate a conservative history: a short non-specific hint when a
/// Wikipedia-like source was seen, otherwise a safe generic brand statement.
pub fn generate_history(brand: &str, wiki_hint: Option<String>) -> Vec<HistoryEntry> {
    let text = wiki_hint.unwrap_or_else(|| SAFE_DEFAULT_HISTORY.replace("{brand}", brand));
    vec![HistoryEntry {
        year: "—".to_string(),
        text,
    }]
}

/// A short, non-specific brand hint if any source URL looks like Wikipedia.
/// Deliberately conservative: no dates, no claims beyond "recognized brand".
pub fn pick_wiki_hint(source_urls: &[&str], brand: &str) -> Option<String> {
    source_urls
        .iter()
        .any(|url| url.to_lowercase().contains("wikipedia"))
        .then(|| {
            format!(
                "{} is a recognized brand; see public references for background and brand history.",
                brand
            )
        })
}
