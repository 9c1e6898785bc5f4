//! Heuristic fact extraction from fetched page text.
//!
//! Regex extraction is inherently best-effort, so it sits behind the
//! [`FactExtractor`] trait and can be swapped or stubbed without touching
//! the pipeline.

use crate::enrich::web::clean_spaces;
use regex::Regex;
use std::sync::OnceLock;

/// Structured facts pulled from source text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Facts {
    /// A cleaned "Ingredients: ..." sentence, when one was clearly found.
    pub ingredients: Option<String>,
    /// Allergen names in order of first appearance, deduplicated.
    pub allergens: Vec<String>,
    /// Alcohol-by-volume string like "5.2% ABV", when present.
    pub abv: Option<String>,
}

/// Strategy interface: text in, structured facts out.
pub trait FactExtractor {
    fn extract(&self, text: &str, want_abv: bool) -> Facts;
}

/// The default regex-based extractor.
#[derive(Debug, Default)]
pub struct RegexFactExtractor;

impl FactExtractor for RegexFactExtractor {
    fn extract(&self, text: &str, want_abv: bool) -> Facts {
        Facts {
            ingredients: extract_ingredients(text),
            allergens: extract_allergens(text),
            abv: if want_abv { extract_abv(text) } else { None },
        }
    }
}

fn ingredients_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)Ingredients?\s*[:\-]\s*(.{20,400})").expect("static regex")
    })
}

fn boundary_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\b(Nutrition|Allergen|Storage|Directions|Contains|May contain|Warning)\b")
            .expect("static regex")
    })
}

/// Capture a clean "Ingredients: ..." sentence, stopping at known boundary
/// keywords. Returns `None` when nothing convincing is found.
pub fn extract_ingredients(text: &str) -> Option<String> {
    if text.is_empty() {
        return None;
    }

    let captures = ingredients_regex().captures(text)?;
    let blob = captures.get(1)?.as_str();

    let blob = match boundary_regex().find(blob) {
        Some(m) => &blob[..m.start()],
        None => blob,
    };

    let blob = clean_spaces(blob);
    let blob = blob.trim_matches([' ', '.', ';']);
    if blob.len() < 15 {
        return None;
    }

    Some(format!("Ingredients: {}.", blob))
}

/// Allergen keywords to scan for, in reporting order.
const ALLERGEN_PATTERNS: &[(&str, &str)] = &[
    ("gluten", r"\bgluten\b"),
    ("wheat", r"\bwheat\b"),
    ("barley", r"\bbarley\b"),
    ("milk", r"\b(milk|dairy)\b"),
    ("soy", r"\b(soy|soya)\b"),
    ("egg", r"\begg\b"),
    ("peanuts", r"\bpeanut\b"),
    ("tree nuts", r"\b(almond|hazelnut|walnut|cashew|pistachio|pecan)\b"),
    ("sesame", r"\bsesame\b"),
    ("fish", r"\bfish\b"),
    ("shellfish", r"\b(shellfish|shrimp|crab|lobster)\b"),
];

fn allergen_regexes() -> &'static Vec<(&'static str, Regex)> {
    static RES: OnceLock<Vec<(&'static str, Regex)>> = OnceLock::new();
    RES.get_or_init(|| {
        ALLERGEN_PATTERNS
            .iter()
            .map(|(name, pattern)| (*name, Regex::new(pattern).expect("static regex")))
            .collect()
    })
}

/// Scan for known allergen keywords; deduplicated, ordered by the fixed
/// keyword list.
pub fn extract_allergens(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let lower = text.to_lowercase();
    let mut out = Vec::new();
    for (name, regex) in allergen_regexes() {
        if regex.is_match(&lower) && !out.contains(&name.to_string()) {
            out.push(name.to_string());
        }
    }
    out
}

fn abv_regexes() -> &'static (Regex, Regex) {
    static RES: OnceLock<(Regex, Regex)> = OnceLock::new();
    RES.get_or_init(|| {
        (
            Regex::new(r"(?i)(\d{1,2}(?:\.\d{1,2})?)\s*%?\s*ABV").expect("static regex"),
            Regex::new(r"(?i)alc(?:ohol)?\s*[:\-]?\s*(\d{1,2}(?:\.\d{1,2})?)\s*%").expect("static regex"),
        )
    })
}

/// Find an alcohol-by-volume figure ("5% ABV", "alc. 12.5%").
pub fn extract_abv(text: &str) -> Option<String> {
    if text.is_empty() {
        return None;
    }

    let (abv_re, alc_re) = abv_regexes();
    if let Some(captures) = abv_re.captures(text) {
        return Some(format!("{}% ABV", &captures[1]));
    }
    if let Some(captures) = alc_re.captures(text) {
        return Some(format!("{}% ABV", &captures[1]));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingredients_basic_line() {
        let text = "Product info. Ingredients: green olives, water, sea salt, lactic acid. Nutrition facts follow.";
        let out = extract_ingredients(text).expect("Should extract");
        assert_eq!(out, "Ingredients: green olives, water, sea salt, lactic acid.");
    }

    #[test]
    fn test_ingredients_stops_at_boundary() {
        let text = "Ingredients: wheat flour, water, yeast, salt and more things here Allergen advice: contains wheat.";
        let out = extract_ingredients(text).expect("Should extract");
        assert!(!out.contains("Allergen"));
        assert!(out.starts_with("Ingredients: wheat flour"));
    }

    #[test]
    fn test_ingredients_too_short_rejected() {
        // capture needs 20+ chars and 15+ after boundary trimming
        assert_eq!(extract_ingredients("Ingredients: salt. Nutrition"), None);
    }

    #[test]
    fn test_ingredients_missing() {
        assert_eq!(extract_ingredients("No composition data on this page."), None);
        assert_eq!(extract_ingredients(""), None);
    }

    #[test]
    fn test_allergens_order_and_dedup() {
        let text = "Contains milk and MILK solids, also soy lecithin and wheat starch.";
        let allergens = extract_allergens(text);
        // fixed keyword order: wheat before milk before soy
        assert_eq!(allergens, vec!["wheat", "milk", "soy"]);
    }

    #[test]
    fn test_allergens_tree_nuts_grouped() {
        let allergens = extract_allergens("May contain traces of hazelnut and almond.");
        assert_eq!(allergens, vec!["tree nuts"]);
    }

    #[test]
    fn test_allergens_word_boundaries() {
        // "soy" inside another word must not match
        assert!(extract_allergens("assoyable product").is_empty());
    }

    #[test]
    fn test_abv_patterns() {
        assert_eq!(extract_abv("A lager at 5.2% ABV, crisp."), Some("5.2% ABV".to_string()));
        assert_eq!(extract_abv("alc: 12%"), Some("12% ABV".to_string()));
        assert_eq!(extract_abv("alcohol 40 %"), Some("40% ABV".to_string()));
        assert_eq!(extract_abv("no alcohol info"), None);
    }

    #[test]
    fn test_regex_extractor_respects_want_abv() {
        let extractor = RegexFactExtractor;
        let text = "A beer at 5% ABV. Ingredients: water, barley malt, hops, yeast.";

        let with = extractor.extract(text, true);
        assert_eq!(with.abv, Some("5% ABV".to_string()));
        assert!(with.ingredients.is_some());
        assert_eq!(with.allergens, vec!["barley"]);

        let without = extractor.extract(text, false);
        assert_eq!(without.abv, None);
    }
}
