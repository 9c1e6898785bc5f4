//! Localizer: expands a populated `en` block into every derived language.
//!
//! Each derived block starts as a deep copy of `en`, then gets localized
//! section headings, meta labels, description, boilerplate, and history.
//! The title is copied verbatim: brand and product names are proper nouns
//! and are never translated. After this step every declared language has a
//! block structurally identical in shape to `en`.

use crate::i18n::{self, Language};
use crate::product::{HistoryEntry, Product};

/// Derive all non-canonical language blocks from the product's `en` block.
///
/// Existing derived blocks are overwritten; the `en` block is untouched.
/// A product without an `en` block gets one implicitly (empty), which keeps
/// the shape guarantee but produces blank templates; callers are expected
/// to run the generator first.
pub fn localize(product: &mut Product) {
    let en = product.en_mut().clone();

    let name = if product.name.trim().is_empty() {
        en.title.clone()
    } else {
        product.name.trim().to_string()
    };
    let brand = product.brand.trim().to_string();
    let country = product.country_of_origin.trim().to_string();
    let size = product.size.trim().to_string();

    let years: Vec<String> = en.history.iter().map(|h| h.year.clone()).collect();

    for language in Language::derived() {
        let pack = i18n::pack(language);
        let mut block = en.clone();

        block.sections = pack.sections();
        block.meta = pack.meta_labels();
        block.title = name.clone();
        block.description = i18n::fill(
            pack.description_template,
            &[
                ("name", name.as_str()),
                ("brand", brand.as_str()),
                ("country", country.as_str()),
                ("size", size.as_str()),
            ],
        );
        block.ingredients = pack.ingredients_text.to_string();
        block.precautions = pack.precautions_text.to_string();
        // sources live only on the en/enriched block
        block.sources = Vec::new();

        // Localized history templates, reusing year labels positionally from en
        block.history = pack
            .history_templates
            .iter()
            .enumerate()
            .map(|(i, template)| HistoryEntry {
                year: years.get(i).cloned().unwrap_or_default(),
                text: i18n::fill(template, &[("brand", brand.as_str()), ("country", country.as_str())]),
            })
            .collect();

        product.i18n.insert(language.code().to_string(), block);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogRow;
    use crate::generator::product_from_row;

    fn localized_product() -> Product {
        let mut product = product_from_row(&CatalogRow {
            sku_id: "K100".to_string(),
            name: "Olives 500g".to_string(),
            brand: "KRINOS".to_string(),
            country: "Greece".to_string(),
            department: "Pickled / Olives".to_string(),
            size: "500g".to_string(),
            tags: vec!["greek".to_string(), "olives".to_string()],
        });
        localize(&mut product);
        product
    }

    #[test]
    fn test_all_eight_languages_present() {
        let product = localized_product();
        assert_eq!(product.i18n.len(), 8);
        for language in Language::all() {
            assert!(product.i18n.contains_key(language.code()), "{}", language.code());
        }
    }

    #[test]
    fn test_title_never_translated() {
        let product = localized_product();
        for (_, block) in &product.i18n {
            assert_eq!(block.title, "Olives 500g");
        }
    }

    #[test]
    fn test_structural_parity_with_en() {
        let product = localized_product();
        let en = product.en().unwrap();

        for language in Language::derived() {
            let block = &product.i18n[language.code()];
            let section_keys: Vec<_> = block.sections.keys().collect();
            let en_section_keys: Vec<_> = en.sections.keys().collect();
            assert_eq!(section_keys, en_section_keys, "{}", language.code());

            let meta_keys: Vec<_> = block.meta.keys().collect();
            let en_meta_keys: Vec<_> = en.meta.keys().collect();
            assert_eq!(meta_keys, en_meta_keys, "{}", language.code());

            assert_eq!(block.history.len(), en.history.len(), "{}", language.code());
        }
    }

    #[test]
    fn test_history_years_copied_positionally() {
        let product = localized_product();
        let ru = &product.i18n["ru"];
        assert_eq!(ru.history[0].year, "Origins");
        assert_eq!(ru.history[1].year, "Development");
        assert_eq!(ru.history[2].year, "Today");
        // but the text is localized
        assert!(ru.history[0].text.contains("KRINOS"));
        assert!(ru.history[0].text.contains("Бренд"));
    }

    #[test]
    fn test_description_localized_with_product_fields() {
        let product = localized_product();
        let de = &product.i18n["de"];
        assert!(de.description.contains("Olives 500g"));
        assert!(de.description.contains("KRINOS"));
        assert!(de.description.contains("Greece"));
        assert!(de.description.contains("500g"));
    }

    #[test]
    fn test_missing_en_history_years_default_empty() {
        let mut product = localized_product();
        product.en_mut().history.truncate(1);
        localize(&mut product);

        let es = &product.i18n["es"];
        assert_eq!(es.history.len(), 3);
        assert_eq!(es.history[0].year, "Origins");
        assert_eq!(es.history[1].year, "");
        assert_eq!(es.history[2].year, "");
    }

    #[test]
    fn test_en_block_untouched() {
        let product = localized_product();
        let en = product.en().unwrap();
        assert!(en.description.contains("using traditional methods"));
        assert_eq!(en.sections["description_title"], "Description");
    }

    #[test]
    fn test_derived_blocks_drop_sources() {
        let mut product = localized_product();
        product.en_mut().sources = vec![crate::product::SourceRef {
            name: "Official site".to_string(),
            url: "https://krinos.com".to_string(),
        }];
        localize(&mut product);

        assert_eq!(product.en().unwrap().sources.len(), 1);
        for language in Language::derived() {
            assert!(product.i18n[language.code()].sources.is_empty());
        }
    }

    #[test]
    fn test_localize_is_idempotent() {
        let mut product = localized_product();
        let before = product.clone();
        localize(&mut product);
        assert_eq!(product, before);
    }
}
