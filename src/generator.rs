//! Content Generator: builds the canonical English block for a product.
//!
//! The `en` block is the source of truth; the localizer derives every other
//! language from it. Missing catalog fields degrade gracefully into the
//! templates as empty strings.

use crate::catalog::{read_catalog, safe_filename, CatalogRow};
use crate::config::Config;
use crate::i18n::{self, Language, HISTORY_STAGE_LABELS};
use crate::localizer::localize;
use crate::product::{HistoryEntry, Product};
use crate::store::ContentStore;
use anyhow::Result;
use tracing::info;

/// Build a fresh product record from a catalog row, including its `en` block.
pub fn product_from_row(row: &CatalogRow) -> Product {
    let sku = safe_filename(&row.sku_id);
    let image = format!("../../assets/{}.jpg", sku);

    let mut product = Product {
        sku,
        name: row.name.clone(),
        brand: row.brand.clone(),
        country_of_origin: row.country.clone(),
        category: row.department.clone(),
        size: row.size.clone(),
        alcohol_content: String::new(),
        image,
        tags: row.tags.clone(),
        ..Default::default()
    };

    generate_en_content(&mut product);
    product
}

/// Populate (or regenerate) the `en` block from the product's attributes.
pub fn generate_en_content(product: &mut Product) {
    let title = if product.name.trim().is_empty() {
        product.brand.clone()
    } else {
        product.name.trim().to_string()
    };
    let brand = product.brand.clone();
    let country = product.country_of_origin.clone();

    let pack = i18n::pack(Language::ENGLISH);

    let en = product.en_mut();
    en.title = title.clone();
    en.sections = pack.sections();
    en.meta = pack.meta_labels();
    en.description = i18n::fill(
        pack.description_template,
        &[("title", &title), ("brand", &brand), ("country", &country)],
    );
    en.ingredients = pack.ingredients_text.to_string();
    en.precautions = pack.precautions_text.to_string();
    en.history = pack
        .history_templates
        .iter()
        .zip(HISTORY_STAGE_LABELS)
        .map(|(template, label)| HistoryEntry {
            year: label.to_string(),
            text: i18n::fill(template, &[("brand", &brand), ("country", &country)]),
        })
        .collect();
}

/// Build and persist a record for every catalog row, `en` plus all derived
/// languages. Existing files are overwritten: the catalog is authoritative
/// for generated content.
pub fn run_generate(config: &Config) -> Result<usize> {
    let rows = read_catalog(&config.catalog_file)?;
    let store = ContentStore::new(&config.content_dir);

    let mut created = 0;
    for row in &rows {
        let mut product = product_from_row(row);
        localize(&mut product);
        store.save(&product)?;
        created += 1;
    }

    info!("Content generated for {} products", created);
    Ok(created)
}
