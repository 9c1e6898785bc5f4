//! Page renderer: one HTML file per (SKU, language).
//!
//! A pure templating transform over the content store. Labeled `{{TOKEN}}`
//! placeholders are substituted with record fields and per-language content;
//! missing keys default to empty strings.

use crate::config::Config;
use crate::i18n::Language;
use crate::product::Product;
use crate::store::ContentStore;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Built-in page template, used unless the config points at a custom one.
pub const DEFAULT_TEMPLATE: &str = include_str!("../assets/template.html");

fn lookup<'a>(map: &'a std::collections::BTreeMap<String, String>, key: &str) -> &'a str {
    map.get(key).map(String::as_str).unwrap_or("")
}

/// Tag list -> one span per tag.
pub fn render_tags(tags: &[String]) -> String {
    tags.iter()
        .map(|tag| format!(r#"<span class="tag">{}</span>"#, tag))
        .collect()
}

/// History entries -> one block per entry, skipping entries with empty text.
/// The year span is omitted when the label is empty.
pub fn render_history(history: &[crate::product::HistoryEntry]) -> String {
    let mut out = String::new();
    for entry in history {
        if entry.text.is_empty() {
            continue;
        }
        out.push_str(r#"<div class="history-item">"#);
        if !entry.year.is_empty() {
            out.push_str(&format!(r#"<span class="year">{}</span>"#, entry.year));
        }
        out.push_str(&format!("<p>{}</p>", entry.text));
        out.push_str("</div>");
    }
    out
}

/// Render one language page for a product.
pub fn render_page(template: &str, product: &Product, language: Language) -> String {
    let empty = crate::product::ContentBlock::default();
    let block = product.i18n.get(language.code()).unwrap_or(&empty);

    // title is the untranslated product name
    let title = if product.name.is_empty() {
        block.title.as_str()
    } else {
        product.name.as_str()
    };

    template
        .replace("{{TITLE}}", title)
        .replace("{{TAGS}}", &render_tags(&product.tags))
        .replace("{{BRAND_LABEL}}", lookup(&block.meta, "brand"))
        .replace("{{COUNTRY_LABEL}}", lookup(&block.meta, "country_of_origin"))
        .replace("{{CATEGORY_LABEL}}", lookup(&block.meta, "category"))
        .replace("{{SIZE_LABEL}}", lookup(&block.meta, "size"))
        .replace("{{ALCOHOL_LABEL}}", lookup(&block.meta, "alcohol_content"))
        .replace("{{BRAND}}", &product.brand)
        .replace("{{COUNTRY}}", &product.country_of_origin)
        .replace("{{CATEGORY}}", &product.category)
        .replace("{{SIZE}}", &product.size)
        .replace("{{ALCOHOL}}", &product.alcohol_content)
        .replace("{{SKU}}", &product.sku)
        .replace("{{IMAGE}}", &product.image)
        .replace("{{DESC_TITLE}}", lookup(&block.sections, "description_title"))
        .replace("{{ING_TITLE}}", lookup(&block.sections, "ingredients_title"))
        .replace("{{PREC_TITLE}}", lookup(&block.sections, "precautions_title"))
        .replace("{{HISTORY_TITLE}}", lookup(&block.sections, "history_title"))
        .replace("{{DESCRIPTION}}", &block.description)
        .replace("{{INGREDIENTS}}", &block.ingredients)
        .replace("{{PRECAUTIONS}}", &block.precautions)
        .replace("{{HISTORY_ITEMS}}", &render_history(&block.history))
}

/// Render all language pages for one product into `<output_dir>/<sku>/`.
pub fn render_product(template: &str, product: &Product, output_dir: &Path) -> Result<()> {
    let product_dir = output_dir.join(&product.sku);
    fs::create_dir_all(&product_dir)
        .with_context(|| format!("Failed to create {}", product_dir.display()))?;

    for language in Language::all() {
        let html = render_page(template, product, language);
        let path = product_dir.join(language.page_filename());
        fs::write(&path, html)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }
    Ok(())
}

/// Load the page template, falling back to the built-in one.
pub fn load_template(config: &Config) -> Result<String> {
    match &config.template_file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read template {}", path.display())),
        None => Ok(DEFAULT_TEMPLATE.to_string()),
    }
}

/// Render every stored product. Returns the number of products rendered.
pub fn run_render(config: &Config) -> Result<usize> {
    let template = load_template(config)?;
    let store = ContentStore::new(&config.content_dir);
    let mut rendered = 0;

    for sku in store.list_skus()? {
        let product = match store.load(&sku) {
            Ok(product) => product,
            Err(error) => {
                warn!("Skipping {}: {:#}", sku, error);
                continue;
            }
        };
        if product.sku.trim().is_empty() {
            continue;
        }

        render_product(&template, &product, &config.output_dir)?;
        rendered += 1;
    }

    info!("Pages generated for {} products", rendered);
    Ok(rendered)
}
