//! Enricher: produces an alternative, fact-augmented `en` block per SKU
//! from open web sources.
//!
//! Per SKU: classify category, build search queries, search (cached), fetch
//! and rank candidate pages (cached), extract facts, and compose content in
//! a consistent style. No failure escapes the per-SKU boundary: a run
//! always processes every input row.

pub mod cache;
pub mod category;
pub mod compose;
pub mod extract;
pub mod web;

use crate::catalog::CatalogRow;
use crate::config::Config;
use crate::product::{ContentBlock, Product, SourceRef};
use anyhow::{Context, Result};
use cache::{WebCache, WebDoc};
use category::{guess_category, is_alcohol, Category};
use extract::{FactExtractor, RegexFactExtractor};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use std::io::Write;
use tracing::info;
use web::{clean_spaces, WebClient, MAX_FETCH_CHARS, MIN_DOC_CHARS};

/// Only the first few queries are searched, to keep runs fast.
const MAX_QUERIES: usize = 3;

/// How many ranked documents feed fact extraction and the sources list.
const TOP_DOCS: usize = 3;

/// Domains never worth fetching.
const SKIP_DOMAINS: &[&str] = &["facebook.com", "instagram.com", "pinterest.com"];

/// Tidy a brand for query building: lowercase then re-capitalize each word,
/// preserving the USA abbreviation.
pub fn title_case_brand(brand: &str) -> String {
    let cleaned = clean_spaces(brand).to_lowercase();
    cleaned
        .split(' ')
        .map(|word| {
            if word == "usa" {
                "USA".to_string()
            } else {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                    None => String::new(),
                }
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalize a SKU name for queries and matching.
pub fn normalize_name(name: &str) -> String {
    clean_spaces(&name.replace('_', " "))
}

/// Build the ordered, deduplicated query list for one SKU.
pub fn build_queries(brand: &str, sku_name: &str, category: Category) -> Vec<String> {
    let b = clean_spaces(brand);
    let n = clean_spaces(sku_name);
    let base = clean_spaces(&format!("{} {}", b, n));

    let third = if category.is_alcoholic() {
        format!("{} ABV", base)
    } else {
        format!("{} product", base)
    };

    let candidates = [
        format!("{} ingredients", base),
        format!("{} allergen", base),
        third,
        format!("{} official site", b),
        format!("{} history", b),
    ];

    let mut out: Vec<String> = Vec::new();
    for query in candidates {
        let query = clean_spaces(&query);
        if !query.is_empty() && !out.contains(&query) {
            out.push(query);
        }
    }
    out
}

/// Rank fetched documents by crude relevance and keep the best few.
///
/// Score: +25 when the brand appears in title/text head, +3 per product-name
/// token (len >= 4, first 8 tokens) found, +5 for a sane text length.
pub fn rank_docs(docs: Vec<WebDoc>, sku_name: &str, brand: &str) -> Vec<WebDoc> {
    if docs.is_empty() {
        return docs;
    }

    let brand_lower = brand.to_lowercase();
    let tokens: Vec<String> = sku_name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .take(8)
        .filter(|t| t.len() >= 4)
        .map(|t| t.to_string())
        .collect();

    let mut ranked: Vec<(i32, WebDoc)> = docs
        .into_iter()
        .map(|doc| {
            let mut head_len = doc.text.len().min(2000);
            while !doc.text.is_char_boundary(head_len) {
                head_len -= 1;
            }
            let hay = format!("{} {}", doc.title, &doc.text[..head_len]).to_lowercase();

            let mut score = 0;
            if !brand_lower.is_empty() && hay.contains(&brand_lower) {
                score += 25;
            }
            for token in &tokens {
                if hay.contains(token.as_str()) {
                    score += 3;
                }
            }
            if doc.text.len() > 200 && doc.text.len() < 12_000 {
                score += 5;
            }
            (score, doc)
        })
        .collect();

    ranked.sort_by(|a, b| b.0.cmp(&a.0));
    ranked.into_iter().take(TOP_DOCS).map(|(_, doc)| doc).collect()
}

/// Per-SKU enrichment engine.
pub struct Enricher {
    client: WebClient,
    extractor: Box<dyn FactExtractor + Send + Sync>,
    max_urls: usize,
}

impl Enricher {
    pub fn new(
        client: WebClient,
        extractor: Box<dyn FactExtractor + Send + Sync>,
        max_urls: usize,
    ) -> Self {
        Self {
            client,
            extractor,
            max_urls,
        }
    }

    /// Enrich one catalog row into a record carrying a fact-augmented `en`
    /// block. Never fails: missing facts fall back to safe defaults.
    pub async fn enrich_row<R: Rng>(&self, row: &CatalogRow, rng: &mut R) -> Product {
        let brand = title_case_brand(&row.brand);
        let sku_name = normalize_name(&row.name);
        let category = guess_category(&row.department, &sku_name);
        let alcohol = is_alcohol(category, &sku_name);

        let queries = build_queries(&brand, &sku_name, category);

        // Search -> candidate URLs
        let mut urls: Vec<String> = Vec::new();
        'queries: for query in queries.iter().take(MAX_QUERIES) {
            for hit in self.client.search(query).await {
                let url = hit.url;
                if !url.starts_with("http") {
                    continue;
                }
                let lower = url.to_lowercase();
                if SKIP_DOMAINS.iter().any(|d| lower.contains(d)) {
                    continue;
                }
                if !urls.contains(&url) {
                    urls.push(url);
                }
                if urls.len() >= self.max_urls {
                    break 'queries;
                }
            }
        }

        // Fetch -> usable documents
        let mut docs: Vec<WebDoc> = Vec::new();
        for url in &urls {
            let doc = self.client.fetch_page(url).await;
            if doc.text.len() > MIN_DOC_CHARS {
                docs.push(doc);
            }
        }

        let best_docs = rank_docs(docs, &sku_name, &brand);

        let mut merged_text = best_docs
            .iter()
            .map(|d| d.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        if merged_text.len() > MAX_FETCH_CHARS {
            let mut cut = MAX_FETCH_CHARS;
            while !merged_text.is_char_boundary(cut) {
                cut -= 1;
            }
            merged_text.truncate(cut);
        }

        let facts = self.extractor.extract(&merged_text, alcohol);

        let description = compose::generate_description(
            rng,
            category,
            &sku_name,
            &row.size,
            facts.abv.as_deref(),
        );
        let precautions = compose::generate_precautions(category, &facts.allergens, alcohol);

        let ingredients = facts.ingredients.unwrap_or_else(|| {
            if category == Category::Water {
                compose::WATER_DEFAULT_INGREDIENTS.to_string()
            } else {
                compose::SAFE_DEFAULT_INGREDIENTS.to_string()
            }
        });

        let source_urls: Vec<&str> = best_docs.iter().map(|d| d.url.as_str()).collect();
        let wiki_hint = compose::pick_wiki_hint(&source_urls, &brand);
        let history = compose::generate_history(&brand, wiki_hint);

        let sources = best_docs
            .iter()
            .map(|doc| {
                let name = if doc.title.trim().is_empty() {
                    "Source".to_string()
                } else {
                    doc.title.trim().chars().take(120).collect()
                };
                SourceRef {
                    name,
                    url: doc.url.clone(),
                }
            })
            .collect();

        let en = ContentBlock {
            title: clean_spaces(&title_case_brand(&sku_name)),
            description,
            ingredients,
            precautions,
            history,
            sources,
            ..Default::default()
        };

        Product {
            // sanitized so the merge step can match stored filenames
            sku: crate::catalog::safe_filename(&row.sku_id),
            brand: row.brand.clone(),
            category: category.label().to_string(),
            size: row.size.clone(),
            i18n: BTreeMap::from([("en".to_string(), en)]),
            ..Default::default()
        }
    }
}

/// Run enrichment over the whole catalog, writing the aggregate JSON
/// document and the parallel NDJSON stream.
pub async fn run_enrichment(config: &Config, rows: &[CatalogRow]) -> Result<()> {
    let cache = WebCache::new(&config.cache_dir)?;
    let client = WebClient::new(config.search_endpoint.clone(), cache)?;
    let enricher = Enricher::new(client, Box::new(RegexFactExtractor), config.max_urls_per_sku);

    let rows: &[CatalogRow] = if config.enrich_limit > 0 && config.enrich_limit < rows.len() {
        &rows[..config.enrich_limit]
    } else {
        rows
    };

    let mut rng = StdRng::from_entropy();
    let mut enriched: BTreeMap<String, Product> = BTreeMap::new();

    let mut ndjson = std::fs::File::create(&config.enriched_ndjson).with_context(|| {
        format!("Failed to create {}", config.enriched_ndjson.display())
    })?;

    let total = rows.len();
    for (index, row) in rows.iter().enumerate() {
        info!("[{}/{}] Enriching {}", index + 1, total, row.sku_id);

        let record = enricher.enrich_row(row, &mut rng).await;
        let line = serde_json::to_string(&record)
            .with_context(|| format!("Failed to serialize enriched record {}", record.sku))?;
        writeln!(ndjson, "{}", line).context("Failed to append NDJSON line")?;

        enriched.insert(record.sku.clone(), record);
    }

    let json = serde_json::to_string_pretty(&enriched)
        .context("Failed to serialize enriched document")?;
    std::fs::write(&config.enriched_json, json)
        .with_context(|| format!("Failed to write {}", config.enriched_json.display()))?;

    info!(
        "Enrichment done: {} SKUs -> {} / {}",
        total,
        config.enriched_json.display(),
        config.enriched_ndjson.display()
    );
    Ok(())
}
