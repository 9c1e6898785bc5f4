//! Merge enriched content back into the per-SKU store.
//!
//! The enricher writes an aggregate document on the side; this step folds
//! its `en` fields into each stored product, touching a file only when a
//! field actually changes.

use crate::config::Config;
use crate::product::Product;
use crate::store::ContentStore;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Counters for one merge run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub updated: usize,
    pub skipped: usize,
}

/// Fold the enriched `en` fields into a stored product.
///
/// Only non-empty enriched values that differ from the stored ones are
/// written. Returns true when anything changed.
pub fn merge_into(product: &mut Product, enriched: &Product) -> bool {
    let Some(src) = enriched.en() else {
        return false;
    };
    let dst = product.en_mut();
    let mut changed = false;

    if !src.description.is_empty() && src.description != dst.description {
        dst.description = src.description.clone();
        changed = true;
    }
    if !src.ingredients.is_empty() && src.ingredients != dst.ingredients {
        dst.ingredients = src.ingredients.clone();
        changed = true;
    }
    if !src.precautions.is_empty() && src.precautions != dst.precautions {
        dst.precautions = src.precautions.clone();
        changed = true;
    }
    if !src.history.is_empty() && src.history != dst.history {
        dst.history = src.history.clone();
        changed = true;
    }
    if !src.sources.is_empty() && src.sources != dst.sources {
        dst.sources = src.sources.clone();
        changed = true;
    }

    changed
}

/// Merge the aggregate enriched document into every stored product.
pub fn run_merge(config: &Config) -> Result<MergeStats> {
    let raw = std::fs::read_to_string(&config.enriched_json).with_context(|| {
        format!(
            "Failed to read enriched document {}",
            config.enriched_json.display()
        )
    })?;
    let enriched: BTreeMap<String, Product> =
        serde_json::from_str(&raw).context("Failed to parse enriched document")?;

    let store = ContentStore::new(&config.content_dir);
    let mut stats = MergeStats::default();

    for sku in store.list_skus()? {
        let Some(record) = enriched.get(&sku) else {
            stats.skipped += 1;
            continue;
        };

        let mut product = match store.load(&sku) {
            Ok(product) => product,
            Err(error) => {
                warn!("Skipping {}: {:#}", sku, error);
                stats.skipped += 1;
                continue;
            }
        };

        if merge_into(&mut product, record) {
            store.save(&product)?;
            stats.updated += 1;
        } else {
            stats.skipped += 1;
        }
    }

    info!(
        "Merge done: {} updated, {} unchanged",
        stats.updated, stats.skipped
    );
    Ok(stats)
}
