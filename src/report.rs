//! Batch reports over the rendered output: the public link export and the
//! missing-image audit.

use crate::config::Config;
use anyhow::{bail, Context, Result};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::info;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// List rendered SKU directories, sorted.
fn rendered_skus(output_dir: &Path) -> Result<Vec<String>> {
    if !output_dir.is_dir() {
        bail!("Products directory not found: {}", output_dir.display());
    }

    let mut skus = Vec::new();
    for entry in std::fs::read_dir(output_dir)
        .with_context(|| format!("Failed to list {}", output_dir.display()))?
    {
        let entry = entry?;
        if !entry.path().is_dir() {
            continue;
        }
        let sku = entry.file_name().to_string_lossy().trim().to_string();
        if !sku.is_empty() {
            skus.push(sku);
        }
    }
    skus.sort();
    Ok(skus)
}

/// Export one public page URL per rendered SKU as CSV.
///
/// The file opens with explicit marker rows recording the producer and the
/// base URL, then a blank row, then the `SKU, PRODUCT_URL` table.
pub fn export_links(config: &Config) -> Result<usize> {
    let skus = rendered_skus(&config.output_dir)?;

    if config.links_file.exists() {
        std::fs::remove_file(&config.links_file)
            .with_context(|| format!("Failed to remove {}", config.links_file.display()))?;
        info!("Old links file removed");
    }

    let mut writer = csv::Writer::from_path(&config.links_file)
        .with_context(|| format!("Failed to create {}", config.links_file.display()))?;

    writer.write_record(["GENERATED_BY", "sku-pages export-links"])?;
    writer.write_record(["BASE_URL_USED", &config.base_url])?;
    writer.write_record(["GENERATED_AT", &chrono::Utc::now().to_rfc3339()])?;
    writer.write_record(["", ""])?;
    writer.write_record(["SKU", "PRODUCT_URL"])?;

    for sku in &skus {
        let url = format!("{}{}/index.html", config.base_url, sku);
        writer.write_record([sku.as_str(), url.as_str()])?;
    }
    writer.flush().context("Failed to flush links file")?;

    info!(
        "Links exported: {} products -> {}",
        skus.len(),
        config.links_file.display()
    );
    Ok(skus.len())
}

/// Result of one missing-image audit.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImageAudit {
    pub rendered: usize,
    pub images: usize,
    /// SKUs with a rendered page but no image file, sorted.
    pub missing: Vec<String>,
}

/// Compare rendered SKUs against the image files in the assets directory.
///
/// A SKU is covered when any `<sku>.jpg/.jpeg/.png` exists (file stem match,
/// extension case-insensitive). Missing inputs are fatal.
pub fn check_missing_images(config: &Config) -> Result<ImageAudit> {
    let skus = rendered_skus(&config.output_dir)?;

    if !config.assets_dir.is_dir() {
        bail!("Images directory not found: {}", config.assets_dir.display());
    }

    let mut image_skus: BTreeSet<String> = BTreeSet::new();
    for entry in std::fs::read_dir(&config.assets_dir)
        .with_context(|| format!("Failed to list {}", config.assets_dir.display()))?
    {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        if !IMAGE_EXTENSIONS.contains(&extension.as_str()) {
            continue;
        }
        if let Some(stem) = path.file_stem() {
            image_skus.insert(stem.to_string_lossy().trim().to_string());
        }
    }

    let missing: Vec<String> = skus
        .iter()
        .filter(|sku| !image_skus.contains(*sku))
        .cloned()
        .collect();

    let audit = ImageAudit {
        rendered: skus.len(),
        images: image_skus.len(),
        missing,
    };

    info!(
        "Image audit: {} rendered, {} images, {} missing",
        audit.rendered,
        audit.images,
        audit.missing.len()
    );
    Ok(audit)
}
