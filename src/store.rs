use crate::catalog::safe_filename;
use crate::product::Product;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File-per-SKU content store.
///
/// Each product record lives in `<dir>/<safe_sku>.json`. Writes are whole
/// document replacements done as write-temp-then-rename so a killed process
/// cannot leave a truncated record behind.
#[derive(Debug, Clone)]
pub struct ContentStore {
    dir: PathBuf,
}

impl ContentStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, sku: &str) -> PathBuf {
        self.dir.join(format!("{}.json", safe_filename(sku)))
    }

    /// Check whether a record exists for the given SKU.
    pub fn exists(&self, sku: &str) -> bool {
        self.path_for(sku).is_file()
    }

    /// List all stored SKUs, sorted.
    pub fn list_skus(&self) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.dir)
            .with_context(|| format!("Failed to read content directory {}", self.dir.display()))?;

        let mut skus = Vec::new();
        for entry in entries {
            let path = entry.context("Failed to read content directory entry")?.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    skus.push(stem.to_string());
                }
            }
        }

        skus.sort();
        Ok(skus)
    }

    /// Load one product record by SKU.
    pub fn load(&self, sku: &str) -> Result<Product> {
        let path = self.path_for(sku);
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read product file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse product file {}", path.display()))
    }

    /// Persist one product record, replacing any existing file atomically.
    pub fn save(&self, product: &Product) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create content directory {}", self.dir.display()))?;

        let path = self.path_for(&product.sku);
        let json = serde_json::to_string_pretty(product)
            .with_context(|| format!("Failed to serialize product {}", product.sku))?;

        // Temp file in the same directory so the rename stays on one filesystem
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .with_context(|| format!("Failed to write temp file {}", tmp.display()))?;
        fs::rename(&tmp, &path)
            .with_context(|| format!("Failed to replace product file {}", path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::ContentBlock;
    use tempfile::TempDir;

    fn sample_product(sku: &str) -> Product {
        let mut product = Product {
            sku: sku.to_string(),
            name: "Olives 500g".to_string(),
            brand: "KRINOS".to_string(),
            ..Default::default()
        };
        product.i18n.insert(
            "en".to_string(),
            ContentBlock {
                title: "Olives 500g".to_string(),
                ..Default::default()
            },
        );
        product
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().expect("Should create temp dir");
        let store = ContentStore::new(dir.path());

        let product = sample_product("K100");
        store.save(&product).expect("Should save");

        let loaded = store.load("K100").expect("Should load");
        assert_eq!(loaded, product);
    }

    #[test]
    fn test_save_sanitizes_filename() {
        let dir = TempDir::new().expect("Should create temp dir");
        let store = ContentStore::new(dir.path());

        store.save(&sample_product("A/B:C")).expect("Should save");

        assert!(dir.path().join("A-B-C.json").is_file());
        assert!(store.exists("A/B:C"));
    }

    #[test]
    fn test_list_skus_sorted_and_json_only() {
        let dir = TempDir::new().expect("Should create temp dir");
        let store = ContentStore::new(dir.path());

        store.save(&sample_product("B2")).expect("Should save");
        store.save(&sample_product("A1")).expect("Should save");
        std::fs::write(dir.path().join("notes.txt"), "ignore me").expect("Should write");

        let skus = store.list_skus().expect("Should list");
        assert_eq!(skus, vec!["A1", "B2"]);
    }

    #[test]
    fn test_load_missing_sku_is_error() {
        let dir = TempDir::new().expect("Should create temp dir");
        let store = ContentStore::new(dir.path());

        assert!(store.load("NOPE").is_err());
    }

    #[test]
    fn test_save_overwrites_existing() {
        let dir = TempDir::new().expect("Should create temp dir");
        let store = ContentStore::new(dir.path());

        let mut product = sample_product("K100");
        store.save(&product).expect("Should save");

        product.en_mut().description = "Updated".to_string();
        store.save(&product).expect("Should save again");

        let loaded = store.load("K100").expect("Should load");
        assert_eq!(loaded.en().unwrap().description, "Updated");

        // no stray temp files
        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().and_then(|x| x.to_str()) == Some("tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }
}
