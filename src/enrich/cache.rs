//! On-disk cache for search results and page extractions.
//!
//! Two partitions (`search/`, `pages/`), one JSON file per entry, keyed by
//! the SHA-256 hex of the query string or URL. Failures are cached as empty
//! results so re-runs are idempotent and do not retry until the cache is
//! cleared.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

/// One search hit as stored in the cache.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub snippet: String,
}

/// A fetched page reduced to its readable text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebDoc {
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
}

/// Cache directories for the two partitions.
#[derive(Debug, Clone)]
pub struct WebCache {
    search_dir: PathBuf,
    page_dir: PathBuf,
}

fn key_hash(key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    format!("{:x}", hasher.finalize())
}

impl WebCache {
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base = base_dir.as_ref();
        let search_dir = base.join("search");
        let page_dir = base.join("pages");
        fs::create_dir_all(&search_dir)
            .with_context(|| format!("Failed to create cache dir {}", search_dir.display()))?;
        fs::create_dir_all(&page_dir)
            .with_context(|| format!("Failed to create cache dir {}", page_dir.display()))?;
        Ok(Self { search_dir, page_dir })
    }

    /// Cached results for a query, if any (an empty vec is a valid entry).
    pub fn load_search(&self, query: &str) -> Option<Vec<SearchHit>> {
        let path = self.search_dir.join(format!("{}.json", key_hash(query)));
        let raw = fs::read_to_string(path).ok()?;
        serde_json::from_str(&raw).ok()
    }

    pub fn save_search(&self, query: &str, results: &[SearchHit]) -> Result<()> {
        let path = self.search_dir.join(format!("{}.json", key_hash(query)));
        let json = serde_json::to_string_pretty(results).context("Failed to serialize search results")?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write search cache entry {}", path.display()))
    }

    /// Cached extraction for a URL, if any.
    pub fn load_page(&self, url: &str) -> Option<WebDoc> {
        let path = self.page_dir.join(format!("{}.json", key_hash(url)));
        let raw = fs::read_to_string(path).ok()?;
        serde_json::from_str(&raw).ok()
    }

    pub fn save_page(&self, doc: &WebDoc) -> Result<()> {
        let path = self.page_dir.join(format!("{}.json", key_hash(&doc.url)));
        let json = serde_json::to_string_pretty(doc).context("Failed to serialize page extraction")?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write page cache entry {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_search_round_trip() {
        let dir = TempDir::new().expect("Should create temp dir");
        let cache = WebCache::new(dir.path()).expect("Should init cache");

        assert!(cache.load_search("krinos olives ingredients").is_none());

        let hits = vec![SearchHit {
            title: "Krinos".to_string(),
            url: "https://krinos.example.com".to_string(),
            snippet: "Olives".to_string(),
        }];
        cache.save_search("krinos olives ingredients", &hits).expect("Should save");

        let loaded = cache.load_search("krinos olives ingredients").expect("Should hit");
        assert_eq!(loaded, hits);
    }

    #[test]
    fn test_empty_search_result_is_a_hit() {
        let dir = TempDir::new().expect("Should create temp dir");
        let cache = WebCache::new(dir.path()).expect("Should init cache");

        cache.save_search("no results query", &[]).expect("Should save");

        // cached-as-empty means "do not retry"
        let loaded = cache.load_search("no results query");
        assert_eq!(loaded, Some(vec![]));
    }

    #[test]
    fn test_page_round_trip() {
        let dir = TempDir::new().expect("Should create temp dir");
        let cache = WebCache::new(dir.path()).expect("Should init cache");

        let doc = WebDoc {
            url: "https://example.com/product".to_string(),
            title: "Product page".to_string(),
            text: "Ingredients: olives, water, salt.".to_string(),
        };
        cache.save_page(&doc).expect("Should save");

        assert_eq!(cache.load_page("https://example.com/product"), Some(doc));
        assert!(cache.load_page("https://example.com/other").is_none());
    }

    #[test]
    fn test_partitions_do_not_collide() {
        let dir = TempDir::new().expect("Should create temp dir");
        let cache = WebCache::new(dir.path()).expect("Should init cache");

        // Same key in both partitions stays separate
        cache.save_search("https://example.com", &[]).expect("Should save");
        assert!(cache.load_page("https://example.com").is_none());
    }

    #[test]
    fn test_key_hash_is_stable_hex() {
        let a = key_hash("query");
        let b = key_hash("query");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
