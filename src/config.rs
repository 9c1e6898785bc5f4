use anyhow::Result;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    // Input
    pub catalog_file: PathBuf,

    // Content store
    pub content_dir: PathBuf,

    // Enrichment
    pub cache_dir: PathBuf,
    pub enriched_json: PathBuf,
    pub enriched_ndjson: PathBuf,
    pub search_endpoint: String,
    pub max_urls_per_sku: usize,
    pub enrich_limit: usize,

    // Rendering
    pub template_file: Option<PathBuf>,
    pub output_dir: PathBuf,

    // Reports
    pub assets_dir: PathBuf,
    pub base_url: String,
    pub links_file: PathBuf,

    // Edit service
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            catalog_file: std::env::var("CATALOG_FILE")
                .unwrap_or_else(|_| "Products_MASTER.csv".to_string())
                .into(),

            content_dir: std::env::var("CONTENT_DIR")
                .unwrap_or_else(|_| "content".to_string())
                .into(),

            cache_dir: std::env::var("CACHE_DIR")
                .unwrap_or_else(|_| "cache".to_string())
                .into(),
            enriched_json: std::env::var("ENRICHED_JSON")
                .unwrap_or_else(|_| "products_enriched.json".to_string())
                .into(),
            enriched_ndjson: std::env::var("ENRICHED_NDJSON")
                .unwrap_or_else(|_| "products_enriched.ndjson".to_string())
                .into(),
            search_endpoint: std::env::var("SEARCH_ENDPOINT")
                .unwrap_or_else(|_| "https://html.duckduckgo.com/html/".to_string()),
            max_urls_per_sku: std::env::var("MAX_URLS_PER_SKU")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            enrich_limit: std::env::var("ENRICH_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),

            template_file: std::env::var("TEMPLATE_FILE").ok().map(PathBuf::from),
            output_dir: std::env::var("OUTPUT_DIR")
                .unwrap_or_else(|_| "products".to_string())
                .into(),

            assets_dir: std::env::var("ASSETS_DIR")
                .unwrap_or_else(|_| "assets".to_string())
                .into(),
            base_url: std::env::var("BASE_URL")
                .unwrap_or_else(|_| "https://example.github.io/sku-pages/products/".to_string()),
            links_file: std::env::var("LINKS_FILE")
                .unwrap_or_else(|_| "product_links.csv".to_string())
                .into(),

            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
        })
    }

    /// A config rooted entirely under one directory. Used by tests.
    pub fn for_tests(base: &std::path::Path) -> Self {
        Self {
            catalog_file: base.join("catalog.csv"),
            content_dir: base.join("content"),
            cache_dir: base.join("cache"),
            enriched_json: base.join("products_enriched.json"),
            enriched_ndjson: base.join("products_enriched.ndjson"),
            search_endpoint: "http://127.0.0.1:0/html/".to_string(),
            max_urls_per_sku: 5,
            enrich_limit: 0,
            template_file: None,
            output_dir: base.join("products"),
            assets_dir: base.join("assets"),
            base_url: "https://example.github.io/sku-pages/products/".to_string(),
            links_file: base.join("product_links.csv"),
            port: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment-variable reads are process-global; only the defaults are
    // exercised here to avoid cross-test interference.

    #[test]
    fn test_from_env_defaults() {
        let config = Config::from_env().expect("Should build from defaults");

        assert_eq!(config.content_dir, PathBuf::from("content"));
        assert_eq!(config.output_dir, PathBuf::from("products"));
        assert_eq!(config.max_urls_per_sku, 5);
        assert_eq!(config.enrich_limit, 0);
        assert_eq!(config.port, 5000);
        assert!(config.search_endpoint.starts_with("https://"));
    }
}
