//! Web search and page fetching for the enricher.
//!
//! Requests go out sequentially with a small random delay so the search
//! provider does not flag the run as automation; the per-query/per-URL cache
//! makes re-runs cheap and idempotent. Every failure degrades to an empty
//! result; nothing here raises past the per-SKU boundary.

use crate::enrich::cache::{SearchHit, WebCache, WebDoc};
use anyhow::{Context, Result};
use rand::Rng;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::{debug, warn};

/// Extracted text beyond this size is truncated before caching.
pub const MAX_FETCH_CHARS: usize = 40_000;

/// Documents with less extracted text than this are discarded.
pub const MIN_DOC_CHARS: usize = 120;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(25);

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// HTTP client wrapper over the search endpoint and page fetches.
pub struct WebClient {
    http: reqwest::Client,
    search_endpoint: String,
    cache: WebCache,
}

impl WebClient {
    pub fn new(search_endpoint: impl Into<String>, cache: WebCache) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            search_endpoint: search_endpoint.into(),
            cache,
        })
    }

    /// Run one web search, serving from cache when possible.
    ///
    /// Failures are logged, cached as an empty result set, and returned as
    /// empty, and will not be retried until the cache is cleared.
    pub async fn search(&self, query: &str) -> Vec<SearchHit> {
        if let Some(cached) = self.cache.load_search(query) {
            debug!("Search cache hit: {}", query);
            return cached;
        }

        polite_delay().await;

        let hits = match self.do_search(query).await {
            Ok(hits) => hits,
            Err(e) => {
                warn!("Search failed for '{}': {:#}", query, e);
                Vec::new()
            }
        };

        if let Err(e) = self.cache.save_search(query, &hits) {
            warn!("Failed to cache search results for '{}': {:#}", query, e);
        }
        hits
    }

    async fn do_search(&self, query: &str) -> Result<Vec<SearchHit>> {
        let response = self
            .http
            .get(&self.search_endpoint)
            .query(&[("q", query)])
            .send()
            .await
            .context("Failed to send search request")?;

        if !response.status().is_success() {
            anyhow::bail!("Search endpoint returned {}", response.status());
        }

        let html = response.text().await.context("Failed to read search response")?;
        Ok(parse_search_results(&html))
    }

    /// Fetch one URL and reduce it to readable text, serving from cache when
    /// possible. Failures are cached as an empty document.
    pub async fn fetch_page(&self, url: &str) -> WebDoc {
        if let Some(cached) = self.cache.load_page(url) {
            debug!("Page cache hit: {}", url);
            return cached;
        }

        polite_delay().await;

        let doc = match self.do_fetch(url).await {
            Ok(doc) => doc,
            Err(e) => {
                warn!("Fetch failed for {}: {:#}", url, e);
                WebDoc {
                    url: url.to_string(),
                    ..Default::default()
                }
            }
        };

        if let Err(e) = self.cache.save_page(&doc) {
            warn!("Failed to cache page {}: {:#}", url, e);
        }
        doc
    }

    async fn do_fetch(&self, url: &str) -> Result<WebDoc> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .context("Failed to send page request")?;

        if !response.status().is_success() {
            anyhow::bail!("Page returned {}", response.status());
        }

        let html = response.text().await.context("Failed to read page body")?;
        let (title, text) = extract_readable_text(&html);

        Ok(WebDoc {
            url: url.to_string(),
            title,
            text,
        })
    }
}

/// Small random pause between live requests (anti-automation politeness).
async fn polite_delay() {
    let millis = rand::thread_rng().gen_range(200..=800);
    tokio::time::sleep(Duration::from_millis(millis)).await;
}

/// Parse a search-results HTML page into hits.
///
/// Understands the DuckDuckGo HTML layout (`.result__a` / `.result__snippet`)
/// and falls back to plain `http(s)` anchors for other providers.
pub fn parse_search_results(html: &str) -> Vec<SearchHit> {
    let document = Html::parse_document(html);

    let result_link = Selector::parse("a.result__a").expect("static selector");
    let result_snippet = Selector::parse(".result__snippet").expect("static selector");

    let snippets: Vec<String> = document
        .select(&result_snippet)
        .map(|el| clean_spaces(&el.text().collect::<String>()))
        .collect();

    let mut hits: Vec<SearchHit> = document
        .select(&result_link)
        .enumerate()
        .filter_map(|(i, el)| {
            let url = el.value().attr("href")?.to_string();
            Some(SearchHit {
                title: clean_spaces(&el.text().collect::<String>()),
                url,
                snippet: snippets.get(i).cloned().unwrap_or_default(),
            })
        })
        .collect();

    if hits.is_empty() {
        // Generic fallback: any absolute link with text
        let any_link = Selector::parse("a[href]").expect("static selector");
        hits = document
            .select(&any_link)
            .filter_map(|el| {
                let url = el.value().attr("href")?;
                if !url.starts_with("http") {
                    return None;
                }
                let title = clean_spaces(&el.text().collect::<String>());
                if title.is_empty() {
                    return None;
                }
                Some(SearchHit {
                    title,
                    url: url.to_string(),
                    snippet: String::new(),
                })
            })
            .collect();
    }

    hits
}

/// Reduce an HTML page to its `<title>` and readable body text.
///
/// Text is pulled from content-bearing elements only (paragraphs, headings,
/// list items, table cells), which keeps script/style/navigation noise out,
/// then whitespace-normalized and truncated to [`MAX_FETCH_CHARS`].
pub fn extract_readable_text(html: &str) -> (String, String) {
    let document = Html::parse_document(html);

    let title_sel = Selector::parse("title").expect("static selector");
    let title = document
        .select(&title_sel)
        .next()
        .map(|el| clean_spaces(&el.text().collect::<String>()))
        .unwrap_or_default();

    let content_sel =
        Selector::parse("p, h1, h2, h3, h4, li, td, th, dd, dt").expect("static selector");
    let mut parts: Vec<String> = Vec::new();
    for el in document.select(&content_sel) {
        let chunk = clean_spaces(&el.text().collect::<String>());
        if !chunk.is_empty() {
            parts.push(chunk);
        }
    }

    let mut text = parts.join(" ");
    if text.len() > MAX_FETCH_CHARS {
        let mut cut = MAX_FETCH_CHARS;
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        text.truncate(cut);
    }

    (title, text)
}

/// Collapse all whitespace runs to single spaces and trim.
pub fn clean_spaces(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
