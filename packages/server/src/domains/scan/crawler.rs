//! Same-origin breadth-first website crawler
//!
//! Fetches pages one at a time from a FIFO queue, keeps only successful HTML
//! responses, and collects title, meta description and visible body text for
//! each. Links are followed only when they resolve to the seed's origin.
//!
//! Bounds:
//! - page budget: `max_pages` in [1, 50], default 15
//! - per-page timeout and an overall wall-clock budget (`ScanSettings`)
//!
//! Per-page failures (network, timeout, non-2xx, non-HTML) skip the page.
//! The only fatal error is a seed URL that cannot be parsed.

use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;
use tracing::{debug, info, warn};
use url::{Origin, Url};

use crate::config::ScanSettings;
use crate::kernel::BaseFetcher;

pub const DEFAULT_MAX_PAGES: u32 = 15;
pub const MAX_PAGES_LIMIT: u32 = 50;

/// Characters of normalized body text kept per page
pub const PAGE_TEXT_LIMIT: usize = 4000;

/// Characters of concatenated text kept per crawl
pub const RAW_TEXT_LIMIT: usize = 12000;

/// Link schemes that never lead to a crawlable page
const SKIPPED_SCHEMES: &[&str] = &["mailto:", "tel:", "javascript:"];

/// Elements whose text is code or markup, not content
const NON_CONTENT_TAGS: &[&str] = &["script", "style", "noscript", "svg"];

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("invalid url {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrawlPage {
    pub url: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlResult {
    pub pages: Vec<CrawlPage>,
    pub raw_text: String,
}

impl CrawlResult {
    /// Title of the first crawled page, if it had one
    pub fn first_title(&self) -> Option<&str> {
        self.pages
            .first()
            .map(|p| p.title.as_str())
            .filter(|t| !t.is_empty())
    }
}

/// Content pulled out of one HTML document
#[derive(Debug, Default)]
struct ParsedPage {
    title: String,
    description: String,
    text: String,
    links: Vec<Url>,
}

pub struct SiteCrawler {
    fetcher: Arc<dyn BaseFetcher>,
    page_timeout: Duration,
    crawl_budget: Duration,
}

impl SiteCrawler {
    pub fn new(fetcher: Arc<dyn BaseFetcher>, settings: ScanSettings) -> Self {
        Self {
            fetcher,
            page_timeout: settings.page_timeout,
            crawl_budget: settings.crawl_budget,
        }
    }

    /// Crawl `seed` breadth-first, staying on its origin.
    pub async fn crawl(&self, seed: &str, max_pages: Option<u32>) -> Result<CrawlResult, ScanError> {
        self.crawl_until(seed, max_pages, Instant::now() + self.crawl_budget)
            .await
    }

    /// Same as [`crawl`](Self::crawl) but stops at a caller-owned deadline.
    pub async fn crawl_until(
        &self,
        seed: &str,
        max_pages: Option<u32>,
        deadline: Instant,
    ) -> Result<CrawlResult, ScanError> {
        let seed = normalize_seed(seed);
        let mut seed_url = Url::parse(&seed).map_err(|source| ScanError::InvalidUrl {
            url: seed.clone(),
            source,
        })?;
        seed_url.set_fragment(None);

        let origin = seed_url.origin();
        let max_pages = clamp_max_pages(max_pages);

        info!(url = %seed, max_pages, "Starting website crawl");

        // The seed keeps the caller's spelling in the output; links use the
        // resolved form. Dedup always goes through the parsed URL.
        let mut queue: VecDeque<(String, Url)> = VecDeque::new();
        queue.push_back((strip_fragment(&seed).to_string(), seed_url));

        let mut visited: HashSet<String> = HashSet::new();
        let mut pages: Vec<CrawlPage> = Vec::new();
        let mut chunks: Vec<String> = Vec::new();

        while pages.len() < max_pages {
            let Some((display_url, url)) = queue.pop_front() else {
                break;
            };
            if !visited.insert(url.as_str().to_string()) {
                continue;
            }

            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                warn!(url = %seed, pages = pages.len(), "Crawl budget exhausted");
                break;
            }

            let Some(html) = self.fetch_html(&url, remaining.min(self.page_timeout)).await else {
                continue;
            };

            let parsed = parse_page(&html, &url, &origin);
            debug!(
                url = %url,
                title = %parsed.title,
                links = parsed.links.len(),
                "Crawled page"
            );

            let chunk = [
                parsed.title.as_str(),
                parsed.description.as_str(),
                parsed.text.as_str(),
            ]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ");
            chunks.push(chunk.trim().to_string());

            pages.push(CrawlPage {
                url: display_url,
                title: parsed.title,
                description: parsed.description,
            });

            for link in parsed.links {
                if !visited.contains(link.as_str()) {
                    queue.push_back((link.to_string(), link));
                }
            }
        }

        let raw_text = truncate_chars(&chunks.join("\n"), RAW_TEXT_LIMIT);

        info!(
            url = %seed,
            pages_crawled = pages.len(),
            urls_visited = visited.len(),
            raw_text_chars = raw_text.chars().count(),
            "Website crawl completed"
        );

        Ok(CrawlResult { pages, raw_text })
    }

    /// Fetch one page, returning its markup only for successful HTML responses.
    async fn fetch_html(&self, url: &Url, timeout: Duration) -> Option<String> {
        let page = match tokio::time::timeout(timeout, self.fetcher.fetch(url)).await {
            Ok(Ok(page)) => page,
            Ok(Err(e)) => {
                warn!(url = %url, error = %e, "Fetch failed, skipping page");
                return None;
            }
            Err(_) => {
                warn!(url = %url, timeout_ms = timeout.as_millis() as u64, "Fetch timed out, skipping page");
                return None;
            }
        };

        if !page.is_success() {
            debug!(url = %url, status = page.status, "Non-success status, skipping page");
            return None;
        }
        if !page.is_html() {
            debug!(url = %url, content_type = ?page.content_type, "Not HTML, skipping page");
            return None;
        }

        Some(page.body)
    }
}

/// Prefix `https://` when the input has no http(s) scheme.
pub fn normalize_seed(input: &str) -> String {
    let trimmed = input.trim();
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}

/// Page budget for a request: default 15, clamped to [1, 50].
pub fn clamp_max_pages(requested: Option<u32>) -> usize {
    requested
        .unwrap_or(DEFAULT_MAX_PAGES)
        .clamp(1, MAX_PAGES_LIMIT) as usize
}

/// First `limit` characters of `text` (not bytes).
pub fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((end, _)) => text[..end].to_string(),
        None => text.to_string(),
    }
}

fn strip_fragment(url: &str) -> &str {
    url.split('#').next().unwrap_or(url)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse markup into title, description, text slice and same-origin links.
///
/// Kept synchronous: `Html` is not `Send` and must not live across an await.
fn parse_page(html: &str, page_url: &Url, origin: &Origin) -> ParsedPage {
    let document = Html::parse_document(html);

    let title = select_first(&document, "title")
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    let description = select_first(&document, r#"meta[name="description"]"#)
        .and_then(|el| el.value().attr("content"))
        .map(|c| c.trim().to_string())
        .unwrap_or_default();

    let mut body_text = String::new();
    let root = select_first(&document, "body").unwrap_or_else(|| document.root_element());
    collect_visible_text(root, &mut body_text);
    let text = truncate_chars(&collapse_whitespace(&body_text), PAGE_TEXT_LIMIT);

    ParsedPage {
        title,
        description,
        text,
        links: extract_links(&document, page_url, origin),
    }
}

fn select_first<'a>(document: &'a Html, selector: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(selector).ok()?;
    document.select(&selector).next()
}

/// Append descendant text, skipping non-content elements entirely.
fn collect_visible_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child_element) = ElementRef::wrap(child) {
            if !NON_CONTENT_TAGS.contains(&child_element.value().name()) {
                collect_visible_text(child_element, out);
            }
        }
    }
}

/// Resolve anchors against the page URL, keeping same-origin links without fragments.
fn extract_links(document: &Html, page_url: &Url, origin: &Origin) -> Vec<Url> {
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|el| el.value().attr("href"))
        .map(str::trim)
        .filter(|href| {
            let lower = href.to_ascii_lowercase();
            !SKIPPED_SCHEMES.iter().any(|scheme| lower.starts_with(scheme))
        })
        .filter_map(|href| page_url.join(href).ok())
        .filter(|url| url.origin() == *origin)
        .map(|mut url| {
            url.set_fragment(None);
            url
        })
        .collect()
}
