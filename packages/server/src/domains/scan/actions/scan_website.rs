//! Scan website action
//!
//! Crawl a business website and suggest a profile from its text.
//! Nothing is persisted; the caller reviews the draft and saves it explicitly.

use serde::Serialize;
use tokio::time::Instant;
use tracing::{info, warn};

use crate::domains::scan::crawler::{truncate_chars, CrawlPage, ScanError, SiteCrawler};
use crate::domains::scan::extractor::{BusinessProfileDraft, ProfileExtractor};
use crate::kernel::ServerDeps;

/// Characters of crawled text echoed back for review
pub const RAW_SAMPLE_LIMIT: usize = 1200;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanOutcome {
    pub pages: Vec<CrawlPage>,
    pub profile: BusinessProfileDraft,
    pub raw_sample: String,
}

pub async fn scan_website(
    url: &str,
    max_pages: Option<u32>,
    deps: &ServerDeps,
) -> Result<ScanOutcome, ScanError> {
    // One budget covers crawling and extraction.
    let deadline = Instant::now() + deps.scan.crawl_budget;

    let crawl = SiteCrawler::new(deps.fetcher.clone(), deps.scan)
        .crawl_until(url, max_pages, deadline)
        .await?;

    let remaining = deadline.saturating_duration_since(Instant::now());
    let extraction = ProfileExtractor::new(deps.ai.clone());
    let profile = match tokio::time::timeout(
        remaining,
        extraction.extract(&crawl.raw_text, crawl.first_title()),
    )
    .await
    {
        Ok(profile) => profile,
        Err(_) => {
            warn!(url = %url, "Scan budget exhausted before extraction finished");
            BusinessProfileDraft::skeleton(crawl.first_title())
        }
    };

    info!(
        url = %url,
        pages = crawl.pages.len(),
        profile_name = %profile.name,
        "Website scan finished"
    );

    Ok(ScanOutcome {
        raw_sample: truncate_chars(&crawl.raw_text, RAW_SAMPLE_LIMIT),
        pages: crawl.pages,
        profile,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScanSettings;
    use crate::kernel::{BaseAI, CompletionRequest, MockAI, MockFetcher};
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::time::Duration;

    /// Completion service that answers long after any sensible budget.
    struct StalledAI;

    #[async_trait]
    impl BaseAI for StalledAI {
        async fn complete(&self, _request: CompletionRequest) -> anyhow::Result<String> {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Ok(r#"{"name": "Too Late"}"#.to_string())
        }
    }

    fn deps(fetcher: &MockFetcher, ai: Option<&MockAI>) -> ServerDeps {
        ServerDeps::new(
            ai.map(|a| Arc::new(a.clone()) as Arc<dyn crate::kernel::BaseAI>),
            Arc::new(fetcher.clone()),
            ScanSettings::default(),
        )
    }

    #[tokio::test]
    async fn test_scan_uses_first_title_without_ai() {
        let fetcher = MockFetcher::new().with_html(
            "https://example.com",
            "<title>Acme Dental</title><body>Gentle dental care for the whole family.</body>",
        );

        let outcome = scan_website("example.com", None, &deps(&fetcher, None))
            .await
            .unwrap();

        assert_eq!(outcome.pages.len(), 1);
        assert_eq!(outcome.profile, BusinessProfileDraft::skeleton(Some("Acme Dental")));
        assert_eq!(
            outcome.raw_sample,
            "Acme Dental Gentle dental care for the whole family."
        );
    }

    #[tokio::test]
    async fn test_scan_merges_extracted_profile() {
        let body = "We are open Monday to Friday from nine to five. Book online anytime.";
        let fetcher = MockFetcher::new().with_html(
            "https://example.com",
            &format!("<title>Acme Dental</title><body>{}</body>", body),
        );
        let ai = MockAI::new().with_response(r#"{"hours": "Mon-Fri 9-5", "tone": "Friendly"}"#);

        let outcome = scan_website("example.com", None, &deps(&fetcher, Some(&ai)))
            .await
            .unwrap();

        assert_eq!(outcome.profile.name, "Acme Dental");
        assert_eq!(outcome.profile.hours, "Mon-Fri 9-5");
        assert_eq!(outcome.profile.tone, "Friendly");
        assert_eq!(ai.call_count(), 1);
    }

    #[tokio::test]
    async fn test_raw_sample_is_capped() {
        let fetcher = MockFetcher::new().with_html(
            "https://example.com",
            &format!("<body>{}</body>", "lorem ipsum ".repeat(500)),
        );

        let outcome = scan_website("example.com", None, &deps(&fetcher, None))
            .await
            .unwrap();

        assert_eq!(outcome.raw_sample.chars().count(), RAW_SAMPLE_LIMIT);
        assert_eq!(outcome.profile.name, "Business");
    }

    #[tokio::test]
    async fn test_empty_crawl_still_returns_profile() {
        let fetcher = MockFetcher::new();
        let outcome = scan_website("example.com", Some(3), &deps(&fetcher, None))
            .await
            .unwrap();

        assert!(outcome.pages.is_empty());
        assert!(outcome.raw_sample.is_empty());
        assert_eq!(outcome.profile, BusinessProfileDraft::skeleton(None));
    }

    #[tokio::test]
    async fn test_budget_bounds_extraction() {
        let body = "We are open Monday to Friday from nine to five. Book online anytime.";
        let fetcher = MockFetcher::new().with_html(
            "https://example.com",
            &format!("<title>Acme Dental</title><body>{}</body>", body),
        );
        let deps = ServerDeps::new(
            Some(Arc::new(StalledAI) as Arc<dyn BaseAI>),
            Arc::new(fetcher),
            ScanSettings {
                page_timeout: Duration::from_secs(10),
                crawl_budget: Duration::from_millis(500),
            },
        );

        let started = std::time::Instant::now();
        let outcome = scan_website("example.com", None, &deps).await.unwrap();

        assert!(started.elapsed() < Duration::from_secs(2));
        assert_eq!(outcome.pages.len(), 1);
        assert_eq!(outcome.profile, BusinessProfileDraft::skeleton(Some("Acme Dental")));
    }
}
