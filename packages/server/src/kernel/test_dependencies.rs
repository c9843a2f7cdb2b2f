// Mock implementations for testing
//
// Injected through ServerDeps so handlers and domain functions can be
// exercised without network access.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url::Url;

use super::{BaseAI, BaseFetcher, CompletionRequest, FetchedPage};

// =============================================================================
// Mock AI
// =============================================================================

enum MockReply {
    Text(String),
    Fail(String),
}

/// Completion service returning queued replies in order.
///
/// When the queue is empty every call fails, which exercises fallback paths.
#[derive(Clone, Default)]
pub struct MockAI {
    replies: Arc<Mutex<Vec<MockReply>>>,
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockAI {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful reply
    pub fn with_response(self, text: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push(MockReply::Text(text.to_string()));
        self
    }

    /// Queue a failed call
    pub fn with_error(self, message: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push(MockReply::Fail(message.to_string()));
        self
    }

    /// All requests received so far
    pub fn calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl BaseAI for MockAI {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        self.calls.lock().unwrap().push(request);

        let mut replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            return Err(anyhow!("MockAI has no queued response"));
        }
        match replies.remove(0) {
            MockReply::Text(text) => Ok(text),
            MockReply::Fail(message) => Err(anyhow!(message)),
        }
    }
}

// =============================================================================
// Mock Fetcher
// =============================================================================

#[derive(Clone)]
enum MockPage {
    Page(FetchedPage),
    Fail,
    Hang,
}

/// Fetcher serving canned pages keyed by absolute URL.
///
/// Unknown URLs answer 404. Keys are compared after URL parsing, so
/// `https://example.com` and `https://example.com/` are the same page.
#[derive(Clone, Default)]
pub struct MockFetcher {
    pages: Arc<Mutex<HashMap<String, MockPage>>>,
    fetched: Arc<Mutex<Vec<String>>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(url: &str) -> String {
        Url::parse(url)
            .map(|u| u.to_string())
            .unwrap_or_else(|_| url.to_string())
    }

    fn insert(self, url: &str, page: MockPage) -> Self {
        self.pages.lock().unwrap().insert(Self::key(url), page);
        self
    }

    /// Serve `html` as a 200 text/html response
    pub fn with_html(self, url: &str, html: &str) -> Self {
        self.insert(url, MockPage::Page(FetchedPage::html(html)))
    }

    /// Serve an arbitrary response
    pub fn with_page(self, url: &str, page: FetchedPage) -> Self {
        self.insert(url, MockPage::Page(page))
    }

    /// Make fetching `url` fail like a network error
    pub fn with_failure(self, url: &str) -> Self {
        self.insert(url, MockPage::Fail)
    }

    /// Make fetching `url` never complete
    pub fn with_hang(self, url: &str) -> Self {
        self.insert(url, MockPage::Hang)
    }

    /// URLs requested so far, in order
    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }

    pub fn was_fetched(&self, url: &str) -> bool {
        let key = Self::key(url);
        self.fetched.lock().unwrap().iter().any(|u| *u == key)
    }
}

#[async_trait]
impl BaseFetcher for MockFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage> {
        let key = url.to_string();
        self.fetched.lock().unwrap().push(key.clone());

        let page = self.pages.lock().unwrap().get(&key).cloned();
        match page {
            Some(MockPage::Page(page)) => Ok(page),
            Some(MockPage::Fail) => Err(anyhow!("connection refused: {}", key)),
            Some(MockPage::Hang) => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(anyhow!("timed out: {}", key))
            }
            None => Ok(FetchedPage {
                status: 404,
                content_type: Some("text/html".to_string()),
                body: String::new(),
            }),
        }
    }
}
