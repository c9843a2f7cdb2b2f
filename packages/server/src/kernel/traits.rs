// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Prompt wording and crawl policy live in the domain layer and call through these.
//
// Naming convention: Base* for trait names (e.g., BaseAI, BaseFetcher)

use anyhow::Result;
use async_trait::async_trait;
use url::Url;

// =============================================================================
// AI Trait (Infrastructure - text completion)
// =============================================================================

/// A single system/user exchange sent to a completion service.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    pub temperature: f32,
}

impl CompletionRequest {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            temperature: 0.7,
        }
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

#[async_trait]
pub trait BaseAI: Send + Sync {
    /// Complete the exchange and return the raw assistant text
    async fn complete(&self, request: CompletionRequest) -> Result<String>;
}

// =============================================================================
// Fetch Trait (Infrastructure - HTML retrieval)
// =============================================================================

/// Response of a single page fetch.
///
/// `body` is only populated when the response was successful and HTML-typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl FetchedPage {
    pub fn html(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            content_type: Some("text/html; charset=utf-8".to_string()),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_html(&self) -> bool {
        self.content_type
            .as_deref()
            .map(|ct| ct.to_ascii_lowercase().contains("text/html"))
            .unwrap_or(false)
    }
}

#[async_trait]
pub trait BaseFetcher: Send + Sync {
    /// GET `url`, following redirects. Errors mean the request itself failed.
    async fn fetch(&self, url: &Url) -> Result<FetchedPage>;
}
