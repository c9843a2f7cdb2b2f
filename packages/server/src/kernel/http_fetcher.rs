//! HTTP page fetcher - reqwest with a browser-like profile
//!
//! Only successful HTML responses have their body read; everything else is
//! returned with an empty body so the crawler can skip it cheaply.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::{BaseFetcher, FetchedPage};

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Maximum redirects followed per request
const MAX_REDIRECTS: usize = 10;

pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert(
            header::ACCEPT_LANGUAGE,
            HeaderValue::from_static("en-US,en;q=0.5"),
        );

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl BaseFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage> {
        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .context("HTTP request failed")?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let mut page = FetchedPage {
            status,
            content_type,
            body: String::new(),
        };

        if page.is_success() && page.is_html() {
            page.body = response
                .text()
                .await
                .context("Failed to read response body")?;
        } else {
            debug!(url = %url, status, content_type = ?page.content_type, "Skipping body");
        }

        Ok(page)
    }
}
