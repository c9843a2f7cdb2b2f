use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Absent means the completion service is unconfigured and every
    /// LLM-backed path falls back to templates/defaults.
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: Option<String>,
    pub llm_timeout: Duration,
    pub scan: ScanSettings,
}

/// Time bounds for a single website scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanSettings {
    /// Per-page fetch timeout; a timeout counts as a skipped page.
    pub page_timeout: Duration,
    /// Wall-clock budget for the whole crawl, independent of the page budget.
    pub crawl_budget: Duration,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            page_timeout: Duration::from_secs(10),
            crawl_budget: Duration::from_secs(60),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: parse_or("PORT", 8080)?,
            openai_api_key: non_empty_var("OPENAI_API_KEY"),
            openai_model: non_empty_var("OPENAI_MODEL")
                .unwrap_or_else(|| "gpt-4o-mini".to_string()),
            openai_base_url: non_empty_var("OPENAI_BASE_URL"),
            llm_timeout: Duration::from_secs(parse_or("LLM_TIMEOUT_SECS", 30)?),
            scan: ScanSettings {
                page_timeout: Duration::from_secs(parse_or("SCAN_PAGE_TIMEOUT_SECS", 10)?),
                crawl_budget: Duration::from_secs(parse_or("SCAN_BUDGET_SECS", 60)?),
            },
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match non_empty_var(key) {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("{} must be a valid number", key)),
        None => Ok(default),
    }
}
