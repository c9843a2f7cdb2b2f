//! Server dependencies (using traits for testability)
//!
//! Central container for external capabilities used by route handlers.
//! Every external service sits behind a trait so tests can swap in mocks.

use anyhow::Result;
use std::sync::Arc;

use crate::config::{Config, ScanSettings};
use crate::kernel::{BaseAI, BaseFetcher, HttpFetcher, OpenAICompleter};

#[derive(Clone)]
pub struct ServerDeps {
    /// Completion service. `None` when no API key is configured, in which
    /// case callers use their template/default output.
    pub ai: Option<Arc<dyn BaseAI>>,
    pub fetcher: Arc<dyn BaseFetcher>,
    pub scan: ScanSettings,
}

impl ServerDeps {
    pub fn new(
        ai: Option<Arc<dyn BaseAI>>,
        fetcher: Arc<dyn BaseFetcher>,
        scan: ScanSettings,
    ) -> Self {
        Self { ai, fetcher, scan }
    }

    /// Wire production implementations from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let ai = match OpenAICompleter::from_config(config)? {
            Some(completer) => {
                tracing::info!(model = completer.model(), "Completion service enabled");
                Some(Arc::new(completer) as Arc<dyn BaseAI>)
            }
            None => {
                tracing::info!("Completion service disabled (no OPENAI_API_KEY), using templates");
                None
            }
        };

        let fetcher = Arc::new(HttpFetcher::new(config.scan.page_timeout)?);

        Ok(Self::new(ai, fetcher, config.scan))
    }
}
