//! Scan domain - website crawl to business profile suggestion
//!
//! - `crawler` - same-origin breadth-first crawl with page and time budgets
//! - `extractor` - LLM profile extraction merged over a default skeleton
//! - `actions` - the scan pipeline used by `POST /api/scan`

pub mod actions;
pub mod crawler;
pub mod extractor;

pub use actions::{scan_website, ScanOutcome};
pub use crawler::{CrawlPage, CrawlResult, ScanError, SiteCrawler};
pub use extractor::{BusinessProfileDraft, ProfileExtractor};
