pub mod scan_website;

pub use scan_website::{scan_website, ScanOutcome, RAW_SAMPLE_LIMIT};
