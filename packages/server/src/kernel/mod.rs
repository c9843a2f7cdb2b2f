//! Kernel module - server infrastructure and dependencies.

pub mod ai;
pub mod deps;
pub mod http_fetcher;
pub mod test_dependencies;
pub mod traits;

pub use ai::OpenAICompleter;
pub use deps::ServerDeps;
pub use http_fetcher::HttpFetcher;
pub use test_dependencies::{MockAI, MockFetcher};
pub use traits::*;
