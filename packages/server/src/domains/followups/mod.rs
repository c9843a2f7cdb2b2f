//! Follow-up composition: templates, LLM prompt assembly and the compose/preview actions.

pub mod actions;
pub mod models;
pub mod prompts;
pub mod templates;

pub use actions::*;
pub use models::*;
pub use prompts::*;
pub use templates::*;
