// HTTP routes
pub mod business;
pub mod contacts;
pub mod followup;
pub mod health;
pub mod messages;
pub mod prompt_preview;
pub mod scan;
pub mod workflows;

pub use business::*;
pub use contacts::*;
pub use followup::*;
pub use health::*;
pub use messages::*;
pub use prompt_preview::*;
pub use scan::*;
pub use workflows::*;
