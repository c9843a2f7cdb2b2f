// Common types and utilities shared across the application

pub mod entity_ids;
pub mod id;
pub mod types;
pub mod validation;

pub use entity_ids::*;
pub use id::Id;
pub use types::*;
pub use validation::{blank_to_none, optional_id, Validate, ValidationErrors};
