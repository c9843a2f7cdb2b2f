pub mod followup_request;

pub use followup_request::*;
