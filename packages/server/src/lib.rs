// Follow-Up AI - API Core
//
// Backend for composing customer follow-ups (SMS/email) for local businesses.
// Stores business profiles, contacts, workflow definitions and a message log,
// and can suggest a business profile by crawling the business website.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
