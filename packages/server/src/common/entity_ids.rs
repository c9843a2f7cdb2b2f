//! Typed ID definitions for all domain entities.
//!
//! ```rust
//! use followup_core::common::{BusinessId, ContactId};
//!
//! let business_id = BusinessId::new();
//! let contact_id = ContactId::new();
//! // let wrong: ContactId = business_id; // compile error
//! # let _ = (business_id, contact_id);
//! ```

pub use super::id::Id;

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for business profiles.
pub struct Business;

/// Marker type for contacts (the people a business follows up with).
pub struct Contact;

/// Marker type for stored workflow definitions.
pub struct Workflow;

/// Marker type for message log entries.
pub struct Message;

/// Marker type for recorded follow-up compose requests.
pub struct FollowupRequest;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

pub type BusinessId = Id<Business>;

pub type ContactId = Id<Contact>;

pub type WorkflowId = Id<Workflow>;

pub type MessageId = Id<Message>;

pub type FollowupRequestId = Id<FollowupRequest>;
