//! Test fixtures for creating test data.
//!
//! These fixtures use the model methods directly to create test data.

use anyhow::Result;
use followup_core::domains::business::{BusinessProfile, BusinessProfileInput};
use followup_core::domains::contacts::{Contact, CreateContact};
use sqlx::PgPool;

pub async fn create_test_business(pool: &PgPool, name: &str) -> Result<BusinessProfile> {
    BusinessProfile::create(
        BusinessProfileInput {
            name: name.to_string(),
            tone: "Warm, concise, confident".to_string(),
            booking_link: Some("https://book.example.com".to_string()),
            hours: Some("Mon-Fri 9am-5pm".to_string()),
            ..Default::default()
        },
        pool,
    )
    .await
}

pub async fn create_test_contact(
    pool: &PgPool,
    business: &BusinessProfile,
    name: &str,
) -> Result<Contact> {
    Contact::create(
        CreateContact {
            business_id: Some(business.id),
            name: name.to_string(),
            phone: Some("+15550100".to_string()),
            last_appointment: Some("Tuesday 3pm".to_string()),
            notes: Some("Prefers text messages".to_string()),
            ..Default::default()
        },
        pool,
    )
    .await
}
