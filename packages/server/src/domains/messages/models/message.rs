use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::PgPool;

use crate::common::{
    blank_to_none, optional_id, BusinessId, Channel, ContactId, Direction, MessageId, Validate,
    ValidationErrors,
};

/// Message log entry (inbound replies and outbound drafts/sends)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Message {
    pub id: MessageId,
    pub created_at: DateTime<Utc>,
    pub business_id: Option<BusinessId>,
    pub contact_id: Option<ContactId>,
    pub direction: String, // 'inbound' | 'outbound'
    pub channel: String,   // 'sms' | 'email'
    pub body: String,
    pub status: Option<String>,
    pub provider: Option<String>,
    pub meta: Option<JsonValue>,
}

/// Input for logging a message
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMessage {
    #[serde(default, deserialize_with = "optional_id")]
    pub business_id: Option<BusinessId>,
    #[serde(default, deserialize_with = "optional_id")]
    pub contact_id: Option<ContactId>,
    pub direction: Direction,
    pub channel: Channel,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub meta: Option<JsonValue>,
}

impl Validate for CreateMessage {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("body", &self.body);
        errors.into_result()
    }
}

/// Optional filters for listing messages
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageFilter {
    pub contact_id: Option<ContactId>,
    pub business_id: Option<BusinessId>,
}

impl Message {
    pub async fn create(input: CreateMessage, pool: &PgPool) -> Result<Self> {
        let message = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO messages (
                id, business_id, contact_id, direction, channel, body, status, provider, meta
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(MessageId::new())
        .bind(input.business_id)
        .bind(input.contact_id)
        .bind(input.direction.as_str())
        .bind(input.channel.as_str())
        .bind(input.body)
        .bind(blank_to_none(input.status))
        .bind(blank_to_none(input.provider))
        .bind(input.meta)
        .fetch_one(pool)
        .await?;
        Ok(message)
    }

    /// Newest first, narrowed by whichever filters are set
    pub async fn find_all(filter: MessageFilter, pool: &PgPool) -> Result<Vec<Self>> {
        let messages = sqlx::query_as::<_, Self>(
            r#"
            SELECT *
            FROM messages
            WHERE ($1::uuid IS NULL OR contact_id = $1)
              AND ($2::uuid IS NULL OR business_id = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(filter.contact_id)
        .bind(filter.business_id)
        .fetch_all(pool)
        .await?;
        Ok(messages)
    }
}
