use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{Channel, FollowupRequestId, Intent};

/// Audit row for every compose call and the text it produced
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct FollowupRequest {
    pub id: FollowupRequestId,
    pub created_at: DateTime<Utc>,
    pub name: String,
    pub business_name: String,
    pub appointment_time: String,
    pub channel: String,
    pub intent: String,
    pub response_text: String,
}

#[derive(Debug, Clone)]
pub struct CreateFollowupRequest<'a> {
    pub name: &'a str,
    pub business_name: &'a str,
    pub appointment_time: &'a str,
    pub channel: Channel,
    pub intent: Intent,
    pub response_text: &'a str,
}

impl FollowupRequest {
    pub async fn create(input: CreateFollowupRequest<'_>, pool: &PgPool) -> Result<Self> {
        let row = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO followup_requests (
                id, name, business_name, appointment_time, channel, intent, response_text
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(FollowupRequestId::new())
        .bind(input.name)
        .bind(input.business_name)
        .bind(input.appointment_time)
        .bind(input.channel.as_str())
        .bind(input.intent.as_str())
        .bind(input.response_text)
        .fetch_one(pool)
        .await?;
        Ok(row)
    }

    /// Most recent first
    pub async fn find_recent(limit: i64, pool: &PgPool) -> Result<Vec<Self>> {
        let rows = sqlx::query_as::<_, Self>(
            "SELECT * FROM followup_requests ORDER BY created_at DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }
}
