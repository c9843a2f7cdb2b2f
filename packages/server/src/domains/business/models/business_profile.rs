use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{blank_to_none, BusinessId, Validate, ValidationErrors};

/// Business profile - the voice and facts every follow-up is written with
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BusinessProfile {
    pub id: BusinessId,
    pub created_at: DateTime<Utc>,
    pub name: String,
    pub tone: String,
    pub instruction_block: Option<String>,
    pub do_list: Option<String>,
    pub dont_list: Option<String>,
    pub leadconnector_location_id: Option<String>,
    pub booking_link: Option<String>,
    pub hours: Option<String>,
    pub policies: Option<String>,
    pub faqs: Option<String>,
}

/// Input for creating or replacing a business profile
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BusinessProfileInput {
    pub name: String,
    pub tone: String,
    pub booking_link: Option<String>,
    pub hours: Option<String>,
    pub policies: Option<String>,
    pub faqs: Option<String>,
    pub instruction_block: Option<String>,
    pub do_list: Option<String>,
    pub dont_list: Option<String>,
    pub leadconnector_location_id: Option<String>,
}

impl Validate for BusinessProfileInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("name", &self.name);
        errors.require("tone", &self.tone);
        errors.into_result()
    }
}

impl BusinessProfileInput {
    /// Trims required fields and turns blank optionals into NULLs.
    fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            tone: self.tone.trim().to_string(),
            booking_link: blank_to_none(self.booking_link),
            hours: blank_to_none(self.hours),
            policies: blank_to_none(self.policies),
            faqs: blank_to_none(self.faqs),
            instruction_block: blank_to_none(self.instruction_block),
            do_list: blank_to_none(self.do_list),
            dont_list: blank_to_none(self.dont_list),
            leadconnector_location_id: blank_to_none(self.leadconnector_location_id),
        }
    }
}

impl BusinessProfile {
    /// Most recently created profile, if any
    pub async fn find_latest(pool: &PgPool) -> Result<Option<Self>> {
        let profile = sqlx::query_as::<_, Self>(
            "SELECT * FROM business_profiles ORDER BY created_at DESC LIMIT 1",
        )
        .fetch_optional(pool)
        .await?;
        Ok(profile)
    }

    pub async fn find_by_id(id: BusinessId, pool: &PgPool) -> Result<Option<Self>> {
        let profile =
            sqlx::query_as::<_, Self>("SELECT * FROM business_profiles WHERE id = $1")
                .bind(id)
                .fetch_optional(pool)
                .await?;
        Ok(profile)
    }

    pub async fn exists(id: BusinessId, pool: &PgPool) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM business_profiles WHERE id = $1)")
                .bind(id)
                .fetch_one(pool)
                .await?;
        Ok(exists)
    }

    pub async fn create(input: BusinessProfileInput, pool: &PgPool) -> Result<Self> {
        let input = input.normalized();
        let profile = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO business_profiles (
                id, name, tone, booking_link, hours, policies, faqs,
                instruction_block, do_list, dont_list, leadconnector_location_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(BusinessId::new())
        .bind(input.name)
        .bind(input.tone)
        .bind(input.booking_link)
        .bind(input.hours)
        .bind(input.policies)
        .bind(input.faqs)
        .bind(input.instruction_block)
        .bind(input.do_list)
        .bind(input.dont_list)
        .bind(input.leadconnector_location_id)
        .fetch_one(pool)
        .await?;
        Ok(profile)
    }

    /// Replaces every editable field; `None` when the profile does not exist
    pub async fn update(
        id: BusinessId,
        input: BusinessProfileInput,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        let input = input.normalized();
        let profile = sqlx::query_as::<_, Self>(
            r#"
            UPDATE business_profiles
            SET name = $2,
                tone = $3,
                booking_link = $4,
                hours = $5,
                policies = $6,
                faqs = $7,
                instruction_block = $8,
                do_list = $9,
                dont_list = $10,
                leadconnector_location_id = $11
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(input.name)
        .bind(input.tone)
        .bind(input.booking_link)
        .bind(input.hours)
        .bind(input.policies)
        .bind(input.faqs)
        .bind(input.instruction_block)
        .bind(input.do_list)
        .bind(input.dont_list)
        .bind(input.leadconnector_location_id)
        .fetch_optional(pool)
        .await?;
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_required_fields_are_field_errors() {
        let input: BusinessProfileInput = serde_json::from_str(r#"{"hours": "9-5"}"#).unwrap();
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors.contains_key("name"));
        assert!(errors.field_errors.contains_key("tone"));
        assert!(errors.form_errors.is_empty());
    }

    #[test]
    fn test_input_reads_camel_case() {
        let input: BusinessProfileInput = serde_json::from_str(
            r#"{"name": "Acme", "tone": "Warm", "bookingLink": "https://acme.test/book", "doList": ""}"#,
        )
        .unwrap();
        assert!(input.validate().is_ok());

        let input = input.normalized();
        assert_eq!(input.booking_link.as_deref(), Some("https://acme.test/book"));
        assert_eq!(input.do_list, None);
    }
}
