use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{blank_to_none, optional_id, BusinessId, ContactId, Validate, ValidationErrors};

/// A person the business follows up with
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Contact {
    pub id: ContactId,
    pub created_at: DateTime<Utc>,
    pub business_id: Option<BusinessId>,
    pub leadconnector_contact_id: Option<String>,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub last_appointment: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

/// Input for creating a new contact
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateContact {
    #[serde(deserialize_with = "optional_id")]
    pub business_id: Option<BusinessId>,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub last_appointment: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub leadconnector_contact_id: Option<String>,
}

impl Validate for CreateContact {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("name", &self.name);
        errors.into_result()
    }
}

impl Contact {
    pub async fn find_by_id(id: ContactId, pool: &PgPool) -> Result<Option<Self>> {
        let contact = sqlx::query_as::<_, Self>("SELECT * FROM contacts WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(contact)
    }

    pub async fn exists(id: ContactId, pool: &PgPool) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM contacts WHERE id = $1)")
                .bind(id)
                .fetch_one(pool)
                .await?;
        Ok(exists)
    }

    /// Newest first; every contact when `business_id` is `None`
    pub async fn find_all(business_id: Option<BusinessId>, pool: &PgPool) -> Result<Vec<Self>> {
        let contacts = sqlx::query_as::<_, Self>(
            r#"
            SELECT *
            FROM contacts
            WHERE ($1::uuid IS NULL OR business_id = $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(business_id)
        .fetch_all(pool)
        .await?;
        Ok(contacts)
    }

    pub async fn create(input: CreateContact, pool: &PgPool) -> Result<Self> {
        let contact = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO contacts (
                id, business_id, leadconnector_contact_id, name, email, phone,
                last_appointment, status, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(ContactId::new())
        .bind(input.business_id)
        .bind(blank_to_none(input.leadconnector_contact_id))
        .bind(input.name.trim())
        .bind(blank_to_none(input.email))
        .bind(blank_to_none(input.phone))
        .bind(blank_to_none(input.last_appointment))
        .bind(blank_to_none(input.status))
        .bind(blank_to_none(input.notes))
        .fetch_one(pool)
        .await?;
        Ok(contact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_business_id_is_absent() {
        let input: CreateContact =
            serde_json::from_str(r#"{"businessId": "", "name": "Sam"}"#).unwrap();
        assert!(input.business_id.is_none());
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_business_id_is_parsed() {
        let id = BusinessId::new();
        let json = format!(r#"{{"businessId": "{}", "name": "Sam"}}"#, id);
        let input: CreateContact = serde_json::from_str(&json).unwrap();
        assert_eq!(input.business_id, Some(id));
    }

    #[test]
    fn test_bad_business_id_fails_to_parse() {
        let result = serde_json::from_str::<CreateContact>(r#"{"businessId": "nope", "name": "Sam"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let input: CreateContact = serde_json::from_str(r#"{"name": "  "}"#).unwrap();
        let errors = input.validate().unwrap_err();
        assert_eq!(errors.field_errors["name"].len(), 1);
    }
}
