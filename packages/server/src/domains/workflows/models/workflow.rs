use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::PgPool;

use super::WorkflowDefinition;
use crate::common::{optional_id, BusinessId, Validate, ValidationErrors, WorkflowId};

/// A stored workflow definition
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Workflow {
    pub id: WorkflowId,
    pub created_at: DateTime<Utc>,
    pub business_id: Option<BusinessId>,
    pub name: String,
    pub definition: Json<WorkflowDefinition>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkflow {
    #[serde(default, deserialize_with = "optional_id")]
    pub business_id: Option<BusinessId>,
    #[serde(default)]
    pub name: String,
    pub definition: WorkflowDefinition,
}

impl Validate for CreateWorkflow {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("name", &self.name);
        self.definition.check("definition", &mut errors);
        errors.into_result()
    }
}

impl Workflow {
    pub async fn create(input: CreateWorkflow, pool: &PgPool) -> Result<Self> {
        let workflow = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO workflows (id, business_id, name, definition)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(WorkflowId::new())
        .bind(input.business_id)
        .bind(input.name.trim())
        .bind(Json(&input.definition))
        .fetch_one(pool)
        .await?;
        Ok(workflow)
    }

    /// Newest first; every workflow when `business_id` is `None`
    pub async fn find_all(business_id: Option<BusinessId>, pool: &PgPool) -> Result<Vec<Self>> {
        let workflows = sqlx::query_as::<_, Self>(
            r#"
            SELECT *
            FROM workflows
            WHERE ($1::uuid IS NULL OR business_id = $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(business_id)
        .fetch_all(pool)
        .await?;
        Ok(workflows)
    }
}
