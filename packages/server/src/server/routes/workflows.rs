use axum::{
    extract::{rejection::QueryRejection, Extension, Query},
    Json,
};

use crate::domains::workflows::{CreateWorkflow, Workflow};
use crate::server::app::AppState;
use crate::server::error::ApiResult;
use crate::server::extract::ValidatedJson;
use crate::server::routes::business::ensure_business;
use crate::server::routes::contacts::BusinessFilter;

pub async fn list_workflows_handler(
    Extension(state): Extension<AppState>,
    query: Result<Query<BusinessFilter>, QueryRejection>,
) -> ApiResult<Json<Vec<Workflow>>> {
    let Query(filter) = query?;
    let workflows = Workflow::find_all(filter.business_id, &state.db_pool).await?;
    Ok(Json(workflows))
}

pub async fn create_workflow_handler(
    Extension(state): Extension<AppState>,
    ValidatedJson(input): ValidatedJson<CreateWorkflow>,
) -> ApiResult<Json<Workflow>> {
    ensure_business(input.business_id, &state).await?;

    let workflow = Workflow::create(input, &state.db_pool).await?;
    tracing::info!(
        workflow_id = %workflow.id,
        steps = workflow.definition.steps.len(),
        "Workflow saved"
    );
    Ok(Json(workflow))
}
