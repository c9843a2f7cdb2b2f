use axum::{extract::Extension, Json};

use crate::domains::followups::{compose_followup, ComposeOutcome, ComposeRequest};
use crate::server::app::AppState;
use crate::server::error::ApiResult;
use crate::server::extract::ValidatedJson;

/// `POST /api/followup/compose`
pub async fn compose_handler(
    Extension(state): Extension<AppState>,
    ValidatedJson(request): ValidatedJson<ComposeRequest>,
) -> ApiResult<Json<ComposeOutcome>> {
    let outcome = compose_followup(request, &state.deps, &state.db_pool).await?;
    Ok(Json(outcome))
}
