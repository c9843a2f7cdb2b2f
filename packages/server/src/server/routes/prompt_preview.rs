use axum::{extract::Extension, Json};

use crate::common::ValidationErrors;
use crate::domains::followups::{preview_prompt, PreviewRequest, PromptPreview};
use crate::server::app::AppState;
use crate::server::error::{ApiError, ApiResult};
use crate::server::extract::ValidatedJson;

/// `POST /api/prompt-preview` - render prompts without calling the LLM
pub async fn prompt_preview_handler(
    Extension(state): Extension<AppState>,
    ValidatedJson(request): ValidatedJson<PreviewRequest>,
) -> ApiResult<Json<PromptPreview>> {
    let (Some(business_id), Some(contact_id)) = (request.business_id, request.contact_id) else {
        return Err(ApiError::InvalidPayload(ValidationErrors::form(
            "businessId and contactId are required",
        )));
    };

    let preview = preview_prompt(
        business_id,
        contact_id,
        request.intent,
        request.channel,
        &state.db_pool,
    )
    .await?;
    Ok(Json(preview))
}
