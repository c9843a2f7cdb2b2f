use axum::{
    extract::{Extension, Path},
    Json,
};

use crate::common::BusinessId;
use crate::domains::business::{BusinessProfile, BusinessProfileInput};
use crate::server::app::AppState;
use crate::server::error::{ApiError, ApiResult};
use crate::server::extract::ValidatedJson;

/// `GET /api/business` - latest profile or `null`
pub async fn latest_business_handler(
    Extension(state): Extension<AppState>,
) -> ApiResult<Json<Option<BusinessProfile>>> {
    let profile = BusinessProfile::find_latest(&state.db_pool).await?;
    Ok(Json(profile))
}

pub async fn business_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<BusinessProfile>> {
    let id = parse_business_id(&id)?;
    let profile = BusinessProfile::find_by_id(id, &state.db_pool)
        .await?
        .ok_or(ApiError::NotFound("business"))?;
    Ok(Json(profile))
}

pub async fn create_business_handler(
    Extension(state): Extension<AppState>,
    ValidatedJson(input): ValidatedJson<BusinessProfileInput>,
) -> ApiResult<Json<BusinessProfile>> {
    let profile = BusinessProfile::create(input, &state.db_pool).await?;
    tracing::info!(business_id = %profile.id, "Business profile created");
    Ok(Json(profile))
}

pub async fn update_business_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<BusinessProfileInput>,
) -> ApiResult<Json<BusinessProfile>> {
    let id = parse_business_id(&id)?;
    let profile = BusinessProfile::update(id, input, &state.db_pool)
        .await?
        .ok_or(ApiError::NotFound("business"))?;
    tracing::info!(business_id = %profile.id, "Business profile updated");
    Ok(Json(profile))
}

/// A malformed id can never match a row
fn parse_business_id(raw: &str) -> ApiResult<BusinessId> {
    BusinessId::parse(raw).map_err(|_| ApiError::NotFound("business"))
}

/// Rejects a referenced business that does not exist
pub(crate) async fn ensure_business(
    id: Option<BusinessId>,
    state: &AppState,
) -> ApiResult<()> {
    if let Some(id) = id {
        if !BusinessProfile::exists(id, &state.db_pool).await? {
            return Err(ApiError::NotFound("business"));
        }
    }
    Ok(())
}
