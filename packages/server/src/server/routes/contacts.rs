use axum::{
    extract::{rejection::QueryRejection, Extension, Query},
    Json,
};
use serde::Deserialize;

use crate::common::{optional_id, BusinessId, ContactId};
use crate::domains::contacts::{Contact, CreateContact};
use crate::server::app::AppState;
use crate::server::error::{ApiError, ApiResult};
use crate::server::extract::ValidatedJson;
use crate::server::routes::business::ensure_business;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessFilter {
    #[serde(default, deserialize_with = "optional_id")]
    pub business_id: Option<BusinessId>,
}

pub async fn list_contacts_handler(
    Extension(state): Extension<AppState>,
    query: Result<Query<BusinessFilter>, QueryRejection>,
) -> ApiResult<Json<Vec<Contact>>> {
    let Query(filter) = query?;
    let contacts = Contact::find_all(filter.business_id, &state.db_pool).await?;
    Ok(Json(contacts))
}

pub async fn create_contact_handler(
    Extension(state): Extension<AppState>,
    ValidatedJson(input): ValidatedJson<CreateContact>,
) -> ApiResult<Json<Contact>> {
    ensure_business(input.business_id, &state).await?;

    let contact = Contact::create(input, &state.db_pool).await?;
    tracing::info!(contact_id = %contact.id, business_id = ?contact.business_id, "Contact created");
    Ok(Json(contact))
}

/// Rejects a referenced contact that does not exist
pub(crate) async fn ensure_contact(id: Option<ContactId>, state: &AppState) -> ApiResult<()> {
    if let Some(id) = id {
        if !Contact::exists(id, &state.db_pool).await? {
            return Err(ApiError::NotFound("contact"));
        }
    }
    Ok(())
}
