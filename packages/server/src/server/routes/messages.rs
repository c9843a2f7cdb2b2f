use axum::{
    extract::{rejection::QueryRejection, Extension, Query},
    Json,
};
use serde::Deserialize;

use crate::common::{optional_id, BusinessId, ContactId};
use crate::domains::messages::{CreateMessage, Message, MessageFilter};
use crate::server::app::AppState;
use crate::server::error::ApiResult;
use crate::server::extract::ValidatedJson;
use crate::server::routes::business::ensure_business;
use crate::server::routes::contacts::ensure_contact;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageQuery {
    #[serde(default, deserialize_with = "optional_id")]
    pub contact_id: Option<ContactId>,
    #[serde(default, deserialize_with = "optional_id")]
    pub business_id: Option<BusinessId>,
}

pub async fn list_messages_handler(
    Extension(state): Extension<AppState>,
    query: Result<Query<MessageQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Message>>> {
    let Query(query) = query?;
    let filter = MessageFilter {
        contact_id: query.contact_id,
        business_id: query.business_id,
    };
    let messages = Message::find_all(filter, &state.db_pool).await?;
    Ok(Json(messages))
}

pub async fn create_message_handler(
    Extension(state): Extension<AppState>,
    ValidatedJson(input): ValidatedJson<CreateMessage>,
) -> ApiResult<Json<Message>> {
    ensure_business(input.business_id, &state).await?;
    ensure_contact(input.contact_id, &state).await?;

    let message = Message::create(input, &state.db_pool).await?;
    tracing::info!(
        message_id = %message.id,
        direction = %message.direction,
        channel = %message.channel,
        "Message logged"
    );
    Ok(Json(message))
}
