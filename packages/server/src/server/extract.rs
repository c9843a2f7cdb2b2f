//! JSON body extractor that validates after deserializing.
//!
//! Both stages report through `ApiError::InvalidPayload`, so clients see one
//! 400 shape whether the body was unparsable or merely incomplete.

use axum::extract::{FromRequest, Request};
use axum::{async_trait, Json};
use serde::de::DeserializeOwned;

use crate::common::{Validate, ValidationErrors};
use crate::server::error::ApiError;

pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                ApiError::InvalidPayload(ValidationErrors::form(rejection.body_text()))
            })?;

        value.validate()?;
        Ok(Self(value))
    }
}
