use axum::{extract::Extension, Json};
use serde::Deserialize;

use crate::common::{Validate, ValidationErrors};
use crate::domains::scan::crawler::MAX_PAGES_LIMIT;
use crate::domains::scan::{scan_website, ScanOutcome};
use crate::server::app::AppState;
use crate::server::error::ApiResult;
use crate::server::extract::ValidatedJson;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRequest {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub max_pages: Option<i64>,
}

impl Validate for ScanRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("url", &self.url);
        if let Some(max_pages) = self.max_pages {
            errors.range("maxPages", max_pages, 1, i64::from(MAX_PAGES_LIMIT));
        }
        errors.into_result()
    }
}

/// `POST /api/scan` - crawl a website and suggest a business profile
pub async fn scan_handler(
    Extension(state): Extension<AppState>,
    ValidatedJson(request): ValidatedJson<ScanRequest>,
) -> ApiResult<Json<ScanOutcome>> {
    let max_pages = request.max_pages.and_then(|n| u32::try_from(n).ok());
    let outcome = scan_website(request.url.trim(), max_pages, &state.deps).await?;
    Ok(Json(outcome))
}
