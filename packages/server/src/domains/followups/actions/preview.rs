//! Prompt preview action
//!
//! Shows exactly what would be sent to the completion service for a stored
//! business/contact pair, alongside the template fallback. Nothing is called
//! or recorded.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use super::compose::FollowupError;
use crate::common::{optional_id, BusinessId, Channel, ContactId, Intent, Validate, ValidationErrors};
use crate::domains::business::BusinessProfile;
use crate::domains::contacts::Contact;
use crate::domains::followups::prompts::{build_followup_prompt, PromptRequest};
use crate::domains::followups::templates::template_text;

/// Stand-in when the contact has no recorded appointment
pub const UNKNOWN_APPOINTMENT_TIME: &str = "your scheduled time";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRequest {
    #[serde(default, deserialize_with = "optional_id")]
    pub business_id: Option<BusinessId>,
    #[serde(default, deserialize_with = "optional_id")]
    pub contact_id: Option<ContactId>,
    pub intent: Intent,
    pub channel: Channel,
}

impl Validate for PreviewRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.business_id.is_none() {
            errors.add("businessId", "Required");
        }
        if self.contact_id.is_none() {
            errors.add("contactId", "Required");
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptPreview {
    pub system: String,
    pub user: String,
    pub template: String,
}

pub async fn preview_prompt(
    business_id: BusinessId,
    contact_id: ContactId,
    intent: Intent,
    channel: Channel,
    pool: &PgPool,
) -> Result<PromptPreview, FollowupError> {
    let business = BusinessProfile::find_by_id(business_id, pool)
        .await?
        .ok_or(FollowupError::BusinessNotFound(business_id))?;
    let contact = Contact::find_by_id(contact_id, pool)
        .await?
        .ok_or(FollowupError::ContactNotFound(contact_id))?;

    Ok(render_preview(&business, &contact, intent, channel))
}

pub fn render_preview(
    business: &BusinessProfile,
    contact: &Contact,
    intent: Intent,
    channel: Channel,
) -> PromptPreview {
    let appointment_time = contact
        .last_appointment
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty());

    let prompt = build_followup_prompt(
        Some(business),
        Some(contact),
        &PromptRequest {
            intent,
            channel,
            recipient_name: &contact.name,
            business_name: &business.name,
            appointment_time,
        },
    );

    PromptPreview {
        system: prompt.system,
        user: prompt.user,
        template: template_text(
            intent,
            &contact.name,
            &business.name,
            appointment_time.unwrap_or(UNKNOWN_APPOINTMENT_TIME),
        ),
    }
}
