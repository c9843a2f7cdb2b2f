//! Compose follow-up action
//!
//! Write one follow-up message. The LLM is tried first when configured; any
//! failure or empty reply falls back to the static template so the caller
//! always gets text back.

use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::PgPool;
use thiserror::Error;
use tracing::{info, warn};

use crate::common::{
    optional_id, BusinessId, Channel, ContactId, Direction, Intent, Validate, ValidationErrors,
};
use crate::domains::business::BusinessProfile;
use crate::domains::contacts::Contact;
use crate::domains::followups::models::{CreateFollowupRequest, FollowupRequest};
use crate::domains::followups::prompts::{build_followup_prompt, FollowupPrompt, PromptRequest};
use crate::domains::followups::templates::template_text;
use crate::domains::messages::{CreateMessage, Message};
use crate::kernel::{BaseAI, CompletionRequest, ServerDeps};

/// Sampling temperature for follow-up copy
pub const COMPOSE_TEMPERATURE: f32 = 0.4;

#[derive(Debug, Error)]
pub enum FollowupError {
    #[error("business profile {0} not found")]
    BusinessNotFound(BusinessId),

    #[error("contact {0} not found")]
    ContactNotFound(ContactId),

    #[error(transparent)]
    Database(#[from] anyhow::Error),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposeRequest {
    #[serde(default)]
    pub name: String,
    pub channel: Channel,
    pub intent: Intent,
    #[serde(default)]
    pub business_name: String,
    #[serde(default)]
    pub appointment_time: String,
    #[serde(default, deserialize_with = "optional_id")]
    pub business_id: Option<BusinessId>,
    #[serde(default, deserialize_with = "optional_id")]
    pub contact_id: Option<ContactId>,
}

impl Validate for ComposeRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("name", &self.name);
        errors.require("businessName", &self.business_name);
        errors.require("appointmentTime", &self.appointment_time);
        errors.into_result()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComposeSource {
    Ai,
    Template,
}

impl ComposeSource {
    /// Value stored in `messages.provider`
    pub fn provider(&self) -> &'static str {
        match self {
            ComposeSource::Ai => "openai",
            ComposeSource::Template => "template",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ComposeSource::Ai => "ai",
            ComposeSource::Template => "template",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComposeOutcome {
    pub channel: Channel,
    pub text: String,
    pub source: ComposeSource,
}

/// Ask the completion service for copy, falling back to `template`.
pub async fn compose_text(
    ai: Option<&dyn BaseAI>,
    prompt: &FollowupPrompt,
    template: String,
) -> (String, ComposeSource) {
    let Some(ai) = ai else {
        return (template, ComposeSource::Template);
    };

    let request = CompletionRequest::new(prompt.system.as_str(), prompt.user.as_str())
        .temperature(COMPOSE_TEMPERATURE);

    match ai.complete(request).await {
        Ok(reply) if !reply.trim().is_empty() => (reply.trim().to_string(), ComposeSource::Ai),
        Ok(_) => {
            warn!("Completion returned empty text, using template");
            (template, ComposeSource::Template)
        }
        Err(e) => {
            warn!(error = %e, "Completion failed, using template");
            (template, ComposeSource::Template)
        }
    }
}

pub async fn compose_followup(
    request: ComposeRequest,
    deps: &ServerDeps,
    pool: &PgPool,
) -> Result<ComposeOutcome, FollowupError> {
    let business = match request.business_id {
        Some(id) => Some(
            BusinessProfile::find_by_id(id, pool)
                .await?
                .ok_or(FollowupError::BusinessNotFound(id))?,
        ),
        None => None,
    };
    let contact = match request.contact_id {
        Some(id) => Some(
            Contact::find_by_id(id, pool)
                .await?
                .ok_or(FollowupError::ContactNotFound(id))?,
        ),
        None => None,
    };

    let name = request.name.trim();
    let business_name = request.business_name.trim();
    let appointment_time = request.appointment_time.trim();

    let template = template_text(request.intent, name, business_name, appointment_time);
    let prompt = build_followup_prompt(
        business.as_ref(),
        contact.as_ref(),
        &PromptRequest {
            intent: request.intent,
            channel: request.channel,
            recipient_name: name,
            business_name,
            appointment_time: Some(appointment_time),
        },
    );

    let (text, source) = compose_text(deps.ai.as_deref(), &prompt, template).await;

    FollowupRequest::create(
        CreateFollowupRequest {
            name,
            business_name,
            appointment_time,
            channel: request.channel,
            intent: request.intent,
            response_text: &text,
        },
        pool,
    )
    .await?;

    if let Some(contact) = &contact {
        Message::create(
            CreateMessage {
                business_id: request.business_id.or(contact.business_id),
                contact_id: Some(contact.id),
                direction: Direction::Outbound,
                channel: request.channel,
                body: text.clone(),
                status: Some("draft".to_string()),
                provider: Some(source.provider().to_string()),
                meta: Some(json!({
                    "intent": request.intent,
                    "source": source.as_str(),
                })),
            },
            pool,
        )
        .await?;
    }

    info!(
        intent = %request.intent,
        channel = %request.channel,
        source = source.as_str(),
        contact_id = ?request.contact_id,
        "Follow-up composed"
    );

    Ok(ComposeOutcome {
        channel: request.channel,
        text,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::MockAI;

    fn prompt() -> FollowupPrompt {
        FollowupPrompt {
            system: "system".into(),
            user: "user".into(),
        }
    }

    #[tokio::test]
    async fn test_without_ai_uses_template() {
        let (text, source) = compose_text(None, &prompt(), "template".into()).await;
        assert_eq!(text, "template");
        assert_eq!(source, ComposeSource::Template);
    }

    #[tokio::test]
    async fn test_ai_reply_is_trimmed_and_used() {
        let ai = MockAI::new().with_response("  Hi Sam, see you Tuesday!\n");
        let (text, source) = compose_text(Some(&ai), &prompt(), "template".into()).await;

        assert_eq!(text, "Hi Sam, see you Tuesday!");
        assert_eq!(source, ComposeSource::Ai);

        let calls = ai.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].system, "system");
        assert_eq!(calls[0].user, "user");
        assert_eq!(calls[0].temperature, COMPOSE_TEMPERATURE);
    }

    #[tokio::test]
    async fn test_ai_failure_falls_back() {
        let ai = MockAI::new().with_error("rate limited");
        let (text, source) = compose_text(Some(&ai), &prompt(), "template".into()).await;
        assert_eq!(text, "template");
        assert_eq!(source, ComposeSource::Template);
    }

    #[tokio::test]
    async fn test_blank_ai_reply_falls_back() {
        let ai = MockAI::new().with_response("   ");
        let (_, source) = compose_text(Some(&ai), &prompt(), "template".into()).await;
        assert_eq!(source, ComposeSource::Template);
    }

    #[test]
    fn test_request_validation_uses_camel_case_fields() {
        let request: ComposeRequest = serde_json::from_str(
            r#"{"name": "Sam", "channel": "sms", "intent": "confirm", "businessName": ""}"#,
        )
        .unwrap();
        let errors = request.validate().unwrap_err();

        assert!(errors.field_errors.contains_key("businessName"));
        assert!(errors.field_errors.contains_key("appointmentTime"));
        assert!(!errors.field_errors.contains_key("name"));
    }

    #[test]
    fn test_outcome_shape() {
        let outcome = ComposeOutcome {
            channel: Channel::Email,
            text: "Hello".into(),
            source: ComposeSource::Ai,
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json, json!({"channel": "email", "text": "Hello", "source": "ai"}));
    }
}
