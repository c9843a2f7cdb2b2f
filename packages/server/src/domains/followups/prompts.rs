//! LLM prompt assembly for follow-up messages.
//!
//! The system prompt carries the business voice (profile fields, omitted when
//! empty) and the channel rule; the user prompt carries the specific ask.

use serde::Serialize;

use crate::common::{Channel, Intent};
use crate::domains::business::BusinessProfile;
use crate::domains::contacts::Contact;

/// Tone used when no business profile is available
pub const FALLBACK_TONE: &str = "Warm, concise, confident";

/// Maximum SMS length the model is told to stay under
pub const SMS_CHAR_LIMIT: usize = 320;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FollowupPrompt {
    pub system: String,
    pub user: String,
}

/// What is being written and to whom
#[derive(Debug, Clone, Copy)]
pub struct PromptRequest<'a> {
    pub intent: Intent,
    pub channel: Channel,
    pub recipient_name: &'a str,
    pub business_name: &'a str,
    pub appointment_time: Option<&'a str>,
}

pub fn build_followup_prompt(
    business: Option<&BusinessProfile>,
    contact: Option<&Contact>,
    request: &PromptRequest<'_>,
) -> FollowupPrompt {
    FollowupPrompt {
        system: system_prompt(business, request),
        user: user_prompt(contact, request),
    }
}

fn system_prompt(business: Option<&BusinessProfile>, request: &PromptRequest<'_>) -> String {
    let business_name = business
        .map(|b| b.name.as_str())
        .filter(|name| !name.trim().is_empty())
        .unwrap_or(request.business_name);
    let tone = business
        .map(|b| b.tone.as_str())
        .filter(|tone| !tone.trim().is_empty())
        .unwrap_or(FALLBACK_TONE);

    let mut sections = vec![
        format!(
            "You write follow-up messages to customers on behalf of {}.",
            business_name
        ),
        format!("Tone: {}", tone),
    ];

    if let Some(b) = business {
        push_section(&mut sections, "Instructions", b.instruction_block.as_deref());
        push_section(&mut sections, "Do", b.do_list.as_deref());
        push_section(&mut sections, "Don't", b.dont_list.as_deref());
        push_section(&mut sections, "Booking link", b.booking_link.as_deref());
        push_section(&mut sections, "Hours", b.hours.as_deref());
        push_section(&mut sections, "Policies", b.policies.as_deref());
        push_section(&mut sections, "FAQs", b.faqs.as_deref());
    }

    sections.push(channel_rule(request.channel));
    sections.push("Reply with the message text only.".to_string());

    sections.join("\n\n")
}

fn channel_rule(channel: Channel) -> String {
    match channel {
        Channel::Sms => format!(
            "Channel: SMS. Write a single message under {} characters. No emojis unless the tone asks for them.",
            SMS_CHAR_LIMIT
        ),
        Channel::Email => "Channel: email. Write a short plain-text email body with a greeting and a sign-off. No subject line.".to_string(),
    }
}

fn user_prompt(contact: Option<&Contact>, request: &PromptRequest<'_>) -> String {
    let mut lines = vec![
        format!(
            "Write {} to {} to {}.",
            match request.channel {
                Channel::Sms => "a text message",
                Channel::Email => "an email",
            },
            request.recipient_name,
            request.intent.goal()
        ),
        format!("Intent: {}", request.intent),
        format!("Recipient name: {}", request.recipient_name),
    ];

    if let Some(time) = non_empty(request.appointment_time) {
        lines.push(format!("Appointment time: {}", time));
    }

    if let Some(c) = contact {
        if let Some(status) = non_empty(c.status.as_deref()) {
            lines.push(format!("Contact status: {}", status));
        }
        if let Some(last) = non_empty(c.last_appointment.as_deref()) {
            lines.push(format!("Last appointment: {}", last));
        }
        if let Some(notes) = non_empty(c.notes.as_deref()) {
            lines.push(format!("Notes about this contact: {}", notes));
        }
    }

    lines.join("\n")
}

fn push_section(sections: &mut Vec<String>, label: &str, value: Option<&str>) {
    if let Some(value) = non_empty(value) {
        sections.push(format!("{}:\n{}", label, value));
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{BusinessId, ContactId};
    use chrono::Utc;

    fn business() -> BusinessProfile {
        BusinessProfile {
            id: BusinessId::new(),
            created_at: Utc::now(),
            name: "Acme Dental".into(),
            tone: "Friendly and brief".into(),
            instruction_block: Some("Always mention parking.".into()),
            do_list: Some("Use first names".into()),
            dont_list: Some("".into()),
            leadconnector_location_id: None,
            booking_link: Some("https://acme.test/book".into()),
            hours: None,
            policies: Some("24h cancellation".into()),
            faqs: None,
        }
    }

    fn contact() -> Contact {
        Contact {
            id: ContactId::new(),
            created_at: Utc::now(),
            business_id: None,
            leadconnector_contact_id: None,
            name: "Sam".into(),
            email: None,
            phone: None,
            last_appointment: Some("March 3".into()),
            status: Some("lapsed".into()),
            notes: Some("Prefers mornings".into()),
        }
    }

    fn request(channel: Channel) -> PromptRequest<'static> {
        PromptRequest {
            intent: Intent::Rebook,
            channel,
            recipient_name: "Sam",
            business_name: "Fallback Name",
            appointment_time: Some("Tue 3pm"),
        }
    }

    #[test]
    fn test_system_prompt_uses_profile_and_skips_empty_fields() {
        let prompt = build_followup_prompt(Some(&business()), None, &request(Channel::Sms));

        assert!(prompt.system.contains("on behalf of Acme Dental"));
        assert!(prompt.system.contains("Tone: Friendly and brief"));
        assert!(prompt.system.contains("Instructions:\nAlways mention parking."));
        assert!(prompt.system.contains("Booking link:\nhttps://acme.test/book"));
        assert!(prompt.system.contains("Policies:\n24h cancellation"));
        assert!(!prompt.system.contains("Don't:"));
        assert!(!prompt.system.contains("Hours:"));
        assert!(!prompt.system.contains("Fallback Name"));
    }

    #[test]
    fn test_channel_rules() {
        let sms = build_followup_prompt(None, None, &request(Channel::Sms));
        assert!(sms.system.contains("under 320 characters"));

        let email = build_followup_prompt(None, None, &request(Channel::Email));
        assert!(email.system.contains("greeting and a sign-off"));
        assert!(!email.system.contains("320"));
    }

    #[test]
    fn test_without_profile_falls_back_to_request() {
        let prompt = build_followup_prompt(None, None, &request(Channel::Sms));
        assert!(prompt.system.contains("on behalf of Fallback Name"));
        assert!(prompt.system.contains(FALLBACK_TONE));
    }

    #[test]
    fn test_user_prompt_includes_contact_context() {
        let prompt = build_followup_prompt(None, Some(&contact()), &request(Channel::Email));

        assert!(prompt.user.starts_with("Write an email to Sam to thank them"));
        assert!(prompt.user.contains("Intent: rebook"));
        assert!(prompt.user.contains("Appointment time: Tue 3pm"));
        assert!(prompt.user.contains("Contact status: lapsed"));
        assert!(prompt.user.contains("Last appointment: March 3"));
        assert!(prompt.user.contains("Notes about this contact: Prefers mornings"));
    }

    #[test]
    fn test_user_prompt_omits_missing_time() {
        let mut req = request(Channel::Sms);
        req.appointment_time = Some("  ");
        let prompt = build_followup_prompt(None, None, &req);
        assert!(!prompt.user.contains("Appointment time"));
    }
}
