use crate::common::Intent;

/// Static follow-up text used when no LLM reply is available.
pub fn template_text(intent: Intent, name: &str, business_name: &str, appointment_time: &str) -> String {
    match intent {
        Intent::Confirm => format!(
            "Hi {name}, just confirming your appointment with {business_name} at {appointment_time}. Reply YES to confirm or RESCHEDULE to pick a new time."
        ),
        Intent::Reschedule => format!(
            "No problem {name}. What time works better for you to reschedule with {business_name}?"
        ),
        Intent::NoShow => format!(
            "Hey {name}, we missed you today at {business_name}. Want to grab the next available time this week?"
        ),
        Intent::Rebook => format!(
            "Thanks for coming in, {name}. Want to book your next visit with {business_name}?"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirm_template() {
        assert_eq!(
            template_text(Intent::Confirm, "Sam", "Acme Dental", "Tue 3pm"),
            "Hi Sam, just confirming your appointment with Acme Dental at Tue 3pm. Reply YES to confirm or RESCHEDULE to pick a new time."
        );
    }

    #[test]
    fn test_templates_without_appointment_time() {
        let reschedule = template_text(Intent::Reschedule, "Sam", "Acme", "ignored");
        assert_eq!(
            reschedule,
            "No problem Sam. What time works better for you to reschedule with Acme?"
        );

        let no_show = template_text(Intent::NoShow, "Sam", "Acme", "ignored");
        assert!(no_show.starts_with("Hey Sam, we missed you today at Acme."));

        let rebook = template_text(Intent::Rebook, "Sam", "Acme", "ignored");
        assert_eq!(rebook, "Thanks for coming in, Sam. Want to book your next visit with Acme?");
    }
}
