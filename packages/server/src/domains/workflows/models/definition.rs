//! Linear follow-up workflow definitions.
//!
//! A workflow is stored, listed and shown in the dashboard. Nothing executes it.
//!
//! ```json
//! { "trigger": "appointment_booked",
//!   "steps": [ { "type": "wait", "duration": "24h" },
//!              { "type": "message", "channel": "sms", "intent": "confirm" } ] }
//! ```

use serde::{Deserialize, Serialize};

use crate::common::{Channel, Intent, ValidationErrors};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowDefinition {
    pub trigger: String,
    pub steps: Vec<WorkflowStep>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WorkflowStep {
    Message { channel: Channel, intent: Intent },
    Wait { duration: String },
}

impl WorkflowDefinition {
    /// Adds problems to `errors` under `prefix` (e.g. `definition.steps.1.duration`).
    pub fn check(&self, prefix: &str, errors: &mut ValidationErrors) {
        errors.require(&format!("{prefix}.trigger"), &self.trigger);

        if self.steps.is_empty() {
            errors.add(
                &format!("{prefix}.steps"),
                "Array must contain at least 1 element(s)",
            );
        }

        for (index, step) in self.steps.iter().enumerate() {
            if let WorkflowStep::Wait { duration } = step {
                if !is_valid_duration(duration) {
                    errors.add(
                        &format!("{prefix}.steps.{index}.duration"),
                        "Duration must be a number followed by m, h or d",
                    );
                }
            }
        }
    }
}

/// `15m`, `24h`, `3d`
pub fn is_valid_duration(raw: &str) -> bool {
    let Some(unit) = raw.chars().last() else {
        return false;
    };
    let amount = &raw[..raw.len() - unit.len_utf8()];
    matches!(unit, 'm' | 'h' | 'd')
        && !amount.is_empty()
        && amount.chars().all(|c| c.is_ascii_digit())
}
