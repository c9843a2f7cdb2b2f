//! Business profile extraction from crawled website text
//!
//! Best-effort: the caller always gets a draft back. Any missing
//! configuration, failed call or unparsable reply leaves the default skeleton.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::kernel::{BaseAI, CompletionRequest};

/// Scraped text must be longer than this (in characters) to be worth a call
pub const MIN_EXTRACTION_TEXT: usize = 50;

/// Near-deterministic sampling for structured extraction
pub const EXTRACTION_TEMPERATURE: f32 = 0.1;

pub const DEFAULT_BUSINESS_NAME: &str = "Business";
pub const DEFAULT_TONE: &str = "Warm, concise, confident";

const EXTRACTION_SYSTEM_PROMPT: &str = "You extract business profiles from website text for a \
local business follow-up assistant. Respond with a single JSON object and nothing else.";

const EXTRACTION_INSTRUCTION: &str = "Extract the business profile as JSON with keys: name, tone, \
bookingLink, hours, policies, faqs, instructionBlock, doList, dontList. Every value must be a \
string; use an empty string when the website does not say.";

/// Suggested business profile, never persisted by the scan itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessProfileDraft {
    pub name: String,
    pub tone: String,
    pub booking_link: String,
    pub hours: String,
    pub policies: String,
    pub faqs: String,
    pub instruction_block: String,
    pub do_list: String,
    pub dont_list: String,
    /// Keys the extractor returned that the profile does not know about
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BusinessProfileDraft {
    /// Defaults used when extraction is skipped or fails.
    pub fn skeleton(first_page_title: Option<&str>) -> Self {
        let name = first_page_title
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_BUSINESS_NAME);

        Self {
            name: name.to_string(),
            tone: DEFAULT_TONE.to_string(),
            booking_link: String::new(),
            hours: String::new(),
            policies: String::new(),
            faqs: String::new(),
            instruction_block: String::new(),
            do_list: String::new(),
            dont_list: String::new(),
            extra: Map::new(),
        }
    }

    /// Shallow merge: extracted values replace defaults key by key.
    ///
    /// Known fields are coerced to text: arrays are joined with `\n`, objects
    /// become their JSON text, numbers and booleans their display form.
    /// `null` keeps the default. Unknown keys are kept verbatim in `extra`.
    pub fn merge(&mut self, extracted: Map<String, Value>) {
        for (key, value) in extracted {
            let slot = match key.as_str() {
                "name" => &mut self.name,
                "tone" => &mut self.tone,
                "bookingLink" => &mut self.booking_link,
                "hours" => &mut self.hours,
                "policies" => &mut self.policies,
                "faqs" => &mut self.faqs,
                "instructionBlock" => &mut self.instruction_block,
                "doList" => &mut self.do_list,
                "dontList" => &mut self.dont_list,
                _ => {
                    self.extra.insert(key, value);
                    continue;
                }
            };
            if let Some(text) = coerce_text(value) {
                *slot = text;
            }
        }
    }
}

fn coerce_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(coerce_text)
                .collect::<Vec<_>>()
                .join("\n"),
        ),
        Value::Object(_) => Some(value.to_string()),
    }
}

/// Parse the outermost `{...}` span of a completion as a JSON object.
pub fn parse_profile_json(content: &str) -> Option<Map<String, Value>> {
    let start = content.find('{')?;
    let end = content.rfind('}')?;
    if end < start {
        return None;
    }

    match serde_json::from_str::<Value>(&content[start..=end]) {
        Ok(Value::Object(map)) => Some(map),
        Ok(_) => None,
        Err(e) => {
            debug!(error = %e, "Extractor reply is not valid JSON");
            None
        }
    }
}

pub struct ProfileExtractor {
    ai: Option<Arc<dyn BaseAI>>,
}

impl ProfileExtractor {
    pub fn new(ai: Option<Arc<dyn BaseAI>>) -> Self {
        Self { ai }
    }

    pub async fn extract(&self, raw_text: &str, first_page_title: Option<&str>) -> BusinessProfileDraft {
        let mut draft = BusinessProfileDraft::skeleton(first_page_title);

        let Some(ai) = &self.ai else {
            debug!("Completion service not configured, returning default profile");
            return draft;
        };
        if raw_text.chars().count() <= MIN_EXTRACTION_TEXT {
            debug!(chars = raw_text.chars().count(), "Not enough text to extract a profile");
            return draft;
        }

        let request = CompletionRequest::new(
            EXTRACTION_SYSTEM_PROMPT,
            format!("{}\n\nWebsite text:\n{}", EXTRACTION_INSTRUCTION, raw_text),
        )
        .temperature(EXTRACTION_TEMPERATURE);

        let content = match ai.complete(request).await {
            Ok(content) => content,
            Err(e) => {
                warn!(error = %e, "Profile extraction failed, using defaults");
                return draft;
            }
        };

        match parse_profile_json(&content) {
            Some(extracted) => {
                info!(keys = extracted.len(), "Extracted business profile");
                draft.merge(extracted);
            }
            None => warn!(
                reply_chars = content.chars().count(),
                "Profile extraction reply had no JSON object, using defaults"
            ),
        }

        draft
    }
}
