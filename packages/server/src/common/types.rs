//! Small enums shared by several domains.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Delivery channel a follow-up is written for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Sms,
    Email,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Sms => "sms",
            Channel::Email => "email",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why the business is reaching out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Confirm,
    Reschedule,
    NoShow,
    Rebook,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Confirm => "confirm",
            Intent::Reschedule => "reschedule",
            Intent::NoShow => "no_show",
            Intent::Rebook => "rebook",
        }
    }

    /// Plain-language goal used in LLM prompts
    pub fn goal(&self) -> &'static str {
        match self {
            Intent::Confirm => "confirm an upcoming appointment and ask them to reply YES or RESCHEDULE",
            Intent::Reschedule => "help them pick a new time after they asked to reschedule",
            Intent::NoShow => "check in after they missed today's appointment and offer the next available time",
            Intent::Rebook => "thank them for their visit and invite them to book the next one",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Message log direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Inbound,
    Outbound,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Inbound => "inbound",
            Direction::Outbound => "outbound",
        }
    }
}
