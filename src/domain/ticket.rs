use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Value the ticket API answers with when it refuses a ticket.
pub const REJECTED_TICKET_ID: i64 = -1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Severity {
    High,
    Normal,
    Low,
    /// Free text resolved by the recognizer that is not one of the known levels.
    Other(String),
}

impl Severity {
    pub const CHOICES: [Severity; 3] = [Severity::High, Severity::Normal, Severity::Low];

    pub fn as_str(&self) -> &str {
        match self {
            Severity::High => "high",
            Severity::Normal => "normal",
            Severity::Low => "low",
            Severity::Other(value) => value,
        }
    }

    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "high" => Severity::High,
            "normal" => Severity::Normal,
            "low" => Severity::Low,
            _ => Severity::Other(value.trim().to_string()),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Severity::parse(&raw))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketRequest {
    pub category: String,
    pub severity: Severity,
    pub description: String,
}

/// Identifier assigned by the ticket API. Any JSON value is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(pub Value);

impl TicketId {
    /// Any JSON number equal to -1 (`-1`, `-1.0`) is the sentinel; the string `"-1"` is not.
    pub fn is_rejected(&self) -> bool {
        self.0.as_f64() == Some(REJECTED_TICKET_ID as f64)
    }

    /// Text used when the id is placed inside a document.
    pub fn display_text(&self) -> String {
        match &self.0 {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }
}

impl From<i64> for TicketId {
    fn from(value: i64) -> Self {
        TicketId(Value::from(value))
    }
}
