//! Event payload - the wire shape expected by the ingestion endpoint

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of interaction being simulated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Like,
    Comment,
    Share,
}

impl EventType {
    /// All event types, in selection order
    pub const ALL: [EventType; 3] = [EventType::Like, EventType::Comment, EventType::Share];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Like => "like",
            EventType::Comment => "comment",
            EventType::Share => "share",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single synthetic interaction event
///
/// `comment` is only ever set on [`EventType::Comment`] events, and
/// `hashtags` is never empty when the payload comes from the factory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventPayload {
    #[serde(rename = "type")]
    pub event_type: EventType,

    pub hashtags: Vec<String>,

    pub user_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// Free-form metadata forwarded untouched to the endpoint
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl EventPayload {
    /// Create a payload without a comment
    pub fn new(event_type: EventType, hashtags: Vec<String>, user_id: impl Into<String>) -> Self {
        Self {
            event_type,
            hashtags,
            user_id: user_id.into(),
            comment: None,
            metadata: serde_json::Map::new(),
        }
    }

    /// Attach a comment; ignored unless this is a comment event
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        if self.event_type == EventType::Comment {
            self.comment = Some(comment.into());
        }
        self
    }

    /// Compact JSON rendering for log lines
    pub fn to_log_string(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{:?}", self))
    }
}
