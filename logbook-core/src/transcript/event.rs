//! Serde model for session log lines
//!
//! Each line of a session file is one JSON event. Only `type`,
//! `timestamp` and `message.content` matter for transcripts; every other
//! field is ignored. Field shapes vary between tool versions, so content
//! is modelled with untagged fallbacks instead of failing the line.

use serde::Deserialize;
use serde_json::Value;

/// One decoded line from a session log.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub(crate) struct RawEvent {
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    pub timestamp: Option<Value>,
    pub message: Option<RawMessage>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub(crate) struct RawMessage {
    pub content: Option<RawContent>,
}

/// `message.content`: a plain string or an ordered list of parts.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawContent {
    Text(String),
    Parts(Vec<RawPart>),
    Other(Value),
}

/// One element of a content list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawPart {
    Block(ContentBlock),
    /// Bare strings occasionally appear in user content lists
    Bare(String),
    Other(Value),
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub(crate) enum ContentBlock {
    #[serde(rename = "text")]
    Text {
        #[serde(default)]
        text: String,
    },
    #[serde(rename = "tool_use")]
    ToolUse {
        // Ids and names are kept as raw values so a null or numeric field
        // does not drop the whole block.
        #[serde(default)]
        id: Option<Value>,
        #[serde(default)]
        name: Option<Value>,
        #[serde(default)]
        input: Value,
    },
    #[serde(rename = "tool_result")]
    ToolResult {
        #[serde(default)]
        tool_use_id: Option<Value>,
        #[serde(default)]
        content: Value,
        #[serde(default)]
        is_error: Option<bool>,
    },
    // thinking, image, and anything newer
    #[serde(other)]
    Unknown,
}

/// Event types that take part in transcripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EventKind {
    User,
    Assistant,
    Other,
}

impl RawEvent {
    /// Decode one line; `None` for blank or malformed lines.
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        serde_json::from_str(line).ok()
    }

    pub fn kind(&self) -> EventKind {
        match self.event_type.as_deref() {
            Some("user") => EventKind::User,
            Some("assistant") => EventKind::Assistant,
            _ => EventKind::Other,
        }
    }

    /// Raw timestamp string, or `""` when missing or not a string.
    pub fn timestamp_str(&self) -> &str {
        str_or_empty(&self.timestamp)
    }

    pub fn content(&self) -> Option<&RawContent> {
        self.message.as_ref().and_then(|m| m.content.as_ref())
    }

    /// Content parts, empty unless the content is a list.
    pub fn parts(&self) -> &[RawPart] {
        match self.content() {
            Some(RawContent::Parts(parts)) => parts,
            _ => &[],
        }
    }
}

/// String content of an optional JSON field; `""` when missing or not a string.
pub(crate) fn str_or_empty(value: &Option<Value>) -> &str {
    value.as_ref().and_then(Value::as_str).unwrap_or("")
}
