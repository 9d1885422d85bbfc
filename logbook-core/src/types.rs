//! Core domain types for logbook
//!
//! These types are the output of the two reading components: the log
//! directory picked by [`PathResolver`](crate::resolve::PathResolver) and the
//! session listings and transcripts produced by
//! [`TranscriptBuilder`](crate::transcript::TranscriptBuilder).
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Log root** | Directory holding one sub-directory per project (`~/.claude/projects`) |
//! | **Log directory** | One project's sub-directory; its name is an opaque encoding of a path |
//! | **Session** | One `.jsonl` file of chat events inside a log directory |
//! | **Event** | One decoded line of a session file |
//! | **Turn** | Consecutive same-role events collapsed into one [`Message`] |
//! | **Tool invocation** | An assistant request to run a tool, matched to its result by id |
//!
//! All types are immutable snapshots and derive `Serialize` so a rendering
//! layer can consume them as JSON.

use crate::timestamp::LocalTime;
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::PathBuf;

// ============================================
// Log directories
// ============================================

/// One directory under the log root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogDirectoryEntry {
    /// Directory name (encoded project path, treated as opaque)
    pub name: String,
    /// Location on disk
    pub path: PathBuf,
}

// ============================================
// Sessions
// ============================================

/// Listing metadata for one session file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionRecord {
    /// File stem of the session file
    pub id: String,
    pub file_path: PathBuf,
    /// Timestamp of the first line
    pub first_time: LocalTime,
    /// Timestamp of the last line
    pub last_time: LocalTime,
    /// Raw count of lines tagged `"type":"user"` or `"type":"assistant"`.
    ///
    /// This is a cheap approximation and usually larger than the number of
    /// reconstructed messages.
    pub message_count: usize,
    pub file_size_bytes: u64,
}

// ============================================
// Transcript
// ============================================

/// Who produced a [`Message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One reconstructed turn of the conversation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub role: Role,
    /// Turn text; assistant text parts are joined with a blank line
    pub text: String,
    /// Tool calls made during the turn (always empty for user messages)
    pub tools: Vec<ToolInvocation>,
    /// Timestamp of the first event that contributed to the turn
    pub timestamp: LocalTime,
}

impl Message {
    pub fn user(text: String, timestamp: LocalTime) -> Self {
        Self {
            role: Role::User,
            text,
            tools: Vec::new(),
            timestamp,
        }
    }
}

/// A tool call reconstructed from a `tool_use` part.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolInvocation {
    pub id: String,
    pub name: String,
    pub input: Map<String, Value>,
    /// Matching `tool_result`, if one exists anywhere in the file
    pub result: Option<ToolResult>,
    /// Line diff, only for edit calls with both strings present
    pub diff: Option<Vec<DiffLine>>,
}

/// The payload of a `tool_result` part.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolResult {
    /// Raw content: usually a string, sometimes a list of content blocks
    pub content: Value,
    pub is_error: bool,
}

impl ToolResult {
    /// Render the result content as plain text.
    ///
    /// Strings pass through, block lists contribute their `text` fields one
    /// per line, and anything else is printed as compact JSON.
    pub fn text(&self) -> String {
        match &self.content {
            Value::Null => String::new(),
            Value::String(text) => text.clone(),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::String(text) => text.clone(),
                    other => other
                        .get("text")
                        .and_then(|v| v.as_str())
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| other.to_string()),
                })
                .collect::<Vec<_>>()
                .join("\n"),
            other => other.to_string(),
        }
    }

    /// Result text cut to at most `limit` characters, with a marker when cut.
    pub fn preview(&self, limit: usize) -> String {
        let text = self.text();
        match text.char_indices().nth(limit) {
            Some((cut, _)) => format!("{}\n\n... (truncated)", &text[..cut]),
            None => text,
        }
    }
}

/// Classification of one diff line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffLineKind {
    Added,
    Removed,
    Context,
}

/// One line of an edit diff, without its line terminator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffLine {
    pub kind: DiffLineKind,
    pub content: String,
}

impl DiffLine {
    /// Unified-diff style prefix for text output.
    pub fn marker(&self) -> char {
        match self.kind {
            DiffLineKind::Added => '+',
            DiffLineKind::Removed => '-',
            DiffLineKind::Context => ' ',
        }
    }
}
