//! Folding sorted events into messages
//!
//! Two passes over the time-sorted events:
//!
//! 1. Collect every `tool_result` carried by a user event into a table
//!    keyed by `tool_use_id`. Results are matched to calls by id only,
//!    never by position.
//! 2. Walk the events once. Assistant events accumulate into a pending
//!    turn; a user event flushes the pending turn and then emits its own
//!    text as a message unless it is a system pseudo-message.

use super::diff::edit_diff;
use super::event::{str_or_empty, ContentBlock, EventKind, RawContent, RawEvent, RawPart};
use super::filter::is_system_message;
use crate::timestamp::{DisplayOffset, LocalTime};
use crate::types::{Message, Role, ToolInvocation, ToolResult};
use serde_json::{Map, Value};
use std::collections::HashMap;

const UNKNOWN_TOOL_NAME: &str = "unknown";

/// Build messages from events already in timestamp order.
pub(crate) fn fold_events(events: &[RawEvent], offset: DisplayOffset) -> Vec<Message> {
    let results = collect_tool_results(events);
    let mut fold = TurnFold::new(&results, offset);
    for event in events {
        fold.push(event);
    }
    fold.finish()
}

/// `tool_use_id → result` for every tool result in user events.
///
/// A later result with the same id replaces an earlier one.
pub(crate) fn collect_tool_results(events: &[RawEvent]) -> HashMap<String, ToolResult> {
    let mut results = HashMap::new();

    for event in events.iter().filter(|e| e.kind() == EventKind::User) {
        for part in event.parts() {
            if let RawPart::Block(ContentBlock::ToolResult {
                tool_use_id,
                content,
                is_error,
            }) = part
            {
                let id = str_or_empty(tool_use_id);
                if id.is_empty() {
                    continue;
                }
                results.insert(
                    id.to_string(),
                    ToolResult {
                        content: content.clone(),
                        is_error: is_error.unwrap_or(false),
                    },
                );
            }
        }
    }

    results
}

/// Text typed by the user: string content as-is, or the text parts of a
/// content list joined by newlines. Tool results contribute nothing.
pub(crate) fn user_text(event: &RawEvent) -> String {
    match event.content() {
        Some(RawContent::Text(text)) => text.clone(),
        Some(RawContent::Parts(parts)) => parts
            .iter()
            .filter_map(|part| match part {
                RawPart::Block(ContentBlock::Text { text }) => Some(text.as_str()),
                RawPart::Bare(text) => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n"),
        _ => String::new(),
    }
}

/// Assistant turn being accumulated.
#[derive(Debug, Default)]
struct PendingTurn {
    text: String,
    tools: Vec<ToolInvocation>,
    /// Raw timestamp of the first event that had one
    timestamp: Option<String>,
}

impl PendingTurn {
    fn has_content(&self) -> bool {
        !self.text.is_empty() || !self.tools.is_empty()
    }

    fn push_text(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        if !self.text.is_empty() {
            self.text.push_str("\n\n");
        }
        self.text.push_str(text);
    }
}

struct TurnFold<'a> {
    results: &'a HashMap<String, ToolResult>,
    offset: DisplayOffset,
    messages: Vec<Message>,
    pending: PendingTurn,
}

impl<'a> TurnFold<'a> {
    fn new(results: &'a HashMap<String, ToolResult>, offset: DisplayOffset) -> Self {
        Self {
            results,
            offset,
            messages: Vec::new(),
            pending: PendingTurn::default(),
        }
    }

    fn push(&mut self, event: &RawEvent) {
        match event.kind() {
            EventKind::User => self.push_user(event),
            EventKind::Assistant => self.push_assistant(event),
            EventKind::Other => {}
        }
    }

    fn push_user(&mut self, event: &RawEvent) {
        self.flush();

        let text = user_text(event);
        if text.is_empty() || is_system_message(&text) {
            return;
        }

        let timestamp = LocalTime::parse(event.timestamp_str(), self.offset);
        self.messages.push(Message::user(text, timestamp));
    }

    fn push_assistant(&mut self, event: &RawEvent) {
        if self.pending.timestamp.is_none() {
            let raw = event.timestamp_str();
            if !raw.is_empty() {
                self.pending.timestamp = Some(raw.to_string());
            }
        }

        match event.content() {
            Some(RawContent::Text(text)) => self.pending.push_text(text),
            Some(RawContent::Parts(parts)) => {
                for part in parts {
                    match part {
                        RawPart::Block(ContentBlock::Text { text }) => self.pending.push_text(text),
                        RawPart::Block(ContentBlock::ToolUse { id, name, input }) => {
                            let name = name.as_ref().and_then(Value::as_str);
                            let invocation = self.invocation(str_or_empty(id), name, input);
                            self.pending.tools.push(invocation);
                        }
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }

    fn invocation(&self, id: &str, name: Option<&str>, input: &Value) -> ToolInvocation {
        let name = name.unwrap_or(UNKNOWN_TOOL_NAME).to_string();
        let input: Map<String, Value> = input.as_object().cloned().unwrap_or_default();
        let diff = edit_diff(&name, &input);

        ToolInvocation {
            id: id.to_string(),
            result: self.results.get(id).cloned(),
            name,
            input,
            diff,
        }
    }

    /// Emit the pending assistant turn, if it has any content, and reset it.
    fn flush(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        if !pending.has_content() {
            return;
        }

        self.messages.push(Message {
            role: Role::Assistant,
            text: pending.text,
            tools: pending.tools,
            timestamp: LocalTime::parse_opt(pending.timestamp.as_deref(), self.offset),
        });
    }

    fn finish(mut self) -> Vec<Message> {
        self.flush();
        self.messages
    }
}
