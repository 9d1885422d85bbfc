//! Plain-text rendering of listings and transcripts.

use logbook_core::format::{format_file_size, format_timestamp};
use logbook_core::{DiffLine, Message, SessionRecord, ToolInvocation};
use std::fmt::Write;

/// Default cap on characters shown per tool result.
pub const DEFAULT_MAX_RESULT_CHARS: usize = 2000;

/// Knobs for [`render_transcript`].
#[derive(Debug, Clone, Copy)]
pub struct TextRenderOptions {
    /// Tool result text longer than this is cut
    pub max_result_chars: usize,
}

impl Default for TextRenderOptions {
    fn default() -> Self {
        Self {
            max_result_chars: DEFAULT_MAX_RESULT_CHARS,
        }
    }
}

/// One row per session: id, last time, raw message count, size.
pub fn render_sessions(sessions: &[SessionRecord]) -> String {
    let mut out = String::new();
    for session in sessions {
        let _ = writeln!(
            out,
            "{}  {}  {:>4} messages  {:>9}",
            session.id,
            format_timestamp(session.last_time),
            session.message_count,
            format_file_size(session.file_size_bytes),
        );
    }
    out
}

pub fn render_transcript(messages: &[Message], options: TextRenderOptions) -> String {
    let mut out = String::new();
    for (i, message) in messages.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "[{}] {}", message.role, format_timestamp(message.timestamp));
        if !message.text.is_empty() {
            let _ = writeln!(out, "{}", message.text);
        }
        for tool in &message.tools {
            render_tool(&mut out, tool, options);
        }
    }
    out
}

fn render_tool(out: &mut String, tool: &ToolInvocation, options: TextRenderOptions) {
    let _ = writeln!(out, "  > {} ({})", tool.name, tool.id);

    match &tool.diff {
        Some(diff) => render_diff(out, diff),
        None if !tool.input.is_empty() => {
            let input = serde_json::to_string_pretty(&tool.input)
                .unwrap_or_else(|_| "[invalid tool input]".to_string());
            write_indented(out, &input, "    ");
        }
        None => {}
    }

    match &tool.result {
        Some(result) => {
            let label = if result.is_error { "error" } else { "result" };
            let _ = writeln!(out, "  < {label}");
            write_indented(out, &result.preview(options.max_result_chars), "    ");
        }
        None => {
            let _ = writeln!(out, "  < (no result)");
        }
    }
}

fn render_diff(out: &mut String, diff: &[DiffLine]) {
    for line in diff {
        let _ = writeln!(out, "    {}{}", line.marker(), line.content);
    }
}

fn write_indented(out: &mut String, text: &str, indent: &str) {
    for line in text.lines() {
        let _ = writeln!(out, "{indent}{line}");
    }
}
