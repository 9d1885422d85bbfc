//! Transcript reconstruction from session logs
//!
//! A session file is an append-only JSONL log that was never meant to be
//! replayed as a conversation. One assistant turn may span several lines,
//! tool results arrive later as `user` events, and the tool injects its own
//! pseudo-messages. [`TranscriptBuilder`] turns such a file into an ordered
//! list of [`Message`]s:
//!
//! ```text
//! read lines ─► decode (skip bad lines) ─► stable sort by timestamp
//!            ─► index tool results by id ─► fold into turns
//! ```
//!
//! Failures never abort a build: bad lines are skipped, unmatched tool
//! calls keep `result: None`, and an unreadable file yields no messages.

mod diff;
mod event;
mod filter;
mod fold;

pub use diff::{line_diff, EDIT_TOOL};
pub use filter::is_system_message;

pub(crate) use event::RawEvent;

use crate::error::Result;
use crate::timestamp::DisplayOffset;
use crate::types::{Message, SessionRecord};
use std::fs;
use std::path::Path;

/// Reads session files into listings and transcripts.
#[derive(Debug, Clone, Copy, Default)]
pub struct TranscriptBuilder {
    offset: DisplayOffset,
}

impl TranscriptBuilder {
    /// Builder using the default display offset.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_offset(offset: DisplayOffset) -> Self {
        Self { offset }
    }

    pub fn offset(&self) -> DisplayOffset {
        self.offset
    }

    /// Sessions in `log_dir`, most recent first.
    pub fn list_sessions(&self, log_dir: &Path) -> Vec<SessionRecord> {
        crate::sessions::list_sessions(log_dir, self.offset)
    }

    /// Ordered messages of one session file.
    ///
    /// An unreadable file yields an empty transcript.
    pub fn build_transcript(&self, session_file: &Path) -> Vec<Message> {
        match self.try_build_transcript(session_file) {
            Ok(messages) => messages,
            Err(e) => {
                tracing::warn!(
                    path = %session_file.display(),
                    error = %e,
                    "Session file not readable"
                );
                Vec::new()
            }
        }
    }

    /// Like [`Self::build_transcript`], but reports a file that cannot be read.
    pub fn try_build_transcript(&self, session_file: &Path) -> Result<Vec<Message>> {
        let text = read_log_text(session_file)?;
        let messages = self.parse_transcript(&text);
        tracing::debug!(
            path = %session_file.display(),
            messages = messages.len(),
            "Built transcript"
        );
        Ok(messages)
    }

    /// Ordered messages from session log text.
    pub fn parse_transcript(&self, text: &str) -> Vec<Message> {
        let mut skipped = 0usize;
        let mut events: Vec<RawEvent> = Vec::new();

        for line in text.lines() {
            if line.trim().is_empty() {
                continue;
            }
            match RawEvent::parse_line(line) {
                Some(event) => events.push(event),
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            tracing::debug!(skipped, parsed = events.len(), "Skipped malformed log lines");
        }

        // Stable: equal timestamps keep file order.
        events.sort_by(|a, b| a.timestamp_str().cmp(b.timestamp_str()));

        fold::fold_events(&events, self.offset)
    }
}

/// Whole-file read as UTF-8, replacing invalid sequences.
pub(crate) fn read_log_text(path: &Path) -> std::io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
