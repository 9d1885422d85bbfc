//! Session listing for a resolved log directory
//!
//! Listing is cheap: it reads each file once, takes the
//! timestamps of the first and last lines, and counts message lines by a
//! literal substring match instead of reconstructing the transcript.

use crate::error::Result;
use crate::timestamp::{DisplayOffset, LocalTime};
use crate::transcript::{read_log_text, RawEvent};
use crate::types::SessionRecord;
use std::fs;
use std::path::{Path, PathBuf};

/// Extension of session log files.
pub const SESSION_EXTENSION: &str = "jsonl";

/// Literal tags counted for [`SessionRecord::message_count`].
const MESSAGE_TYPE_TAGS: &[&str] = &[r#""type":"user""#, r#""type":"assistant""#];

/// Sessions in `log_dir`, sorted by last timestamp, most recent first.
///
/// Files that cannot be read or contain no lines are left out. Sessions
/// with equal last timestamps keep file name order.
pub fn list_sessions(log_dir: &Path, offset: DisplayOffset) -> Vec<SessionRecord> {
    let files = match session_files(log_dir) {
        Ok(files) => files,
        Err(e) => {
            tracing::warn!(
                log_dir = %log_dir.display(),
                error = %e,
                "Could not enumerate session files"
            );
            return Vec::new();
        }
    };

    let mut sessions: Vec<SessionRecord> = files
        .iter()
        .filter_map(|path| scan_session_file(path, offset))
        .collect();

    sessions.sort_by(|a, b| b.last_time.cmp(&a.last_time));

    tracing::debug!(
        log_dir = %log_dir.display(),
        files = files.len(),
        sessions = sessions.len(),
        "Listed sessions"
    );
    sessions
}

/// `*.jsonl` files directly inside `log_dir`, sorted by path.
pub fn session_files(log_dir: &Path) -> Result<Vec<PathBuf>> {
    // Directory names come from arbitrary project paths and may contain
    // glob metacharacters.
    let escaped = glob::Pattern::escape(&log_dir.to_string_lossy());
    let pattern = Path::new(&escaped).join(format!("*.{SESSION_EXTENSION}"));

    let mut files: Vec<PathBuf> = glob::glob(&pattern.to_string_lossy())?
        .flatten()
        .filter(|path| path.is_file())
        .collect();
    files.sort();
    Ok(files)
}

/// Listing metadata for one session file, or `None` if it is unreadable
/// or has no non-blank lines.
pub fn scan_session_file(path: &Path, offset: DisplayOffset) -> Option<SessionRecord> {
    let text = match read_log_text(path) {
        Ok(text) => text,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Skipping unreadable session");
            return None;
        }
    };

    let mut lines = text.lines().filter(|line| !line.trim().is_empty());
    let first = lines.next()?;
    let last = lines.last().unwrap_or(first);

    let file_size_bytes = fs::metadata(path)
        .map(|m| m.len())
        .unwrap_or(text.len() as u64);

    Some(SessionRecord {
        id: session_id(path),
        file_path: path.to_path_buf(),
        first_time: line_time(first, offset),
        last_time: line_time(last, offset),
        message_count: count_message_lines(&text),
        file_size_bytes,
    })
}

/// Session id of a session file: its file stem.
pub fn session_id(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Lines that carry a literal user or assistant type tag.
pub fn count_message_lines(text: &str) -> usize {
    text.lines()
        .filter(|line| MESSAGE_TYPE_TAGS.iter().any(|tag| line.contains(tag)))
        .count()
}

fn line_time(line: &str, offset: DisplayOffset) -> LocalTime {
    RawEvent::parse_line(line)
        .map(|event| LocalTime::parse(event.timestamp_str(), offset))
        .unwrap_or_default()
}
