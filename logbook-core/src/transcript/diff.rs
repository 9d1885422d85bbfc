//! Line diffs for file-edit tool calls

use crate::types::{DiffLine, DiffLineKind};
use serde_json::{Map, Value};
use similar::{ChangeTag, TextDiff};

/// Name of the tool whose `old_string`/`new_string` inputs get a diff.
pub const EDIT_TOOL: &str = "Edit";

/// Line-by-line diff of `old` against `new`, in the diff algorithm's
/// natural order (removals and additions interleave with context).
pub fn line_diff(old: &str, new: &str) -> Vec<DiffLine> {
    TextDiff::from_lines(old, new)
        .iter_all_changes()
        .map(|change| DiffLine {
            kind: match change.tag() {
                ChangeTag::Equal => DiffLineKind::Context,
                ChangeTag::Delete => DiffLineKind::Removed,
                ChangeTag::Insert => DiffLineKind::Added,
            },
            content: change.value().trim_end_matches(&['\n', '\r'][..]).to_string(),
        })
        .collect()
}

/// Diff for an edit tool call, when both strings are present and non-empty.
pub(crate) fn edit_diff(tool_name: &str, input: &Map<String, Value>) -> Option<Vec<DiffLine>> {
    if tool_name != EDIT_TOOL {
        return None;
    }
    let old = input.get("old_string")?.as_str().filter(|s| !s.is_empty())?;
    let new = input.get("new_string")?.as_str().filter(|s| !s.is_empty())?;
    Some(line_diff(old, new))
}
