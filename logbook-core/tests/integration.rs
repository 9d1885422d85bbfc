//! Integration tests for logbook resolution and transcript reconstruction
//!
//! These tests use fixture files in `tests/fixtures/claude-code/` and
//! temporary log roots to exercise the resolve → list → build flow.

use logbook_core::resolve::PathStyle;
use logbook_core::types::{DiffLineKind, Role};
use logbook_core::{DisplayOffset, PathResolver, SessionStore, TranscriptBuilder};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Get the path to a fixture file
fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/claude-code")
        .join(name)
}

/// Log root with one project directory holding copies of the fixtures
fn seeded_root(dir_name: &str) -> TempDir {
    let root = TempDir::new().unwrap();
    let project_dir = root.path().join(dir_name);
    fs::create_dir_all(&project_dir).unwrap();
    for name in [
        "basic-session.jsonl",
        "edit-session.jsonl",
        "out-of-order-session.jsonl",
    ] {
        fs::copy(fixture_path(name), project_dir.join(name)).unwrap();
    }
    root
}

fn posix_store(root: &Path) -> SessionStore {
    SessionStore::with_parts(
        root,
        PathResolver::with_style(PathStyle::Posix),
        TranscriptBuilder::new(),
    )
}

// ============================================
// Transcript Tests
// ============================================

#[test]
fn test_basic_session_transcript() {
    let messages = TranscriptBuilder::new().build_transcript(&fixture_path("basic-session.jsonl"));

    let roles: Vec<_> = messages.iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        vec![Role::User, Role::Assistant, Role::Assistant, Role::User]
    );

    // Command echo and caveat banner are dropped.
    assert_eq!(messages[0].text, "What files are in this repo?");
    assert_eq!(messages[0].timestamp.to_string(), "2025-06-01 10:00:05");
    assert_eq!(messages[3].text, "Thanks!");

    let first_turn = &messages[1];
    assert_eq!(first_turn.text, "Let me look.");
    assert_eq!(first_turn.tools.len(), 1);

    let tool = &first_turn.tools[0];
    assert_eq!(tool.id, "toolu_01");
    assert_eq!(tool.name, "Bash");
    assert_eq!(tool.input["command"], json!("ls"));
    let result = tool.result.as_ref().expect("tool result should be attached");
    assert_eq!(result.text(), "Cargo.toml\nREADME.md\nsrc");
    assert!(!result.is_error);
    assert!(tool.diff.is_none());

    assert!(messages[2].tools.is_empty());
    assert_eq!(messages[2].timestamp.to_string(), "2025-06-01 10:00:10");
}

#[test]
fn test_edit_session_diff_and_errors() {
    let messages = TranscriptBuilder::new().build_transcript(&fixture_path("edit-session.jsonl"));
    assert_eq!(messages.len(), 4);

    let edit = &messages[1].tools[0];
    assert_eq!(edit.name, "Edit");
    let diff: Vec<_> = edit
        .diff
        .as_ref()
        .unwrap()
        .iter()
        .map(|l| (l.kind, l.content.as_str()))
        .collect();
    assert_eq!(
        diff,
        vec![
            (DiffLineKind::Context, "a"),
            (DiffLineKind::Removed, "b"),
            (DiffLineKind::Added, "c"),
        ]
    );
    assert_eq!(
        edit.result.as_ref().unwrap().text(),
        "The file /tmp/notes.txt has been updated."
    );

    let read = &messages[2].tools[0];
    assert!(read.result.as_ref().unwrap().is_error);
    assert!(read.diff.is_none());

    // Plain string assistant content is a text part.
    assert_eq!(messages[3].text, "Done.");
}

#[test]
fn test_out_of_order_lines_are_sorted() {
    let messages =
        TranscriptBuilder::new().build_transcript(&fixture_path("out-of-order-session.jsonl"));

    let texts: Vec<_> = messages.iter().map(|m| m.text.as_str()).collect();
    assert_eq!(texts, vec!["find main", "", "Found it."]);

    let grep = &messages[1].tools[0];
    assert_eq!(grep.name, "Grep");
    assert_eq!(grep.result.as_ref().unwrap().content, json!("ok"));
}

#[test]
fn test_transcript_is_deterministic() {
    let builder = TranscriptBuilder::new();
    let path = fixture_path("basic-session.jsonl");
    assert_eq!(builder.build_transcript(&path), builder.build_transcript(&path));
}

#[test]
fn test_transcript_serializes_for_renderers() {
    let offset = DisplayOffset::from_hours(0).unwrap();
    let messages =
        TranscriptBuilder::with_offset(offset).build_transcript(&fixture_path("edit-session.jsonl"));
    let value = serde_json::to_value(&messages).unwrap();

    assert_eq!(value[0]["role"], json!("user"));
    assert_eq!(value[0]["timestamp"], json!("2025-06-02 10:00:00"));
    assert_eq!(value[1]["tools"][0]["diff"][1]["kind"], json!("removed"));
    assert_eq!(value[2]["tools"][0]["result"]["is_error"], json!(true));
}

// ============================================
// Listing Tests
// ============================================

#[test]
fn test_listing_fixture_sessions() {
    let root = seeded_root("-home-dev-demo");
    let sessions = TranscriptBuilder::new().list_sessions(&root.path().join("-home-dev-demo"));

    let ids: Vec<_> = sessions.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["out-of-order-session", "edit-session", "basic-session"]
    );

    let basic = &sessions[2];
    // First line is a summary without a timestamp.
    assert!(!basic.first_time.is_known());
    assert_eq!(basic.last_time.to_string(), "2025-06-01 10:01:30");
    // Raw tag count, larger than the four reconstructed messages.
    assert_eq!(basic.message_count, 7);
    assert_eq!(
        basic.file_size_bytes,
        fs::metadata(fixture_path("basic-session.jsonl")).unwrap().len()
    );

    // Listing order here follows last line timestamps, not sorted events.
    let out_of_order = &sessions[0];
    assert_eq!(out_of_order.first_time.to_string(), "2025-06-03 17:00:03");
    assert_eq!(out_of_order.last_time.to_string(), "2025-06-03 17:00:04");
}

// ============================================
// Resolution Tests
// ============================================

#[test]
fn test_resolution_prefers_full_token_match() {
    let root = TempDir::new().unwrap();
    for name in ["-home-dev-app", "-home-dev-app-server", "-home-dev-other"] {
        fs::create_dir_all(root.path().join(name)).unwrap();
    }
    fs::write(root.path().join("-home-dev-app-file"), "not a dir").unwrap();

    let resolver = PathResolver::with_style(PathStyle::Posix);
    let entry = resolver
        .resolve(Path::new("/home/dev/app-server"), root.path())
        .unwrap();
    assert_eq!(entry.name, "-home-dev-app-server");
    assert_eq!(entry.path, root.path().join("-home-dev-app-server"));

    assert!(resolver
        .resolve(Path::new("/home/dev/missing"), root.path())
        .is_none());
}

#[test]
fn test_resolution_of_non_ascii_path_by_depth() {
    let root = TempDir::new().unwrap();
    for name in ["-a", "-a-b", "-a-b-c-d"] {
        fs::create_dir_all(root.path().join(name)).unwrap();
    }

    let resolver = PathResolver::with_style(PathStyle::Posix);
    let entry = resolver
        .resolve(Path::new("/项目/代码"), root.path())
        .unwrap();
    assert_eq!(entry.name, "-a-b");
}

#[test]
fn test_windows_resolution_checks_drive_prefix() {
    let root = TempDir::new().unwrap();
    for name in ["C--Users-dev-app", "D--Users-dev-app"] {
        fs::create_dir_all(root.path().join(name)).unwrap();
    }

    let resolver = PathResolver::with_style(PathStyle::Windows);
    let entry = resolver
        .resolve(Path::new(r"D:\Users\dev\app"), root.path())
        .unwrap();
    assert_eq!(entry.name, "D--Users-dev-app");
}

#[test]
fn test_missing_log_root_resolves_nothing() {
    let resolver = PathResolver::with_style(PathStyle::Posix);
    assert!(resolver
        .resolve(Path::new("/home/dev/app"), Path::new("/no/such/root"))
        .is_none());
}

// ============================================
// Store Tests
// ============================================

#[test]
fn test_store_end_to_end() {
    let root = seeded_root("-home-dev-demo");
    let store = posix_store(root.path());
    let project = Path::new("/home/dev/demo");

    let session = store.find_session(project, "edit").unwrap();
    assert_eq!(session.id, "edit-session");
    assert_eq!(store.transcript(&session).len(), 4);

    let export = store.export_project(project);
    assert_eq!(export.directory.as_deref(), Some("-home-dev-demo"));
    let counts: Vec<_> = export
        .sessions
        .iter()
        .map(|s| (s.id.as_str(), s.message_count))
        .collect();
    assert_eq!(
        counts,
        vec![
            ("out-of-order-session", 3),
            ("edit-session", 4),
            ("basic-session", 4),
        ]
    );
}
