//! Project-level access to session logs
//!
//! [`SessionStore`] owns the log root and composes the two readers:
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌───────────────────┐
//! │ project path │ ──► │ PathResolver │ ──► │ TranscriptBuilder │
//! └──────────────┘     └──────────────┘     │  list / build     │
//!                                           └───────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use logbook_core::{Config, SessionStore};
//! use std::path::Path;
//!
//! let config = Config::load()?;
//! let store = SessionStore::from_config(&config)?;
//!
//! for session in store.sessions_for_project(Path::new("/home/dev/app")) {
//!     println!("{} {}", session.id, session.last_time);
//! }
//! # Ok::<(), logbook_core::Error>(())
//! ```

use crate::config::Config;
use crate::error::Result;
use crate::format::format_file_size;
use crate::resolve::PathResolver;
use crate::transcript::TranscriptBuilder;
use crate::types::{LogDirectoryEntry, Message, SessionRecord};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Every session of one project, ready for a renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectExport {
    /// Project path as given by the caller
    pub project: String,
    /// Matched log directory name, `None` when nothing matched
    pub directory: Option<String>,
    /// Sessions, most recent first
    pub sessions: Vec<SessionExport>,
}

/// One session of a [`ProjectExport`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionExport {
    pub id: String,
    /// Last timestamp as `YYYY-MM-DD HH:MM:SS` or `unknown time`
    pub last_time: String,
    /// Number of reconstructed messages (not the raw line count)
    pub message_count: usize,
    /// Human-readable file size
    pub file_size: String,
    pub messages: Vec<Message>,
}

/// Reads the sessions stored under one log root.
#[derive(Debug, Clone)]
pub struct SessionStore {
    root: PathBuf,
    resolver: PathResolver,
    builder: TranscriptBuilder,
}

impl SessionStore {
    /// Store with explicitly configured components.
    pub fn with_parts(
        root: impl Into<PathBuf>,
        resolver: PathResolver,
        builder: TranscriptBuilder,
    ) -> Self {
        Self {
            root: root.into(),
            resolver,
            builder,
        }
    }

    /// Store over the configured log root and display offset.
    pub fn from_config(config: &Config) -> Result<Self> {
        let offset = config.display.offset()?;
        Ok(Self::with_parts(
            config.claude_projects_dir(),
            PathResolver::new(),
            TranscriptBuilder::with_offset(offset),
        ))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn builder(&self) -> &TranscriptBuilder {
        &self.builder
    }

    /// Log directory for `project`, if any matches.
    pub fn resolve(&self, project: &Path) -> Option<LogDirectoryEntry> {
        self.resolver.resolve(project, &self.root)
    }

    /// Sessions of `project`, most recent first. Empty when unresolved.
    pub fn sessions_for_project(&self, project: &Path) -> Vec<SessionRecord> {
        match self.resolve(project) {
            Some(dir) => self.builder.list_sessions(&dir.path),
            None => Vec::new(),
        }
    }

    /// Find a session of `project` by id: exact match first, then a
    /// unique id prefix.
    pub fn find_session(&self, project: &Path, id: &str) -> Option<SessionRecord> {
        let sessions = self.sessions_for_project(project);

        if let Some(exact) = sessions.iter().find(|s| s.id == id) {
            return Some(exact.clone());
        }
        if id.is_empty() {
            return None;
        }

        let mut prefixed = sessions.into_iter().filter(|s| s.id.starts_with(id));
        let first = prefixed.next()?;
        if prefixed.next().is_some() {
            tracing::debug!(prefix = id, "Session id prefix is ambiguous");
            return None;
        }
        Some(first)
    }

    /// Ordered messages of a listed session.
    pub fn transcript(&self, session: &SessionRecord) -> Vec<Message> {
        self.builder.build_transcript(&session.file_path)
    }

    /// Every session of `project` with its transcript.
    pub fn export_project(&self, project: &Path) -> ProjectExport {
        let directory = self.resolve(project);

        let sessions = directory
            .as_ref()
            .map(|dir| self.builder.list_sessions(&dir.path))
            .unwrap_or_default()
            .into_iter()
            .map(|session| {
                let messages = self.transcript(&session);
                SessionExport {
                    id: session.id,
                    last_time: session.last_time.to_string(),
                    message_count: messages.len(),
                    file_size: format_file_size(session.file_size_bytes),
                    messages,
                }
            })
            .collect::<Vec<_>>();

        tracing::info!(
            project = %project.display(),
            sessions = sessions.len(),
            "Exported project"
        );

        ProjectExport {
            project: project.display().to_string(),
            directory: directory.map(|dir| dir.name),
            sessions,
        }
    }
}
