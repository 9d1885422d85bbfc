//! # logbook-core
//!
//! Core library for logbook - a reader for AI coding assistant session logs.
//!
//! This library provides:
//! - Project path → log directory resolution ([`PathResolver`])
//! - Session listing and transcript reconstruction ([`TranscriptBuilder`])
//! - A project-level facade over both ([`SessionStore`])
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Architecture
//!
//! Everything is read-only and recomputed on demand:
//! - **Resolve:** fuzzy-match the project path against directory names
//!   under `~/.claude/projects`
//! - **List:** scan `*.jsonl` files for cheap listing metadata
//! - **Build:** decode, order and fold one file into [`Message`]s
//!
//! ## Example
//!
//! ```rust,no_run
//! use logbook_core::{Config, SessionStore};
//! use std::path::Path;
//!
//! let config = Config::load().expect("failed to load config");
//! let store = SessionStore::from_config(&config).expect("invalid config");
//!
//! if let Some(latest) = store.sessions_for_project(Path::new(".")).first() {
//!     for message in store.transcript(latest) {
//!         println!("[{}] {}", message.role, message.text);
//!     }
//! }
//! ```

// Re-export commonly used items at the crate root
pub use config::Config;
pub use error::{Error, Result};
pub use resolve::PathResolver;
pub use store::{ProjectExport, SessionExport, SessionStore};
pub use timestamp::{DisplayOffset, LocalTime};
pub use transcript::TranscriptBuilder;
pub use types::*;

// Public modules
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod resolve;
pub mod sessions;
pub mod store;
pub mod timestamp;
pub mod transcript;
pub mod types;
