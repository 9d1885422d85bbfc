//! logbook - read AI coding assistant session logs
//!
//! Finds the session log directory of a project and prints its sessions
//! and reconstructed transcripts as text or JSON.

mod render;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use logbook_core::{Config, SessionStore};
use serde::Serialize;

use crate::render::{render_sessions, render_transcript, TextRenderOptions};

#[derive(Parser)]
#[command(name = "logbook")]
#[command(about = "Browse AI coding assistant session logs by project")]
#[command(version)]
struct Args {
    /// Session log root (default: config value or ~/.claude/projects)
    #[arg(long, global = true)]
    projects_dir: Option<PathBuf>,

    /// Echo warnings to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the log directory matched to a project path
    Resolve {
        /// Project path (relative paths are taken from the current directory)
        project: PathBuf,
    },

    /// List the sessions of a project, most recent first
    Sessions {
        project: PathBuf,

        /// Output format: text (default) or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Print the transcript of one session of a project
    Show {
        project: PathBuf,

        /// Session ID (unique prefix supported)
        session: String,

        /// Output format: text (default) or json
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Maximum characters shown per tool result in text output
        #[arg(long, default_value_t = render::DEFAULT_MAX_RESULT_CHARS)]
        max_result_chars: usize,
    },

    /// Print the transcript of a session file
    ShowFile {
        file: PathBuf,

        /// Output format: text (default) or json
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Maximum characters shown per tool result in text output
        #[arg(long, default_value_t = render::DEFAULT_MAX_RESULT_CHARS)]
        max_result_chars: usize,
    },

    /// Print every session of a project with its transcript as JSON
    Export { project: PathBuf },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    fn parse(raw: &str) -> Result<Self> {
        match raw {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => anyhow::bail!("unknown format '{}': expected text or json", other),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let mut config = Config::load().context("failed to load configuration")?;
    if let Some(dir) = args.projects_dir {
        config.sources.claude_projects_path = Some(dir);
    }
    if args.verbose {
        config.logging.stderr = true;
    }

    // Initialize logging
    let _log_guard =
        logbook_core::logging::init(&config.logging).context("failed to initialize logging")?;

    let store = SessionStore::from_config(&config).context("invalid configuration")?;
    tracing::info!(root = %store.root().display(), "logbook starting");

    match args.command {
        Command::Resolve { project } => {
            let project = absolute(&project)?;
            match store.resolve(&project) {
                Some(dir) => println!("{}", dir.name),
                None => println!("No session directory found for {}", project.display()),
            }
        }
        Command::Sessions { project, format } => {
            let format = OutputFormat::parse(&format)?;
            let project = absolute(&project)?;
            let sessions = store.sessions_for_project(&project);

            match format {
                OutputFormat::Json => print_json(&sessions)?,
                OutputFormat::Text if sessions.is_empty() => {
                    println!("No sessions found for {}", project.display());
                }
                OutputFormat::Text => print!("{}", render_sessions(&sessions)),
            }
        }
        Command::Show {
            project,
            session,
            format,
            max_result_chars,
        } => {
            let format = OutputFormat::parse(&format)?;
            let project = absolute(&project)?;
            let record = store
                .find_session(&project, &session)
                .with_context(|| format!("No session found matching '{}'", session))?;
            let messages = store
                .builder()
                .try_build_transcript(&record.file_path)
                .with_context(|| format!("failed to read {}", record.file_path.display()))?;

            print_transcript(&messages, format, max_result_chars)?;
        }
        Command::ShowFile {
            file,
            format,
            max_result_chars,
        } => {
            let format = OutputFormat::parse(&format)?;
            let messages = store
                .builder()
                .try_build_transcript(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;

            print_transcript(&messages, format, max_result_chars)?;
        }
        Command::Export { project } => {
            let project = absolute(&project)?;
            print_json(&store.export_project(&project))?;
        }
    }

    Ok(())
}

fn print_transcript(
    messages: &[logbook_core::Message],
    format: OutputFormat,
    max_result_chars: usize,
) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&messages),
        OutputFormat::Text => {
            let options = TextRenderOptions { max_result_chars };
            print!("{}", render_transcript(messages, options));
            Ok(())
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{json}");
    Ok(())
}

/// Anchor a relative project path at the current directory.
fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    Ok(cwd.join(path))
}
