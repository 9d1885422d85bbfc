//! Logging infrastructure for logbook
//!
//! Logs go to `~/.local/state/logbook/logbook.log` (XDG state dir) so that
//! stdout only carries listings and transcripts. With `logging.stderr`
//! enabled, warnings such as unreadable session files are echoed to stderr.

use crate::config::{Config, LoggingConfig};
use std::path::Path;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

/// File name prefix of the rolling log.
pub const LOG_FILE_NAME: &str = "logbook.log";

/// Initialize the logging system in the XDG state directory.
///
/// Level comes from `RUST_LOG` when set, otherwise from the config.
pub fn init(config: &LoggingConfig) -> crate::error::Result<LoggingGuard> {
    init_in(&Config::state_dir(), config)
}

/// Initialize logging with the rolling file placed in `log_dir`.
///
/// Only the first call in a process installs a subscriber; later calls
/// still create the file and return a guard.
pub fn init_in(log_dir: &Path, config: &LoggingConfig) -> crate::error::Result<LoggingGuard> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    let stderr_layer = config.stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
            .with_filter(LevelFilter::WARN)
    });

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .is_ok();

    if installed {
        tracing::info!(
            log_dir = %log_dir.display(),
            level = %config.level,
            stderr = config.stderr,
            "Logging initialized"
        );
    }

    Ok(LoggingGuard { _guard: guard })
}

/// Keeps the background log writer alive; pending lines are flushed on drop.
pub struct LoggingGuard {
    _guard: WorkerGuard,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_in_creates_rolling_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let log_dir = dir.path().join("state").join("logbook");

        let guard = init_in(&log_dir, &LoggingConfig::default()).unwrap();
        drop(guard);

        let names: Vec<String> = std::fs::read_dir(&log_dir)
            .unwrap()
            .flatten()
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        assert!(names.iter().any(|n| n.starts_with(LOG_FILE_NAME)));
    }
}
