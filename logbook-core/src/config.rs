//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/logbook/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/logbook/` (~/.config/logbook/)
//! - State/Logs: `$XDG_STATE_HOME/logbook/` (~/.local/state/logbook/)

use crate::error::{Error, Result};
use crate::timestamp::{DisplayOffset, DEFAULT_UTC_OFFSET_HOURS};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Where session logs are read from
    #[serde(default)]
    pub sources: SourcesConfig,

    /// How timestamps are shown
    #[serde(default)]
    pub display: DisplayConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Override paths for session log roots
#[derive(Debug, Deserialize, Default)]
pub struct SourcesConfig {
    /// Override for `~/.claude/projects`
    pub claude_projects_path: Option<PathBuf>,
}

/// Timestamp display configuration
#[derive(Debug, Deserialize)]
pub struct DisplayConfig {
    /// Hours added to UTC log timestamps
    #[serde(default = "default_utc_offset_hours")]
    pub utc_offset_hours: i32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            utc_offset_hours: default_utc_offset_hours(),
        }
    }
}

impl DisplayConfig {
    /// Validated display offset
    pub fn offset(&self) -> Result<DisplayOffset> {
        DisplayOffset::from_hours(self.utc_offset_hours).ok_or_else(|| {
            Error::Config(format!(
                "display.utc_offset_hours must be between -23 and 23, got {}",
                self.utc_offset_hours
            ))
        })
    }
}

fn default_utc_offset_hours() -> i32 {
    DEFAULT_UTC_OFFSET_HOURS
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Also print warnings to stderr
    #[serde(default)]
    pub stderr: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            stderr: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        config.display.offset()?;
        Ok(config)
    }

    /// Session log root: the configured override or `~/.claude/projects`
    pub fn claude_projects_dir(&self) -> PathBuf {
        self.sources
            .claude_projects_path
            .clone()
            .unwrap_or_else(|| home_dir().join(".claude").join("projects"))
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/logbook/config.toml` (~/.config/logbook/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("logbook").join("config.toml")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/logbook/` (~/.local/state/logbook/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("logbook")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.sources.claude_projects_path.is_none());
        assert_eq!(config.display.utc_offset_hours, 8);
        assert_eq!(config.logging.level, "info");
        assert!(config
            .claude_projects_dir()
            .ends_with(Path::new(".claude").join("projects")));
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[sources]
claude_projects_path = "/data/claude/projects"

[display]
utc_offset_hours = -5

[logging]
level = "debug"
stderr = true
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(
            config.claude_projects_dir(),
            PathBuf::from("/data/claude/projects")
        );
        assert_eq!(config.display.offset().unwrap().hours(), -5);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.stderr);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str("[logging]\nlevel = \"warn\"\n").unwrap();
        assert_eq!(config.display.utc_offset_hours, 8);
        assert!(config.sources.claude_projects_path.is_none());
    }

    #[test]
    fn test_out_of_range_offset_is_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[display]\nutc_offset_hours = 30\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_unparseable_config_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[display\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_state_dir() {
        assert!(Config::state_dir().ends_with("logbook"));
    }
}
