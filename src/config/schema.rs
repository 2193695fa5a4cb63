//! TOML configuration schema types for the School Console Dashboard.
//!
//! All structs derive `Deserialize` and `Serialize` with defaults via
//! `#[serde(default)]`, so a partial (or empty) file is always valid TOML
//! for this schema.
//!
//! Duration fields use human-readable strings (e.g. `"500ms"`, `"1s"`) and
//! are parsed with the `humantime` crate through the accessor methods, which
//! report bad values as [`ConfigError::InvalidValue`].

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::config::xdg;

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root configuration encompassing all sections.
///
/// ```toml
/// [tui]
/// [layout]
/// [log]
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Terminal UI behavior.
    pub tui: TuiConfig,
    /// Widget layout persistence.
    pub layout: LayoutConfig,
    /// Log output.
    pub log: LogConfig,
}

impl Config {
    /// Checks every value that needs more than TOML typing to be usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tui.tick_rate()?;
        self.layout.persist_debounce()?;
        if self.tui.row_height == 0 {
            return Err(ConfigError::InvalidValue {
                field: "tui.row_height",
                value: "0".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// TUI
// ---------------------------------------------------------------------------

/// `[tui]` section.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TuiConfig {
    /// Render tick rate as a human-readable duration (e.g. `"250ms"`).
    pub tick_rate: String,
    /// Cells the pointer must travel before a press turns into a drag.
    pub drag_threshold: u16,
    /// Rows below the viewport at which widgets start mounting.
    pub visibility_margin: u16,
    /// Terminal rows per grid row unit.
    pub row_height: u16,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate: "250ms".to_string(),
            drag_threshold: 2,
            visibility_margin: 4,
            row_height: 8,
        }
    }
}

impl TuiConfig {
    /// Parsed [`TuiConfig::tick_rate`]. Zero is rejected.
    pub fn tick_rate(&self) -> Result<Duration, ConfigError> {
        let rate = parse_duration("tui.tick_rate", &self.tick_rate)?;
        if rate.is_zero() {
            return Err(ConfigError::InvalidValue {
                field: "tui.tick_rate",
                value: self.tick_rate.clone(),
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(rate)
    }
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// `[layout]` section.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
    /// Window for coalescing layout writes (e.g. `"500ms"`).
    pub persist_debounce: String,
    /// Storage file path. Empty string means the XDG data directory.
    pub storage_file: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            persist_debounce: "500ms".to_string(),
            storage_file: String::new(),
        }
    }
}

impl LayoutConfig {
    /// Parsed [`LayoutConfig::persist_debounce`]. Zero is allowed.
    pub fn persist_debounce(&self) -> Result<Duration, ConfigError> {
        parse_duration("layout.persist_debounce", &self.persist_debounce)
    }

    /// Resolved storage file path, with `~` expanded.
    pub fn storage_path(&self) -> PathBuf {
        if self.storage_file.trim().is_empty() {
            xdg::storage_path()
        } else {
            xdg::expand_tilde(self.storage_file.trim())
        }
    }
}

// ---------------------------------------------------------------------------
// Log
// ---------------------------------------------------------------------------

/// `[log]` section.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// Verbosity when `SCD_LOG` is unset.
    pub level: LogLevel,
    /// Path to log file. Empty string means stderr, or `scd.log` in the data
    /// directory for the TUI.
    pub file: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Warn,
            file: String::new(),
        }
    }
}

impl LogConfig {
    /// Resolved log file path, or `None` for stderr.
    pub fn file_path(&self) -> Option<PathBuf> {
        let trimmed = self.file.trim();
        (!trimmed.is_empty()).then(|| xdg::expand_tilde(trimmed))
    }
}

/// Log verbosity levels (kebab-case in TOML).
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LogLevel {
    /// Only errors.
    Error,
    /// Errors and warnings (default).
    Warn,
    /// Informational messages.
    Info,
    /// Debug-level detail.
    Debug,
    /// Full trace output.
    Trace,
}

impl LogLevel {
    /// Filter directive understood by `tracing_subscriber::EnvFilter`.
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

fn parse_duration(field: &'static str, value: &str) -> Result<Duration, ConfigError> {
    humantime::parse_duration(value.trim()).map_err(|e| ConfigError::InvalidValue {
        field,
        value: value.to_string(),
        message: e.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
