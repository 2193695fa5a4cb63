//! Logging initialization.
//!
//! Configures the `tracing` subscriber with level filtering via the `SCD_LOG`
//! environment variable. Falls back to `[log].level` from the config file when
//! the variable is unset or does not parse.
//!
//! ```bash
//! # Module-specific filtering
//! SCD_LOG=school_console::layout=debug,warn scd tui
//! ```
//!
//! The TUI owns the terminal, so it never logs to stderr: without `[log].file`
//! its output goes to `scd.log` in the data directory.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::schema::{LogConfig, LogLevel};
use crate::config::xdg;

/// Environment variable holding filter directives.
pub const LOG_ENV_VAR: &str = "SCD_LOG";

/// Default log file name used while the TUI runs.
pub const TUI_LOG_FILE: &str = "scd.log";

/// Destination for log lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSink {
    /// Append to a file.
    File(PathBuf),
    /// Write to stderr.
    Stderr,
}

/// Picks the sink for a command. `owns_terminal` is set for the TUI, which
/// must never share the screen with log output.
pub fn resolve_sink(config: &LogConfig, owns_terminal: bool) -> LogSink {
    match config.file_path() {
        Some(path) => LogSink::File(path),
        None if owns_terminal => LogSink::File(xdg::data_dir().join(TUI_LOG_FILE)),
        None => LogSink::Stderr,
    }
}

/// Installs the global subscriber writing to the sink from [`resolve_sink`].
///
/// A second call is a no-op. Fails only when the log file cannot be opened,
/// in which case nothing is installed.
pub fn init(config: &LogConfig, owns_terminal: bool) -> std::io::Result<()> {
    let env = std::env::var(LOG_ENV_VAR).ok();
    let filter = build_filter(env.as_deref(), config.level);

    let result = match resolve_sink(config, owns_terminal) {
        LogSink::File(path) => {
            let file = open_log_file(&path)?;
            fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        LogSink::Stderr => fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init(),
    };
    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
    Ok(())
}

/// Filter from `SCD_LOG` directives, or `fallback` when they are absent or invalid.
pub fn build_filter(env_value: Option<&str>, fallback: LogLevel) -> EnvFilter {
    env_value
        .filter(|v| !v.trim().is_empty())
        .and_then(|v| EnvFilter::try_new(v).ok())
        .unwrap_or_else(|| EnvFilter::new(fallback.as_directive()))
}

fn open_log_file(path: &Path) -> std::io::Result<std::fs::File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            xdg::ensure_dir(parent)?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path)
}
