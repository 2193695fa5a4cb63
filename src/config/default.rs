//! Default configuration template and file creation utilities.
//!
//! Provides a commented TOML template that matches `Config::default()` and
//! functions to write it to the XDG config path.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::error::ConfigError;
use crate::config::xdg;

// ---------------------------------------------------------------------------
// Default TOML template
// ---------------------------------------------------------------------------

/// A commented TOML template with all default values.
///
/// Every value here must match `Config::default()` from `schema.rs`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# School Console Dashboard Configuration
#
# All values shown below are the built-in defaults.
# Location: $XDG_CONFIG_HOME/school-console-dashboard/config.toml

# ==============================================================================
# Terminal UI
# ==============================================================================

[tui]

# How often the dashboard redraws when idle.
# Examples: "100ms", "250ms", "1s"
tick_rate = "250ms"

# Cells the mouse must move with the button held before a drag starts.
# A press that stays within this distance is treated as a click.
drag_threshold = 2

# Rows below the visible area at which widgets begin loading, so content is
# ready slightly before it scrolls into view.
visibility_margin = 4

# Terminal rows per grid row. A widget with rowSpan = 2 is twice this tall.
row_height = 8

# ==============================================================================
# Widget layout
# ==============================================================================

[layout]

# Layout changes are written after this quiet period. Rapid reorders within
# the window produce a single write.
# Examples: "250ms", "500ms", "2s"
persist_debounce = "500ms"

# File holding the saved layout. Empty means
# $XDG_DATA_HOME/school-console-dashboard/storage.json.
# Tilde (~) is expanded to the home directory.
storage_file = ""

# ==============================================================================
# Logging
# ==============================================================================

[log]

# Verbosity when the SCD_LOG environment variable is not set.
# Options: "error", "warn", "info", "debug", "trace"
level = "warn"

# Log file path. Empty means stderr for one-shot commands and scd.log in
# the data directory for the TUI, which owns the terminal.
file = ""
"#;

// ---------------------------------------------------------------------------
// File creation functions
// ---------------------------------------------------------------------------

/// Creates (or force-overwrites) the default config file.
///
/// - If the file exists and `force` is `false`, returns `ConfigError::AlreadyExists`.
/// - If the file exists and `force` is `true`, backs it up to `.toml.backup` first.
/// - Returns the path where the config was written.
pub fn create_default_config(force: bool) -> Result<PathBuf, ConfigError> {
    let path = xdg::config_path();

    if path.exists() {
        if !force {
            return Err(ConfigError::AlreadyExists { path });
        }
        let backup_path = path.with_extension("toml.backup");
        fs::rename(&path, &backup_path).map_err(|e| ConfigError::WriteError {
            path: backup_path.clone(),
            source: e,
        })?;
        tracing::info!("Backed up existing config to {}", backup_path.display());
    }

    write_default_config(&path)?;
    tracing::info!("Created default configuration at {}", path.display());
    Ok(path)
}

/// Writes the default template to `path`, creating parent dirs and setting 0600 permissions.
fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let write_err = |source: std::io::Error| ConfigError::WriteError {
        path: path.to_path_buf(),
        source,
    };

    xdg::ensure_config_dir().map_err(write_err)?;
    fs::write(path, DEFAULT_CONFIG_TEMPLATE).map_err(write_err)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(write_err)?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
