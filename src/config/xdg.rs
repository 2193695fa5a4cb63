//! Platform-aware path resolution for school-console-dashboard.
//!
//! On **Linux**, follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/school-console-dashboard` or `~/.config/school-console-dashboard`
//! - Data: `$XDG_DATA_HOME/school-console-dashboard` or `~/.local/share/school-console-dashboard`
//!
//! On **macOS**, uses Apple conventions with XDG env var overrides:
//! - Config and data: `~/Library/Application Support/school-console-dashboard`

use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "school-console-dashboard";

/// File name of the key-value storage file inside [`data_dir`].
pub const STORAGE_FILE_NAME: &str = "storage.json";

/// Returns the configuration directory.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/school-console-dashboard` (if env var set, any platform)
/// 2. Platform default:
///    - Linux: `~/.config/school-console-dashboard`
///    - macOS: `~/Library/Application Support/school-console-dashboard`
pub fn config_dir() -> PathBuf {
    if let Some(xdg) = non_empty_env("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join(APP_NAME);
    }
    platform_config_dir().join(APP_NAME)
}

/// Platform-native config base directory (without XDG override).
fn platform_config_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        dirs::config_dir().unwrap_or_else(|| home().join("Library/Application Support"))
    }
    #[cfg(not(target_os = "macos"))]
    {
        home().join(".config")
    }
}

/// Returns the path to the main configuration file.
///
/// Resolves to `config_dir()/config.toml`.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Returns the data directory for persisted dashboard state.
///
/// Resolution order:
/// 1. `$XDG_DATA_HOME/school-console-dashboard` (if env var set, any platform)
/// 2. Platform default:
///    - Linux: `~/.local/share/school-console-dashboard`
///    - macOS: `~/Library/Application Support/school-console-dashboard`
pub fn data_dir() -> PathBuf {
    if let Some(xdg) = non_empty_env("XDG_DATA_HOME") {
        return PathBuf::from(xdg).join(APP_NAME);
    }
    platform_data_dir().join(APP_NAME)
}

fn platform_data_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        dirs::data_dir().unwrap_or_else(|| home().join("Library/Application Support"))
    }
    #[cfg(not(target_os = "macos"))]
    {
        home().join(".local/share")
    }
}

/// Returns the default key-value storage file, `data_dir()/storage.json`.
pub fn storage_path() -> PathBuf {
    data_dir().join(STORAGE_FILE_NAME)
}

/// Home directory, or the current directory when it cannot be determined.
fn home() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Expands a leading `~` in a path string to the user's home directory.
///
/// If the path does not start with `~`, it is returned as-is.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        home().join(rest)
    } else if path == "~" {
        home()
    } else {
        PathBuf::from(path)
    }
}

/// Creates a directory and all parent directories with mode 0700.
///
/// Equivalent to `mkdir -p` with restricted permissions.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    fs::create_dir_all(path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o700))?;
    }
    Ok(())
}

/// Creates the configuration directory if it does not exist, returning its path.
pub fn ensure_config_dir() -> std::io::Result<PathBuf> {
    let dir = config_dir();
    ensure_dir(&dir)?;
    Ok(dir)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serial_test::serial;

    /// Runs a closure with env vars temporarily set, then restores them.
    pub(crate) fn with_env<F: FnOnce()>(vars: &[(&str, Option<&str>)], f: F) {
        let originals: Vec<_> = vars
            .iter()
            .map(|(k, _)| (*k, std::env::var(k).ok()))
            .collect();

        for (k, v) in vars {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        f();

        for (k, original) in &originals {
            match original {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }
    }

    #[test]
    #[serial]
    fn config_path_with_xdg_override() {
        with_env(&[("XDG_CONFIG_HOME", Some("/custom/config"))], || {
            assert_eq!(
                config_path(),
                PathBuf::from("/custom/config/school-console-dashboard/config.toml")
            );
        });
    }

    #[test]
    #[serial]
    fn config_path_without_xdg_uses_platform_default() {
        with_env(&[("XDG_CONFIG_HOME", None)], || {
            let expected = platform_config_dir().join("school-console-dashboard/config.toml");
            assert_eq!(config_path(), expected);
        });
    }

    #[test]
    #[serial]
    fn empty_xdg_config_home_is_ignored() {
        with_env(&[("XDG_CONFIG_HOME", Some(""))], || {
            assert_eq!(config_dir(), platform_config_dir().join(APP_NAME));
        });
    }

    #[cfg(not(target_os = "macos"))]
    #[test]
    #[serial]
    fn linux_data_default_is_local_share() {
        with_env(&[("XDG_DATA_HOME", None)], || {
            let home = dirs::home_dir().expect("could not determine home directory");
            assert_eq!(data_dir(), home.join(".local/share/school-console-dashboard"));
        });
    }

    #[test]
    #[serial]
    fn storage_path_with_xdg_data_override() {
        with_env(&[("XDG_DATA_HOME", Some("/custom/data"))], || {
            assert_eq!(
                storage_path(),
                PathBuf::from("/custom/data/school-console-dashboard/storage.json")
            );
        });
    }

    #[test]
    fn expand_tilde_with_home_prefix() {
        let home = dirs::home_dir().expect("could not determine home directory");
        assert_eq!(expand_tilde("~/foo"), home.join("foo"));
    }

    #[test]
    fn expand_tilde_leaves_other_paths() {
        assert_eq!(expand_tilde("/absolute/path"), PathBuf::from("/absolute/path"));
        assert_eq!(expand_tilde("relative/path"), PathBuf::from("relative/path"));
    }

    #[test]
    fn ensure_dir_creates_directory_with_0700() {
        let tmp = tempfile::tempdir().expect("failed to create temp dir");
        let nested = tmp.path().join("a/b/c");
        ensure_dir(&nested).expect("ensure_dir failed");
        assert!(nested.is_dir());
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&nested)
                .expect("failed to read metadata")
                .permissions()
                .mode();
            assert_eq!(mode & 0o777, 0o700);
        }
    }

    #[test]
    #[serial]
    fn ensure_config_dir_creates_at_xdg_path() {
        let tmp = tempfile::tempdir().expect("failed to create temp dir");
        with_env(
            &[(
                "XDG_CONFIG_HOME",
                Some(tmp.path().to_str().expect("non-utf8 tmpdir")),
            )],
            || {
                let result = ensure_config_dir().expect("ensure_config_dir failed");
                assert_eq!(result, tmp.path().join("school-console-dashboard"));
                assert!(result.is_dir());
            },
        );
    }
}
