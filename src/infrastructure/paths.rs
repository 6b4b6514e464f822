//! Path utilities for the Zellij plugin sandbox.
//!
//! Inside the sandbox `/data` is the plugin's private, persistent data folder
//! and `/host` is the cwd of the last focused terminal.

use std::path::{Path, PathBuf};

/// Name of the OTLP trace file written by the observability layer.
const TRACE_FILE_NAME: &str = "geolookup-otlp.json";

/// Returns the plugin data directory.
///
/// # Examples
///
/// ```
/// use geolookup::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/data"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/data")
}

/// Returns the trace export file inside `data_dir`.
#[must_use]
pub fn trace_file_in(data_dir: &Path) -> PathBuf {
    data_dir.join(TRACE_FILE_NAME)
}

/// Resolves a user supplied file path (e.g. `theme_file`) into the sandbox.
///
/// `~/` and relative paths resolve under `/host`; absolute paths are kept.
///
/// # Examples
///
/// ```
/// use geolookup::infrastructure::resolve_host_path;
///
/// assert_eq!(resolve_host_path("~/themes/dark.toml").to_str(), Some("/host/themes/dark.toml"));
/// assert_eq!(resolve_host_path("dark.toml").to_str(), Some("/host/dark.toml"));
/// assert_eq!(resolve_host_path("/data/dark.toml").to_str(), Some("/data/dark.toml"));
/// ```
#[must_use]
pub fn resolve_host_path(path: &str) -> PathBuf {
    let host = Path::new("/host");
    if let Some(rest) = path.strip_prefix("~/") {
        host.join(rest)
    } else if path == "~" {
        host.to_path_buf()
    } else if Path::new(path).is_absolute() {
        PathBuf::from(path)
    } else {
        host.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_file_lives_in_data_dir() {
        assert_eq!(
            trace_file_in(&get_data_dir()),
            PathBuf::from("/data/geolookup-otlp.json")
        );
    }

    #[test]
    fn bare_tilde_is_host_root() {
        assert_eq!(resolve_host_path("~"), PathBuf::from("/host"));
    }
}
