//! Path handling for the Zellij sandbox.
//!
//! In the plugin sandbox the host filesystem is mounted under `/host`. This
//! module resolves the default data directory and turns user-supplied paths
//! from the plugin configuration into sandbox paths.

use std::path::PathBuf;

/// Returns the default data directory for picker storage and traces.
///
/// `/host` points to the cwd of the last focused terminal, or the folder
/// where Zellij was started. When that is the home directory this resolves
/// to `~/.local/share/zellij/layout-picker`.
///
/// # Examples
///
/// ```
/// use layout_picker::infrastructure::get_data_dir;
///
/// let data_dir = get_data_dir();
/// assert_eq!(data_dir.to_str(), Some("/host/.local/share/zellij/layout-picker"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("layout-picker")
}

/// Maps a configured path to its sandbox location.
///
/// `~` and `~/...` are rewritten under `/host`; other paths are kept.
///
/// # Examples
///
/// ```
/// use layout_picker::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/layouts/catalog.toml"), "/host/layouts/catalog.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/data/catalog.toml"), "/data/catalog.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}

/// Resolves an optional configured path, expanding `~`.
///
/// Blank values count as unset.
#[must_use]
pub fn configured_path(value: Option<&str>) -> Option<PathBuf> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| PathBuf::from(expand_tilde(v)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_configured_path_is_unset() {
        assert_eq!(configured_path(None), None);
        assert_eq!(configured_path(Some("  ")), None);
        assert_eq!(
            configured_path(Some("~/catalog.toml")),
            Some(PathBuf::from("/host/catalog.toml"))
        );
    }
}
