//! Layout Picker: a Zellij plugin for starting a new page from a layout.
//!
//! The picker offers a catalog of page layouts grouped into sections, with
//! category chips to narrow them down:
//! - Selection and visibility state engine with immutable snapshots
//! - Layouts are selectable once their thumbnail has loaded
//! - Collapsing app bar with a compact header driven by the scroll offset
//! - Page drafts persisted to JSON storage by a Zellij worker thread
//! - Catalog from a TOML file or the builtin starter catalog

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State engine
//! │  - Event handling                                   │
//! │  - Snapshots and one-shot notifications             │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Storage Layer │   │ Worker Layer  │
//! │ (ui/)         │   │ (storage/)    │   │ (worker/)     │
//! │ - Rendering   │   │ - JSON I/O    │   │ - Load content│
//! │ - Theming     │   │ - Catalog     │   │ - Thumbnails  │
//! │ - Components  │   │ - Collaborator│   │ - Page drafts │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Platform paths (infrastructure/)                 │
//! │  - Error types (domain/error)                       │
//! │  - Catalog, site and page models (domain/)          │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing                            │
//! │  - File-based OTLP export                           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/layout-picker.wasm" {
//!         site_name "Travel notes"
//!         site_url "https://travel.example"
//!         catalog_file "~/layouts/catalog.toml"
//!         header_threshold "2"
//!         landscape_ratio "3"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Plugin Load**: parse configuration, initialize tracing, create the
//!    `PickerState` with its theme, request permissions.
//! 2. **Permissions Granted**: send `Configure` to the worker, then ask for
//!    content with `LoadContent`.
//! 3. **Worker**: open JSON storage, register the configured site, load the
//!    selected site and the catalog, answer `ContentLoaded`.
//! 4. **Content**: the picker leaves the loading screen and requests one
//!    thumbnail per layout. Each loaded thumbnail makes its layout selectable.
//! 5. **Create Page**: the worker saves a page draft and the picker closes.
//!
//! # Example
//!
//! ```
//! use layout_picker::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (_, actions) = handle_event(&mut state, &Event::Init)?;
//! assert!(matches!(actions[0], Action::PostToWorker(_)));
//! # Ok::<(), layout_picker::PickerError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod storage;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, ButtonsUiState, ContentUiState, Event, PickerState, UiState};
pub use domain::{PickerError, Result};
pub use ui::Theme;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Default for [`Config::landscape_ratio`].
const DEFAULT_LANDSCAPE_RATIO: usize = 3;

/// Plugin configuration parsed from Zellij's configuration system.
///
/// Also sent to the worker, which uses the storage and catalog settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// TOML catalog file. The builtin starter catalog is used when unset.
    pub catalog_file: Option<String>,

    /// Directory for storage and trace files.
    ///
    /// Default: `/host/.local/share/zellij/layout-picker`.
    pub data_dir: Option<String>,

    /// Name of the site pages are created for. When set, the worker stores
    /// and selects it on startup.
    pub site_name: Option<String>,

    /// URL of the configured site.
    pub site_url: Option<String>,

    /// App bar offset below which the compact header is shown. Default: 2
    pub header_threshold: i32,

    /// A pane is landscape when `cols >= rows * landscape_ratio`. Default: 3
    pub landscape_ratio: usize,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. See [`ui::theme`] for format.
    pub theme_file: Option<String>,

    /// Tracing level. Options: `trace`, `debug`, `info`, `warn`, `error`.
    /// Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_file: None,
            data_dir: None,
            site_name: None,
            site_url: None,
            header_threshold: app::state::DEFAULT_HEADER_THRESHOLD,
            landscape_ratio: DEFAULT_LANDSCAPE_RATIO,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Numeric values fall back to their defaults when they do not parse.
    ///
    /// # Example
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use layout_picker::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("header_threshold".to_string(), "5".to_string());
    /// map.insert("landscape_ratio".to_string(), "wide".to_string());
    /// map.insert("site_name".to_string(), "Travel notes".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.header_threshold, 5);
    /// assert_eq!(config.landscape_ratio, 3);
    /// assert_eq!(config.site_name.as_deref(), Some("Travel notes"));
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let header_threshold = config
            .get("header_threshold")
            .and_then(|s| s.trim().parse::<i32>().ok())
            .unwrap_or(defaults.header_threshold);

        let landscape_ratio = config
            .get("landscape_ratio")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|ratio| *ratio > 0)
            .unwrap_or(defaults.landscape_ratio);

        Self {
            catalog_file: config.get("catalog_file").cloned(),
            data_dir: config.get("data_dir").cloned(),
            site_name: config.get("site_name").cloned(),
            site_url: config.get("site_url").cloned(),
            header_threshold,
            landscape_ratio,
            theme_name: config.get("theme").cloned(),
            theme_file: config.get("theme_file").cloned(),
            trace_level: config.get("trace_level").cloned(),
        }
    }

    /// Resolved data directory.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        infrastructure::configured_path(self.data_dir.as_deref())
            .unwrap_or_else(infrastructure::get_data_dir)
    }

    /// Resolved catalog file, if one is configured.
    #[must_use]
    pub fn catalog_path(&self) -> Option<PathBuf> {
        infrastructure::configured_path(self.catalog_file.as_deref())
    }

    /// Whether a pane of the given size counts as landscape.
    #[must_use]
    pub const fn is_landscape(&self, rows: usize, cols: usize) -> bool {
        cols >= rows.saturating_mul(self.landscape_ratio)
    }
}

/// Creates the picker state for a configuration.
///
/// Loads the theme (from `theme_file`, then `theme`, then the default) and
/// applies the header threshold. The picker starts in the loading state.
pub fn initialize(config: &Config) -> PickerState {
    tracing::debug!("initializing layout picker");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                Theme::from_name(theme_name).unwrap_or_else(|| {
                    tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
                    Theme::default()
                })
            })
        },
        |theme_file| {
            let path = infrastructure::expand_tilde(theme_file);
            Theme::from_file(&path).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %path, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    );

    PickerState::new(theme, config.header_threshold)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landscape_uses_ratio() {
        let config = Config::default();
        assert!(config.is_landscape(20, 60));
        assert!(!config.is_landscape(20, 59));
    }

    #[test]
    fn blank_paths_fall_back_to_defaults() {
        let mut map = BTreeMap::new();
        map.insert("data_dir".to_string(), " ".to_string());
        let config = Config::from_zellij(&map);

        assert_eq!(config.data_dir(), infrastructure::get_data_dir());
        assert_eq!(config.catalog_path(), None);
    }

    #[test]
    fn unknown_theme_falls_back_to_default() {
        let config = Config {
            theme_name: Some("no-such-theme".to_string()),
            header_threshold: 7,
            ..Config::default()
        };
        let state = initialize(&config);

        assert_eq!(state.theme.name, Theme::default().name);
        assert_eq!(state.header_threshold, 7);
    }
}
