//! Theme management and ANSI escape sequence generation.
//!
//! Built-in themes are Catppuccin variants embedded from `themes/*.toml`;
//! custom themes are read from a TOML file with the same shape.
//!
//! # Built-in Themes
//!
//! - `catppuccin-mocha`: dark (default)
//! - `catppuccin-latte`: light
//! - `catppuccin-frappe`: cool dark
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#1e1e2e"
//! header_bg = "#cba6f7"          # optional
//! app_bar_title_fg = "#cdd6f4"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! chip_fg = "#bac2de"
//! chip_selected_fg = "#1e1e2e"
//! chip_selected_bg = "#89b4fa"
//! focus_fg = "#1e1e2e"
//! focus_bg = "#f5c2e7"
//! section_fg = "#fab387"
//! selected_marker_fg = "#a6e3a1"
//! unready_fg = "#585b70"
//! button_fg = "#cdd6f4"
//! button_primary_fg = "#1e1e2e"
//! button_primary_bg = "#a6e3a1"
//! loading_fg = "#89b4fa"
//! ```
//!
//! # Example
//!
//! ```
//! use layout_picker::ui::theme::Theme;
//!
//! let theme = Theme::from_name("catppuccin-latte").unwrap();
//! print!("{}Choose a layout{}", Theme::fg(&theme.colors.app_bar_title_fg), Theme::reset());
//! ```

use crate::domain::{PickerError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const DEFAULT_THEME: &str = "catppuccin-mocha";

/// Color scheme for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex colors (`"#rrggbb"`) for every picker element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Compact header text.
    pub header_fg: String,
    /// Compact header background, if any.
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Hero title in the collapsible app bar.
    pub app_bar_title_fg: String,

    pub text_normal: String,
    /// Secondary text: subtitles, descriptions, footer.
    pub text_dim: String,

    /// Separator lines and the preview frame.
    pub border: String,

    pub chip_fg: String,
    pub chip_selected_fg: String,
    pub chip_selected_bg: String,

    /// Row or chip under the keyboard cursor.
    pub focus_fg: String,
    pub focus_bg: String,

    /// Layout section titles.
    pub section_fg: String,

    /// Check mark on the selected layout.
    pub selected_marker_fg: String,

    /// Layouts whose thumbnail has not loaded yet.
    pub unready_fg: String,

    pub button_fg: String,
    pub button_primary_fg: String,
    pub button_primary_bg: String,

    pub loading_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name. Returns `None` for unknown names.
    ///
    /// ```
    /// use layout_picker::ui::theme::Theme;
    ///
    /// assert_eq!(Theme::from_name("catppuccin-frappe").unwrap().name, "catppuccin-frappe");
    /// assert!(Theme::from_name("solarized").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            "catppuccin-frappe" => include_str!("../../themes/catppuccin-frappe.toml"),
            _ => return None,
        };

        toml::from_str(toml_str)
            .map_err(|e| tracing::debug!(theme = name, error = %e, "built-in theme failed to parse"))
            .ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::Theme`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| PickerError::Theme(format!("failed to read {}: {e}", path.display())))?;

        toml::from_str(&contents)
            .map_err(|e| PickerError::Theme(format!("failed to parse {}: {e}", path.display())))
    }

    /// Parses `#rrggbb` (the `#` is optional). Malformed input yields white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).unwrap_or(255);
        (channel(0..2), channel(2..4), channel(4..6))
    }

    /// 24-bit foreground escape for a hex color.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background escape for a hex color.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Clears all styling.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }

    /// Mocha palette, used if the embedded default ever fails to parse.
    fn fallback() -> Self {
        let c = |hex: &str| hex.to_string();
        Self {
            name: DEFAULT_THEME.to_string(),
            colors: ThemeColors {
                header_fg: c("#1e1e2e"),
                header_bg: Some(c("#cba6f7")),
                app_bar_title_fg: c("#cdd6f4"),
                text_normal: c("#cdd6f4"),
                text_dim: c("#6c7086"),
                border: c("#45475a"),
                chip_fg: c("#bac2de"),
                chip_selected_fg: c("#1e1e2e"),
                chip_selected_bg: c("#89b4fa"),
                focus_fg: c("#1e1e2e"),
                focus_bg: c("#f5c2e7"),
                section_fg: c("#fab387"),
                selected_marker_fg: c("#a6e3a1"),
                unready_fg: c("#585b70"),
                button_fg: c("#cdd6f4"),
                button_primary_fg: c("#1e1e2e"),
                button_primary_bg: c("#a6e3a1"),
                loading_fg: c("#89b4fa"),
            },
        }
    }
}

impl Default for Theme {
    /// Catppuccin Mocha.
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).unwrap_or_else(Self::fallback)
    }
}
