//! View model types representing renderable UI state.
//!
//! View models are immutable snapshots computed from
//! [`PickerState`](crate::app::PickerState) and consumed by the renderer.
//! They carry display-ready data only: truncated labels, the visible window
//! of the layout list, and which buttons exist.

/// Complete UI view model for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UIViewModel {
    /// Set while content is loading. When present, nothing else is drawn.
    pub loading: Option<LoadingState>,

    /// Compact header, present only when the header is visible.
    pub header: Option<HeaderInfo>,

    /// Collapsible hero block.
    pub app_bar: AppBarInfo,

    /// Category filter chips.
    pub chips: Vec<ChipItem>,

    /// Visible window of the layout list.
    pub list_items: Vec<ListItem>,

    /// Preview panel, drawn instead of the list when open.
    pub preview: Option<PreviewInfo>,

    /// Buttons in display order.
    pub buttons: Vec<ButtonItem>,

    /// Footer information (keybindings, help text).
    pub footer: FooterInfo,
}

/// Loading screen message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingState {
    /// Primary message (e.g., "Loading layouts").
    pub message: String,

    /// Secondary text, such as the last load error.
    pub subtitle: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
}

/// Hero block shown above the chips.
///
/// `rows` shrinks as the list scrolls, down to zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppBarInfo {
    pub title: String,
    pub subtitle: String,
    pub rows: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChipItem {
    pub label: String,
    pub is_selected: bool,
    pub is_focused: bool,
}

/// One row of the layout list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListItem {
    /// Section title.
    Section { title: String, description: String },

    /// Layout entry.
    Layout {
        title: String,
        slug: String,
        /// Selected by a tap.
        is_selected: bool,
        /// Under the keyboard cursor.
        is_focused: bool,
        /// Thumbnail loaded, so the layout can be selected.
        is_ready: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewInfo {
    pub title: String,
    pub lines: Vec<String>,
}

/// A button in the bottom bar, with its key hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonItem {
    pub key: String,
    pub label: String,
    pub is_primary: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}
