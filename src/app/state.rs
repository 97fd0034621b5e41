//! Selection and visibility state engine.
//!
//! This module defines [`PickerState`], the single source of truth for the
//! layout picker. It receives discrete user events (scroll offset changed,
//! layout tapped, thumbnail ready, category tapped, shown, dismissed) and
//! derives an immutable [`UiState`] snapshot for the renderer.
//!
//! # Outputs
//!
//! - `ui_state`: the latest [`UiState`], published through a [`LiveState`].
//! - `picker_showing`: one-shot `bool`, `true` on show and `false` on dismiss.
//! - `create_page_requested`: one-shot unit, queued by [`PickerState::create_page`].
//!
//! # Invariants
//!
//! - `selected_layout_slug` is `Some(slug)` only if `slug` is thumbnail-ready.
//! - Button visibility is a pure function of `selected_layout_slug`
//!   (see [`ButtonsUiState::for_selection`]).
//! - `is_header_visible` is seeded by [`PickerState::start`] and afterwards
//!   re-derived only from scroll offsets.
//! - [`PickerState::dismiss`] clears both selections.
//!
//! # Example
//!
//! ```
//! use layout_picker::app::state::{PickerState, UiState};
//! use layout_picker::domain::{Catalog, Site};
//! use layout_picker::storage::LoadedContent;
//!
//! let mut state = PickerState::default();
//! assert!(matches!(state.ui_state(), UiState::Loading));
//!
//! state.apply_content(LoadedContent {
//!     site: Site::new(1, "My site", "https://example.com"),
//!     catalog: Catalog::default(),
//! });
//! assert!(state.content().is_some());
//! ```

use super::navigation::Navigation;
use super::signals::{LiveState, OneShot, Subscription};
use crate::domain::{Category, Layout, LayoutCategory, Site};
use crate::storage::{ContentLoader, LoadedContent};
use crate::ui::theme::Theme;
use std::collections::{BTreeSet, HashMap, HashSet};

/// Height of the collapsible app bar in rows when fully expanded.
pub const APP_BAR_HEIGHT: usize = 3;

/// Rows that are always taken by non-list chrome: compact header, chips,
/// two separators, the button bar and the footer.
pub const CHROME_ROWS: usize = 6;

/// Default offset below which the compact header is shown.
pub const DEFAULT_HEADER_THRESHOLD: i32 = 2;

/// Visibility of the three picker buttons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonsUiState {
    pub create_blank_page_visible: bool,
    pub create_page_visible: bool,
    pub preview_visible: bool,
}

impl ButtonsUiState {
    /// Derives button visibility from whether a layout is selected.
    ///
    /// ```
    /// use layout_picker::app::state::ButtonsUiState;
    ///
    /// let none = ButtonsUiState::for_selection(false);
    /// assert!(none.create_blank_page_visible);
    /// assert!(!none.create_page_visible && !none.preview_visible);
    ///
    /// let some = ButtonsUiState::for_selection(true);
    /// assert!(!some.create_blank_page_visible);
    /// assert!(some.create_page_visible && some.preview_visible);
    /// ```
    #[must_use]
    pub const fn for_selection(has_selection: bool) -> Self {
        Self {
            create_blank_page_visible: !has_selection,
            create_page_visible: has_selection,
            preview_visible: has_selection,
        }
    }
}

/// Snapshot of the picker once content is loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentUiState {
    /// Whether the compact header above the app bar is shown.
    pub is_header_visible: bool,

    /// Filter chips, in catalog order.
    pub categories: Vec<Category>,

    /// Layout sections, in catalog order.
    pub layout_categories: Vec<LayoutCategory>,

    /// The selected layout. Only ever a thumbnail-ready slug.
    pub selected_layout_slug: Option<String>,

    /// Slugs of the chips currently toggled on.
    pub selected_categories_slugs: BTreeSet<String>,

    /// Derived from `selected_layout_slug`, recomputed on every change.
    pub buttons_ui_state: ButtonsUiState,
}

impl ContentUiState {
    fn new(categories: Vec<Category>, layout_categories: Vec<LayoutCategory>, is_header_visible: bool) -> Self {
        Self {
            is_header_visible,
            categories,
            layout_categories,
            selected_layout_slug: None,
            selected_categories_slugs: BTreeSet::new(),
            buttons_ui_state: ButtonsUiState::for_selection(false),
        }
    }
}

/// Published picker state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UiState {
    /// Content has not been loaded yet, or the last load failed.
    #[default]
    Loading,
    Content(ContentUiState),
}

impl UiState {
    #[must_use]
    pub const fn content(&self) -> Option<&ContentUiState> {
        match self {
            Self::Loading => None,
            Self::Content(content) => Some(content),
        }
    }
}

/// One row of the scrollable layout list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListRow<'a> {
    /// Section title row.
    Section(&'a LayoutCategory),
    /// A layout, with its index among the visible layouts.
    Layout { layout: &'a Layout, index: usize },
}

/// Central picker state container.
///
/// Holds the published [`UiState`], the one-shot queues, thumbnail
/// readiness and the terminal navigation state. Mutated by the event
/// handler; view models are computed on demand from it.
#[derive(Debug, Clone)]
pub struct PickerState {
    ui_state: LiveState<UiState>,
    picker_showing: OneShot<bool>,
    create_page_requested: OneShot<()>,

    /// Slugs whose thumbnail has finished loading.
    thumbnails_ready: HashSet<String>,

    /// Thumbnail text by layout slug, for the preview panel.
    thumbnails: HashMap<String, String>,

    /// Header visibility requested by the last `start` call.
    header_seed: bool,

    /// A content load has been requested and not answered yet.
    content_requested: bool,

    /// The site new pages are created for. Set with the content.
    pub site: Option<Site>,

    /// Keyboard cursor and scroll position.
    pub navigation: Navigation,

    /// Whether the preview panel replaces the layout list.
    pub preview_open: bool,

    /// Offset threshold for [`PickerState::on_app_bar_offset_changed`] when
    /// driven by scrolling.
    pub header_threshold: i32,

    /// Terminal height seen by the last render.
    pub terminal_rows: usize,

    /// Message from the last failed load, shown on the loading screen.
    pub last_error: Option<String>,

    /// Color scheme for UI rendering.
    pub theme: Theme,
}

impl Default for PickerState {
    fn default() -> Self {
        Self::new(Theme::default(), DEFAULT_HEADER_THRESHOLD)
    }
}

impl PickerState {
    /// Creates a picker in the `Loading` state.
    #[must_use]
    pub fn new(theme: Theme, header_threshold: i32) -> Self {
        Self {
            ui_state: LiveState::default(),
            picker_showing: OneShot::default(),
            create_page_requested: OneShot::default(),
            thumbnails_ready: HashSet::new(),
            thumbnails: HashMap::new(),
            header_seed: false,
            content_requested: false,
            site: None,
            navigation: Navigation::default(),
            preview_open: false,
            header_threshold,
            terminal_rows: 0,
            last_error: None,
            theme,
        }
    }

    // ---------------------------------------------------------------------
    // Outputs
    // ---------------------------------------------------------------------

    /// Returns the latest snapshot.
    #[must_use]
    pub const fn ui_state(&self) -> &UiState {
        self.ui_state.get()
    }

    /// Returns the content snapshot, or `None` while loading.
    #[must_use]
    pub const fn content(&self) -> Option<&ContentUiState> {
        self.ui_state.get().content()
    }

    /// Subscribes to snapshot changes. Poll with [`PickerState::poll`].
    #[must_use]
    pub const fn subscribe(&self) -> Subscription {
        self.ui_state.subscribe()
    }

    /// Returns the snapshot if it changed since `subscription` last saw it.
    pub fn poll<'a>(&'a self, subscription: &mut Subscription) -> Option<&'a UiState> {
        subscription.poll(&self.ui_state)
    }

    /// Consumes pending "picker showing" notifications, oldest first.
    pub fn take_picker_showing(&mut self) -> Vec<bool> {
        self.picker_showing.drain()
    }

    /// Consumes pending "create new page requested" notifications.
    pub fn take_create_page_requests(&mut self) -> usize {
        self.create_page_requested.drain().len()
    }

    // ---------------------------------------------------------------------
    // Engine operations
    // ---------------------------------------------------------------------

    /// Loads the selected site and the catalog, then shows content.
    ///
    /// On failure the state stays `Loading`; retrying is up to the caller.
    pub fn init(&mut self, loader: &ContentLoader<'_>) {
        let _span = tracing::debug_span!("picker_init").entered();

        match loader.load() {
            Ok(content) => {
                self.apply_content(content);
            }
            Err(e) => {
                tracing::debug!(error = %e, "content unavailable, staying in loading state");
                self.content_unavailable(e.to_string());
            }
        }
    }

    /// Marks a content load as requested.
    ///
    /// Returns `false` when content is already showing or an earlier request
    /// is still pending, in which case no new load should be started.
    pub fn request_content(&mut self) -> bool {
        if self.content().is_some() || self.content_requested {
            return false;
        }
        self.content_requested = true;
        self.last_error = None;
        true
    }

    /// Whether a content load is pending.
    #[must_use]
    pub const fn is_content_requested(&self) -> bool {
        self.content_requested
    }

    /// Records a failed load. The state stays `Loading`.
    pub fn content_unavailable(&mut self, message: String) {
        self.content_requested = false;
        self.last_error = Some(message);
    }

    /// Transitions `Loading → Content` with empty selections.
    ///
    /// Header visibility comes from the last [`PickerState::start`] call.
    /// Applying content again replaces the catalog and resets selections.
    pub fn apply_content(&mut self, content: LoadedContent) {
        let LoadedContent { site, catalog } = content;

        tracing::debug!(
            site_id = site.local_id,
            categories = catalog.categories.len(),
            layouts = catalog.layout_count(),
            is_header_visible = self.header_seed,
            "applying content"
        );

        self.site = Some(site);
        self.content_requested = false;
        self.last_error = None;
        self.preview_open = false;
        self.navigation.reset();
        self.ui_state.set(UiState::Content(ContentUiState::new(
            catalog.categories,
            catalog.layout_categories,
            self.header_seed,
        )));
        self.refresh_viewport();
    }

    /// Seeds header visibility from the orientation.
    ///
    /// Before content arrives the value is remembered for the transition;
    /// afterwards it overrides the current visibility.
    pub fn start(&mut self, is_landscape: bool) -> bool {
        self.header_seed = is_landscape;
        self.update_content(|content| content.is_header_visible = is_landscape)
    }

    /// Shows the compact header when `offset < threshold`.
    ///
    /// Returns `true` if the snapshot changed.
    pub fn on_app_bar_offset_changed(&mut self, offset: i32, threshold: i32) -> bool {
        let visible = offset < threshold;
        self.update_content(|content| content.is_header_visible = visible)
    }

    /// Records that a layout's thumbnail has loaded.
    ///
    /// Does not change the published snapshot.
    pub fn on_thumbnail_ready(&mut self, slug: &str) {
        self.thumbnails_ready.insert(slug.to_string());
    }

    /// Stores thumbnail text for the preview panel and marks the slug ready.
    pub fn store_thumbnail(&mut self, slug: &str, preview: String) {
        self.thumbnails.insert(slug.to_string(), preview);
        self.on_thumbnail_ready(slug);
    }

    /// Toggles the layout selection.
    ///
    /// Tapping the selected layout clears the selection. Tapping another
    /// layout selects it only if its thumbnail is ready, otherwise nothing
    /// happens.
    pub fn on_layout_tapped(&mut self, slug: &str) -> bool {
        let ready = self.thumbnails_ready.contains(slug);
        let changed = self.update_content(|content| {
            if content.selected_layout_slug.as_deref() == Some(slug) {
                content.selected_layout_slug = None;
            } else if ready {
                content.selected_layout_slug = Some(slug.to_string());
            }
        });

        if self.selected_layout_slug().is_none() {
            self.preview_open = false;
        }

        tracing::debug!(slug = %slug, ready = ready, changed = changed, "layout tapped");
        changed
    }

    /// Toggles a category chip.
    pub fn on_category_tapped(&mut self, slug: &str) -> bool {
        let changed = self.update_content(|content| {
            if !content.selected_categories_slugs.remove(slug) {
                content.selected_categories_slugs.insert(slug.to_string());
            }
        });

        self.clamp_navigation();
        tracing::debug!(slug = %slug, changed = changed, "category tapped");
        changed
    }

    /// Queues a "picker showing" notification carrying `true`.
    pub fn show(&mut self) {
        self.picker_showing.emit(true);
    }

    /// Queues a "picker showing" notification carrying `false` and clears
    /// both selections.
    pub fn dismiss(&mut self) {
        self.picker_showing.emit(false);
        self.preview_open = false;
        self.update_content(|content| {
            content.selected_layout_slug = None;
            content.selected_categories_slugs.clear();
        });
        self.clamp_navigation();
    }

    /// Queues a "create new page requested" notification.
    ///
    /// Selection is left untouched; the caller reads it when handling the
    /// request.
    pub fn create_page(&mut self) {
        self.create_page_requested.emit(());
    }

    // ---------------------------------------------------------------------
    // Read-side helpers
    // ---------------------------------------------------------------------

    #[must_use]
    pub fn selected_layout_slug(&self) -> Option<&str> {
        self.content()?.selected_layout_slug.as_deref()
    }

    /// Resolves the selected slug to its layout.
    #[must_use]
    pub fn selected_layout(&self) -> Option<&Layout> {
        let content = self.content()?;
        let slug = content.selected_layout_slug.as_deref()?;
        content
            .layout_categories
            .iter()
            .flat_map(|section| &section.layouts)
            .find(|layout| layout.slug == slug)
    }

    #[must_use]
    pub fn is_thumbnail_ready(&self, slug: &str) -> bool {
        self.thumbnails_ready.contains(slug)
    }

    #[must_use]
    pub fn thumbnail(&self, slug: &str) -> Option<&str> {
        self.thumbnails.get(slug).map(String::as_str)
    }

    /// Layout sections matching the selected chips.
    ///
    /// With no chip selected every section is visible.
    #[must_use]
    pub fn visible_layout_categories(&self) -> Vec<&LayoutCategory> {
        let Some(content) = self.content() else {
            return Vec::new();
        };
        let filter = &content.selected_categories_slugs;
        content
            .layout_categories
            .iter()
            .filter(|section| filter.is_empty() || filter.contains(&section.slug))
            .collect()
    }

    /// Visible layouts flattened in display order.
    #[must_use]
    pub fn visible_layouts(&self) -> Vec<&Layout> {
        self.visible_layout_categories()
            .into_iter()
            .flat_map(|section| &section.layouts)
            .collect()
    }

    /// Rows of the scrollable list: a title row per section, then its layouts.
    #[must_use]
    pub fn list_rows(&self) -> Vec<ListRow<'_>> {
        let mut rows = Vec::new();
        let mut index = 0;
        for section in self.visible_layout_categories() {
            rows.push(ListRow::Section(section));
            for layout in &section.layouts {
                rows.push(ListRow::Layout { layout, index });
                index += 1;
            }
        }
        rows
    }

    // ---------------------------------------------------------------------
    // Navigation
    // ---------------------------------------------------------------------

    #[must_use]
    pub fn layout_under_cursor(&self) -> Option<&Layout> {
        self.visible_layouts().get(self.navigation.cursor).copied()
    }

    #[must_use]
    pub fn category_under_cursor(&self) -> Option<&Category> {
        self.content()?.categories.get(self.navigation.category_cursor)
    }

    /// Remaining height of the app bar after scrolling.
    #[must_use]
    pub fn app_bar_offset(&self) -> i32 {
        let remaining = APP_BAR_HEIGHT.saturating_sub(self.navigation.scroll_top);
        i32::try_from(remaining).unwrap_or(i32::MAX)
    }

    /// Rows available to the layout list at the current scroll position.
    #[must_use]
    pub fn list_capacity(&self) -> usize {
        let app_bar_rows = APP_BAR_HEIGHT.saturating_sub(self.navigation.scroll_top);
        self.terminal_rows.saturating_sub(CHROME_ROWS + app_bar_rows)
    }

    /// Moves the layout cursor and scrolls it into view.
    pub fn move_cursor(&mut self, forward: bool) -> bool {
        let len = self.visible_layouts().len();
        if len == 0 {
            return false;
        }
        if forward {
            self.navigation.move_down(len);
        } else {
            self.navigation.move_up(len);
        }
        self.scroll_cursor_into_view();
        true
    }

    /// Moves the chip cursor.
    pub fn move_category_cursor(&mut self, forward: bool) -> bool {
        let len = self.content().map_or(0, |content| content.categories.len());
        if len == 0 {
            return false;
        }
        if forward {
            self.navigation.next_category(len);
        } else {
            self.navigation.prev_category(len);
        }
        true
    }

    /// Scrolls the list and re-derives header visibility from the new
    /// app bar offset.
    pub fn scroll(&mut self, delta: isize) -> bool {
        let total = self.list_rows().len();
        if !self.navigation.scroll_by(delta, total) {
            return false;
        }
        self.refresh_viewport();
        self.sync_app_bar();
        true
    }

    /// Records the terminal height and recomputes the list viewport.
    pub fn set_terminal_rows(&mut self, rows: usize) {
        self.terminal_rows = rows;
        self.refresh_viewport();
    }

    /// Opens or closes the preview panel. Only opens with a selection.
    pub fn toggle_preview(&mut self) -> bool {
        if self.preview_open {
            self.preview_open = false;
            return true;
        }
        if self.selected_layout_slug().is_none() {
            return false;
        }
        self.preview_open = true;
        true
    }

    fn scroll_cursor_into_view(&mut self) {
        let cursor = self.navigation.cursor;
        let Some(row) = self.list_rows().iter().position(|row| {
            matches!(row, ListRow::Layout { index, .. } if *index == cursor)
        }) else {
            return;
        };

        if self.navigation.ensure_visible(row) {
            self.refresh_viewport();
            self.sync_app_bar();
        }
    }

    fn sync_app_bar(&mut self) -> bool {
        let offset = self.app_bar_offset();
        let threshold = self.header_threshold;
        self.on_app_bar_offset_changed(offset, threshold)
    }

    fn refresh_viewport(&mut self) {
        self.navigation.viewport_rows = self.list_capacity();
    }

    /// Keeps the cursors and the scroll position inside the visible list.
    ///
    /// A narrower list can pull `scroll_top` back, which re-expands the app
    /// bar, so the viewport and header follow.
    fn clamp_navigation(&mut self) {
        let layouts = self.visible_layouts().len();
        let categories = self.content().map_or(0, |content| content.categories.len());
        let total_rows = self.list_rows().len();
        self.navigation.clamp(layouts, categories);

        let scroll_top = self.navigation.scroll_top.min(total_rows.saturating_sub(1));
        if scroll_top != self.navigation.scroll_top {
            self.navigation.scroll_top = scroll_top;
            self.refresh_viewport();
            self.sync_app_bar();
        }
    }

    /// Applies `mutate` to a copy of the content snapshot, recomputes the
    /// buttons and publishes the copy if it differs.
    ///
    /// Returns `false` while loading.
    fn update_content(&mut self, mutate: impl FnOnce(&mut ContentUiState)) -> bool {
        let UiState::Content(current) = self.ui_state.get() else {
            return false;
        };

        let mut next = current.clone();
        mutate(&mut next);
        next.buttons_ui_state = ButtonsUiState::for_selection(next.selected_layout_slug.is_some());
        self.ui_state.set_if_changed(UiState::Content(next))
    }
}
