//! View model computation.
//!
//! Transforms a [`PickerState`] snapshot into a
//! [`UIViewModel`](crate::ui::viewmodel::UIViewModel) for the given terminal
//! size: the collapsing app bar, the chip row, the visible window of the
//! layout list and the button bar.

use super::state::{ListRow, PickerState, UiState, APP_BAR_HEIGHT, CHROME_ROWS};
use crate::ui::viewmodel::{
    AppBarInfo, ButtonItem, ChipItem, FooterInfo, HeaderInfo, ListItem, LoadingState, PreviewInfo,
    UIViewModel,
};

const APP_BAR_TITLE: &str = "Choose a layout";
const APP_BAR_SUBTITLE: &str =
    "Get started by choosing from a wide variety of pre-made page layouts. Or just start with a blank page.";

const CONTENT_KEYBINDINGS: &str =
    "j/k: layouts  h/l: categories  Space: select  Tab: filter  c: create  p: preview  Esc: close";
const LOADING_KEYBINDINGS: &str = "r: retry  Esc: close";

impl PickerState {
    /// Computes a renderable view model for a `rows` x `cols` terminal.
    ///
    /// The list window starts at the navigation's `scroll_top` and holds as
    /// many rows as remain after the chrome and the visible part of the app
    /// bar.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let UiState::Content(content) = self.ui_state() else {
            return UIViewModel {
                loading: Some(self.compute_loading()),
                footer: FooterInfo {
                    keybindings: LOADING_KEYBINDINGS.to_string(),
                },
                ..UIViewModel::default()
            };
        };

        let app_bar_rows = APP_BAR_HEIGHT.saturating_sub(self.navigation.scroll_top);
        let capacity = rows.saturating_sub(CHROME_ROWS + app_bar_rows);

        let header = content.is_header_visible.then(|| HeaderInfo {
            title: self.compute_header_title(),
        });

        let chips = content
            .categories
            .iter()
            .enumerate()
            .map(|(index, category)| ChipItem {
                label: category.emoji.as_deref().map_or_else(
                    || category.title.clone(),
                    |emoji| format!("{emoji} {}", category.title),
                ),
                is_selected: content.selected_categories_slugs.contains(&category.slug),
                is_focused: index == self.navigation.category_cursor,
            })
            .collect();

        let list_items = self
            .list_rows()
            .into_iter()
            .skip(self.navigation.scroll_top)
            .take(capacity)
            .map(|row| self.compute_list_item(row, cols))
            .collect();

        let buttons_ui_state = content.buttons_ui_state;
        let mut buttons = Vec::new();
        if buttons_ui_state.create_blank_page_visible {
            buttons.push(ButtonItem {
                key: "c".to_string(),
                label: "Create blank page".to_string(),
                is_primary: false,
            });
        }
        if buttons_ui_state.preview_visible {
            buttons.push(ButtonItem {
                key: "p".to_string(),
                label: if self.preview_open { "Close preview" } else { "Preview" }.to_string(),
                is_primary: false,
            });
        }
        if buttons_ui_state.create_page_visible {
            buttons.push(ButtonItem {
                key: "c".to_string(),
                label: "Create page".to_string(),
                is_primary: true,
            });
        }

        UIViewModel {
            loading: None,
            header,
            app_bar: AppBarInfo {
                title: APP_BAR_TITLE.to_string(),
                subtitle: APP_BAR_SUBTITLE.to_string(),
                rows: app_bar_rows,
            },
            chips,
            list_items,
            preview: self.compute_preview(),
            buttons,
            footer: FooterInfo {
                keybindings: CONTENT_KEYBINDINGS.to_string(),
            },
        }
    }

    fn compute_loading(&self) -> LoadingState {
        LoadingState {
            message: "Loading layouts".to_string(),
            subtitle: self
                .last_error
                .as_ref()
                .map_or_else(|| "Fetching the catalog for your site".to_string(), |e| format!("Could not load content: {e}")),
        }
    }

    fn compute_header_title(&self) -> String {
        self.site.as_ref().map_or_else(
            || format!(" {APP_BAR_TITLE} "),
            |site| format!(" {APP_BAR_TITLE} · {} ", site.name),
        )
    }

    fn compute_list_item(&self, row: ListRow<'_>, cols: usize) -> ListItem {
        const SAFETY_MARGIN: usize = 6;

        match row {
            ListRow::Section(section) => ListItem::Section {
                title: section.title.clone(),
                description: truncate(&section.description, cols.saturating_sub(section.title.len() + SAFETY_MARGIN)),
            },
            ListRow::Layout { layout, index } => ListItem::Layout {
                title: truncate(&layout.title, cols.saturating_sub(SAFETY_MARGIN)),
                slug: layout.slug.clone(),
                is_selected: self.selected_layout_slug() == Some(layout.slug.as_str()),
                is_focused: index == self.navigation.cursor,
                is_ready: self.is_thumbnail_ready(&layout.slug),
            },
        }
    }

    fn compute_preview(&self) -> Option<PreviewInfo> {
        if !self.preview_open {
            return None;
        }
        let layout = self.selected_layout()?;
        let lines = self.thumbnail(&layout.slug).map_or_else(
            || vec!["Preview unavailable".to_string()],
            |text| text.lines().map(String::from).collect(),
        );
        Some(PreviewInfo {
            title: layout.title.clone(),
            lines,
        })
    }
}

/// Shortens `text` to at most `max` characters, ending in "..." when cut.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Catalog, Category, Layout, LayoutCategory, Site};
    use crate::storage::LoadedContent;

    fn state() -> PickerState {
        let mut state = PickerState::default();
        state.apply_content(LoadedContent {
            site: Site::new(1, "Travel notes", ""),
            catalog: Catalog {
                categories: vec![Category::new("about", "About")],
                layout_categories: vec![LayoutCategory {
                    slug: "about".into(),
                    title: "About".into(),
                    description: "Introduce yourself".into(),
                    layouts: vec![Layout::new("about-1", "About me"), Layout::new("about-2", "Team")],
                }],
            },
        });
        state
    }

    #[test]
    fn loading_shows_only_the_loading_screen() {
        let mut state = PickerState::default();
        state.last_error = Some("no site selected".into());

        let vm = state.compute_viewmodel(24, 80);
        let loading = vm.loading.unwrap();
        assert!(loading.subtitle.contains("no site selected"));
        assert!(vm.list_items.is_empty());
    }

    #[test]
    fn blank_page_button_without_selection() {
        let vm = state().compute_viewmodel(24, 80);

        assert_eq!(vm.buttons.len(), 1);
        assert_eq!(vm.buttons[0].label, "Create blank page");
        assert!(vm.header.is_none());
        assert_eq!(vm.app_bar.rows, APP_BAR_HEIGHT);
    }

    #[test]
    fn selection_shows_preview_and_create_buttons() {
        let mut state = state();
        state.store_thumbnail("about-2", "+------+\n| team |\n+------+".into());
        state.on_layout_tapped("about-2");
        state.toggle_preview();

        let vm = state.compute_viewmodel(24, 80);
        let labels: Vec<_> = vm.buttons.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Close preview", "Create page"]);

        let preview = vm.preview.unwrap();
        assert_eq!(preview.title, "Team");
        assert_eq!(preview.lines.len(), 3);
        assert!(vm.list_items.iter().any(|item| matches!(
            item,
            ListItem::Layout { slug, is_selected: true, is_ready: true, .. } if slug == "about-2"
        )));
    }

    #[test]
    fn list_window_is_bounded_by_terminal_height() {
        let state = state();
        let rows = CHROME_ROWS + APP_BAR_HEIGHT + 2;

        let vm = state.compute_viewmodel(rows, 80);
        assert_eq!(vm.list_items.len(), 2);
        assert!(matches!(vm.list_items[0], ListItem::Section { .. }));
    }

    #[test]
    fn header_names_the_site_when_visible() {
        let mut state = state();
        state.start(true);

        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.header.unwrap().title, " Choose a layout · Travel notes ");
    }

    #[test]
    fn truncate_marks_cut_text() {
        assert_eq!(truncate("About me", 20), "About me");
        assert_eq!(truncate("A very long layout title", 10), "A very ...");
    }
}
