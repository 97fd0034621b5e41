//! Component renderers for the picker screen.
//!
//! - `header`: compact header, shown once the app bar collapses
//! - `app_bar`: hero title and subtitle
//! - `chips`: category filter chips
//! - `layouts`: sectioned layout list
//! - `preview`: thumbnail panel, drawn over the list area
//! - `buttons`: create and preview buttons
//! - `footer`: key hints
//! - `loading`: loading screen

mod app_bar;
mod buttons;
mod chips;
mod footer;
mod header;
mod layouts;
mod loading;
mod preview;

pub use loading::render_loading;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use app_bar::render_app_bar;
use buttons::render_buttons;
use chips::render_chips;
use footer::render_footer;
use header::render_header;
use layouts::render_layouts;
use preview::render_preview;

/// Renders a horizontal separator at `row`.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the content screen.
///
/// ```text
/// [Compact header or blank]
/// [App bar, 0-3 rows]
/// [Chips]
/// [Border]
/// [Layout list | Preview panel]
/// [Border]
/// [Buttons]
/// [Footer]
/// ```
///
/// The list area takes whatever the other rows leave.
pub fn render_content(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 1;

    current_row = render_header(current_row, vm.header.as_ref(), theme, cols);
    current_row = render_app_bar(current_row, &vm.app_bar, theme, cols);
    current_row = render_chips(current_row, &vm.chips, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);

    let footer_row = rows.max(current_row + 3);
    let buttons_row = footer_row - 1;
    let border_row = buttons_row - 1;
    let list_height = border_row.saturating_sub(current_row);

    if let Some(preview) = &vm.preview {
        render_preview(current_row, preview, theme, cols, list_height);
    } else {
        render_layouts(current_row, &vm.list_items, theme, cols, list_height);
    }

    render_border(border_row, &theme.colors.border, cols);
    render_buttons(buttons_row, &vm.buttons, theme, cols);
    render_footer(footer_row, &vm.footer, theme, cols);
}
