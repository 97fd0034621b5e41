//! Loading screen.

use crate::ui::helpers::{center, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::LoadingState;

/// Renders the loading message and its subtitle near the vertical middle.
pub fn render_loading(loading: &LoadingState, theme: &Theme, rows: usize, cols: usize) {
    let message_row = (rows / 2).max(1);

    position_cursor(message_row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.loading_fg));
    print!("{}", center(&loading.message, cols));
    print!("{}", Theme::reset());

    position_cursor(message_row + 1, 1);
    print!("{}", Theme::dim());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", center(&loading.subtitle, cols));
    print!("{}", Theme::reset());
}
