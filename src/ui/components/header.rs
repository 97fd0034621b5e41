//! Compact header shown once the app bar has scrolled out of view.

use crate::ui::helpers::{center, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the header row, or a blank row when the header is hidden.
///
/// The row is always reserved so the rest of the layout does not jump when
/// the header toggles.
pub fn render_header(row: usize, header: Option<&HeaderInfo>, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let Some(header) = header else {
        print!("{}", " ".repeat(cols));
        return row + 1;
    };

    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }
    print!("{}", center(&header.title, cols));
    print!("{}", Theme::reset());
    row + 1
}
