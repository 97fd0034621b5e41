//! Layout list: section titles and layout rows.

use crate::ui::helpers::{fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ListItem;

const SELECTED_MARKER: &str = "✓";
const PENDING_MARKER: &str = "·";

/// Row text for a layout, without styling.
fn layout_text(title: &str, is_selected: bool, is_ready: bool) -> String {
    let marker = if is_selected {
        SELECTED_MARKER
    } else if is_ready {
        " "
    } else {
        PENDING_MARKER
    };
    format!("  {marker} {title}")
}

/// Renders `items` and blanks the rest of the `height` rows below them.
pub fn render_layouts(row: usize, items: &[ListItem], theme: &Theme, cols: usize, height: usize) -> usize {
    for (offset, item) in items.iter().take(height).enumerate() {
        position_cursor(row + offset, 1);
        match item {
            ListItem::Section { title, description } => {
                render_section(title, description, theme, cols);
            }
            ListItem::Layout {
                title,
                is_selected,
                is_focused,
                is_ready,
                ..
            } => render_layout(title, *is_selected, *is_focused, *is_ready, theme, cols),
        }
    }

    for offset in items.len()..height {
        position_cursor(row + offset, 1);
        print!("{}", " ".repeat(cols));
    }

    row + height
}

fn render_section(title: &str, description: &str, theme: &Theme, cols: usize) {
    let title = fit(title, cols);
    let title = title.trim_end();
    let used = title.chars().count();

    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.section_fg));
    print!("{title}");
    print!("{}", Theme::reset());

    print!("{}", Theme::fg(&theme.colors.text_dim));
    if description.is_empty() {
        print!("{}", " ".repeat(cols.saturating_sub(used)));
    } else {
        print!("{}", fit(&format!("  {description}"), cols.saturating_sub(used)));
    }
    print!("{}", Theme::reset());
}

fn render_layout(
    title: &str,
    is_selected: bool,
    is_focused: bool,
    is_ready: bool,
    theme: &Theme,
    cols: usize,
) {
    if is_focused {
        print!("{}", Theme::fg(&theme.colors.focus_fg));
        print!("{}", Theme::bg(&theme.colors.focus_bg));
    } else if !is_ready {
        print!("{}", Theme::fg(&theme.colors.unready_fg));
    } else if is_selected {
        print!("{}", Theme::fg(&theme.colors.selected_marker_fg));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }
    if is_selected {
        print!("{}", Theme::bold());
    }

    print!("{}", fit(&layout_text(title, is_selected, is_ready), cols));
    print!("{}", Theme::reset());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers_reflect_selection_and_readiness() {
        assert_eq!(layout_text("About me", true, true), "  ✓ About me");
        assert_eq!(layout_text("About me", false, true), "    About me");
        assert_eq!(layout_text("About me", false, false), "  · About me");
    }
}
