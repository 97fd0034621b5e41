//! Collapsible app bar: hero title and subtitle.

use crate::app::state::APP_BAR_HEIGHT;
use crate::ui::helpers::{fit, position_cursor, wrap};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::AppBarInfo;

const INDENT: usize = 2;

/// Renders the bottom `app_bar.rows` lines of the bar.
///
/// As the list scrolls the bar loses its top lines first, so the title
/// disappears before the subtitle.
pub fn render_app_bar(row: usize, app_bar: &AppBarInfo, theme: &Theme, cols: usize) -> usize {
    let lines = bar_lines(app_bar, cols.saturating_sub(INDENT));
    let hidden = APP_BAR_HEIGHT.saturating_sub(app_bar.rows);

    let mut current_row = row;
    for (index, line) in lines.iter().enumerate().skip(hidden) {
        position_cursor(current_row, 1);
        print!("{}", " ".repeat(INDENT));
        if index == 0 {
            print!("{}", Theme::bold());
            print!("{}", Theme::fg(&theme.colors.app_bar_title_fg));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_dim));
        }
        print!("{}", fit(line, cols.saturating_sub(INDENT)));
        print!("{}", Theme::reset());
        current_row += 1;
    }
    current_row
}

/// Title followed by the subtitle wrapped to fill the rest of the bar.
fn bar_lines(app_bar: &AppBarInfo, width: usize) -> Vec<String> {
    let mut subtitle = wrap(&app_bar.subtitle, width);
    let overflows = subtitle.len() > APP_BAR_HEIGHT - 1;
    subtitle.resize(APP_BAR_HEIGHT - 1, String::new());
    if overflows {
        if let Some(last) = subtitle.last_mut() {
            *last = ellipsize(last, width);
        }
    }

    let mut lines = vec![app_bar.title.clone()];
    lines.extend(subtitle);
    lines
}

fn ellipsize(line: &str, width: usize) -> String {
    let keep = width.saturating_sub(3);
    let mut out: String = line.chars().take(keep).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(subtitle: &str) -> AppBarInfo {
        AppBarInfo {
            title: "Choose a layout".to_string(),
            subtitle: subtitle.to_string(),
            rows: APP_BAR_HEIGHT,
        }
    }

    #[test]
    fn bar_always_has_full_height() {
        assert_eq!(bar_lines(&bar("Short"), 40), vec!["Choose a layout", "Short", ""]);
    }

    #[test]
    fn overflowing_subtitle_is_ellipsized() {
        let lines = bar_lines(&bar("one two three four five six"), 9);
        assert_eq!(lines.len(), APP_BAR_HEIGHT);
        assert_eq!(lines[1], "one two");
        assert!(lines[2].ends_with("..."));
    }
}
