//! Button bar.

use crate::ui::helpers::{position_cursor, text_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ButtonItem;

fn button_text(button: &ButtonItem) -> String {
    format!(" [{}] {} ", button.key, button.label)
}

/// Renders the buttons right-aligned, primary button last.
pub fn render_buttons(row: usize, buttons: &[ButtonItem], theme: &Theme, cols: usize) -> usize {
    let texts: Vec<String> = buttons.iter().map(button_text).collect();
    let width: usize = texts.iter().map(|t| text_width(t) + 1).sum();

    position_cursor(row, 1);
    print!("{}", " ".repeat(cols.saturating_sub(width)));

    let mut used = cols.saturating_sub(width);
    for (button, text) in buttons.iter().zip(&texts) {
        let len = text_width(text);
        if used + len > cols {
            break;
        }
        if button.is_primary {
            print!("{}", Theme::bold());
            print!("{}", Theme::fg(&theme.colors.button_primary_fg));
            print!("{}", Theme::bg(&theme.colors.button_primary_bg));
        } else {
            print!("{}", Theme::fg(&theme.colors.button_fg));
        }
        print!("{text}");
        print!("{} ", Theme::reset());
        used += len + 1;
    }

    row + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_text_shows_key_hint() {
        let button = ButtonItem {
            key: "c".to_string(),
            label: "Create page".to_string(),
            is_primary: true,
        };
        assert_eq!(button_text(&button), " [c] Create page ");
    }
}
