//! Category chip row.

use crate::ui::helpers::{position_cursor, text_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ChipItem;

const GAP: usize = 1;

fn chip_text(chip: &ChipItem) -> String {
    format!(" {} ", chip.label)
}

/// First chip to draw so the focused chip fits in `cols`.
fn first_visible(widths: &[usize], focused: usize, cols: usize) -> usize {
    let mut start = 0;
    let span = |from: usize| -> usize {
        widths[from..=focused].iter().sum::<usize>() + GAP * (focused - from)
    };
    while start < focused && span(start) > cols {
        start += 1;
    }
    start
}

/// Renders the chips on one row, scrolled horizontally to keep the focused
/// chip visible. Chips that do not fit are clipped.
pub fn render_chips(row: usize, chips: &[ChipItem], theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let texts: Vec<String> = chips.iter().map(chip_text).collect();
    let widths: Vec<usize> = texts.iter().map(|t| text_width(t)).collect();
    let focused = chips.iter().position(|c| c.is_focused).unwrap_or(0);
    let start = if chips.is_empty() { 0 } else { first_visible(&widths, focused, cols) };

    let mut used = 0;
    for (chip, text) in chips.iter().zip(&texts).skip(start) {
        let width = text_width(text);
        if used + width > cols {
            break;
        }

        if chip.is_focused {
            print!("{}", Theme::fg(&theme.colors.focus_fg));
            print!("{}", Theme::bg(&theme.colors.focus_bg));
        } else if chip.is_selected {
            print!("{}", Theme::fg(&theme.colors.chip_selected_fg));
            print!("{}", Theme::bg(&theme.colors.chip_selected_bg));
        } else {
            print!("{}", Theme::fg(&theme.colors.chip_fg));
        }
        if chip.is_selected {
            print!("{}", Theme::bold());
        }
        print!("{text}");
        print!("{}", Theme::reset());
        used += width;

        if used + GAP <= cols {
            print!("{}", " ".repeat(GAP));
            used += GAP;
        }
    }

    print!("{}", " ".repeat(cols.saturating_sub(used)));
    row + 1
}
