//! Shared rendering utilities.
//!
//! Width calculations count `char`s, which is exact for the catalog's text
//! and close enough for the chip emoji.

/// Moves the cursor to `row`, `col` (both 1-indexed).
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Display width of `text` in columns.
#[must_use]
pub fn text_width(text: &str) -> usize {
    text.chars().count()
}

/// Cuts `text` to at most `width` columns.
#[must_use]
pub fn clip(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

/// Clips or right-pads `text` to exactly `width` columns.
///
/// ```
/// use layout_picker::ui::helpers::fit;
///
/// assert_eq!(fit("Team", 6), "Team  ");
/// assert_eq!(fit("Portfolio", 4), "Port");
/// ```
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    let clipped = clip(text, width);
    let pad = width.saturating_sub(text_width(&clipped));
    format!("{clipped}{}", " ".repeat(pad))
}

/// Centers `text` in `width` columns. Extra space goes to the right.
#[must_use]
pub fn center(text: &str, width: usize) -> String {
    let clipped = clip(text, width);
    let left = width.saturating_sub(text_width(&clipped)) / 2;
    fit(&format!("{}{clipped}", " ".repeat(left)), width)
}

/// Splits `text` into lines of at most `width` columns at word boundaries.
///
/// Words longer than `width` are cut.
#[must_use]
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }

    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let word = clip(word, width);
        let needed = if line.is_empty() {
            text_width(&word)
        } else {
            text_width(&line) + 1 + text_width(&word)
        };
        if needed > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(&word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_splits_padding() {
        assert_eq!(center("ab", 6), "  ab  ");
        assert_eq!(center("ab", 5), " ab  ");
        assert_eq!(center("abcdef", 3), "abc");
    }

    #[test]
    fn fit_counts_chars_not_bytes() {
        assert_eq!(fit("héllo", 6), "héllo ");
        assert_eq!(text_width("· site"), 6);
    }

    #[test]
    fn wrap_breaks_on_words() {
        assert_eq!(
            wrap("Get started by choosing a layout", 12),
            vec!["Get started", "by choosing", "a layout"]
        );
        assert_eq!(wrap("supercalifragilistic", 5), vec!["super"]);
        assert!(wrap("anything", 0).is_empty());
    }
}
