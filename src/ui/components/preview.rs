//! Preview panel for the selected layout's thumbnail.

use crate::ui::helpers::{fit, position_cursor, text_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::PreviewInfo;

/// Framed panel filling `height` rows. Thumbnail lines beyond the frame are
/// dropped.
pub fn render_preview(row: usize, preview: &PreviewInfo, theme: &Theme, cols: usize, height: usize) -> usize {
    for (offset, line) in frame(preview, cols, height).iter().enumerate() {
        position_cursor(row + offset, 1);
        print!("{}", Theme::fg(&theme.colors.border));
        print!("{line}");
        print!("{}", Theme::reset());
    }
    row + height
}

fn frame(preview: &PreviewInfo, cols: usize, height: usize) -> Vec<String> {
    if height == 0 || cols < 4 {
        return vec![" ".repeat(cols); height];
    }

    let inner = cols - 2;
    let title = fit(&format!("─ {} ", preview.title), inner);
    let title = title.trim_end();
    let mut lines = vec![format!("┌{title}{}┐", "─".repeat(inner - text_width(title)))];

    let body_rows = height.saturating_sub(2);
    for index in 0..body_rows {
        let text = preview.lines.get(index).map_or("", String::as_str);
        lines.push(format!("│{}│", fit(&format!(" {text}"), inner)));
    }

    if height > 1 {
        lines.push(format!("└{}┘", "─".repeat(inner)));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_fills_height_and_width() {
        let preview = PreviewInfo {
            title: "About me".to_string(),
            lines: vec!["[img] [txt]".to_string()],
        };
        let lines = frame(&preview, 20, 4);

        assert_eq!(lines.len(), 4);
        assert!(lines.iter().all(|l| text_width(l) == 20));
        assert!(lines[0].starts_with("┌─ About me"));
        assert_eq!(lines[1], "│ [img] [txt]      │");
        assert_eq!(lines[2], format!("│{}│", " ".repeat(18)));
    }
}
