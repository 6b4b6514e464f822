//! Shared rendering utilities.
//!
//! Components write into one `String` frame buffer that the renderer prints
//! in a single call. Widths are counted in characters, not bytes, since
//! Cyrillic addresses are multi-byte in UTF-8.

use crate::ui::theme::Theme;

/// Appends an ANSI cursor move to `row`, `col` (1-based).
pub fn position_cursor(out: &mut String, row: usize, col: usize) {
    out.push_str(&format!("\u{1b}[{row};{col}H"));
}

/// Display width of `text` in terminal columns.
#[must_use]
pub fn text_width(text: &str) -> usize {
    text.chars().count()
}

/// Cuts `text` to at most `width` columns, marking the cut with `…`.
///
/// # Examples
///
/// ```
/// use geolookup::ui::helpers::truncate;
///
/// assert_eq!(truncate("София, ул. Шипка 6", 9), "София, у…");
/// assert_eq!(truncate("short", 9), "short");
/// ```
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if text_width(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('…');
    cut
}

/// Appends spaces so that a line with `used` columns fills `width`.
pub fn pad(out: &mut String, used: usize, width: usize) {
    out.push_str(&" ".repeat(width.saturating_sub(used)));
}

/// Appends `text` centered in `width` columns.
pub fn centered(out: &mut String, text: &str, width: usize) {
    let text = truncate(text, width);
    let len = text_width(&text);
    let left = width.saturating_sub(len) / 2;
    pad(out, 0, left);
    out.push_str(&text);
    pad(out, left + len, width);
}

/// Appends `text` with the character ranges highlighted.
///
/// Ranges are `(start, end)` character indices. Highlighting is skipped on
/// the selected row so it does not fight the selection background.
pub fn render_highlighted_text(
    out: &mut String,
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) {
    if ranges.is_empty() || is_selected {
        out.push_str(text);
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < pos || start >= end {
            continue;
        }
        out.extend(&chars[pos..start]);
        out.push_str(&Theme::fg(&theme.colors.match_highlight_fg));
        out.push_str(&Theme::bg(&theme.colors.match_highlight_bg));
        out.extend(&chars[start..end]);
        out.push_str(Theme::reset());
        out.push_str(&Theme::fg(&theme.colors.text_normal));
        pos = end;
    }

    out.extend(&chars[pos..]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlighted_text_keeps_all_characters() {
        let theme = Theme::default();
        let mut out = String::new();
        render_highlighted_text(&mut out, "Sofia", &[(0, 2), (4, 9)], &theme, false);

        let visible: String = strip_ansi(&out);
        assert_eq!(visible, "Sofia");
        assert!(out.contains(&Theme::bg(&theme.colors.match_highlight_bg)));
    }

    #[test]
    fn selected_row_is_not_highlighted() {
        let mut out = String::new();
        render_highlighted_text(&mut out, "Sofia", &[(0, 2)], &Theme::default(), true);
        assert_eq!(out, "Sofia");
    }

    #[test]
    fn centered_fills_width() {
        let mut out = String::new();
        centered(&mut out, "ab", 7);
        assert_eq!(out, "  ab   ");
    }

    fn strip_ansi(text: &str) -> String {
        let mut out = String::new();
        let mut chars = text.chars();
        while let Some(c) = chars.next() {
            if c == '\u{1b}' {
                for c in chars.by_ref() {
                    if c.is_ascii_alphabetic() {
                        break;
                    }
                }
            } else {
                out.push(c);
            }
        }
        out
    }
}
