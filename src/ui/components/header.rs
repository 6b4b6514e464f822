//! Header component: title bar with the loading indicator.

use crate::ui::helpers::{pad, position_cursor, text_width, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the title left-aligned and the loading indicator right-aligned.
///
/// Returns the next free row.
pub fn render_header(out: &mut String, row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let indicator = header
        .loading
        .as_ref()
        .map(|text| format!("⟳ {text} "))
        .unwrap_or_default();
    let indicator_len = text_width(&indicator);
    let title = truncate(&format!(" {}", header.title), cols.saturating_sub(indicator_len));
    let title_len = text_width(&title);

    position_cursor(out, row, 1);
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        out.push_str(&Theme::bg(bg));
    }
    out.push_str(&title);
    pad(out, title_len + indicator_len, cols);
    if !indicator.is_empty() {
        out.push_str(&Theme::fg(&theme.colors.loading_fg));
        out.push_str(&indicator);
    }
    out.push_str(Theme::reset());
    row + 1
}
