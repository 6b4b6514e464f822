//! List component: suggestion and result rows.

use crate::ui::helpers::{self, pad, position_cursor, text_width, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

/// Renders the visible rows starting at `row`; returns the next free row.
pub fn render_rows(out: &mut String, row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    items
        .iter()
        .fold(row, |row, item| render_row(out, row, item, theme, cols))
}

/// One row:
///
/// ```text
/// ▶ primary text                      secondary details  ↗ link
/// ```
///
/// The primary text is truncated first so the details stay readable.
fn render_row(out: &mut String, row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    let (base_fg, marker) = if item.is_selected {
        (&theme.colors.selection_fg, "▶ ")
    } else {
        (&theme.colors.text_normal, "  ")
    };

    let link = item.link.as_ref().map(|l| format!("  ↗ {l}")).unwrap_or_default();
    let secondary = item
        .secondary
        .as_ref()
        .map(|s| format!("  {s}"))
        .unwrap_or_default();
    let tail_len = text_width(&secondary) + text_width(&link) + 1;
    let primary_room = cols.saturating_sub(text_width(marker) + tail_len);
    let primary = truncate(&item.primary, primary_room);

    position_cursor(out, row, 1);
    if item.is_selected {
        out.push_str(&Theme::bg(&theme.colors.selection_bg));
    }
    out.push_str(&Theme::fg(base_fg));
    out.push_str(marker);

    let ranges = if primary == item.primary {
        item.highlight_ranges.as_slice()
    } else {
        &[]
    };
    helpers::render_highlighted_text(out, &primary, ranges, theme, item.is_selected);

    let used = text_width(marker) + text_width(&primary);
    pad(out, used, cols.saturating_sub(tail_len));

    if !secondary.is_empty() {
        if !item.is_selected {
            out.push_str(&Theme::fg(&theme.colors.text_dim));
        }
        out.push_str(&secondary);
    }
    if !link.is_empty() {
        if !item.is_selected {
            out.push_str(&Theme::fg(&theme.colors.link_fg));
        }
        out.push_str(&link);
    }
    out.push(' ');
    out.push_str(Theme::reset());
    row + 1
}
