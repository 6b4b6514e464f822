//! Status line component.

use crate::ui::helpers::{pad, position_cursor, text_width, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::StatusLine;

/// Renders the status line, or a blank line when there is none.
pub fn render_status(out: &mut String, row: usize, status: Option<&StatusLine>, theme: &Theme, cols: usize) -> usize {
    position_cursor(out, row, 1);
    match status {
        Some(status) => {
            let color = if status.is_error {
                &theme.colors.error_fg
            } else {
                &theme.colors.status_fg
            };
            let text = truncate(&format!(" {}", status.text), cols);
            out.push_str(&Theme::fg(color));
            out.push_str(&text);
            pad(out, text_width(&text), cols);
            out.push_str(Theme::reset());
        }
        None => pad(out, 0, cols),
    }
    row + 1
}
