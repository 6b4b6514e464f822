//! Input box component.

use crate::ui::helpers::{pad, position_cursor, text_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::InputInfo;

/// Horizontal margin around the box.
const INPUT_BOX_MARGIN: usize = 2;

/// Renders the three-line framed input box with a trailing caret.
///
/// ```text
///   ┌──────────────────────────┐
///   │ Address: Sofia, str. X▏  │
///   └──────────────────────────┘
/// ```
///
/// Long input is scrolled so its end (where typing happens) stays visible.
pub fn render_input(out: &mut String, row: usize, input: &InputInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(INPUT_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border = Theme::fg(&theme.colors.input_border);

    position_cursor(out, row, 1);
    pad(out, 0, INPUT_BOX_MARGIN);
    out.push_str(&border);
    out.push_str(&format!("┌{}┐", "─".repeat(inner_width)));
    out.push_str(Theme::reset());

    let label = format!(" {}: ", input.label);
    let label_len = text_width(&label);
    let room = inner_width.saturating_sub(label_len + 1);

    position_cursor(out, row + 1, 1);
    pad(out, 0, INPUT_BOX_MARGIN);
    out.push_str(&border);
    out.push('│');
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.text_normal));
    out.push_str(&label);
    out.push_str(Theme::reset());

    let used = if input.text.is_empty() {
        let placeholder: String = input.placeholder.chars().take(room).collect();
        out.push_str(&Theme::fg(&theme.colors.input_border));
        out.push('▏');
        out.push_str(Theme::dim());
        out.push_str(&Theme::fg(&theme.colors.text_dim));
        out.push_str(&placeholder);
        label_len + 1 + text_width(&placeholder)
    } else {
        let len = text_width(&input.text);
        let tail: String = input.text.chars().skip(len.saturating_sub(room)).collect();
        out.push_str(&Theme::fg(&theme.colors.text_normal));
        out.push_str(&tail);
        out.push_str(&Theme::fg(&theme.colors.input_border));
        out.push('▏');
        label_len + text_width(&tail) + 1
    };

    out.push_str(Theme::reset());
    pad(out, used, inner_width);
    out.push_str(&border);
    out.push('│');
    out.push_str(Theme::reset());

    position_cursor(out, row + 2, 1);
    pad(out, 0, INPUT_BOX_MARGIN);
    out.push_str(&border);
    out.push_str(&format!("└{}┘", "─".repeat(inner_width)));
    out.push_str(Theme::reset());

    row + 3
}
