//! Composable UI component renderers.
//!
//! Each component appends ANSI output for one part of the screen to a shared
//! frame buffer and returns the next free row.
//!
//! # Components
//!
//! - `header`: title bar and loading indicator
//! - `input`: framed input box
//! - `status`: status line
//! - `list`: suggestion and result rows
//! - `empty`: "no results" placeholder
//! - `footer`: keybinding hints

mod empty;
mod footer;
mod header;
mod input;
mod list;
mod status;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{UIViewModel, HEADER_ROW, INPUT_TOP_ROW, LIST_TOP_ROW, STATUS_ROW};

use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use input::render_input;
use list::render_rows;
use status::render_status;

/// Horizontal separator at `row`.
fn render_border(out: &mut String, row: usize, color: &str, cols: usize) -> usize {
    position_cursor(out, row, 1);
    out.push_str(&Theme::fg(color));
    out.push_str(&"─".repeat(cols));
    out.push_str(Theme::reset());
    row + 1
}

/// Renders the whole screen into `out`.
///
/// Rows follow the layout documented in [`crate::ui::viewmodel`]; the footer
/// and its border are pinned to the bottom of the pane.
pub fn render_screen(out: &mut String, vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    let row = render_header(out, HEADER_ROW, &vm.header, theme, cols);
    let row = render_border(out, row, &theme.colors.border, cols);
    debug_assert_eq!(row, INPUT_TOP_ROW);
    let row = render_input(out, row, &vm.input, theme, cols);
    debug_assert_eq!(row, STATUS_ROW);
    let row = render_status(out, row, vm.status.as_ref(), theme, cols);
    let row = render_border(out, row, &theme.colors.border, cols);
    debug_assert_eq!(row, LIST_TOP_ROW);

    if let Some(empty) = &vm.empty_state {
        render_empty_state(out, row, empty, theme, cols);
    } else {
        render_rows(out, row, &vm.list.rows, theme, cols);
    }

    let footer_row = rows;
    let border_row = footer_row.saturating_sub(1);
    if border_row > LIST_TOP_ROW {
        render_border(out, border_row, &theme.colors.border, cols);
        render_footer(out, footer_row, &vm.footer, theme, cols);
    }
}
