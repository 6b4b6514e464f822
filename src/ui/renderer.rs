//! Top-level rendering coordinator.
//!
//! Rendering is two steps: compute a [`UIViewModel`] from the state snapshot,
//! then let the components draw it into one frame buffer that is printed in a
//! single write.
//!
//! # Example
//!
//! ```rust
//! use geolookup::app::{AppState, LookupSettings};
//! use geolookup::ui::{render_to_string, Locale, Theme};
//!
//! let state = AppState::new(LookupSettings::default());
//! let (frame, vm) = render_to_string(&state, Locale::English, &Theme::default(), 24, 80);
//! assert!(frame.contains("Address lookup"));
//! assert!(vm.list.rows.is_empty());
//! ```

use crate::app::AppState;
use crate::ui::components;
use crate::ui::locale::Locale;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Renders the plugin UI to stdout.
///
/// Returns the view model that was drawn, so pointer events can be
/// hit-tested against exactly what is on screen.
pub fn render(state: &AppState, locale: Locale, theme: &Theme, rows: usize, cols: usize) -> UIViewModel {
    let (frame, vm) = render_to_string(state, locale, theme, rows, cols);
    print!("{frame}");
    vm
}

/// Renders the plugin UI into a string.
#[must_use]
pub fn render_to_string(
    state: &AppState,
    locale: Locale,
    theme: &Theme,
    rows: usize,
    cols: usize,
) -> (String, UIViewModel) {
    let vm = UIViewModel::from_snapshot(&state.snapshot(), locale, rows, cols);
    let mut frame = String::with_capacity(rows * cols * 4);
    components::render_screen(&mut frame, &vm, theme, rows, cols);
    (frame, vm)
}
