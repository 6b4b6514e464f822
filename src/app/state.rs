//! Application state and the read-only snapshot handed to the renderer.
//!
//! [`AppState`] is the single explicit session object: the input buffer, the
//! debouncer, both sessions, the blur grace timer, and the status line. It is
//! created with [`AppState::new`], returned to its initial state with
//! [`AppState::reset`], and mutated only by
//! [`handle_event`](crate::app::handle_event).
//!
//! # Example
//!
//! ```rust
//! use geolookup::app::{AppState, LookupSettings, Mode};
//!
//! let state = AppState::new(LookupSettings::default());
//! let snapshot = state.snapshot();
//! assert_eq!(snapshot.mode, Mode::Idle);
//! assert!(snapshot.suggestions.is_empty());
//! ```

use crate::app::cursor::Cursor;
use crate::app::debounce::{Debouncer, OneShot};
use crate::app::modes::{derive_mode, Mode};
use crate::app::results::{ResultPhase, ResultSession};
use crate::app::suggestions::SuggestionSession;
use crate::domain::{Candidate, Suggestion};
use std::time::Duration;

/// Timing and threshold knobs of the interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupSettings {
    /// Minimum trimmed input length, in characters, before suggesting.
    pub min_chars: usize,
    /// Debounce window after the last keystroke.
    pub debounce: Duration,
    /// Delay between losing focus and closing the suggestion list.
    pub blur_grace: Duration,
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self {
            min_chars: 3,
            debounce: Duration::from_millis(300),
            blur_grace: Duration::from_millis(120),
        }
    }
}

/// User-visible status line.
///
/// Only the kind of status lives in the core; the renderer turns it into
/// text through its locale table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Input is shorter than the minimum length.
    NeedsMoreInput { min_chars: usize },
    /// A suggestion lookup is pending (debouncing or in flight).
    SearchingSuggestions,
    /// The latest suggestion lookup returned nothing.
    NoSuggestions,
    /// The latest suggestion lookup failed.
    SuggestionsFailed,
    /// A find-candidates lookup is in flight.
    SearchingResults,
    /// The latest find-candidates lookup failed.
    SearchFailed,
}

impl Status {
    #[must_use]
    pub const fn is_error(self) -> bool {
        matches!(self, Self::SuggestionsFailed | Self::SearchFailed)
    }
}

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    pub settings: LookupSettings,
    pub input: String,
    pub debouncer: Debouncer,
    pub suggestions: SuggestionSession,
    pub results: ResultSession,
    pub blur_grace: OneShot,
    pub status: Option<Status>,
}

impl AppState {
    /// Creates a fresh state; the status line starts by asking for input.
    #[must_use]
    pub fn new(settings: LookupSettings) -> Self {
        Self {
            settings,
            input: String::new(),
            debouncer: Debouncer::new(settings.debounce, settings.min_chars),
            suggestions: SuggestionSession::default(),
            results: ResultSession::default(),
            blur_grace: OneShot::default(),
            status: Some(Status::NeedsMoreInput {
                min_chars: settings.min_chars,
            }),
        }
    }

    /// Returns to the initial state, keeping the settings.
    ///
    /// Generation counters and timer tokens keep counting, so every
    /// outstanding timer and lookup settles as a no-op.
    pub fn reset(&mut self) {
        self.input.clear();
        self.debouncer.cancel();
        self.blur_grace.disarm();
        self.suggestions.cancel_pending();
        self.suggestions.close();
        self.results.reset();
        self.status = Some(Status::NeedsMoreInput {
            min_chars: self.settings.min_chars,
        });
    }

    /// Current interaction mode, derived from the sessions.
    #[must_use]
    pub fn mode(&self) -> Mode {
        derive_mode(&self.suggestions, &self.results)
    }

    /// Builds the read-only view handed to the renderer.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            input: self.input.clone(),
            mode: self.mode(),
            suggestions_open: self.suggestions.is_open(),
            suggestions: self.suggestions.items().to_vec(),
            suggestion_cursor: self.suggestions.cursor(),
            candidates: self.results.items().to_vec(),
            result_cursor: self.results.cursor(),
            result_phase: self.results.phase(),
            loading: self.suggestions.is_loading() || self.results.is_searching(),
            status: self.status,
        }
    }
}

/// Plain, owned view of the state after a transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub input: String,
    pub mode: Mode,
    pub suggestions_open: bool,
    pub suggestions: Vec<Suggestion>,
    pub suggestion_cursor: Cursor,
    pub candidates: Vec<Candidate>,
    pub result_cursor: Cursor,
    pub result_phase: ResultPhase,
    pub loading: bool,
    pub status: Option<Status>,
}

impl Snapshot {
    /// Cursor of the list owning navigation, if any.
    ///
    /// Only this cursor is rendered as highlighted.
    #[must_use]
    pub const fn live_cursor(&self) -> Option<usize> {
        match self.mode {
            Mode::Suggest => self.suggestion_cursor.index(),
            Mode::Results => self.result_cursor.index(),
            Mode::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::generation::Settlement;

    #[test]
    fn reset_restores_the_initial_view_and_invalidates_lookups() {
        let settings = LookupSettings::default();
        let mut state = AppState::new(settings);
        state.input = "Sofia".to_string();
        let suggest = state.suggestions.request();
        let find = state.results.request();
        let timer = state.blur_grace.arm();

        state.reset();

        assert_eq!(state.snapshot(), AppState::new(settings).snapshot());
        assert_eq!(state.suggestions.settle(suggest, &Ok(vec![])), Settlement::Stale);
        assert_eq!(state.results.settle(find, &Ok(vec![])), Settlement::Stale);
        assert!(!state.blur_grace.fire(timer));
    }

    #[test]
    fn loading_covers_both_lookups() {
        let mut state = AppState::new(LookupSettings::default());
        assert!(!state.snapshot().loading);
        state.results.request();
        let snapshot = state.snapshot();
        assert!(snapshot.loading);
        assert_eq!(snapshot.mode, Mode::Results);
        assert_eq!(snapshot.live_cursor(), None);
    }
}
