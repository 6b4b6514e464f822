//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only entry point that mutates [`AppState`]. It
//! routes input, keyboard, pointer, focus, timer, and lookup-settlement
//! events to the owning session and returns the side effects the runtime
//! must perform.
//!
//! # Keyboard routing
//!
//! Navigation keys go to whichever list owns the current [`Mode`]:
//!
//! | Key | Suggest | Results |
//! |---|---|---|
//! | Down / Up | move suggestion cursor | move result cursor |
//! | Enter | commit the highlighted suggestion | open the highlighted result |
//! | Escape | close suggestions, clear cursors and status | clear cursors and status |
//!
//! In [`Mode::Idle`] the arrows and Enter do nothing; Escape still clears.
//!
//! # Example
//!
//! ```rust
//! use geolookup::app::{handle_event, AppState, Event, LookupSettings};
//!
//! let mut state = AppState::new(LookupSettings::default());
//! let (should_render, actions) = handle_event(&mut state, &Event::InputChanged("ab".into()))?;
//! assert!(should_render);
//! assert!(actions.is_empty());
//! # Ok::<(), geolookup::GeolookupError>(())
//! ```

use crate::app::actions::Action;
use crate::app::debounce::{Notify, TimerKind, TimerToken};
use crate::app::generation::{Generation, Settlement};
use crate::app::modes::Mode;
use crate::app::state::{AppState, Status};
use crate::domain::error::Result;
use crate::domain::{Candidate, GeocodeError, Suggestion};

/// Navigation keys understood by the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Down,
    Up,
    Enter,
    Escape,
}

/// Events delivered by the host runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The input text was replaced by the host.
    InputChanged(String),
    /// A printable character was typed into the core-owned buffer.
    Char(char),
    /// The last character of the buffer was deleted.
    Backspace,
    /// A navigation key was pressed.
    Key(NavKey),
    /// A suggestion row was clicked.
    SuggestionClicked(usize),
    /// A result row was clicked.
    ResultClicked(usize),
    /// The input gained focus.
    Focus,
    /// The input lost focus.
    Blur,
    /// The user interacted with something outside the widget.
    OutsideInteraction,
    /// A timer started by [`Action::StartTimer`] elapsed.
    TimerElapsed { kind: TimerKind, token: TimerToken },
    /// A suggest lookup settled.
    SuggestionsSettled {
        generation: Generation,
        outcome: std::result::Result<Vec<Suggestion>, GeocodeError>,
    },
    /// A find-candidates lookup settled.
    CandidatesSettled {
        generation: Generation,
        outcome: std::result::Result<Vec<Candidate>, GeocodeError>,
    },
    /// The user asked to hide the plugin; the widget starts over.
    CloseFocus,
}

type Transition = (bool, Vec<Action>);

fn unchanged() -> Transition {
    (false, vec![])
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// The boolean is `true` when the visible state changed and the runtime
/// should re-render. Stale lookup settlements and keys that act on nothing
/// return `false` with no actions.
///
/// # Errors
///
/// Reserved for transitions that can fail; lookup failures never surface
/// here because the sessions absorb them into the status line.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event, mode = ?state.mode()).entered();

    let transition = match event {
        Event::InputChanged(text) => {
            if state.input == *text {
                unchanged()
            } else {
                state.input.clone_from(text);
                input_changed(state)
            }
        }
        Event::Char(c) => {
            state.input.push(*c);
            input_changed(state)
        }
        Event::Backspace => {
            if state.input.pop().is_some() {
                input_changed(state)
            } else {
                unchanged()
            }
        }
        Event::Key(key) => route_key(state, *key),
        Event::SuggestionClicked(index) => commit_suggestion(state, *index),
        Event::ResultClicked(index) => {
            if state.results.set_cursor(*index) {
                let (_, actions) = activate_result(state, *index);
                (true, actions)
            } else {
                tracing::debug!(index, "click outside of result bounds");
                unchanged()
            }
        }
        Event::Focus => {
            state.blur_grace.disarm();
            unchanged()
        }
        Event::Blur => {
            let token = state.blur_grace.arm();
            (
                false,
                vec![Action::StartTimer {
                    kind: TimerKind::BlurGrace,
                    token,
                    delay: state.settings.blur_grace,
                }],
            )
        }
        Event::OutsideInteraction => close_suggestions(state),
        Event::TimerElapsed { kind, token } => timer_elapsed(state, *kind, *token),
        Event::SuggestionsSettled { generation, outcome } => {
            suggestions_settled(state, *generation, outcome)
        }
        Event::CandidatesSettled { generation, outcome } => {
            candidates_settled(state, *generation, outcome)
        }
        Event::CloseFocus => {
            state.reset();
            (true, vec![Action::CloseFocus])
        }
    };

    Ok(transition)
}

fn input_changed(state: &mut AppState) -> Transition {
    match state.debouncer.notify(&state.input) {
        Notify::TooShort => {
            tracing::debug!(input_len = state.input.chars().count(), "input below minimum length");
            state.suggestions.cancel_pending();
            state.suggestions.close();
            state.results.reset();
            state.status = Some(Status::NeedsMoreInput {
                min_chars: state.settings.min_chars,
            });
            (true, vec![])
        }
        Notify::Armed(token) => {
            tracing::trace!(input = %state.input, "debounce armed");
            state.status = Some(Status::SearchingSuggestions);
            (
                true,
                vec![Action::StartTimer {
                    kind: TimerKind::Debounce,
                    token,
                    delay: state.debouncer.window(),
                }],
            )
        }
    }
}

fn timer_elapsed(state: &mut AppState, kind: TimerKind, token: TimerToken) -> Transition {
    match kind {
        TimerKind::Debounce => {
            let Some(text) = state.debouncer.elapsed(token) else {
                tracing::trace!(token = token.raw(), "superseded debounce timer");
                return unchanged();
            };
            let generation = state.suggestions.request();
            tracing::debug!(%generation, text = %text, "requesting suggestions");
            (true, vec![Action::FetchSuggestions { generation, text }])
        }
        TimerKind::BlurGrace => {
            if state.blur_grace.fire(token) {
                close_suggestions(state)
            } else {
                unchanged()
            }
        }
    }
}

fn suggestions_settled(
    state: &mut AppState,
    generation: Generation,
    outcome: &std::result::Result<Vec<Suggestion>, GeocodeError>,
) -> Transition {
    if state.suggestions.settle(generation, outcome) == Settlement::Stale {
        tracing::debug!(%generation, "dropping stale suggestion settlement");
        return unchanged();
    }

    match outcome {
        Ok(items) => {
            tracing::debug!(%generation, count = items.len(), "suggestions resolved");
            state.results.reset();
            state.status = items.is_empty().then_some(Status::NoSuggestions);
        }
        Err(e) => {
            tracing::warn!(%generation, error = %e, "suggestion lookup failed");
            state.status = Some(Status::SuggestionsFailed);
        }
    }

    (true, vec![])
}

fn candidates_settled(
    state: &mut AppState,
    generation: Generation,
    outcome: &std::result::Result<Vec<Candidate>, GeocodeError>,
) -> Transition {
    if state.results.settle(generation, outcome) == Settlement::Stale {
        tracing::debug!(%generation, "dropping stale candidate settlement");
        return unchanged();
    }

    match outcome {
        Ok(candidates) => {
            tracing::debug!(%generation, count = candidates.len(), "candidates resolved");
            state.status = None;
        }
        Err(e) => {
            tracing::warn!(%generation, error = %e, "candidate search failed");
            state.status = Some(Status::SearchFailed);
        }
    }

    (true, vec![])
}

fn route_key(state: &mut AppState, key: NavKey) -> Transition {
    let mode = state.mode();

    match (key, mode) {
        (NavKey::Escape, _) => escape(state, mode),
        (_, Mode::Idle) => unchanged(),
        (NavKey::Down, Mode::Suggest) => (state.suggestions.move_cursor(1), vec![]),
        (NavKey::Up, Mode::Suggest) => (state.suggestions.move_cursor(-1), vec![]),
        (NavKey::Down, Mode::Results) => (state.results.move_cursor(1), vec![]),
        (NavKey::Up, Mode::Results) => (state.results.move_cursor(-1), vec![]),
        (NavKey::Enter, Mode::Suggest) => state
            .suggestions
            .cursor()
            .index()
            .map_or_else(unchanged, |index| commit_suggestion(state, index)),
        (NavKey::Enter, Mode::Results) => state
            .results
            .cursor()
            .index()
            .map_or_else(unchanged, |index| activate_result(state, index)),
    }
}

fn escape(state: &mut AppState, mode: Mode) -> Transition {
    if mode == Mode::Suggest {
        state.suggestions.close();
    }
    state.suggestions.clear_cursor();
    state.results.clear_cursor();
    state.status = None;
    (true, vec![])
}

fn commit_suggestion(state: &mut AppState, index: usize) -> Transition {
    let Some(chosen) = state.suggestions.commit(index) else {
        tracing::debug!(index, "commit ignored: list closed or index out of bounds");
        return unchanged();
    };

    state.suggestions.cancel_pending();
    state.debouncer.cancel();
    state.blur_grace.disarm();
    state.input.clone_from(&chosen.text);

    let generation = state.results.request();
    state.status = Some(Status::SearchingResults);
    tracing::debug!(
        %generation,
        text = %chosen.text,
        has_magic_key = chosen.magic_key.is_some(),
        "suggestion committed"
    );

    (
        true,
        vec![Action::FindCandidates {
            generation,
            single_line: chosen.text,
            magic_key: chosen.magic_key,
        }],
    )
}

fn activate_result(state: &AppState, index: usize) -> Transition {
    state.results.activate(index).map_or_else(
        || {
            tracing::debug!(index, "result has no link");
            unchanged()
        },
        |url| {
            tracing::debug!(index, url = %url, "opening result link");
            (false, vec![Action::OpenExternalLink(url)])
        },
    )
}

fn close_suggestions(state: &mut AppState) -> Transition {
    let visible = state.suggestions.is_open() || state.suggestions.is_loading();
    state.suggestions.close();
    (visible, vec![])
}
