//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler never performs I/O. It returns a `Vec<Action>` and the
//! runtime (the Zellij shim in `main.rs`) executes them in order: starting
//! timers, issuing web requests, opening links, hiding the pane.
//!
//! # Example
//!
//! ```rust
//! use geolookup::app::{Action, Generation};
//!
//! let action = Action::FetchSuggestions {
//!     generation: Generation::from_raw(1),
//!     text: "Sofia str".to_string(),
//! };
//! assert!(matches!(action, Action::FetchSuggestions { .. }));
//! ```

use crate::app::debounce::{TimerKind, TimerToken};
use crate::app::generation::Generation;
use std::time::Duration;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Starts a host timer that must come back as
    /// [`Event::TimerElapsed`](crate::app::Event::TimerElapsed) with the same
    /// kind and token.
    StartTimer {
        kind: TimerKind,
        token: TimerToken,
        delay: Duration,
    },

    /// Issues the remote suggest lookup.
    ///
    /// The settlement must come back as
    /// [`Event::SuggestionsSettled`](crate::app::Event::SuggestionsSettled)
    /// carrying the same generation.
    FetchSuggestions {
        generation: Generation,
        text: String,
    },

    /// Issues the remote find-candidates lookup for a chosen suggestion.
    FindCandidates {
        generation: Generation,
        /// Single-line address (the suggestion text).
        single_line: String,
        /// Provider token of the chosen suggestion, forwarded when present.
        magic_key: Option<String>,
    },

    /// Opens a candidate's external map link.
    OpenExternalLink(String),
}
