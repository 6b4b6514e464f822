//! Interaction mode: which list currently owns keyboard navigation.
//!
//! The mode is never stored. It is recomputed from the two sessions on every
//! use, so it cannot drift from what is actually on screen:
//!
//! - **Suggest** while the suggestion list is open;
//! - otherwise **Results** while the result session is active (a suggestion
//!   has been chosen, including the moment right after the choice before
//!   candidates arrive, and a failed or empty search);
//! - otherwise **Idle**, where navigation keys do nothing.
//!
//! # Example
//!
//! ```rust
//! use geolookup::app::modes::{derive_mode, Mode};
//! use geolookup::app::{ResultSession, SuggestionSession};
//!
//! let mode = derive_mode(&SuggestionSession::default(), &ResultSession::default());
//! assert_eq!(mode, Mode::Idle);
//! ```

use crate::app::results::ResultSession;
use crate::app::suggestions::SuggestionSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Suggestion browsing.
    Suggest,
    /// Result browsing.
    Results,
    /// No navigable list.
    Idle,
}

#[must_use]
pub fn derive_mode(suggestions: &SuggestionSession, results: &ResultSession) -> Mode {
    if suggestions.is_open() {
        Mode::Suggest
    } else if results.is_active() {
        Mode::Results
    } else {
        Mode::Idle
    }
}
