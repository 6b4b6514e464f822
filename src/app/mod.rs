//! Application layer coordinating state, events, and actions.
//!
//! This module is the interaction core of the lookup widget. It sits between
//! the plugin runtime (main.rs) and the geocoding and presentation layers,
//! and never performs I/O itself.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! Keys / Timers / Lookup results → Events → handle_event → State → Actions → Side Effects
//!                                      ↑                                         ↓
//!                                      └──────────── Settlements ────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`cursor`]: Highlighted-row index shared by both lists
//! - [`debounce`]: Keystroke debouncer and one-shot timer tokens
//! - [`generation`]: Stale-response protection for remote lookups
//! - [`handler`]: Event processing and keyboard routing
//! - [`modes`]: Derived interaction mode
//! - [`results`]: Candidate list session
//! - [`state`]: Central state container and renderer snapshot
//! - [`suggestions`]: Suggestion list session
//!
//! # Example
//!
//! ```rust
//! use geolookup::app::{handle_event, Action, AppState, Event, LookupSettings};
//!
//! let mut state = AppState::new(LookupSettings::default());
//! let (_, actions) = handle_event(&mut state, &Event::InputChanged("Sofia".into()))?;
//! assert!(matches!(actions[0], Action::StartTimer { .. }));
//! # Ok::<(), geolookup::GeolookupError>(())
//! ```

pub mod actions;
pub mod cursor;
pub mod debounce;
pub mod generation;
pub mod handler;
pub mod modes;
pub mod results;
pub mod state;
pub mod suggestions;

pub use actions::Action;
pub use cursor::Cursor;
pub use debounce::{TimerKind, TimerToken};
pub use generation::Generation;
pub use handler::{handle_event, Event, NavKey};
pub use modes::{derive_mode, Mode};
pub use results::{ResultPhase, ResultSession};
pub use state::{AppState, LookupSettings, Snapshot, Status};
pub use suggestions::SuggestionSession;
