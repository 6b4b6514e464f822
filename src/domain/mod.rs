//! Domain layer for the geolookup plugin.
//!
//! Plain data types produced by the geocoding provider, independent of
//! Zellij APIs and of the wire format.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`suggestion`]: Ranked text completions
//! - [`candidate`]: Resolved address matches and their map links

pub mod candidate;
pub mod error;
pub mod suggestion;

pub use candidate::{Candidate, Location};
pub use error::{GeocodeError, GeolookupError, Result};
pub use suggestion::Suggestion;
