//! Error types for the geolookup plugin.
//!
//! Two layers of errors live here. [`GeocodeError`] describes why a single
//! remote lookup failed; it is cloneable so it can travel inside settlement
//! events and is always absorbed by the sessions. [`GeolookupError`] is the
//! crate-wide error returned by fallible setup and event handling.

use thiserror::Error;

/// Failure of a single remote geocoding lookup.
///
/// Every variant is treated the same way by the state machine: the session
/// whose lookup failed closes or blanks itself and surfaces a status line.
///
/// # Examples
///
/// ```
/// use geolookup::domain::GeocodeError;
///
/// let err = GeocodeError::Transport { status: 503 };
/// assert_eq!(err.to_string(), "geocoding service returned HTTP 503");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeocodeError {
    /// The service answered with a non-success HTTP status.
    #[error("geocoding service returned HTTP {status}")]
    Transport {
        /// HTTP status code reported by the host.
        status: u16,
    },

    /// The response body could not be decoded.
    #[error("malformed geocoding response: {0}")]
    Malformed(String),

    /// The service answered 200 but with an error envelope.
    #[error("geocoding service error {code}: {message}")]
    Service {
        /// Provider error code (e.g. 498 for an invalid token).
        code: i64,
        /// Provider error message.
        message: String,
    },
}

/// The main error type for geolookup operations.
#[derive(Debug, Error)]
pub enum GeolookupError {
    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid.
    ///
    /// Raised for malformed endpoint URLs and unparseable plugin options.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for geolookup operations.
pub type Result<T> = std::result::Result<T, GeolookupError>;
