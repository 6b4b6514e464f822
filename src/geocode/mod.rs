//! Geocoding service integration.
//!
//! The plugin cannot block on network I/O, so this layer is split in two
//! halves around the host's asynchronous `web_request`:
//!
//! - [`client`]: builds suggest and find-candidates URLs from the config
//! - [`response`]: decodes response bodies into domain types
//! - [`tag`]: identifies a response with the lookup and generation that issued it

pub mod client;
pub mod response;
pub mod tag;

pub use client::{GeocodeClient, DEFAULT_FIND_URL, DEFAULT_SUGGEST_URL};
pub use response::{decode_candidates, decode_suggestions};
pub use tag::{LookupKind, RequestTag, TraceContext};
