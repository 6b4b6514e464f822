//! Infrastructure layer for sandbox and host runtime interactions.
//!
//! This module provides utilities for the Zellij plugin sandbox: where files
//! live (`/data` for plugin data, `/host` for the user's files) and how host
//! timers are mapped back to the state machine's timer tokens.

pub mod paths;
pub mod timers;

pub use paths::{get_data_dir, resolve_host_path, trace_file_in};
pub use timers::TimerQueue;
