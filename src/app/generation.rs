//! Request generation stamps.
//!
//! Every remote lookup is stamped with the generation current at the moment
//! it was issued. Issuing a new lookup advances the counter, which logically
//! cancels all earlier lookups of the same kind: when their completions
//! arrive, the stamp no longer matches and the completion is dropped.

use std::fmt;

/// Generation stamp carried by a lookup request and its settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    /// Wraps a raw counter value, e.g. one read back from a host request context.
    #[must_use]
    pub const fn from_raw(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic per-session generation counter.
#[derive(Debug, Clone, Default)]
pub struct GenerationCounter {
    current: Generation,
}

impl GenerationCounter {
    /// Advances the counter and returns the new current generation.
    pub fn advance(&mut self) -> Generation {
        self.current = Generation(self.current.0.wrapping_add(1));
        self.current
    }

    #[must_use]
    pub const fn current(&self) -> Generation {
        self.current
    }

    /// Returns `true` if `generation` is the most recently issued one.
    #[must_use]
    pub fn is_current(&self, generation: Generation) -> bool {
        self.current == generation
    }
}

/// Outcome of offering a settlement to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    /// The settlement matched the current generation and was applied.
    Applied,
    /// The settlement belonged to a superseded lookup and was dropped.
    Stale,
}
