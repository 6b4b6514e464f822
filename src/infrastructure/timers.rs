//! Bookkeeping for host timers.
//!
//! Zellij's `set_timeout` cannot be cancelled and its `Timer` event only
//! reports the elapsed duration. The queue remembers which kind and token
//! each timer was started for, so the event can be turned back into
//! [`Event::TimerElapsed`](crate::app::Event::TimerElapsed). Tokens of
//! superseded timers are still returned; the debouncer and the blur grace
//! timer ignore them.

use crate::app::{TimerKind, TimerToken};
use std::collections::VecDeque;

/// Durations reported by the host are compared with this tolerance.
const EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingTimer {
    kind: TimerKind,
    token: TimerToken,
    secs: f64,
}

#[derive(Debug, Default)]
pub struct TimerQueue {
    pending: VecDeque<PendingTimer>,
}

impl TimerQueue {
    /// Records a timer started with `set_timeout(secs)`.
    pub fn push(&mut self, kind: TimerKind, token: TimerToken, secs: f64) {
        self.pending.push_back(PendingTimer { kind, token, secs });
    }

    /// Takes the oldest pending timer whose duration matches `secs`.
    ///
    /// Timers of equal duration fire in the order they were started, so the
    /// oldest match is the one that elapsed.
    pub fn pop_elapsed(&mut self, secs: f64) -> Option<(TimerKind, TimerToken)> {
        let index = self
            .pending
            .iter()
            .position(|timer| (timer.secs - secs).abs() < EPSILON)?;
        self.pending
            .remove(index)
            .map(|timer| (timer.kind, timer.token))
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
