//! Debounced input triggering and token-scoped one-shot timers.
//!
//! The host cannot cancel a timer once it is started, so cancellation is
//! expressed with tokens: each arm hands out a fresh [`TimerToken`] and only
//! the most recently armed token is honoured when timers elapse. Disarming
//! (or dropping the owner) turns every outstanding timer into a no-op.

use std::time::Duration;

/// Identifies one armed timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

impl TimerToken {
    #[must_use]
    pub const fn from_raw(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Which one-shot timer an elapsed event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Debounce window after a keystroke.
    Debounce,
    /// Grace delay between losing focus and closing the suggestion list.
    BlurGrace,
}

/// A single re-armable timer that honours only its latest arming.
#[derive(Debug, Clone, Default)]
pub struct OneShot {
    issued: u64,
    armed: Option<TimerToken>,
}

impl OneShot {
    /// Arms the timer, superseding any previous arming.
    pub fn arm(&mut self) -> TimerToken {
        self.issued = self.issued.wrapping_add(1);
        let token = TimerToken(self.issued);
        self.armed = Some(token);
        token
    }

    pub fn disarm(&mut self) {
        self.armed = None;
    }

    #[cfg(test)]
    pub const fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Consumes the arming if `token` is the armed one.
    ///
    /// Returns `true` at most once per arming.
    pub fn fire(&mut self, token: TimerToken) -> bool {
        if self.armed == Some(token) {
            self.armed = None;
            true
        } else {
            false
        }
    }
}

/// Result of feeding new input text to the [`Debouncer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notify {
    /// The trimmed text is below the minimum length; nothing was armed and
    /// any pending trigger was cancelled.
    TooShort,
    /// A trigger was armed; the host must start a timer carrying this token.
    Armed(TimerToken),
}

/// Coalesces rapid input changes into a single delayed trigger.
#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    min_chars: usize,
    timer: OneShot,
    latest: Option<String>,
}

impl Debouncer {
    #[must_use]
    pub fn new(window: Duration, min_chars: usize) -> Self {
        Self {
            window,
            min_chars,
            timer: OneShot::default(),
            latest: None,
        }
    }

    #[must_use]
    pub const fn window(&self) -> Duration {
        self.window
    }

    /// Records `text` as the latest input and re-arms the trigger.
    ///
    /// The length check counts characters of the trimmed text, so Cyrillic
    /// input is measured the same way as ASCII.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    /// use geolookup::app::debounce::{Debouncer, Notify};
    ///
    /// let mut debouncer = Debouncer::new(Duration::from_millis(300), 3);
    /// assert_eq!(debouncer.notify("ab"), Notify::TooShort);
    /// assert!(matches!(debouncer.notify("abc"), Notify::Armed(_)));
    /// ```
    pub fn notify(&mut self, text: &str) -> Notify {
        let trimmed = text.trim();

        if trimmed.chars().count() < self.min_chars {
            self.cancel();
            return Notify::TooShort;
        }

        self.latest = Some(trimmed.to_string());
        Notify::Armed(self.timer.arm())
    }

    /// Fires the trigger for `token`, yielding the text to look up.
    ///
    /// Returns `None` for superseded or cancelled timers.
    pub fn elapsed(&mut self, token: TimerToken) -> Option<String> {
        if self.timer.fire(token) {
            self.latest.take()
        } else {
            None
        }
    }

    pub fn cancel(&mut self) {
        self.timer.disarm();
        self.latest = None;
    }

    #[cfg(test)]
    pub const fn is_pending(&self) -> bool {
        self.timer.is_armed()
    }
}
