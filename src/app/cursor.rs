//! List cursor with the shared navigation policy.
//!
//! Both sessions navigate their lists with the same rules:
//!
//! - the cursor starts unset;
//! - the first move from unset lands on index 0 whatever the direction;
//! - later moves clamp into `[0, len - 1]` (no wrap-around);
//! - moves on an empty list do nothing.

/// Index into the active list, or unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor(Option<usize>);

impl Cursor {
    /// An unset cursor.
    pub const UNSET: Self = Self(None);

    #[must_use]
    pub const fn index(self) -> Option<usize> {
        self.0
    }

    #[must_use]
    pub const fn is_set(self) -> bool {
        self.0.is_some()
    }

    pub fn clear(&mut self) {
        self.0 = None;
    }

    /// Moves the cursor by `delta` within a list of `len` items.
    ///
    /// Returns `false` when the list is empty and nothing moved.
    ///
    /// # Examples
    ///
    /// ```
    /// use geolookup::app::cursor::Cursor;
    ///
    /// let mut cursor = Cursor::UNSET;
    /// assert!(cursor.step(-1, 5));
    /// assert_eq!(cursor.index(), Some(0));
    /// ```
    pub fn step(&mut self, delta: isize, len: usize) -> bool {
        if len == 0 {
            return false;
        }

        let next = match self.0 {
            None => 0,
            Some(current) => {
                let max = len - 1;
                let moved = if delta.is_negative() {
                    current.saturating_sub(delta.unsigned_abs())
                } else {
                    current.saturating_add(delta.unsigned_abs())
                };
                moved.min(max)
            }
        };

        self.0 = Some(next);
        true
    }

    /// Places the cursor on `index` if it lies within a list of `len` items.
    pub fn set(&mut self, index: usize, len: usize) -> bool {
        if index >= len {
            return false;
        }
        self.0 = Some(index);
        true
    }
}
