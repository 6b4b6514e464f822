//! Suggestion session: the ranked completion list and its cursor.
//!
//! The session owns the current list, whether it is open, the cursor, and the
//! loading flag. Lookups are stamped by a [`GenerationCounter`]; settlements
//! for anything but the latest issued lookup are dropped without touching any
//! field, including the loading flag, so an out-of-order earlier response
//! cannot make the loader flicker.

use crate::app::cursor::Cursor;
use crate::app::generation::{Generation, GenerationCounter, Settlement};
use crate::domain::{GeocodeError, Suggestion};

#[derive(Debug, Clone, Default)]
pub struct SuggestionSession {
    generations: GenerationCounter,
    in_flight: Option<Generation>,
    items: Vec<Suggestion>,
    open: bool,
    cursor: Cursor,
}

impl SuggestionSession {
    #[must_use]
    pub fn items(&self) -> &[Suggestion] {
        &self.items
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    #[must_use]
    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Issues a new lookup and returns its stamp.
    pub fn request(&mut self) -> Generation {
        let generation = self.generations.advance();
        self.in_flight = Some(generation);
        generation
    }

    /// Applies a lookup settlement if it belongs to the latest request.
    ///
    /// A successful settlement replaces the list atomically, opens it when
    /// non-empty (closes it otherwise) and resets the cursor. A failure closes
    /// the list.
    pub fn settle(
        &mut self,
        generation: Generation,
        outcome: &Result<Vec<Suggestion>, GeocodeError>,
    ) -> Settlement {
        if !self.generations.is_current(generation) {
            return Settlement::Stale;
        }

        self.in_flight = None;
        self.cursor.clear();

        match outcome {
            Ok(items) => {
                self.items.clone_from(items);
                self.open = !self.items.is_empty();
            }
            Err(_) => {
                self.items.clear();
                self.open = false;
            }
        }

        Settlement::Applied
    }

    /// Moves the cursor while the list is open.
    pub fn move_cursor(&mut self, delta: isize) -> bool {
        self.open && self.cursor.step(delta, self.items.len())
    }

    /// Chooses the suggestion at `index`, closing the list.
    ///
    /// Returns `None` (and changes nothing) when the list is closed or the
    /// index is out of bounds.
    pub fn commit(&mut self, index: usize) -> Option<Suggestion> {
        if !self.open {
            return None;
        }
        let chosen = self.items.get(index).cloned()?;
        self.close();
        Some(chosen)
    }

    /// Clears list, cursor, and loading flag.
    pub fn close(&mut self) {
        self.items.clear();
        self.open = false;
        self.cursor.clear();
        self.in_flight = None;
    }

    /// Invalidates every in-flight lookup; their settlements become stale.
    pub fn cancel_pending(&mut self) {
        self.generations.advance();
        self.in_flight = None;
    }

    pub fn clear_cursor(&mut self) {
        self.cursor.clear();
    }
}
