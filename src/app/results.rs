//! Result session: candidates produced by resolving a chosen suggestion.

use crate::app::cursor::Cursor;
use crate::app::generation::{Generation, GenerationCounter, Settlement};
use crate::domain::{Candidate, GeocodeError};

/// Maximum number of candidates kept for display.
pub const MAX_CANDIDATES: usize = 20;

/// Lifecycle of the result session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultPhase {
    /// No suggestion has been resolved since the last reset.
    #[default]
    Idle,
    /// A find-candidates lookup is in flight.
    Searching(Generation),
    /// The latest lookup succeeded (possibly with zero candidates).
    Ready,
    /// The latest lookup failed; the list is empty.
    Failed,
}

#[derive(Debug, Clone, Default)]
pub struct ResultSession {
    generations: GenerationCounter,
    phase: ResultPhase,
    items: Vec<Candidate>,
    cursor: Cursor,
}

impl ResultSession {
    #[must_use]
    pub fn items(&self) -> &[Candidate] {
        &self.items
    }

    #[must_use]
    pub const fn phase(&self) -> ResultPhase {
        self.phase
    }

    #[must_use]
    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    #[must_use]
    pub const fn is_searching(&self) -> bool {
        matches!(self.phase, ResultPhase::Searching(_))
    }

    /// Returns `true` once a suggestion has been chosen, until the next reset.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.phase != ResultPhase::Idle
    }

    /// Starts a new search, discarding the previous list.
    pub fn request(&mut self) -> Generation {
        let generation = self.generations.advance();
        self.phase = ResultPhase::Searching(generation);
        self.items.clear();
        self.cursor.clear();
        generation
    }

    pub fn settle(
        &mut self,
        generation: Generation,
        outcome: &Result<Vec<Candidate>, GeocodeError>,
    ) -> Settlement {
        if !self.generations.is_current(generation) {
            return Settlement::Stale;
        }

        self.cursor.clear();
        match outcome {
            Ok(candidates) => {
                self.items = candidates.iter().take(MAX_CANDIDATES).cloned().collect();
                self.phase = ResultPhase::Ready;
            }
            Err(_) => {
                self.items.clear();
                self.phase = ResultPhase::Failed;
            }
        }

        Settlement::Applied
    }

    pub fn move_cursor(&mut self, delta: isize) -> bool {
        self.cursor.step(delta, self.items.len())
    }

    /// Pointer-driven selection.
    pub fn set_cursor(&mut self, index: usize) -> bool {
        self.cursor.set(index, self.items.len())
    }

    /// Returns the external link of the candidate at `index`.
    ///
    /// `None` when the index is out of bounds or the candidate has no
    /// location, in which case activation is a no-op.
    #[must_use]
    pub fn activate(&self, index: usize) -> Option<String> {
        self.items.get(index).and_then(Candidate::maps_url)
    }

    pub fn clear_cursor(&mut self) {
        self.cursor.clear();
    }

    /// Drops the list and invalidates any in-flight search.
    pub fn reset(&mut self) {
        self.generations.advance();
        self.phase = ResultPhase::Idle;
        self.items.clear();
        self.cursor.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Location;

    fn candidate(address: &str, location: Option<Location>) -> Candidate {
        Candidate {
            address: address.to_string(),
            score: Some(100.0),
            location,
        }
    }

    #[test]
    fn success_truncates_to_display_maximum() {
        let mut session = ResultSession::default();
        let generation = session.request();
        let many: Vec<Candidate> = (0..30).map(|i| candidate(&format!("addr {i}"), None)).collect();

        session.settle(generation, &Ok(many));
        assert_eq!(session.items().len(), MAX_CANDIDATES);
        assert_eq!(session.phase(), ResultPhase::Ready);
        assert_eq!(session.items()[19].address, "addr 19");
    }

    #[test]
    fn empty_success_is_ready_not_failed() {
        let mut session = ResultSession::default();
        let generation = session.request();
        session.settle(generation, &Ok(vec![]));
        assert_eq!(session.phase(), ResultPhase::Ready);
        assert!(session.is_active());
    }

    #[test]
    fn failure_leaves_list_empty_and_active() {
        let mut session = ResultSession::default();
        let generation = session.request();
        session.settle(generation, &Err(GeocodeError::Transport { status: 502 }));
        assert_eq!(session.phase(), ResultPhase::Failed);
        assert!(session.items().is_empty());
        assert!(session.is_active());
    }

    #[test]
    fn out_of_order_settlements_keep_latest() {
        let mut session = ResultSession::default();
        let a = session.request();
        let b = session.request();

        session.settle(b, &Ok(vec![candidate("B", None)]));
        assert_eq!(session.settle(a, &Ok(vec![candidate("A", None)])), Settlement::Stale);
        assert_eq!(session.items()[0].address, "B");
    }

    #[test]
    fn activate_without_location_is_noop() {
        let mut session = ResultSession::default();
        let generation = session.request();
        session.settle(
            generation,
            &Ok(vec![
                candidate("no geometry", None),
                candidate("with geometry", Some(Location { x: 23.3, y: 42.7 })),
            ]),
        );

        assert_eq!(session.activate(0), None);
        assert!(session.activate(1).is_some());
        assert_eq!(session.activate(5), None);
    }

    #[test]
    fn reset_invalidates_in_flight_search() {
        let mut session = ResultSession::default();
        let generation = session.request();
        session.reset();
        assert_eq!(session.settle(generation, &Ok(vec![candidate("late", None)])), Settlement::Stale);
        assert!(!session.is_active());
    }
}
