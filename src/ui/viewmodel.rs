//! View model computed from a [`Snapshot`].
//!
//! The view model is display-ready data only: localized strings, the visible
//! window of the active list, and highlight ranges. It also owns the screen
//! layout so pointer hits can be mapped back to list indices with the same
//! geometry the renderer used.
//!
//! # Layout
//!
//! ```text
//! row 1        header (title, loading indicator)
//! row 2        border
//! rows 3-5     input box
//! row 6        status line
//! row 7        border
//! rows 8..     list window (suggestions or results) / empty state
//! row rows-1   border
//! row rows     footer
//! ```

use crate::app::{Mode, ResultPhase, Snapshot};
use crate::domain::{Candidate, Suggestion};
use crate::ui::locale::Locale;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::ops::Range;

pub const HEADER_ROW: usize = 1;
pub const INPUT_TOP_ROW: usize = 3;
pub const INPUT_HEIGHT: usize = 3;
pub const STATUS_ROW: usize = 6;
pub const LIST_TOP_ROW: usize = 8;

/// Rows available to the list window on a pane of `rows` lines.
#[must_use]
pub const fn list_capacity(rows: usize) -> usize {
    rows.saturating_sub(LIST_TOP_ROW + 1)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    pub header: HeaderInfo,
    pub input: InputInfo,
    pub status: Option<StatusLine>,
    pub list: ListView,
    pub empty_state: Option<EmptyState>,
    pub footer: FooterInfo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    /// Loading indicator text, present while a lookup is pending.
    pub loading: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputInfo {
    pub label: String,
    pub text: String,
    /// Shown dimmed while `text` is empty.
    pub placeholder: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub is_error: bool,
}

/// Which list the window shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Suggestions,
    Results,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    /// `None` when no list is on screen.
    pub kind: Option<ListKind>,
    /// List index of the first visible row.
    pub first_index: usize,
    pub rows: Vec<DisplayItem>,
}

/// One visible list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    pub primary: String,
    /// Right-hand details (score, coordinates) for results.
    pub secondary: Option<String>,
    pub is_selected: bool,
    /// Character ranges `(start, end)` of the typed text inside `primary`.
    pub highlight_ranges: Vec<(usize, usize)>,
    /// Link label for results that can be opened.
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}

/// What a pointer click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Suggestion(usize),
    Result(usize),
    Input,
    /// Header, status line, borders, footer or unused list space.
    Chrome,
    /// Not part of the drawn widget.
    Outside,
}

impl UIViewModel {
    /// Computes the view model for a pane of `rows` x `cols`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use geolookup::app::{AppState, LookupSettings};
    /// use geolookup::ui::{Locale, UIViewModel};
    ///
    /// let state = AppState::new(LookupSettings::default());
    /// let vm = UIViewModel::from_snapshot(&state.snapshot(), Locale::English, 24, 80);
    /// assert_eq!(vm.status.map(|s| s.text).as_deref(), Some("Type at least 3 characters."));
    /// assert!(vm.list.rows.is_empty());
    /// ```
    #[must_use]
    pub fn from_snapshot(snapshot: &Snapshot, locale: Locale, rows: usize, cols: usize) -> Self {
        let capacity = list_capacity(rows);
        let live_cursor = snapshot.live_cursor();

        let (list, empty_state) = match snapshot.mode {
            Mode::Suggest => (
                suggestion_window(&snapshot.suggestions, &snapshot.input, live_cursor, capacity),
                None,
            ),
            Mode::Results => {
                let list = result_window(&snapshot.candidates, locale, live_cursor, capacity, cols);
                let empty = (snapshot.result_phase == ResultPhase::Ready
                    && snapshot.candidates.is_empty())
                .then(|| EmptyState {
                    message: locale.no_results().to_string(),
                });
                (list, empty)
            }
            Mode::Idle => (
                ListView {
                    kind: None,
                    first_index: 0,
                    rows: Vec::new(),
                },
                None,
            ),
        };

        Self {
            header: HeaderInfo {
                title: locale.title().to_string(),
                loading: snapshot.loading.then(|| locale.loading().to_string()),
            },
            input: InputInfo {
                label: locale.input_label().to_string(),
                text: snapshot.input.clone(),
                placeholder: locale.input_placeholder().to_string(),
            },
            status: snapshot.status.map(|status| StatusLine {
                text: locale.status_text(status),
                is_error: status.is_error(),
            }),
            list,
            empty_state,
            footer: FooterInfo {
                keybindings: locale.keybindings().to_string(),
            },
        }
    }

    /// Maps a 0-based pane line to the element drawn there.
    ///
    /// Every line of the pane belongs to the widget, so lines without an
    /// input or list row are [`Hit::Chrome`], never [`Hit::Outside`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use geolookup::app::{AppState, LookupSettings};
    /// use geolookup::ui::{Hit, Locale, UIViewModel};
    ///
    /// let state = AppState::new(LookupSettings::default());
    /// let vm = UIViewModel::from_snapshot(&state.snapshot(), Locale::English, 24, 80);
    /// assert_eq!(vm.hit_test(3), Hit::Input);
    /// assert_eq!(vm.hit_test(0), Hit::Chrome);
    /// ```
    #[must_use]
    pub fn hit_test(&self, line: usize) -> Hit {
        let row = line + 1;

        if (INPUT_TOP_ROW..INPUT_TOP_ROW + INPUT_HEIGHT).contains(&row) {
            return Hit::Input;
        }

        let Some(kind) = self.list.kind else {
            return Hit::Chrome;
        };
        match row.checked_sub(LIST_TOP_ROW) {
            Some(offset) if offset < self.list.rows.len() => {
                let index = self.list.first_index + offset;
                match kind {
                    ListKind::Suggestions => Hit::Suggestion(index),
                    ListKind::Results => Hit::Result(index),
                }
            }
            _ => Hit::Chrome,
        }
    }
}

/// Visible slice of a list of `len` items keeping `cursor` centered.
#[must_use]
pub fn visible_window(len: usize, cursor: Option<usize>, capacity: usize) -> Range<usize> {
    if len <= capacity {
        return 0..len;
    }
    let start = cursor
        .map_or(0, |c| c.saturating_sub(capacity / 2))
        .min(len - capacity);
    start..start + capacity
}

fn suggestion_window(
    suggestions: &[Suggestion],
    input: &str,
    cursor: Option<usize>,
    capacity: usize,
) -> ListView {
    let window = visible_window(suggestions.len(), cursor, capacity);
    let matcher = SkimMatcherV2::default().ignore_case();
    let query = input.trim();

    let rows = suggestions[window.clone()]
        .iter()
        .enumerate()
        .map(|(offset, suggestion)| DisplayItem {
            primary: suggestion.text.clone(),
            secondary: None,
            is_selected: cursor == Some(window.start + offset),
            highlight_ranges: highlight_ranges(&matcher, &suggestion.text, query),
            link: None,
        })
        .collect();

    ListView {
        kind: Some(ListKind::Suggestions),
        first_index: window.start,
        rows,
    }
}

fn result_window(
    candidates: &[Candidate],
    locale: Locale,
    cursor: Option<usize>,
    capacity: usize,
    cols: usize,
) -> ListView {
    let window = visible_window(candidates.len(), cursor, capacity);

    let rows = candidates[window.clone()]
        .iter()
        .enumerate()
        .map(|(offset, candidate)| {
            let primary = if candidate.address.is_empty() {
                locale.no_address().to_string()
            } else {
                candidate.address.clone()
            };
            let score = candidate.score_text().unwrap_or_else(|| "—".to_string());
            let coordinates = candidate
                .coordinates_text()
                .unwrap_or_else(|| "—".to_string());
            let secondary = if cols >= 60 {
                format!("Score: {score} • {}: {coordinates}", locale.coordinates_label())
            } else {
                format!("Score: {score}")
            };

            DisplayItem {
                primary,
                secondary: Some(secondary),
                is_selected: cursor == Some(window.start + offset),
                highlight_ranges: Vec::new(),
                link: candidate
                    .location
                    .map(|_| locale.open_in_maps().to_string()),
            }
        })
        .collect();

    ListView {
        kind: Some(ListKind::Results),
        first_index: window.start,
        rows,
    }
}

/// Collapses matched character indices into contiguous `(start, end)` ranges.
fn highlight_ranges(matcher: &SkimMatcherV2, text: &str, query: &str) -> Vec<(usize, usize)> {
    if query.is_empty() {
        return Vec::new();
    }
    let Some((_, indices)) = matcher.fuzzy_indices(text, query) else {
        return Vec::new();
    };

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for index in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == index => *end += 1,
            _ => ranges.push((index, index + 1)),
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{handle_event, AppState, Event, LookupSettings, NavKey, Status};
    use crate::domain::Location;

    fn suggest_state(texts: &[&str]) -> AppState {
        let mut state = AppState::new(LookupSettings::default());
        state.input = "sof".to_string();
        let generation = state.suggestions.request();
        let items = texts.iter().map(|t| Suggestion::new(*t, None)).collect();
        handle_event(&mut state, &Event::SuggestionsSettled { generation, outcome: Ok(items) })
            .expect("settles");
        state
    }

    #[test]
    fn window_follows_cursor() {
        assert_eq!(visible_window(5, None, 10), 0..5);
        assert_eq!(visible_window(20, None, 4), 0..4);
        assert_eq!(visible_window(20, Some(10), 4), 8..12);
        assert_eq!(visible_window(20, Some(19), 4), 16..20);
    }

    #[test]
    fn suggestion_rows_highlight_typed_text() {
        let state = suggest_state(&["Sofia, str. X", "Plovdiv"]);
        let vm = UIViewModel::from_snapshot(&state.snapshot(), Locale::English, 24, 80);

        assert_eq!(vm.list.kind, Some(ListKind::Suggestions));
        assert_eq!(vm.list.rows[0].highlight_ranges, vec![(0, 3)]);
        assert!(vm.list.rows.iter().all(|r| !r.is_selected));
    }

    #[test]
    fn only_live_cursor_is_highlighted() {
        let mut state = suggest_state(&["a", "b", "c"]);
        handle_event(&mut state, &Event::Key(NavKey::Down)).expect("moves");
        handle_event(&mut state, &Event::Key(NavKey::Down)).expect("moves");

        let vm = UIViewModel::from_snapshot(&state.snapshot(), Locale::English, 24, 80);
        let selected: Vec<bool> = vm.list.rows.iter().map(|r| r.is_selected).collect();
        assert_eq!(selected, vec![false, true, false]);
    }

    #[test]
    fn hit_test_maps_rows_through_the_window() {
        let texts: Vec<String> = (0..12).map(|i| format!("street {i}")).collect();
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let mut state = suggest_state(&refs);
        for _ in 0..10 {
            handle_event(&mut state, &Event::Key(NavKey::Down)).expect("moves");
        }

        // 13 rows leave a window of 4 list rows.
        let vm = UIViewModel::from_snapshot(&state.snapshot(), Locale::English, 13, 80);
        assert_eq!(vm.list.first_index, 7);
        assert_eq!(vm.hit_test(LIST_TOP_ROW - 1), Hit::Suggestion(7));
        assert_eq!(vm.hit_test(LIST_TOP_ROW + 2), Hit::Suggestion(10));
        assert_eq!(vm.hit_test(LIST_TOP_ROW + 3), Hit::Chrome);
    }

    #[test]
    fn clicks_on_widget_chrome_are_not_outside() {
        let state = suggest_state(&["a", "b"]);
        let vm = UIViewModel::from_snapshot(&state.snapshot(), Locale::English, 24, 80);

        for row in [HEADER_ROW, INPUT_TOP_ROW - 1, STATUS_ROW, LIST_TOP_ROW - 1, 23, 24] {
            assert_eq!(vm.hit_test(row - 1), Hit::Chrome, "row {row}");
        }
        // Unused list space below the last suggestion.
        assert_eq!(vm.hit_test(LIST_TOP_ROW + 1), Hit::Chrome);
        assert_eq!(vm.hit_test(LIST_TOP_ROW), Hit::Suggestion(1));
    }

    #[test]
    fn empty_results_show_placeholder() {
        let mut state = AppState::new(LookupSettings::default());
        let generation = state.results.request();
        handle_event(&mut state, &Event::CandidatesSettled { generation, outcome: Ok(vec![]) })
            .expect("settles");

        let vm = UIViewModel::from_snapshot(&state.snapshot(), Locale::Bulgarian, 24, 80);
        assert_eq!(
            vm.empty_state.map(|e| e.message).as_deref(),
            Some("Няма намерени резултати.")
        );
    }

    #[test]
    fn result_rows_format_missing_fields() {
        let mut state = AppState::new(LookupSettings::default());
        let generation = state.results.request();
        let candidates = vec![
            Candidate {
                address: String::new(),
                score: None,
                location: None,
            },
            Candidate {
                address: "Sofia, str. X 12".to_string(),
                score: Some(100.0),
                location: Some(Location { x: 23.3, y: 42.7 }),
            },
        ];
        handle_event(&mut state, &Event::CandidatesSettled { generation, outcome: Ok(candidates) })
            .expect("settles");

        let vm = UIViewModel::from_snapshot(&state.snapshot(), Locale::English, 24, 80);
        let rows = &vm.list.rows;
        assert_eq!(rows[0].primary, "(no address)");
        assert_eq!(rows[0].secondary.as_deref(), Some("Score: — • Coords: —"));
        assert_eq!(rows[0].link, None);
        assert_eq!(
            rows[1].secondary.as_deref(),
            Some("Score: 100 • Coords: 42.700000, 23.300000")
        );
        assert!(rows[1].link.is_some());
        assert_eq!(vm.status, None);
    }

    #[test]
    fn errors_are_flagged_and_loading_shows_in_header() {
        let mut state = AppState::new(LookupSettings::default());
        state.status = Some(Status::SearchFailed);
        let vm = UIViewModel::from_snapshot(&state.snapshot(), Locale::English, 24, 80);
        assert!(vm.status.as_ref().is_some_and(|s| s.is_error));
        assert_eq!(vm.header.loading, None);

        state.suggestions.request();
        let vm = UIViewModel::from_snapshot(&state.snapshot(), Locale::English, 24, 80);
        assert_eq!(vm.header.loading.as_deref(), Some("loading"));
    }
}
