//! User-facing strings.
//!
//! The core only knows [`Status`] kinds; this table turns them, and every
//! other label the renderer prints, into text for the configured language.

use crate::app::Status;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    English,
    Bulgarian,
}

impl Locale {
    /// Parses the `locale` plugin option (`en`, `bg`); unknown values are `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use geolookup::ui::Locale;
    ///
    /// assert_eq!(Locale::from_code("BG"), Some(Locale::Bulgarian));
    /// assert_eq!(Locale::from_code("fr"), None);
    /// ```
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" | "en-gb" | "english" => Some(Self::English),
            "bg" | "bg-bg" | "bulgarian" => Some(Self::Bulgarian),
            _ => None,
        }
    }

    #[must_use]
    pub fn status_text(self, status: Status) -> String {
        let text = match (self, status) {
            (Self::English, Status::NeedsMoreInput { min_chars }) => {
                return format!("Type at least {min_chars} characters.");
            }
            (Self::Bulgarian, Status::NeedsMoreInput { min_chars }) => {
                return format!("Въведи поне {min_chars} символа.");
            }
            (Self::English, Status::SearchingSuggestions) => "Looking for suggestions...",
            (Self::English, Status::NoSuggestions) => "No suggestions.",
            (Self::English, Status::SuggestionsFailed) => "Suggestions failed. Try again.",
            (Self::English, Status::SearchingResults) => "Searching for results...",
            (Self::English, Status::SearchFailed) => "Search failed. Try again.",
            (Self::Bulgarian, Status::SearchingSuggestions) => "Търся подсказки...",
            (Self::Bulgarian, Status::NoSuggestions) => "Няма подсказки.",
            (Self::Bulgarian, Status::SuggestionsFailed) => "Грешка при подсказките. Опитай пак.",
            (Self::Bulgarian, Status::SearchingResults) => "Търся резултати...",
            (Self::Bulgarian, Status::SearchFailed) => {
                "Грешка при търсенето на резултати. Опитай пак."
            }
        };
        text.to_string()
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::English => "Address lookup",
            Self::Bulgarian => "Търсене на адрес",
        }
    }

    #[must_use]
    pub const fn input_label(self) -> &'static str {
        match self {
            Self::English => "Address",
            Self::Bulgarian => "Адрес",
        }
    }

    #[must_use]
    pub const fn input_placeholder(self) -> &'static str {
        match self {
            Self::English => "e.g. Sofia, Vitosha 1",
            Self::Bulgarian => "напр. София, Витоша 1",
        }
    }

    #[must_use]
    pub const fn no_results(self) -> &'static str {
        match self {
            Self::English => "No results found.",
            Self::Bulgarian => "Няма намерени резултати.",
        }
    }

    #[must_use]
    pub const fn no_address(self) -> &'static str {
        match self {
            Self::English => "(no address)",
            Self::Bulgarian => "(без адрес)",
        }
    }

    #[must_use]
    pub const fn coordinates_label(self) -> &'static str {
        match self {
            Self::English => "Coords",
            Self::Bulgarian => "Коорд.",
        }
    }

    #[must_use]
    pub const fn open_in_maps(self) -> &'static str {
        match self {
            Self::English => "Open in Maps",
            Self::Bulgarian => "Отвори в Maps",
        }
    }

    #[must_use]
    pub const fn loading(self) -> &'static str {
        match self {
            Self::English => "loading",
            Self::Bulgarian => "зареждане",
        }
    }

    #[must_use]
    pub const fn keybindings(self) -> &'static str {
        match self {
            Self::English => "↑/↓: move | Enter: choose/open | Esc: clear | Ctrl+c: close",
            Self::Bulgarian => "↑/↓: избор | Enter: избери/отвори | Esc: изчисти | Ctrl+c: затвори",
        }
    }
}
