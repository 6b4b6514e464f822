//! Suggestion domain model.

/// A ranked text completion for a partially typed address.
///
/// `magic_key` is the provider-issued token that disambiguates identical
/// display text. When present it must accompany the candidate lookup that
/// resolves this suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// Display text, also used as the single-line address to resolve.
    pub text: String,
    /// Opaque provider token, absent when the provider offers none.
    pub magic_key: Option<String>,
}

impl Suggestion {
    /// Creates a suggestion from display text and an optional token.
    ///
    /// # Examples
    ///
    /// ```
    /// use geolookup::domain::Suggestion;
    ///
    /// let s = Suggestion::new("Sofia, str. X", Some("k1"));
    /// assert_eq!(s.magic_key.as_deref(), Some("k1"));
    /// ```
    #[must_use]
    pub fn new(text: impl Into<String>, magic_key: Option<&str>) -> Self {
        Self {
            text: text.into(),
            magic_key: magic_key.map(str::to_string),
        }
    }
}
