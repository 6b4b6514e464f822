//! Candidate domain model and derived presentation data.
//!
//! A [`Candidate`] is a fully resolved address match. Its location, when the
//! provider supplies geometry, is a WGS84 coordinate pair and is the only
//! source of the external map link: a candidate without a location has no
//! link at all.

use url::Url;

/// Base address of the external map viewer.
const MAPS_BASE_URL: &str = "https://www.google.com/maps";

/// Geographic coordinate pair (x = longitude, y = latitude) in WGS84.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub x: f64,
    pub y: f64,
}

/// A resolved address match.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub address: String,
    pub score: Option<f64>,
    pub location: Option<Location>,
}

impl Candidate {
    /// Returns the external map link for this candidate.
    ///
    /// The query is `latitude,longitude`. Returns `None` when the provider
    /// omitted geometry.
    ///
    /// # Examples
    ///
    /// ```
    /// use geolookup::domain::{Candidate, Location};
    ///
    /// let c = Candidate {
    ///     address: "Sofia, str. X 12".into(),
    ///     score: Some(100.0),
    ///     location: Some(Location { x: 23.3, y: 42.7 }),
    /// };
    /// assert_eq!(
    ///     c.maps_url().as_deref(),
    ///     Some("https://www.google.com/maps?q=42.7%2C23.3")
    /// );
    /// ```
    #[must_use]
    pub fn maps_url(&self) -> Option<String> {
        let location = self.location?;
        let mut url = Url::parse(MAPS_BASE_URL).ok()?;
        url.query_pairs_mut()
            .append_pair("q", &format!("{},{}", location.y, location.x));
        Some(url.into())
    }

    /// Formats the coordinates as `lat, lon` with six decimals.
    #[must_use]
    pub fn coordinates_text(&self) -> Option<String> {
        self.location
            .map(|loc| format!("{:.6}, {:.6}", loc.y, loc.x))
    }

    /// Formats the score without a trailing `.0` for whole numbers.
    #[must_use]
    pub fn score_text(&self) -> Option<String> {
        self.score.map(|score| {
            if score.fract() == 0.0 && score.abs() < 1e15 {
                format!("{score:.0}")
            } else {
                score.to_string()
            }
        })
    }
}
