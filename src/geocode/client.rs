//! Request builder for the ArcGIS World geocoding service.
//!
//! The client only builds URLs; the plugin runtime issues them with the host's
//! `web_request` and feeds the body back through
//! [`decode_suggestions`](crate::geocode::decode_suggestions) or
//! [`decode_candidates`](crate::geocode::decode_candidates).

use crate::app::results::MAX_CANDIDATES;
use crate::domain::{GeolookupError, Result};
use crate::Config;
use url::Url;

/// Default suggest endpoint.
pub const DEFAULT_SUGGEST_URL: &str =
    "https://geocode.arcgis.com/arcgis/rest/services/World/GeocodeServer/suggest";

/// Default find-address-candidates endpoint.
pub const DEFAULT_FIND_URL: &str =
    "https://geocode.arcgis.com/arcgis/rest/services/World/GeocodeServer/findAddressCandidates";

/// Spatial reference requested for candidate locations (WGS84).
const OUT_SR: &str = "4326";

/// Attribute fields requested with every candidate.
const OUT_FIELDS: &str = "Match_addr,Addr_type";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeocodeClient {
    suggest_url: Url,
    find_url: Url,
    country_code: String,
    lang_code: String,
    max_suggestions: u32,
}

impl GeocodeClient {
    /// Builds a client from the plugin configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GeolookupError::Config`] when either endpoint is not an
    /// absolute URL.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            suggest_url: parse_endpoint("suggest_url", &config.suggest_url)?,
            find_url: parse_endpoint("find_url", &config.find_url)?,
            country_code: config.country_code.clone(),
            lang_code: config.lang_code.clone(),
            max_suggestions: config.max_suggestions,
        })
    }

    /// URL of the suggest lookup for `text`.
    ///
    /// # Examples
    ///
    /// ```
    /// use geolookup::geocode::GeocodeClient;
    /// use geolookup::Config;
    ///
    /// let client = GeocodeClient::from_config(&Config::default())?;
    /// let url = client.suggest_url("Sofia str");
    /// assert!(url.ends_with("suggest?f=json&text=Sofia+str&countryCode=BGR&maxSuggestions=8"));
    /// # Ok::<(), geolookup::GeolookupError>(())
    /// ```
    #[must_use]
    pub fn suggest_url(&self, text: &str) -> String {
        let mut url = self.suggest_url.clone();
        url.query_pairs_mut()
            .append_pair("f", "json")
            .append_pair("text", text)
            .append_pair("countryCode", &self.country_code)
            .append_pair("maxSuggestions", &self.max_suggestions.to_string());
        url.into()
    }

    /// URL of the find-candidates lookup resolving a chosen suggestion.
    ///
    /// `magic_key` is appended only when present.
    #[must_use]
    pub fn find_candidates_url(&self, single_line: &str, magic_key: Option<&str>) -> String {
        let mut url = self.find_url.clone();
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("f", "json")
                .append_pair("SingleLine", single_line)
                .append_pair("countryCode", &self.country_code)
                .append_pair("langCode", &self.lang_code)
                .append_pair("outSR", OUT_SR)
                .append_pair("maxLocations", &MAX_CANDIDATES.to_string())
                .append_pair("outFields", OUT_FIELDS);
            if let Some(key) = magic_key {
                query.append_pair("magicKey", key);
            }
        }
        url.into()
    }
}

fn parse_endpoint(key: &str, value: &str) -> Result<Url> {
    let url = Url::parse(value)
        .map_err(|e| GeolookupError::Config(format!("{key} {value:?}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(GeolookupError::Config(format!(
            "{key} {value:?}: not a hierarchical URL"
        )));
    }
    Ok(url)
}
