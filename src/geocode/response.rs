//! Wire format of the geocoding service and its decoding into domain types.
//!
//! Both endpoints answer `200` with either the expected payload or an error
//! envelope `{"error": {"code", "message"}}`. A payload without its array is
//! an empty success.

use crate::domain::{Candidate, GeocodeError, Location, Suggestion};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ServiceError {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct SuggestResponse {
    #[serde(default)]
    suggestions: Vec<WireSuggestion>,
    error: Option<ServiceError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireSuggestion {
    #[serde(default)]
    text: String,
    magic_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FindResponse {
    #[serde(default)]
    candidates: Vec<WireCandidate>,
    error: Option<ServiceError>,
}

#[derive(Debug, Deserialize)]
struct WireCandidate {
    address: Option<String>,
    score: Option<f64>,
    location: Option<WireLocation>,
}

#[derive(Debug, Deserialize)]
struct WireLocation {
    x: Option<f64>,
    y: Option<f64>,
}

impl From<WireSuggestion> for Suggestion {
    fn from(wire: WireSuggestion) -> Self {
        Self {
            text: wire.text,
            magic_key: wire.magic_key.filter(|k| !k.is_empty()),
        }
    }
}

impl From<WireCandidate> for Candidate {
    fn from(wire: WireCandidate) -> Self {
        let location = wire.location.and_then(|loc| match (loc.x, loc.y) {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some(Location { x, y }),
            _ => None,
        });
        Self {
            address: wire.address.unwrap_or_default(),
            score: wire.score,
            location,
        }
    }
}

fn check_status(status: u16) -> Result<(), GeocodeError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(GeocodeError::Transport { status })
    }
}

fn parse<T: for<'de> Deserialize<'de>>(body: &[u8]) -> Result<T, GeocodeError> {
    serde_json::from_slice(body).map_err(|e| GeocodeError::Malformed(e.to_string()))
}

fn service_error(error: ServiceError) -> GeocodeError {
    GeocodeError::Service {
        code: error.code,
        message: error.message,
    }
}

/// Decodes a suggest response.
///
/// # Errors
///
/// Returns [`GeocodeError::Transport`] on a non-2xx status,
/// [`GeocodeError::Service`] on an error envelope, and
/// [`GeocodeError::Malformed`] when the body is not the expected JSON.
///
/// # Examples
///
/// ```
/// use geolookup::geocode::decode_suggestions;
///
/// let body = br#"{"suggestions":[{"text":"Sofia, str. X","magicKey":"k1","isCollection":false}]}"#;
/// let suggestions = decode_suggestions(200, body).unwrap();
/// assert_eq!(suggestions[0].magic_key.as_deref(), Some("k1"));
/// ```
pub fn decode_suggestions(status: u16, body: &[u8]) -> Result<Vec<Suggestion>, GeocodeError> {
    check_status(status)?;
    let response: SuggestResponse = parse(body)?;
    if let Some(error) = response.error {
        return Err(service_error(error));
    }
    Ok(response.suggestions.into_iter().map(Suggestion::from).collect())
}

/// Decodes a find-candidates response.
///
/// # Errors
///
/// Same failure modes as [`decode_suggestions`].
pub fn decode_candidates(status: u16, body: &[u8]) -> Result<Vec<Candidate>, GeocodeError> {
    check_status(status)?;
    let response: FindResponse = parse(body)?;
    if let Some(error) = response.error {
        return Err(service_error(error));
    }
    Ok(response.candidates.into_iter().map(Candidate::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_success_status_is_transport_failure() {
        assert_eq!(
            decode_suggestions(503, b"{}"),
            Err(GeocodeError::Transport { status: 503 })
        );
        assert_eq!(
            decode_candidates(404, b""),
            Err(GeocodeError::Transport { status: 404 })
        );
    }

    #[test]
    fn missing_array_is_empty_success() {
        assert_eq!(decode_suggestions(200, b"{}"), Ok(vec![]));
        assert_eq!(decode_candidates(200, b"{\"spatialReference\":{}}"), Ok(vec![]));
    }

    #[test]
    fn error_envelope_is_service_failure() {
        let body = br#"{"error":{"code":498,"message":"Invalid token","details":[]}}"#;
        assert_eq!(
            decode_candidates(200, body),
            Err(GeocodeError::Service {
                code: 498,
                message: "Invalid token".to_string()
            })
        );
    }

    #[test]
    fn garbage_body_is_malformed() {
        assert!(matches!(
            decode_suggestions(200, b"<html>"),
            Err(GeocodeError::Malformed(_))
        ));
    }

    #[test]
    fn candidates_keep_partial_data() {
        let body = br#"{"candidates":[
            {"address":"Sofia, str. X 12","score":100,"location":{"x":23.3,"y":42.7},"attributes":{"Addr_type":"PointAddress"}},
            {"score":71.5},
            {"address":"Plovdiv","location":{"x":24.7}}
        ]}"#;
        let candidates = decode_candidates(200, body).expect("decodes");
        assert_eq!(candidates.len(), 3);
        assert_eq!(candidates[0].location, Some(Location { x: 23.3, y: 42.7 }));
        assert_eq!(candidates[0].score, Some(100.0));
        assert_eq!(candidates[1].address, "");
        assert_eq!(candidates[1].location, None);
        assert_eq!(candidates[2].location, None, "half a coordinate is no location");
    }

    #[test]
    fn empty_magic_key_is_dropped() {
        let body = br#"{"suggestions":[{"text":"a","magicKey":""},{"text":"b"}]}"#;
        let suggestions = decode_suggestions(200, body).expect("decodes");
        assert_eq!(suggestions[0].magic_key, None);
        assert_eq!(suggestions[1].magic_key, None);
    }
}
