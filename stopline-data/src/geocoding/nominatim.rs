//! Nominatim search API response types.
//!
//! `/search?format=json` answers with an array of places, best match first.
//! Coordinates are decimal strings.
//!
//! See: <https://nominatim.org/release-docs/latest/api/Search/>

use serde::Deserialize;

/// One place from a Nominatim search response.
#[derive(Debug, Deserialize)]
pub struct SearchResult {
    /// Latitude as a decimal string.
    pub lat: String,
    /// Longitude as a decimal string.
    pub lon: String,
    /// Full human-readable address of the match.
    #[serde(default)]
    pub display_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialise_search_results() {
        let json = r#"[{
            "place_id": 8470,
            "lat": "49.2887",
            "lon": "-123.1112",
            "display_name": "Canada Place, Vancouver",
            "importance": 0.61
        }]"#;

        let results: Vec<SearchResult> = serde_json::from_str(json).expect("should deserialise");

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].lat, "49.2887");
        assert_eq!(results[0].lon, "-123.1112");
        assert_eq!(
            results[0].display_name.as_deref(),
            Some("Canada Place, Vancouver")
        );
    }

    #[test]
    fn deserialise_empty_results() {
        let results: Vec<SearchResult> = serde_json::from_str("[]").expect("should deserialise");
        assert!(results.is_empty());
    }
}
