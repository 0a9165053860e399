//! `GeocodeClient` backed by a Nominatim search endpoint.

use log::debug;
use stopline_core::{GeocodeClient, GeocodeError, LatLng, TransportError};

use super::nominatim::SearchResult;
use crate::http::{BlockingClient, HttpServiceConfig, ProviderBuildError};

/// Public OpenStreetMap Nominatim instance.
pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

/// Geocoder that takes the best match from a Nominatim search.
///
/// Each call issues exactly one request; failures are never retried.
#[derive(Debug)]
pub struct NominatimGeocoder {
    http: BlockingClient,
}

impl NominatimGeocoder {
    /// Create a geocoder for `base_url` with default timeout and user agent.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client or
    /// Tokio runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpServiceConfig::new(base_url))
    }

    /// Create a geocoder with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client or
    /// Tokio runtime fails to build.
    pub fn with_config(config: HttpServiceConfig) -> Result<Self, ProviderBuildError> {
        Ok(Self {
            http: BlockingClient::new(config)?,
        })
    }

    /// The configuration the geocoder was built with.
    #[must_use]
    pub const fn config(&self) -> &HttpServiceConfig {
        self.http.config()
    }

    fn search_url(&self, address: &str) -> Result<url::Url, TransportError> {
        self.http.endpoint(
            "search",
            &[("format", "json"), ("limit", "1"), ("q", address)],
        )
    }
}

/// Take the first result's coordinates.
fn convert_results(address: &str, results: Vec<SearchResult>) -> Result<LatLng, GeocodeError> {
    let best = results
        .into_iter()
        .next()
        .ok_or_else(|| GeocodeError::NotFound {
            address: address.to_owned(),
        })?;
    let latitude = parse_degrees(&best.lat, 90.0)?;
    let longitude = parse_degrees(&best.lon, 180.0)?;
    Ok(LatLng::new(latitude, longitude))
}

fn parse_degrees(raw: &str, limit: f64) -> Result<f64, TransportError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && value.abs() <= limit)
        .ok_or_else(|| TransportError::Parse {
            message: format!("invalid coordinate {raw:?} in geocoder response"),
        })
}

impl GeocodeClient for NominatimGeocoder {
    fn resolve(&self, address: &str) -> Result<LatLng, GeocodeError> {
        let url = self.search_url(address)?;
        let results: Vec<SearchResult> = self.http.get_json(url)?;
        debug!("geocoder returned {} match(es) for {address:?}", results.len());
        convert_results(address, results)
    }
}
