//! Links that hand a destination off to an external navigation app.

use url::form_urlencoded::byte_serialize;

/// Default directions endpoint.
pub const DEFAULT_DIRECTIONS_URL: &str = "https://www.google.com/maps/dir/";

/// Default travel mode passed to the directions endpoint.
pub const DEFAULT_TRAVEL_MODE: &str = "driving";

/// Builds directions links for a stop's address.
///
/// # Examples
/// ```
/// use stopline_core::NavigationLinkBuilder;
///
/// let links = NavigationLinkBuilder::default();
/// assert_eq!(
///     links.directions_to("10 Main St, Vancouver"),
///     "https://www.google.com/maps/dir/?api=1&destination=10+Main+St%2C+Vancouver&travelmode=driving"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationLinkBuilder {
    base_url: String,
    travel_mode: String,
}

impl Default for NavigationLinkBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_DIRECTIONS_URL.to_owned(),
            travel_mode: DEFAULT_TRAVEL_MODE.to_owned(),
        }
    }
}

impl NavigationLinkBuilder {
    /// Create a builder for the given directions endpoint.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the travel mode (for example `walking` or `bicycling`).
    #[must_use]
    pub fn with_travel_mode(mut self, travel_mode: impl Into<String>) -> Self {
        self.travel_mode = travel_mode.into();
        self
    }

    /// Directions link to `address`.
    #[must_use]
    pub fn directions_to(&self, address: &str) -> String {
        let destination: String = byte_serialize(address.as_bytes()).collect();
        let mode: String = byte_serialize(self.travel_mode.as_bytes()).collect();
        format!(
            "{}?api=1&destination={destination}&travelmode={mode}",
            self.base_url
        )
    }
}
