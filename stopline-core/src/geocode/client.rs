//! Geocoding client trait.

use crate::LatLng;

use super::error::GeocodeError;

/// Look up the coordinate of a free-text address.
///
/// Implementations return the first match of the provider's result set and
/// must not retry internally; retry policy belongs to the caller.
///
/// # Examples
///
/// ```rust
/// use stopline_core::{GeocodeClient, GeocodeError, LatLng};
///
/// struct Fixed;
///
/// impl GeocodeClient for Fixed {
///     fn resolve(&self, address: &str) -> Result<LatLng, GeocodeError> {
///         if address == "Depot" {
///             Ok(LatLng::new(49.28, -123.12))
///         } else {
///             Err(GeocodeError::NotFound { address: address.to_owned() })
///         }
///     }
/// }
///
/// assert!(Fixed.resolve("Depot").is_ok());
/// assert!(Fixed.resolve("Atlantis").is_err());
/// ```
pub trait GeocodeClient {
    /// Resolve `address` to a coordinate.
    fn resolve(&self, address: &str) -> Result<LatLng, GeocodeError>;
}

impl<T> GeocodeClient for &T
where
    T: GeocodeClient + ?Sized,
{
    fn resolve(&self, address: &str) -> Result<LatLng, GeocodeError> {
        (**self).resolve(address)
    }
}

impl<T> GeocodeClient for Box<T>
where
    T: GeocodeClient + ?Sized,
{
    fn resolve(&self, address: &str) -> Result<LatLng, GeocodeError> {
        (**self).resolve(address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    use crate::test_support::StubGeocoder;

    #[rstest]
    fn resolves_known_address() {
        let geocoder = StubGeocoder::new().with_match("Depot", LatLng::new(49.28, -123.12));
        let point = geocoder.resolve("Depot").expect("known address");
        assert_eq!(point, LatLng::new(49.28, -123.12));
    }

    #[rstest]
    fn reports_unknown_address_as_not_found() {
        let geocoder = StubGeocoder::new();
        let err = geocoder.resolve("Atlantis").expect_err("unknown address");
        assert_eq!(
            err,
            GeocodeError::NotFound {
                address: "Atlantis".to_owned()
            }
        );
        assert!(!err.is_transient());
    }

    #[rstest]
    fn references_delegate_to_inner_client() {
        let geocoder = StubGeocoder::new().with_match("Depot", LatLng::new(1.0, 2.0));
        let by_ref: &dyn GeocodeClient = &geocoder;
        assert_eq!(by_ref.resolve("Depot"), Ok(LatLng::new(1.0, 2.0)));
    }

    #[rstest]
    fn boxed_clients_delegate_to_inner_client() {
        let boxed: Box<dyn GeocodeClient> =
            Box::new(StubGeocoder::new().with_match("Depot", LatLng::new(1.0, 2.0)));
        assert_eq!(boxed.resolve("Depot"), Ok(LatLng::new(1.0, 2.0)));
        assert!(boxed.resolve("Atlantis").is_err());
    }
}
