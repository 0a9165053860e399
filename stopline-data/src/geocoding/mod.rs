//! Geocoding against a Nominatim-compatible search endpoint.
//!
//! # Example
//!
//! ```no_run
//! use stopline_core::GeocodeClient;
//! use stopline_data::geocoding::NominatimGeocoder;
//!
//! let geocoder = NominatimGeocoder::new("https://nominatim.openstreetmap.org")?;
//! let point = geocoder.resolve("1055 Canada Pl, Vancouver")?;
//! println!("{}, {}", point.latitude, point.longitude);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod nominatim;
mod provider;

pub use provider::{DEFAULT_NOMINATIM_URL, NominatimGeocoder};
