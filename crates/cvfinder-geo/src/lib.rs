//! Upstream geodata clients for the convenience finder.
//!
//! [`OverpassClient`] finds convenience stores around a point and
//! [`OsrmClient`] computes a driving route between two points. Both issue a
//! single outbound request and reshape the reply into GeoJSON.

pub mod error;
pub mod osrm;
pub mod overpass;
pub mod shape;
pub mod types;
mod url;

pub use error::{GeoError, Upstream};
pub use osrm::OsrmClient;
pub use overpass::OverpassClient;
pub use shape::{elements_to_features, route_to_feature, DEFAULT_STORE_NAME};
pub use types::{LatLon, OsrmResponse, OsrmRoute, OverpassElement, OverpassResponse};

/// Search radius in meters used when the caller does not supply one.
pub const DEFAULT_RADIUS_M: u32 = 1000;
