//! Wire types for the Overpass and OSRM JSON replies.
//!
//! Only the fields the finder reads are modelled; everything else in the
//! upstream payload is ignored during deserialization.

use std::collections::BTreeMap;

use serde::Deserialize;

/// A WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    #[must_use]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

// ---------------------------------------------------------------------------
// Overpass
// ---------------------------------------------------------------------------

/// Top-level Overpass interpreter reply for an `[out:json]` query.
#[derive(Debug, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<OverpassElement>,
}

/// A single `node`, `way`, or `relation` returned by Overpass.
#[derive(Debug, Clone, Deserialize)]
pub struct OverpassElement {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: i64,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
    /// Present on nodes only.
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    /// Present on ways and relations when the query asks for `out center`.
    #[serde(default)]
    pub center: Option<Center>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Center {
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
}

impl OverpassElement {
    /// Resolves the point that represents this element on a map.
    ///
    /// Nodes use their own coordinates; every other kind uses its `center`.
    /// Returns `None` when either half of the pair is missing.
    #[must_use]
    pub fn position(&self) -> Option<LatLon> {
        let (lat, lon) = if self.kind == "node" {
            (self.lat, self.lon)
        } else {
            let center = self.center?;
            (center.lat, center.lon)
        };
        Some(LatLon::new(lat?, lon?))
    }
}

// ---------------------------------------------------------------------------
// OSRM
// ---------------------------------------------------------------------------

/// Reply from the OSRM `route` service.
#[derive(Debug, Deserialize)]
pub struct OsrmResponse {
    #[serde(default)]
    pub code: Option<String>,
    /// `null` and absent are both treated as "no candidates".
    #[serde(default)]
    pub routes: Option<Vec<OsrmRoute>>,
}

/// One candidate route. Requested with `geometries=geojson`, so `geometry`
/// is already a GeoJSON geometry object.
#[derive(Debug, Clone, Deserialize)]
pub struct OsrmRoute {
    #[serde(default)]
    pub geometry: Option<geojson::Geometry>,
    /// Meters.
    #[serde(default)]
    pub distance: Option<f64>,
    /// Seconds.
    #[serde(default)]
    pub duration: Option<f64>,
}
