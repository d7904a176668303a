//! Pure conversions from upstream replies to GeoJSON.

use std::collections::BTreeMap;

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde_json::Value as JsonValue;

use crate::error::GeoError;
use crate::types::{OsrmResponse, OverpassElement};

/// Display name used when an element carries neither a `name` nor a `brand` tag.
pub const DEFAULT_STORE_NAME: &str = "Unnamed convenience";

/// Maps Overpass elements to `Point` features, in upstream order.
///
/// Elements whose coordinates cannot be resolved are dropped.
#[must_use]
pub fn elements_to_features(elements: &[OverpassElement]) -> FeatureCollection {
    let features: Vec<Feature> = elements
        .iter()
        .filter_map(|el| {
            let Some(position) = el.position() else {
                tracing::debug!(osm_id = el.id, kind = %el.kind, "skipping element without coordinates");
                return None;
            };
            Some(Feature {
                bbox: None,
                geometry: Some(Geometry::new(Value::Point(vec![position.lon, position.lat]))),
                id: None,
                properties: Some(store_properties(el)),
                foreign_members: None,
            })
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// Wraps the first candidate route in a `Feature`; later candidates are ignored.
///
/// # Errors
///
/// Returns [`GeoError::NoRoute`] when the reply has no candidates.
pub fn route_to_feature(response: OsrmResponse) -> Result<Feature, GeoError> {
    let route = response
        .routes
        .and_then(|routes| routes.into_iter().next())
        .ok_or(GeoError::NoRoute)?;

    let mut properties = JsonObject::new();
    properties.insert("distance".to_string(), optional_number(route.distance));
    properties.insert("duration".to_string(), optional_number(route.duration));

    Ok(Feature {
        bbox: None,
        geometry: route.geometry,
        id: None,
        properties: Some(properties),
        foreign_members: None,
    })
}

/// Builds store properties: every tag, then `osm_id`, `type`, and the
/// resolved `name`, which take precedence over same-named tags.
///
/// An empty `name` tag is not passed through: the resolved name replaces it,
/// so such a store shows its `brand` (or the default) rather than `""`.
fn store_properties(el: &OverpassElement) -> JsonObject {
    let mut props: JsonObject = el
        .tags
        .iter()
        .map(|(k, v)| (k.clone(), JsonValue::String(v.clone())))
        .collect();
    props.insert("osm_id".to_string(), JsonValue::from(el.id));
    props.insert("type".to_string(), JsonValue::String(el.kind.clone()));
    props.insert(
        "name".to_string(),
        JsonValue::String(display_name(&el.tags).to_string()),
    );
    props
}

fn display_name(tags: &BTreeMap<String, String>) -> &str {
    let non_empty = |key: &str| tags.get(key).map(String::as_str).filter(|s| !s.is_empty());
    non_empty("name")
        .or_else(|| non_empty("brand"))
        .unwrap_or(DEFAULT_STORE_NAME)
}

fn optional_number(value: Option<f64>) -> JsonValue {
    value.map_or(JsonValue::Null, JsonValue::from)
}
