use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Extension, Json,
};
use cvfinder_geo::DEFAULT_RADIUS_M;
use geojson::FeatureCollection;
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{map_geo_error, query_rejection, validate_point, ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct NearbyQuery {
    pub lat: f64,
    pub lon: f64,
    /// Meters; defaults to [`DEFAULT_RADIUS_M`].
    pub radius: Option<u32>,
}

pub(super) async fn find_nearby(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    query: Result<Query<NearbyQuery>, QueryRejection>,
) -> Result<Json<FeatureCollection>, ApiError> {
    let Query(query) = query.map_err(|e| query_rejection(req_id.0.clone(), &e))?;
    let origin = validate_point(&req_id.0, ("lat", query.lat), ("lon", query.lon))?;
    let radius = query.radius.unwrap_or(DEFAULT_RADIUS_M);
    if radius == 0 {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "radius must be at least 1 meter",
        ));
    }

    let collection = state
        .overpass
        .find_nearby(origin, radius)
        .await
        .map_err(|e| map_geo_error(req_id.0.clone(), &e))?;

    tracing::debug!(
        request_id = %req_id.0,
        radius,
        stores = collection.features.len(),
        "nearby search complete"
    );
    Ok(Json(collection))
}
