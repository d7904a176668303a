use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Extension, Json,
};
use geojson::Feature;
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{map_geo_error, query_rejection, validate_point, ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct RouteQuery {
    pub start_lat: f64,
    pub start_lon: f64,
    pub end_lat: f64,
    pub end_lon: f64,
}

pub(super) async fn find_route(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    query: Result<Query<RouteQuery>, QueryRejection>,
) -> Result<Json<Feature>, ApiError> {
    let Query(query) = query.map_err(|e| query_rejection(req_id.0.clone(), &e))?;
    let start = validate_point(
        &req_id.0,
        ("start_lat", query.start_lat),
        ("start_lon", query.start_lon),
    )?;
    let end = validate_point(
        &req_id.0,
        ("end_lat", query.end_lat),
        ("end_lon", query.end_lon),
    )?;

    let feature = state
        .osrm
        .find_route(start, end)
        .await
        .map_err(|e| map_geo_error(req_id.0.clone(), &e))?;

    Ok(Json(feature))
}
