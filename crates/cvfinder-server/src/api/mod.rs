mod nearby;
mod route;

use std::path::Path;

use axum::{
    extract::rejection::QueryRejection,
    http::{Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use cvfinder_geo::{GeoError, LatLon, OsrmClient, OverpassClient};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::middleware::{request_id, RequestId};

/// Shared, read-only handler state. Both clients are built once from the
/// process configuration and cloned cheaply per request.
#[derive(Clone)]
pub struct AppState {
    pub overpass: OverpassClient,
    pub osrm: OsrmClient,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "bad_gateway" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Translates an upstream failure into the client-visible error.
///
/// `NoRoute` is an expected outcome and maps to 404; transport, status, and
/// decode failures map to 502 with the message naming the failed call.
pub(super) fn map_geo_error(request_id: String, error: &GeoError) -> ApiError {
    match error {
        GeoError::NoRoute => {
            tracing::info!(request_id = %request_id, "routing upstream returned no route");
            ApiError::new(request_id, "not_found", error.to_string())
        }
        e if e.is_gateway() => {
            tracing::warn!(request_id = %request_id, error = %e, "upstream request failed");
            ApiError::new(request_id, "bad_gateway", e.to_string())
        }
        e => {
            tracing::error!(request_id = %request_id, error = %e, "unexpected upstream client error");
            ApiError::new(request_id, "internal_error", "internal error")
        }
    }
}

/// Turns a query string that failed to deserialize into a JSON validation
/// error instead of axum's plain-text rejection.
pub(super) fn query_rejection(request_id: String, rejection: &QueryRejection) -> ApiError {
    tracing::debug!(request_id = %request_id, error = %rejection, "rejected query string");
    ApiError::new(request_id, "validation_error", rejection.body_text())
}

/// Validates a coordinate pair before any upstream traffic is generated.
///
/// `lat_param`/`lon_param` name the query parameters in the error message.
pub(super) fn validate_point(
    request_id: &str,
    (lat_param, lat): (&str, f64),
    (lon_param, lon): (&str, f64),
) -> Result<LatLon, ApiError> {
    if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
        return Err(ApiError::new(
            request_id,
            "validation_error",
            format!("{lat_param} must be a number between -90 and 90"),
        ));
    }
    if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
        return Err(ApiError::new(
            request_id,
            "validation_error",
            format!("{lon_param} must be a number between -180 and 180"),
        ));
    }
    Ok(LatLon::new(lat, lon))
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

fn api_router() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/nearby", get(nearby::find_nearby))
        .route("/api/route", get(route::find_route))
}

/// Builds the full application: JSON API under `/api`, the map client's
/// `index.html` at `/`, and its assets under `/static`.
pub fn build_app(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .merge(api_router())
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(axum::middleware::from_fn(request_id))
                .layer(build_cors())
                .layer(CompressionLayer::new()),
        )
        .with_state(state)
}

async fn health(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    Json(ApiResponse {
        data: HealthData { status: "ok" },
        meta: ResponseMeta::new(req_id.0),
    })
}
