//! Integration tests for `OsrmClient` using wiremock HTTP mocks.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cvfinder_geo::{GeoError, LatLon, OsrmClient, Upstream};

fn test_client(server: &MockServer, timeout: Duration) -> OsrmClient {
    OsrmClient::new(&server.uri(), timeout, "cvfinder-test/0.1")
        .expect("client construction should not fail")
}

fn start() -> LatLon {
    LatLon::new(21.0285, 105.8542)
}

fn end() -> LatLon {
    LatLon::new(21.0367, 105.8345)
}

fn two_routes() -> serde_json::Value {
    json!({
        "code": "Ok",
        "routes": [
            {
                "geometry": { "type": "LineString",
                              "coordinates": [[105.8542, 21.0285], [105.8400, 21.0300], [105.8345, 21.0367]] },
                "distance": 2841.3,
                "duration": 402.9,
                "legs": []
            },
            {
                "geometry": { "type": "LineString",
                              "coordinates": [[105.8542, 21.0285], [105.8345, 21.0367]] },
                "distance": 3900.0,
                "duration": 610.0,
                "legs": []
            }
        ],
        "waypoints": []
    })
}

#[tokio::test]
async fn find_route_requests_geojson_overview_in_lon_lat_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/route/v1/driving/105.8542,21.0285;105.8345,21.0367"))
        .and(query_param("overview", "full"))
        .and(query_param("geometries", "geojson"))
        .respond_with(ResponseTemplate::new(200).set_body_json(two_routes()))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server, Duration::from_secs(5));
    client
        .find_route(start(), end())
        .await
        .expect("should return route");
}

#[tokio::test]
async fn find_route_uses_first_candidate_only() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(two_routes()))
        .mount(&server)
        .await;

    let client = test_client(&server, Duration::from_secs(5));
    let feature = client.find_route(start(), end()).await.expect("route");
    let out = serde_json::to_value(&feature).unwrap();

    assert_eq!(out["type"], "Feature");
    assert_eq!(out["geometry"]["type"], "LineString");
    assert_eq!(
        out["geometry"]["coordinates"].as_array().map(Vec::len),
        Some(3)
    );
    assert_eq!(
        out["properties"],
        json!({ "distance": 2841.3, "duration": 402.9 })
    );
}

#[tokio::test]
async fn find_route_reports_no_route_for_empty_candidates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "routes": [] })))
        .mount(&server)
        .await;

    let client = test_client(&server, Duration::from_secs(5));
    let result = client.find_route(start(), end()).await;

    let err = result.expect_err("empty routes must fail");
    assert!(matches!(err, GeoError::NoRoute), "got: {err:?}");
    assert!(!err.is_gateway());
}

#[tokio::test]
async fn find_route_returns_upstream_error_on_503() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server, Duration::from_secs(5));
    let err = client
        .find_route(start(), end())
        .await
        .expect_err("503 must fail");

    assert!(matches!(
        err,
        GeoError::Upstream {
            service: Upstream::Osrm,
            ..
        }
    ));
    assert!(err.to_string().starts_with("Routing request failed"));
}

#[tokio::test]
async fn find_route_times_out_as_upstream_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(two_routes())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = test_client(&server, Duration::from_millis(200));
    let err = client
        .find_route(start(), end())
        .await
        .expect_err("slow upstream must time out");

    match err {
        GeoError::Upstream { service, source } => {
            assert_eq!(service, Upstream::Osrm);
            assert!(source.is_timeout(), "expected timeout, got: {source}");
        }
        other => panic!("expected Upstream timeout, got: {other:?}"),
    }
}

#[tokio::test]
async fn find_route_fails_when_server_unreachable() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let client = OsrmClient::new(&uri, Duration::from_secs(2), "cvfinder-test/0.1").unwrap();
    let err = client
        .find_route(start(), end())
        .await
        .expect_err("closed port must fail");
    assert!(err.is_gateway(), "got: {err:?}");
}

#[tokio::test]
async fn find_route_is_deterministic_for_identical_upstream_replies() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(two_routes()))
        .expect(2)
        .mount(&server)
        .await;

    let client = test_client(&server, Duration::from_secs(5));
    let first = client.find_route(start(), end()).await.expect("first call");
    let second = client.find_route(start(), end()).await.expect("second call");

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}
