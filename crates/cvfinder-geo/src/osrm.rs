//! Driving routes from an OSRM-style routing service.

use std::time::Duration;

use geojson::Feature;
use reqwest::{Client, Url};

use cvfinder_core::AppConfig;

use crate::error::{GeoError, Upstream};
use crate::shape::route_to_feature;
use crate::types::{LatLon, OsrmResponse};
use crate::url::parse_http_url;

/// Client for the OSRM `route/v1/driving` service.
#[derive(Debug, Clone)]
pub struct OsrmClient {
    client: Client,
    base_url: Url,
}

impl OsrmClient {
    /// Creates a client rooted at `base_url` (e.g. `http://router.project-osrm.org`).
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::InvalidUrl`] if `base_url` is not an absolute
    /// `http`/`https` URL, or [`GeoError::Client`] if the `reqwest::Client`
    /// cannot be built.
    pub fn new(base_url: &str, timeout: Duration, user_agent: &str) -> Result<Self, GeoError> {
        let base_url = parse_http_url(base_url)?;
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client, base_url })
    }

    /// Creates a client from the process configuration.
    ///
    /// # Errors
    ///
    /// See [`OsrmClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, GeoError> {
        Self::new(&config.osrm_url, config.osrm_timeout(), &config.user_agent)
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetches the driving route from `start` to `end` and returns the first
    /// candidate as a GeoJSON `Feature` with `distance` (m) and `duration` (s)
    /// properties. Alternatives are discarded.
    ///
    /// # Errors
    ///
    /// - [`GeoError::Upstream`] on network failure, timeout, or non-2xx status.
    /// - [`GeoError::Decode`] if the body is not an OSRM JSON reply.
    /// - [`GeoError::NoRoute`] if the reply holds no candidate routes.
    pub async fn find_route(&self, start: LatLon, end: LatLon) -> Result<Feature, GeoError> {
        let url = self.route_url(start, end)?;
        let response = self.fetch(url).await?;
        tracing::debug!(
            code = response.code.as_deref().unwrap_or("-"),
            candidates = response.routes.as_ref().map_or(0, Vec::len),
            "osrm route received"
        );
        route_to_feature(response)
    }

    /// Builds `{base}/route/v1/driving/{lon},{lat};{lon},{lat}` asking for the
    /// full overview geometry encoded as GeoJSON.
    ///
    /// OSRM takes coordinates in longitude, latitude order.
    pub(crate) fn route_url(&self, start: LatLon, end: LatLon) -> Result<Url, GeoError> {
        let raw = format!(
            "{}/route/v1/driving/{},{};{},{}",
            self.base_url.as_str().trim_end_matches('/'),
            start.lon,
            start.lat,
            end.lon,
            end.lat
        );
        let mut url = Url::parse(&raw).map_err(|e| GeoError::InvalidUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })?;
        url.query_pairs_mut()
            .append_pair("overview", "full")
            .append_pair("geometries", "geojson");
        Ok(url)
    }

    async fn fetch(&self, url: Url) -> Result<OsrmResponse, GeoError> {
        let upstream = |source: reqwest::Error| GeoError::Upstream {
            service: Upstream::Osrm,
            source,
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(upstream)?
            .error_for_status()
            .map_err(upstream)?;
        let body = response.bytes().await.map_err(upstream)?;

        serde_json::from_slice(&body).map_err(|source| GeoError::Decode {
            service: Upstream::Osrm,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> OsrmClient {
        OsrmClient::new(base, Duration::from_secs(5), "cvfinder-test/0.1")
            .expect("client construction should not fail")
    }

    #[test]
    fn route_url_orders_lon_before_lat() {
        let url = client("http://router.project-osrm.org")
            .route_url(LatLon::new(21.0285, 105.8542), LatLon::new(21.03, 105.85))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://router.project-osrm.org/route/v1/driving/105.8542,21.0285;105.85,21.03?overview=full&geometries=geojson"
        );
    }

    #[test]
    fn route_url_keeps_base_path_prefix() {
        let url = client("https://maps.example.com/osrm/")
            .route_url(LatLon::new(1.0, 2.0), LatLon::new(3.5, 4.5))
            .unwrap();
        assert_eq!(url.path(), "/osrm/route/v1/driving/2,1;4.5,3.5");
    }
}
