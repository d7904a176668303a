//! Nearby convenience-store lookup against an Overpass interpreter.

use std::time::Duration;

use geojson::FeatureCollection;
use reqwest::{Client, Url};

use cvfinder_core::AppConfig;

use crate::error::{GeoError, Upstream};
use crate::shape::elements_to_features;
use crate::types::{LatLon, OverpassResponse};
use crate::url::parse_http_url;

/// Client for an Overpass-style spatial query endpoint.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct OverpassClient {
    client: Client,
    endpoint: Url,
}

impl OverpassClient {
    /// Creates a client that POSTs queries to `endpoint` with the given
    /// per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::InvalidUrl`] if `endpoint` is not an absolute
    /// `http`/`https` URL, or [`GeoError::Client`] if the `reqwest::Client`
    /// cannot be built.
    pub fn new(endpoint: &str, timeout: Duration, user_agent: &str) -> Result<Self, GeoError> {
        let endpoint = parse_http_url(endpoint)?;
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client, endpoint })
    }

    /// Creates a client from the process configuration.
    ///
    /// # Errors
    ///
    /// See [`OverpassClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, GeoError> {
        Self::new(
            &config.overpass_url,
            config.overpass_timeout(),
            &config.user_agent,
        )
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Finds `shop=convenience` nodes, ways, and relations within `radius_m`
    /// meters of `origin` and returns them as `Point` features.
    ///
    /// An empty collection is a normal result.
    ///
    /// # Errors
    ///
    /// - [`GeoError::Upstream`] on network failure, timeout, or non-2xx status.
    /// - [`GeoError::Decode`] if the body is not an Overpass JSON reply.
    pub async fn find_nearby(
        &self,
        origin: LatLon,
        radius_m: u32,
    ) -> Result<FeatureCollection, GeoError> {
        let query = build_query(origin, radius_m);
        let response = self.fetch(&query).await?;
        let collection = elements_to_features(&response.elements);
        tracing::debug!(
            elements = response.elements.len(),
            features = collection.features.len(),
            "overpass query mapped"
        );
        Ok(collection)
    }

    async fn fetch(&self, query: &str) -> Result<OverpassResponse, GeoError> {
        let upstream = |source: reqwest::Error| GeoError::Upstream {
            service: Upstream::Overpass,
            source,
        };

        // Overpass accepts the query as the `data` form field.
        let response = self
            .client
            .post(self.endpoint.clone())
            .form(&[("data", query)])
            .send()
            .await
            .map_err(upstream)?
            .error_for_status()
            .map_err(upstream)?;
        let body = response.bytes().await.map_err(upstream)?;

        serde_json::from_slice(&body).map_err(|source| GeoError::Decode {
            service: Upstream::Overpass,
            source,
        })
    }
}

/// Builds the Overpass QL query for convenience stores around a point.
///
/// Ways and relations are asked for their `center` so every element can be
/// placed as a single point.
#[must_use]
pub fn build_query(origin: LatLon, radius_m: u32) -> String {
    let LatLon { lat, lon } = origin;
    format!(
        r#"[out:json];
(
  node(around:{radius_m},{lat},{lon})["shop"="convenience"];
  way(around:{radius_m},{lat},{lon})["shop"="convenience"];
  relation(around:{radius_m},{lat},{lon})["shop"="convenience"];
);
out center tags;"#
    )
}
