use thiserror::Error;

/// Which upstream service a request was addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upstream {
    Overpass,
    Osrm,
}

impl std::fmt::Display for Upstream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Upstream::Overpass => write!(f, "Overpass"),
            Upstream::Osrm => write!(f, "Routing"),
        }
    }
}

#[derive(Debug, Error)]
pub enum GeoError {
    /// Transport failure, timeout, or non-2xx status from an upstream.
    #[error("{service} request failed: {source}")]
    Upstream {
        service: Upstream,
        #[source]
        source: reqwest::Error,
    },

    /// The upstream answered 2xx but the body was not the expected JSON.
    #[error("{service} request failed: invalid response body: {source}")]
    Decode {
        service: Upstream,
        #[source]
        source: serde_json::Error,
    },

    /// The routing upstream answered successfully with zero candidate routes.
    #[error("No route found")]
    NoRoute,

    #[error("invalid upstream URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

impl GeoError {
    /// True for failures that mean the upstream itself is unusable.
    #[must_use]
    pub fn is_gateway(&self) -> bool {
        matches!(self, GeoError::Upstream { .. } | GeoError::Decode { .. })
    }
}
