//! Endpoint URL checks shared by the upstream clients.

use reqwest::Url;

use crate::error::GeoError;

/// Parses an upstream endpoint, accepting only absolute `http`/`https` URLs.
pub(crate) fn parse_http_url(raw: &str) -> Result<Url, GeoError> {
    let invalid = |reason: String| GeoError::InvalidUrl {
        url: raw.to_owned(),
        reason,
    };
    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme '{other}'"))),
    }
}
