use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Process-wide settings, loaded once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Directory holding the pre-built map client (`index.html` plus assets).
    pub static_dir: PathBuf,
    /// Overpass-style interpreter endpoint that receives spatial queries.
    pub overpass_url: String,
    /// Base URL of an OSRM-style routing service.
    pub osrm_url: String,
    pub overpass_timeout_secs: u64,
    pub osrm_timeout_secs: u64,
    pub user_agent: String,
}

impl AppConfig {
    #[must_use]
    pub fn overpass_timeout(&self) -> Duration {
        Duration::from_secs(self.overpass_timeout_secs)
    }

    #[must_use]
    pub fn osrm_timeout(&self) -> Duration {
        Duration::from_secs(self.osrm_timeout_secs)
    }
}
