use serde::{Deserialize, Serialize};

/// Connection settings for the management API.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL of the management API service. Endpoint paths are resolved
    /// against it.
    pub base_url: String,
    /// Overall per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Connection-establishment timeout in seconds.
    pub connect_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// Settings for the reachability probe issued once at startup.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProbeConfig {
    /// Whether to probe the API when the application starts.
    pub enabled: bool,
    /// Endpoint path used for the probe.
    pub endpoint: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "/api/health".to_string(),
        }
    }
}

/// Global application configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Connection settings for the management API.
    pub api: ApiConfig,
    /// Startup reachability probe settings.
    pub startup_probe: ProbeConfig,
}
