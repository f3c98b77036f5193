//! Client configuration.
//!
//! One `ClientConfig` per client; nothing here is process-global. The struct
//! deserializes with defaults for everything but the API key so it can be
//! embedded in a caller's own config file.

use std::time::Duration;

use serde::{Deserialize, Deserializer};

/// Production origin of the Siwar service.
pub const DEFAULT_BASE_URL: &str = "https://api.siwar.ksaa.gov.sa";

/// Version segment of every endpoint path.
pub const API_VERSION: &str = "v1";

/// Whole-call timeout (connect + read) applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "apikey";

pub const ACCEPT_HEADER: &str = "accept";
pub const ACCEPT_JSON: &str = "application/json";

/// Construction parameters for `SiwarClient`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Whole seconds when deserialized.
    #[serde(default = "default_timeout", deserialize_with = "timeout_from_secs")]
    pub timeout: Duration,
}

impl ClientConfig {
    /// Config for the production service with the default timeout.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

fn timeout_from_secs<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    u64::deserialize(deserializer).map(Duration::from_secs)
}
