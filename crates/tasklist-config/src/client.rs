//! Client-side configuration: where the RPC server lives and how often the
//! task list is refreshed.

use serde::{Deserialize, Serialize};
use std::time::Duration;

fn default_base_url() -> String {
    "http://127.0.0.1:3000".to_string()
}

/// Default list polling interval in seconds.
const fn default_refresh_interval_secs() -> u64 {
    5
}

const fn default_request_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    /// Base URL of the RPC server (no trailing `/rpc`).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Interval between background list refreshes, in seconds.
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,

    /// Per-request timeout for RPC calls, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            refresh_interval_secs: default_refresh_interval_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl ClientConfig {
    pub const fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
