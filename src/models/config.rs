//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared by the command-line entry points.
pub struct ClientConfig {
    /// Base URL of the storefront API, scheme and host.
    pub api_base_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Where the listing settings JSON lives.
    #[serde(default = "default_settings_path")]
    pub settings_path: String,
    /// Where the session token is cached between runs.
    #[serde(default = "default_session_path")]
    pub session_path: String,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_settings_path() -> String {
    "webshop-settings.json".to_string()
}

fn default_session_path() -> String {
    "webshop-session.json".to_string()
}
