//! Service configuration.

use serde::{Deserialize, Serialize};
use ygg_transport::TransportConfig;

/// Default base URL of the route table.
pub const DEFAULT_BASE_URL: &str = "http://localhost/minecraft/auth/";

/// Configuration for an [`AuthenticationService`](crate::AuthenticationService).
///
/// Everything has a default, so a config file only needs the fields it
/// overrides:
///
/// ```rust
/// use ygg_session::ServiceConfig;
///
/// let config: ServiceConfig =
///     serde_json::from_str(r#"{"base_url": "https://auth.example.com/"}"#).unwrap();
/// assert_eq!(config.base_url, "https://auth.example.com/");
/// assert!(config.client_token.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base URL the five routes are resolved against.
    pub base_url: String,

    /// Client token to use instead of generating a fresh one. Set this to
    /// keep the identifier stable across process restarts.
    pub client_token: Option<String>,

    /// Timeouts and proxy for the HTTP transport.
    pub transport: TransportConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            client_token: None,
            transport: TransportConfig::default(),
        }
    }
}

impl ServiceConfig {
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_client_token(mut self, client_token: impl Into<String>) -> Self {
        self.client_token = Some(client_token.into());
        self
    }

    #[must_use]
    pub fn with_transport(mut self, transport: TransportConfig) -> Self {
        self.transport = transport;
        self
    }
}
