//! Connection settings for HTTP transports.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Connect/read timeouts and optional proxy for a transport.
///
/// The defaults match what the authentication service expects from its
/// clients: 15 seconds for both the connect and the read phase, no proxy.
/// Timeouts are fixed per transport; nothing retries after one elapses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Maximum time to establish a connection.
    pub connect_timeout: Duration,

    /// Maximum time to wait for the full response.
    pub read_timeout: Duration,

    /// Proxy URL every request is routed through, e.g.
    /// `http://proxy.internal:3128` or `socks5://127.0.0.1:1080`.
    pub proxy: Option<String>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            read_timeout: Duration::from_secs(15),
            proxy: None,
        }
    }
}

impl TransportConfig {
    /// Routes all requests through the given proxy.
    #[must_use]
    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Uses the same timeout for connecting and reading.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self.read_timeout = timeout;
        self
    }
}
