//! `Ygg` builder: wires the HTTP transport and JSON codec into a shared
//! authentication service and hands out sessions bound to it.

use std::sync::Arc;
use std::time::Duration;

use ygg_protocol::{Agent, JsonCodec};
use ygg_session::{AuthenticationService, ServiceConfig, UserSession};
use ygg_transport::{HttpTransport, TransportConfig};

use crate::YggError;

/// A session driven over HTTP with the JSON codec.
pub type HttpSession = UserSession<HttpTransport, JsonCodec>;

/// Builder for configuring an authentication client.
///
/// # Example
///
/// ```rust,no_run
/// use std::time::Duration;
/// use ygg::prelude::*;
///
/// # fn run() -> Result<(), YggError> {
/// let ygg = Ygg::builder()
///     .base_url("https://auth.example.com/")
///     .timeout(Duration::from_secs(5))
///     .proxy("http://127.0.0.1:3128")
///     .build()?;
/// let session = ygg.session();
/// # Ok(())
/// # }
/// ```
pub struct YggBuilder {
    config: ServiceConfig,
    agent: Agent,
}

impl YggBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::from_config(ServiceConfig::default())
    }

    /// Starts from an existing configuration, e.g. one deserialized from
    /// a settings file.
    pub fn from_config(config: ServiceConfig) -> Self {
        Self {
            config,
            agent: Agent::minecraft(),
        }
    }

    /// Sets the base URL every route is resolved against.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    /// Uses a fixed client token instead of generating one.
    pub fn client_token(mut self, client_token: impl Into<String>) -> Self {
        self.config.client_token = Some(client_token.into());
        self
    }

    /// Routes every request through `proxy`.
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.config.transport.proxy = Some(proxy.into());
        self
    }

    /// Sets both the connect and the read timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.transport = self.config.transport.with_timeout(timeout);
        self
    }

    /// Replaces the transport settings.
    pub fn transport_config(mut self, transport: TransportConfig) -> Self {
        self.config.transport = transport;
        self
    }

    /// Sets the agent new sessions log in as.
    pub fn agent(mut self, agent: Agent) -> Self {
        self.agent = agent;
        self
    }

    /// Builds the HTTP client and the service.
    ///
    /// # Errors
    /// [`YggError::Transport`] if the HTTP client cannot be built (bad
    /// proxy URL), [`YggError::Auth`] if the base URL is invalid.
    pub fn build(self) -> Result<Ygg, YggError> {
        let transport = HttpTransport::new(&self.config.transport)?;
        let service = AuthenticationService::new(&self.config, transport, JsonCodec)?;

        tracing::info!(
            base = %service.routes().base(),
            agent = %self.agent,
            "ygg client ready"
        );

        Ok(Ygg {
            service: Arc::new(service),
            agent: self.agent,
        })
    }
}

impl Default for YggBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A configured authentication client.
///
/// Cheap to clone; every clone and every session it creates share one
/// service and thus one client token and one connection pool.
#[derive(Clone)]
pub struct Ygg {
    service: Arc<AuthenticationService<HttpTransport, JsonCodec>>,
    agent: Agent,
}

impl Ygg {
    /// Creates a new builder.
    pub fn builder() -> YggBuilder {
        YggBuilder::new()
    }

    /// The shared service, for calls that need no session
    /// ([`signout`](AuthenticationService::signout)).
    pub fn service(&self) -> &AuthenticationService<HttpTransport, JsonCodec> {
        &self.service
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    /// Creates a new, logged-out session.
    pub fn session(&self) -> HttpSession {
        UserSession::new(Arc::clone(&self.service), self.agent.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_with_defaults() {
        let ygg = YggBuilder::default().build().unwrap();
        assert_eq!(
            ygg.service().routes().base().as_str(),
            ygg_session::DEFAULT_BASE_URL
        );
        assert_eq!(ygg.agent(), &Agent::minecraft());
    }

    #[test]
    fn test_build_base_url_gets_trailing_slash() {
        let ygg = Ygg::builder()
            .base_url("https://auth.example.com/api")
            .build()
            .unwrap();
        assert_eq!(
            ygg.service().routes().base().as_str(),
            "https://auth.example.com/api/"
        );
    }

    #[test]
    fn test_build_invalid_base_url_is_auth_error() {
        let err = Ygg::builder().base_url("not a url").build().err().expect("build should fail");
        assert!(matches!(
            err,
            YggError::Auth(ygg_session::AuthError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn test_build_invalid_proxy_is_transport_error() {
        let err = Ygg::builder().proxy("not a url").build().err().expect("build should fail");
        assert!(matches!(err, YggError::Transport(_)));
    }

    #[test]
    fn test_sessions_share_client_token() {
        let ygg = Ygg::builder().client_token("fixed").build().unwrap();
        let a = ygg.clone().session();
        let b = ygg.session();
        assert_eq!(a.service().client_token().as_str(), "fixed");
        assert_eq!(b.service().client_token().as_str(), "fixed");
    }

    #[test]
    fn test_session_uses_configured_agent() {
        let ygg = Ygg::builder()
            .agent(Agent::new("Scrolls", 1))
            .build()
            .unwrap();
        let session = ygg.session();
        assert_eq!(session.agent().name, "Scrolls");
        assert!(!session.is_logged_in());
    }
}
