//! The authentication service: typed request/response exchange over a
//! [`Transport`].
//!
//! One call of [`AuthenticationService::make_request`] is one round trip:
//!
//! ```text
//! record ──encode──→ data=<json> ──POST──→ route URL
//!                                              │
//! record ←──decode── body ←──(status, body)────┘
//!          └─ error shape? → AuthError::Remote
//! ```

use serde::Serialize;
use serde::de::DeserializeOwned;
use ygg_protocol::{
    Ack, Codec, ErrorResponse, InvalidateRequest, SignoutRequest, form_payload,
};
use ygg_transport::{HttpRequest, HttpResponse, Transport};

use crate::{AuthError, ClientToken, RemoteError, Route, RouteTable, ServiceConfig};

/// Body substituted for an empty response before decoding.
const EMPTY_OBJECT: &[u8] = b"{}";

/// Talks to one authentication service with one client token.
///
/// The service holds no session state; [`UserSession`](crate::UserSession)
/// does. Share one service between sessions by wrapping it in an `Arc`.
pub struct AuthenticationService<T, C> {
    transport: T,
    codec: C,
    routes: RouteTable,
    client_token: ClientToken,
}

impl<T: Transport, C: Codec> AuthenticationService<T, C> {
    /// Builds the route table from `config.base_url` and fixes the client
    /// token for the lifetime of the service.
    ///
    /// # Errors
    /// [`AuthError::InvalidBaseUrl`] if the base URL cannot be parsed.
    pub fn new(
        config: &ServiceConfig,
        transport: T,
        codec: C,
    ) -> Result<Self, AuthError> {
        let routes = RouteTable::new(&config.base_url)?;
        let client_token = match &config.client_token {
            Some(token) => ClientToken::new(token.clone()),
            None => ClientToken::generate(),
        };
        tracing::debug!(base = %routes.base(), "authentication service ready");
        Ok(Self {
            transport,
            codec,
            routes,
            client_token,
        })
    }

    pub fn client_token(&self) -> &ClientToken {
        &self.client_token
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Sends `request` to `route` and decodes the answer as `R`.
    ///
    /// # Errors
    /// - [`AuthError::Remote`]: the body carried a non-null `error`
    ///   field, whatever the status
    /// - [`AuthError::Transport`]: no response was obtained
    /// - [`AuthError::UnexpectedStatus`]: non-2xx without an error body
    /// - [`AuthError::MalformedResponse`]: 2xx but the body is not an `R`
    /// - [`AuthError::Encode`]: `request` could not be serialized
    pub async fn make_request<Q, R>(
        &self,
        route: Route,
        request: &Q,
    ) -> Result<R, AuthError>
    where
        Q: Serialize,
        R: DeserializeOwned,
    {
        let encoded = self.codec.encode(request).map_err(AuthError::Encode)?;
        let url = self.routes.url(route).clone();

        tracing::info!(%route, %url, "sending request");
        let response = self
            .transport
            .send(HttpRequest::post_form(url, form_payload(&encoded)))
            .await?;
        tracing::info!(%route, status = response.status, "received response");

        self.read_response(route, &response)
    }

    fn read_response<R: DeserializeOwned>(
        &self,
        route: Route,
        response: &HttpResponse,
    ) -> Result<R, AuthError> {
        let payload = if response.is_body_blank() {
            EMPTY_OBJECT
        } else {
            response.body.as_bytes()
        };

        // The error shape is checked first: the service may put it behind
        // a 2xx as well as behind an error status.
        if let Ok(error) = self.codec.decode::<ErrorResponse>(payload) {
            if error.is_error() {
                let remote = RemoteError::from(error);
                tracing::info!(%route, error = %remote, "request rejected");
                return Err(remote.into());
            }
        }

        if !response.is_success() {
            tracing::warn!(%route, status = response.status, "unexpected status");
            return Err(AuthError::UnexpectedStatus {
                status: response.status,
            });
        }

        self.codec.decode(payload).map_err(|e| {
            tracing::warn!(%route, error = %e, "malformed response");
            AuthError::MalformedResponse(e)
        })
    }

    /// Fails with [`AuthError::ClientTokenMismatch`] if the service echoed
    /// back a client token other than ours. An absent echo is accepted.
    pub fn verify_client_token(
        &self,
        received: Option<&str>,
    ) -> Result<(), AuthError> {
        match received {
            Some(received) if received != self.client_token.as_str() => {
                Err(AuthError::ClientTokenMismatch {
                    expected: self.client_token.to_string(),
                    received: received.to_string(),
                })
            }
            _ => Ok(()),
        }
    }

    /// Revokes `access_token` on the service.
    pub async fn invalidate(&self, access_token: &str) -> Result<(), AuthError> {
        let request =
            InvalidateRequest::new(access_token, self.client_token.as_str());
        self.make_request::<_, Ack>(Route::Invalidate, &request)
            .await
            .map(drop)
    }

    /// Revokes every access token of the account.
    pub async fn signout(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(), AuthError> {
        let request = SignoutRequest::new(username, password);
        self.make_request::<_, Ack>(Route::Signout, &request)
            .await
            .map(drop)
    }
}
