//! Request and response records for every route of the service.
//!
//! | Route | Request | Success response |
//! |---|---|---|
//! | authenticate | [`AuthenticationRequest`] | [`AuthenticationResponse`] |
//! | refresh | [`RefreshRequest`] | [`RefreshResponse`] |
//! | validate | [`ValidateRequest`] | [`Ack`] |
//! | invalidate | [`InvalidateRequest`] | [`Ack`] |
//! | signout | [`SignoutRequest`] | [`Ack`] |
//!
//! Any route may instead answer with an [`ErrorResponse`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{Agent, GameProfile, UserRecord, null_as_default};

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Password login.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationRequest {
    pub agent: Agent,
    pub username: String,
    pub password: String,
    pub client_token: String,
    pub request_user: bool,
}

impl AuthenticationRequest {
    pub fn new(
        agent: Agent,
        username: impl Into<String>,
        password: impl Into<String>,
        client_token: impl Into<String>,
    ) -> Self {
        Self {
            agent,
            username: username.into(),
            password: password.into(),
            client_token: client_token.into(),
            request_user: true,
        }
    }
}

impl fmt::Debug for AuthenticationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthenticationRequest")
            .field("agent", &self.agent)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("client_token", &self.client_token)
            .field("request_user", &self.request_user)
            .finish()
    }
}

/// Token renewal, optionally binding a profile to the session.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub client_token: String,
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_profile: Option<GameProfile>,
    pub request_user: bool,
}

impl RefreshRequest {
    /// Plain refresh of the current token.
    pub fn new(
        access_token: impl Into<String>,
        client_token: impl Into<String>,
    ) -> Self {
        Self {
            client_token: client_token.into(),
            access_token: access_token.into(),
            selected_profile: None,
            request_user: true,
        }
    }

    /// Refresh that also selects `profile` for the session.
    #[must_use]
    pub fn with_profile(mut self, profile: GameProfile) -> Self {
        self.selected_profile = Some(profile);
        self
    }
}

impl fmt::Debug for RefreshRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshRequest")
            .field("client_token", &self.client_token)
            .field("access_token", &"<redacted>")
            .field("selected_profile", &self.selected_profile)
            .field("request_user", &self.request_user)
            .finish()
    }
}

/// Checks that an access token is still usable.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateRequest {
    pub client_token: String,
    pub access_token: String,
}

impl ValidateRequest {
    pub fn new(
        access_token: impl Into<String>,
        client_token: impl Into<String>,
    ) -> Self {
        Self {
            client_token: client_token.into(),
            access_token: access_token.into(),
        }
    }
}

impl fmt::Debug for ValidateRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidateRequest")
            .field("client_token", &self.client_token)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

/// Revokes one access token.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidateRequest {
    pub client_token: String,
    pub access_token: String,
}

impl InvalidateRequest {
    pub fn new(
        access_token: impl Into<String>,
        client_token: impl Into<String>,
    ) -> Self {
        Self {
            client_token: client_token.into(),
            access_token: access_token.into(),
        }
    }
}

impl fmt::Debug for InvalidateRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InvalidateRequest")
            .field("client_token", &self.client_token)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

/// Revokes every access token of an account.
#[derive(Clone, Serialize)]
pub struct SignoutRequest {
    pub username: String,
    pub password: String,
}

impl SignoutRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for SignoutRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignoutRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Successful answer of the authenticate and refresh routes.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationResponse {
    pub access_token: String,

    /// Echo of the client token the service associated with the new
    /// access token.
    #[serde(default)]
    pub client_token: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub available_profiles: Vec<GameProfile>,

    #[serde(default)]
    pub selected_profile: Option<GameProfile>,

    /// Present when the request set `requestUser`.
    #[serde(default)]
    pub user: Option<UserRecord>,
}

impl fmt::Debug for AuthenticationResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthenticationResponse")
            .field("access_token", &"<redacted>")
            .field("client_token", &self.client_token)
            .field("available_profiles", &self.available_profiles)
            .field("selected_profile", &self.selected_profile)
            .field("user", &self.user)
            .finish()
    }
}

/// The refresh route answers with the same record as authenticate.
pub type RefreshResponse = AuthenticationResponse;

/// Empty acknowledgement of validate, invalidate and signout.
///
/// These routes answer with no body at all; any fields a server adds are
/// ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Ack {}

/// Structured failure any route may return, on an error status or not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Error code, e.g. `ForbiddenOperationException`.
    #[serde(default)]
    pub error: Option<String>,

    #[serde(default)]
    pub error_message: Option<String>,

    /// Finer-grained cause, e.g. `UserMigratedException`.
    #[serde(default)]
    pub cause: Option<String>,
}

impl ErrorResponse {
    /// `true` if the record carries an `error` field, even an empty one.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
