//! Error types for the session layer.

use ygg_protocol::{ErrorResponse, ProtocolError};
use ygg_transport::TransportError;

/// Errors that can occur while talking to the authentication service or
/// driving a [`UserSession`](crate::UserSession).
///
/// None of these are retried internally; every variant reaches the direct
/// caller of the operation.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// A local precondition failed before any network call: blank
    /// username, password or token.
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    /// The service answered with a client token different from ours,
    /// i.e. it asked us to rotate identifiers. That is not supported.
    #[error(
        "server requested we change our client token \
         (ours: {expected}, received: {received})"
    )]
    ClientTokenMismatch { expected: String, received: String },

    /// The service rejected the request with a structured error body.
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// No response could be obtained (network failure, timeout).
    #[error("cannot contact authentication server: {0}")]
    Transport(#[from] TransportError),

    /// The service answered with a non-2xx status and no structured error.
    #[error("authentication server answered with status {status}")]
    UnexpectedStatus { status: u16 },

    /// The service answered 2xx but the body did not match the expected
    /// record.
    #[error("malformed response from authentication server: {0}")]
    MalformedResponse(#[source] ProtocolError),

    /// A request record could not be serialized.
    #[error("failed to encode request: {0}")]
    Encode(#[source] ProtocolError),

    /// Local misuse, e.g. selecting a profile that is not available.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Profile selection needs an access token.
    #[error("cannot change game profile whilst not logged in")]
    NotLoggedIn,

    /// A profile is already selected for this login.
    #[error("cannot change game profile, log out and back in first")]
    ProfileAlreadySelected,

    /// The configured base URL cannot produce the route table.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
}

impl AuthError {
    /// `true` when the service could not be reached or understood, as
    /// opposed to the service (or a local check) saying no.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            Self::Transport(_)
                | Self::UnexpectedStatus { .. }
                | Self::MalformedResponse(_)
        )
    }

    /// `true` for bad username/password/token, detected locally or
    /// reported by the service.
    pub fn is_invalid_credentials(&self) -> bool {
        match self {
            Self::InvalidCredentials(_) => true,
            Self::Remote(remote) => remote.kind() == RemoteErrorKind::Forbidden,
            _ => false,
        }
    }

    /// The service's error record, if this is a remote failure.
    pub fn remote(&self) -> Option<&RemoteError> {
        match self {
            Self::Remote(remote) => Some(remote),
            _ => None,
        }
    }
}

/// Broad classification of a [`RemoteError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteErrorKind {
    /// Bad credentials or an invalid/expired token.
    Forbidden,
    /// The account was migrated; the user must log in with the new
    /// account's email.
    UserMigrated,
    /// The request itself was rejected as malformed.
    IllegalArgument,
    Other,
}

/// A structured error returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{error}: {}", .message.as_deref().unwrap_or("no message"))]
pub struct RemoteError {
    /// Error code, e.g. `ForbiddenOperationException`.
    pub error: String,
    /// Human-readable message from the service.
    pub message: Option<String>,
    /// Finer-grained cause, e.g. `UserMigratedException`.
    pub cause: Option<String>,
}

impl RemoteError {
    pub fn kind(&self) -> RemoteErrorKind {
        if self.cause.as_deref() == Some("UserMigratedException") {
            return RemoteErrorKind::UserMigrated;
        }
        match self.error.as_str() {
            "ForbiddenOperationException" => RemoteErrorKind::Forbidden,
            "IllegalArgumentException" => RemoteErrorKind::IllegalArgument,
            _ => RemoteErrorKind::Other,
        }
    }
}

impl From<ErrorResponse> for RemoteError {
    fn from(response: ErrorResponse) -> Self {
        Self {
            error: response.error.unwrap_or_default(),
            message: response.error_message,
            cause: response.cause,
        }
    }
}
