//! Unified error type for ygg.

use ygg_protocol::ProtocolError;
use ygg_session::AuthError;
use ygg_transport::TransportError;

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `ygg` meta-crate, you deal with this single error type
/// instead of importing errors from each sub-crate. The `#[from]`
/// attribute on each variant auto-generates `From` impls, so the `?`
/// operator converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum YggError {
    /// A transport-level error (client setup, connect, timeout).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (encode, decode, invalid message).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// An authentication error (bad credentials, rejected token, service
    /// failure).
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl YggError {
    /// The underlying [`AuthError`], if any.
    pub fn as_auth(&self) -> Option<&AuthError> {
        match self {
            Self::Auth(err) => Some(err),
            _ => None,
        }
    }
}
