//! Error types for the protocol layer.
//!
//! A `ProtocolError` always means the problem is in turning records into
//! wire payloads or back, never in the network or in the session logic.

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization of a request record failed.
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// The payload is not valid JSON or does not match the expected record
    /// (missing `accessToken`, wrong field types, truncated body).
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),
}
