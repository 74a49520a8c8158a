/// Errors that can occur in the transport layer.
///
/// A transport error means no HTTP response was obtained at all. A
/// response with an error status is *not* a transport error: the body of
/// such a response may still carry a structured error from the service,
/// so it is returned to the caller like any other response.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The HTTP client could not be constructed (bad proxy URL, TLS setup).
    #[error("failed to build HTTP client: {0}")]
    Build(String),

    /// The request could not be sent or no response arrived.
    #[error("request to {url} failed: {reason}")]
    RequestFailed {
        /// The URL the request was sent to.
        url: String,
        /// Human-readable cause reported by the underlying client.
        reason: String,
    },

    /// The connect or read timeout elapsed.
    #[error("request to {0} timed out")]
    Timeout(String),

    /// The response arrived but its body could not be read.
    #[error("failed to read response body from {url}: {reason}")]
    ReceiveFailed {
        /// The URL the response came from.
        url: String,
        /// Human-readable cause reported by the underlying client.
        reason: String,
    },

    /// The connection was closed before a response could be produced.
    #[error("connection closed: {0}")]
    ConnectionClosed(String),
}
