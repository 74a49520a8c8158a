//! Codec trait, the JSON implementation, and the `data=` form payload.
//!
//! The service never sees raw JSON: it hands typed records to a [`Codec`]
//! and gets bytes back (or the other way around). Only [`JsonCodec`]
//! exists today; anything implementing the trait can replace it.

use serde::{Serialize, de::DeserializeOwned};
use url::form_urlencoded::byte_serialize;

use crate::ProtocolError;

/// Name of the single form field that carries the encoded request.
pub const FORM_FIELD: &str = "data";

/// Encodes typed records to bytes and decodes bytes back.
///
/// - `Send + Sync + 'static` → one codec is shared by the service for the
///   whole process lifetime, across tasks.
/// - `DeserializeOwned` → decoded records own their data, so the response
///   body can be dropped right after decoding.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a record into bytes.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a record.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the bytes are malformed or don't
    /// match the expected record.
    fn decode<T: DeserializeOwned>(
        &self,
        data: &[u8],
    ) -> Result<T, ProtocolError>;
}

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// ```rust
/// use ygg_protocol::{Codec, GameProfile, JsonCodec};
///
/// let codec = JsonCodec;
/// let profile = GameProfile::new("p1", "Alice");
///
/// let bytes = codec.encode(&profile).unwrap();
/// let decoded: GameProfile = codec.decode(&bytes).unwrap();
/// assert_eq!(profile, decoded);
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(
        &self,
        data: &[u8],
    ) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}

/// Wraps an encoded record as a form body: `data=<url-encoded payload>`.
pub fn form_payload(encoded: &[u8]) -> String {
    let mut body = String::with_capacity(FORM_FIELD.len() + 1 + encoded.len() * 3);
    body.push_str(FORM_FIELD);
    body.push('=');
    body.extend(byte_serialize(encoded));
    body
}
