//! Wire protocol for ygg.
//!
//! This crate defines what travels between the client and the
//! authentication service:
//!
//! - **Types** ([`GameProfile`], [`Agent`], [`PropertyMap`], ...): the
//!   identity records shared by requests, responses and the session.
//! - **Messages** ([`AuthenticationRequest`], [`RefreshResponse`],
//!   [`ErrorResponse`], ...): one record per route and direction.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`], [`form_payload`]): how
//!   records become request bodies and how response bodies become records.
//! - **Errors** ([`ProtocolError`]).
//!
//! ```text
//! Transport (status + body) → Protocol (records) → Session (state)
//! ```

mod codec;
mod error;
mod messages;
mod types;

pub use codec::{Codec, FORM_FIELD, form_payload};
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use messages::{
    Ack, AuthenticationRequest, AuthenticationResponse, ErrorResponse,
    InvalidateRequest, RefreshRequest, RefreshResponse, SignoutRequest,
    ValidateRequest,
};
pub use types::{Agent, GameProfile, PropertyMap, UserRecord, UserType};
