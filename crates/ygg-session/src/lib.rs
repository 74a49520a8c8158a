//! Authentication service client and user session for ygg.
//!
//! This crate holds the caller side of the login protocol:
//!
//! 1. **Service** ([`AuthenticationService`]): the fixed [`RouteTable`],
//!    the process-wide [`ClientToken`], and the typed request/response
//!    exchange that turns service answers into records or [`AuthError`]s.
//! 2. **Session** ([`UserSession`]): credentials, access token, available
//!    and selected profiles, and the login / refresh / validate / select /
//!    logout state machine driven by the service.
//! 3. **Storage** ([`StorageMap`]): what a session persists between runs.
//!
//! # How it fits in the stack
//!
//! ```text
//! UserSession (state machine)
//!     ↕
//! AuthenticationService (routes, client token, error classification)
//!     ↕
//! Protocol (records, codec)  +  Transport (status + body)
//! ```

mod base;
mod client_token;
mod config;
mod error;
mod routes;
mod service;
mod session;

pub use base::{
    BaseSession, STORAGE_KEY_PROFILE_ID, STORAGE_KEY_PROFILE_NAME,
    STORAGE_KEY_USER_ID, STORAGE_KEY_USER_PROPERTIES, STORAGE_KEY_USER_TYPE,
    STORAGE_KEY_USERNAME, StorageMap,
};
pub use client_token::ClientToken;
pub use config::{DEFAULT_BASE_URL, ServiceConfig};
pub use error::{AuthError, RemoteError, RemoteErrorKind};
pub use routes::{Route, RouteTable};
pub use service::AuthenticationService;
pub use session::{STORAGE_KEY_ACCESS_TOKEN, SessionState, UserSession};
