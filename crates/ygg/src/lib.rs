//! # Ygg
//!
//! Client for Yggdrasil-style game authentication services.
//!
//! Ygg logs a user in with a username and password (or a cached access
//! token), keeps the access token fresh, binds a game profile to the
//! login, and persists the session between runs. The layers are separate
//! crates; this one wires them together over HTTP and JSON.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ygg::prelude::*;
//!
//! # async fn run() -> Result<(), YggError> {
//! let ygg = Ygg::builder()
//!     .base_url("https://auth.example.com/")
//!     .build()?;
//!
//! let mut session = ygg.session();
//! session.set_username("alice@example.com");
//! session.set_password("secret");
//! session.log_in().await?;
//! println!("{session}");
//! # Ok(())
//! # }
//! ```

mod builder;
mod error;
pub mod telemetry;

pub use builder::{HttpSession, Ygg, YggBuilder};
pub use error::YggError;

pub use ygg_protocol as protocol;
pub use ygg_session as session;
pub use ygg_transport as transport;

/// Everything needed to log in and drive a session.
pub mod prelude {
    pub use crate::{HttpSession, Ygg, YggBuilder, YggError};
    pub use ygg_protocol::{Agent, GameProfile, PropertyMap, UserType};
    pub use ygg_session::{
        AuthError, RemoteError, RemoteErrorKind, ServiceConfig, SessionState,
        StorageMap, UserSession,
    };
    pub use ygg_transport::TransportConfig;
}
