//! The user session: login, token refresh, profile selection and logout
//! against an [`AuthenticationService`].

use std::fmt;
use std::sync::Arc;

use ygg_protocol::{
    Ack, Agent, AuthenticationRequest, AuthenticationResponse, Codec,
    GameProfile, PropertyMap, RefreshRequest, RefreshResponse, UserType,
    ValidateRequest,
};
use ygg_transport::Transport;

use crate::{AuthError, AuthenticationService, BaseSession, Route, StorageMap};

/// Storage key of the access token.
pub const STORAGE_KEY_ACCESS_TOKEN: &str = "accessToken";

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// Where a session stands, derived from its fields.
///
/// ```text
///   LoggedOut ──(log_in)──→ LoggedIn { online }
///       ↑                        │
///       └────────(log_out)───────┘
/// ```
///
/// Logging in happens entirely inside the `log_in` future, which holds
/// `&mut` on the session, so nobody can observe a half-logged-in session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No access token.
    LoggedOut,

    /// An access token is held. `online` is set once the token has been
    /// issued or confirmed by the service in this process.
    LoggedIn { online: bool },
}

// ---------------------------------------------------------------------------
// UserSession
// ---------------------------------------------------------------------------

/// One user's authentication state.
///
/// Operations take `&mut self` and run to completion before returning,
/// so a session can only be driven from one place at a time. Each
/// operation makes at most one round trip, except token login, which may
/// make two (validate, then refresh).
///
/// ```rust,no_run
/// # use std::sync::Arc;
/// # use ygg_protocol::{Agent, JsonCodec};
/// # use ygg_session::{AuthenticationService, ServiceConfig, UserSession};
/// # use ygg_transport::{HttpTransport, TransportConfig};
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ServiceConfig::default();
/// let transport = HttpTransport::new(&config.transport)?;
/// let service = Arc::new(AuthenticationService::new(&config, transport, JsonCodec)?);
///
/// let mut session = UserSession::new(service, Agent::minecraft());
/// session.set_username("alice@example.com");
/// session.set_password("secret");
/// session.log_in().await?;
///
/// if !session.can_play_online() {
///     if let Some(profile) = session.available_profiles().first().cloned() {
///         session.select_game_profile(Some(&profile)).await?;
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub struct UserSession<T, C> {
    service: Arc<AuthenticationService<T, C>>,
    agent: Agent,
    base: BaseSession,
    /// Replaced wholesale by every authenticate/refresh, never appended to.
    profiles: Vec<GameProfile>,
    access_token: Option<String>,
    online: bool,
}

impl<T: Transport, C: Codec> UserSession<T, C> {
    /// Creates a logged-out session for `agent`.
    pub fn new(service: Arc<AuthenticationService<T, C>>, agent: Agent) -> Self {
        Self {
            service,
            agent,
            base: BaseSession::new(),
            profiles: Vec::new(),
            access_token: None,
            online: false,
        }
    }

    // -- Credentials -------------------------------------------------------

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.base.set_username(Some(username.into()));
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.base.set_password(Some(password.into()));
    }

    /// Sets a previously issued access token to log in with.
    pub fn set_access_token(&mut self, access_token: impl Into<String>) {
        self.access_token = Some(access_token.into());
    }

    // -- Accessors ---------------------------------------------------------

    pub fn service(&self) -> &AuthenticationService<T, C> {
        &self.service
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    /// The shared identity fields, read-only.
    pub fn base(&self) -> &BaseSession {
        &self.base
    }

    pub fn username(&self) -> Option<&str> {
        self.base.username()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.base.user_id()
    }

    pub fn user_type(&self) -> Option<UserType> {
        self.base.user_type()
    }

    pub fn selected_profile(&self) -> Option<&GameProfile> {
        self.base.selected_profile()
    }

    pub fn user_properties(&self) -> &PropertyMap {
        self.base.properties()
    }

    pub fn available_profiles(&self) -> &[GameProfile] {
        &self.profiles
    }

    /// The current access token, if any.
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn is_online(&self) -> bool {
        self.online
    }

    pub fn state(&self) -> SessionState {
        if self.is_logged_in() {
            SessionState::LoggedIn {
                online: self.online,
            }
        } else {
            SessionState::LoggedOut
        }
    }

    // -- Predicates --------------------------------------------------------

    /// `true` when the access token is non-blank.
    pub fn is_logged_in(&self) -> bool {
        non_blank(self.access_token.as_deref()).is_some()
    }

    /// Logged in, online, and a profile selected.
    pub fn can_play_online(&self) -> bool {
        self.is_logged_in() && self.base.selected_profile().is_some() && self.online
    }

    /// Whether [`log_in`](Self::log_in) has enough to work with. No I/O.
    pub fn can_log_in(&self) -> bool {
        !self.can_play_online()
            && non_blank(self.base.username()).is_some()
            && (non_blank(self.base.password()).is_some()
                || non_blank(self.access_token.as_deref()).is_some())
    }

    // -- Operations --------------------------------------------------------

    /// Logs in with the cached access token if there is one, otherwise
    /// with the password.
    ///
    /// # Errors
    /// [`AuthError::InvalidCredentials`] before any network call if the
    /// username is blank or neither token nor password is set; otherwise
    /// whatever the exchange with the service returns.
    pub async fn log_in(&mut self) -> Result<(), AuthError> {
        if non_blank(self.base.username()).is_none() {
            return Err(AuthError::InvalidCredentials("Invalid username".into()));
        }

        if non_blank(self.access_token.as_deref()).is_some() {
            self.log_in_with_token().await
        } else if non_blank(self.base.password()).is_some() {
            self.log_in_with_password().await
        } else {
            Err(AuthError::InvalidCredentials("Invalid password".into()))
        }
    }

    async fn log_in_with_password(&mut self) -> Result<(), AuthError> {
        let username = non_blank(self.base.username())
            .ok_or_else(|| AuthError::InvalidCredentials("Invalid username".into()))?;
        let password = non_blank(self.base.password())
            .ok_or_else(|| AuthError::InvalidCredentials("Invalid password".into()))?;

        tracing::info!("logging in with username & password");
        let request = AuthenticationRequest::new(
            self.agent.clone(),
            username,
            password,
            self.service.client_token().as_str(),
        );
        let response: AuthenticationResponse = self
            .service
            .make_request(Route::Authenticate, &request)
            .await?;

        self.apply_login(response);
        Ok(())
    }

    async fn log_in_with_token(&mut self) -> Result<(), AuthError> {
        if non_blank(self.base.user_id()).is_none() {
            let username = non_blank(self.base.username())
                .ok_or_else(|| {
                    AuthError::InvalidCredentials("Invalid uuid & username".into())
                })?
                .to_owned();
            self.base.set_user_id(Some(username));
        }
        let access_token = non_blank(self.access_token.as_deref())
            .ok_or_else(|| AuthError::InvalidCredentials("Invalid access token".into()))?
            .to_owned();

        tracing::info!("logging in with access token");
        if self.check_token_validity().await? {
            tracing::debug!("skipping refresh call as we're safely logged in");
            self.online = true;
            return Ok(());
        }

        let request =
            RefreshRequest::new(access_token, self.service.client_token().as_str());
        let response: RefreshResponse =
            self.service.make_request(Route::Refresh, &request).await?;
        self.service
            .verify_client_token(response.client_token.as_deref())?;

        self.apply_login(response);
        Ok(())
    }

    /// Asks the service whether the current access token is still valid.
    ///
    /// Returns `Ok(false)` when the service rejects the token, or when
    /// there is no token to check (no request is sent then). Any other
    /// failure (transport, unexpected status) is returned as an error.
    /// Never changes the session.
    pub async fn check_token_validity(&self) -> Result<bool, AuthError> {
        let Some(access_token) = non_blank(self.access_token.as_deref()) else {
            return Ok(false);
        };

        let request =
            ValidateRequest::new(access_token, self.service.client_token().as_str());
        match self
            .service
            .make_request::<_, Ack>(Route::Validate, &request)
            .await
        {
            Ok(_) => Ok(true),
            Err(AuthError::Remote(remote)) => {
                tracing::debug!(error = %remote, "access token rejected");
                Ok(false)
            }
            Err(other) => Err(other),
        }
    }

    /// Binds `profile` to this login.
    ///
    /// # Errors
    /// - [`AuthError::NotLoggedIn`]: no access token
    /// - [`AuthError::ProfileAlreadySelected`]: selection is one-shot per
    ///   login; log out first
    /// - [`AuthError::InvalidArgument`]: `None`, or not one of
    ///   [`available_profiles`](Self::available_profiles)
    ///
    /// None of these touch the session. Exchange failures are returned
    /// as-is.
    pub async fn select_game_profile(
        &mut self,
        profile: Option<&GameProfile>,
    ) -> Result<(), AuthError> {
        let Some(access_token) = non_blank(self.access_token.as_deref()) else {
            return Err(AuthError::NotLoggedIn);
        };
        if self.base.selected_profile().is_some() {
            return Err(AuthError::ProfileAlreadySelected);
        }
        let profile = match profile {
            Some(profile) if self.profiles.contains(profile) => profile.clone(),
            Some(profile) => {
                return Err(AuthError::InvalidArgument(format!(
                    "Invalid profile '{profile}'"
                )));
            }
            None => {
                return Err(AuthError::InvalidArgument("Invalid profile 'none'".into()));
            }
        };

        tracing::info!(profile = %profile, "selecting game profile");
        let request =
            RefreshRequest::new(access_token, self.service.client_token().as_str())
                .with_profile(profile);
        let response: RefreshResponse =
            self.service.make_request(Route::Refresh, &request).await?;
        self.service
            .verify_client_token(response.client_token.as_deref())?;

        self.online = true;
        self.access_token = Some(response.access_token);
        self.base.set_selected_profile(response.selected_profile);
        Ok(())
    }

    /// Drops the access token, profiles, online flag and the identity
    /// fields [`BaseSession::log_out`] clears. No network call.
    pub fn log_out(&mut self) {
        self.base.log_out();
        self.access_token = None;
        self.profiles.clear();
        self.online = false;
    }

    /// Revokes the access token on the service, then logs out locally.
    ///
    /// The local logout happens even when the remote call fails; the
    /// remote error is still returned.
    pub async fn invalidate(&mut self) -> Result<(), AuthError> {
        let result = match non_blank(self.access_token.as_deref()) {
            Some(access_token) => self.service.invalidate(access_token).await,
            None => Ok(()),
        };
        self.log_out();
        result
    }

    /// `token:<access token>:<profile id>`, only while
    /// [`can_play_online`](Self::can_play_online).
    pub fn session_token(&self) -> Option<String> {
        if !self.can_play_online() {
            return None;
        }
        let access_token = self.access_token.as_deref()?;
        let profile = self.base.selected_profile()?;
        Some(format!("token:{access_token}:{}", profile.id))
    }

    // -- Storage -----------------------------------------------------------

    /// Replaces the session with what `storage` holds: the identity fields
    /// plus the access token. Nothing is sent; call
    /// [`log_in`](Self::log_in) to confirm the token.
    pub fn load_from_storage(&mut self, storage: &StorageMap) {
        self.log_out();
        self.base.load_from_storage(storage);
        self.access_token = storage
            .get(STORAGE_KEY_ACCESS_TOKEN)
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned);
    }

    /// Writes the identity fields and, if set, the access token into
    /// `storage`. Other keys in `storage` are left alone.
    pub fn save_for_storage(&self, storage: &mut StorageMap) {
        self.base.save_for_storage(storage);
        if let Some(access_token) = non_blank(self.access_token.as_deref()) {
            storage.insert(STORAGE_KEY_ACCESS_TOKEN.into(), access_token.into());
        }
    }

    /// Takes over the state an authenticate or refresh response carries.
    fn apply_login(&mut self, response: AuthenticationResponse) {
        let AuthenticationResponse {
            access_token,
            available_profiles,
            selected_profile,
            user,
            ..
        } = response;

        // The selected profile decides the user type; the first available
        // one is the fallback. With neither, the type is left as is.
        if let Some(profile) = selected_profile.as_ref().or(available_profiles.first()) {
            self.base.set_user_type(Some(UserType::from_profile(profile)));
        }

        let user_id = user
            .as_ref()
            .and_then(|user| user.id.clone())
            .or_else(|| self.base.username().map(str::to_owned));
        self.base.set_user_id(user_id);

        self.online = true;
        self.access_token = Some(access_token);
        self.profiles = available_profiles;
        self.base.set_selected_profile(selected_profile);

        let properties = self.base.properties_mut();
        properties.clear();
        if let Some(user) = user {
            properties.replace_with(user.properties);
        }

        tracing::info!(
            user_id = self.base.user_id().unwrap_or_default(),
            profiles = self.profiles.len(),
            selected = self.base.selected_profile().is_some(),
            "logged in"
        );
    }
}

impl<T, C> fmt::Display for UserSession<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let logged_in = non_blank(self.access_token.as_deref()).is_some();
        let selected = self.base.selected_profile();
        write!(
            f,
            "UserSession{{agent={}, profiles={}, selectedProfile={}, username={}, \
             isLoggedIn={}, userType={}, canPlayOnline={}}}",
            self.agent,
            self.profiles.len(),
            selected.map_or_else(|| "none".to_string(), ToString::to_string),
            self.base.username().unwrap_or("none"),
            logged_in,
            self.base.user_type().map_or("none", UserType::name),
            logged_in && selected.is_some() && self.online,
        )
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
