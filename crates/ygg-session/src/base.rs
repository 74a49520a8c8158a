//! Identity fields every session kind shares, and their storage layout.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;
use ygg_protocol::{GameProfile, PropertyMap, UserType};

/// Caller-supplied key/value map a session is persisted into and
/// restored from.
pub type StorageMap = BTreeMap<String, Value>;

pub const STORAGE_KEY_USERNAME: &str = "username";
pub const STORAGE_KEY_USER_ID: &str = "userid";
pub const STORAGE_KEY_PROFILE_ID: &str = "uuid";
pub const STORAGE_KEY_PROFILE_NAME: &str = "displayName";
pub const STORAGE_KEY_USER_TYPE: &str = "userType";
pub const STORAGE_KEY_USER_PROPERTIES: &str = "userProperties";

/// Plain identity state owned by a [`UserSession`](crate::UserSession).
///
/// It knows nothing about the network; the session writes to it from
/// service responses and exposes it read-only.
#[derive(Clone, Default)]
pub struct BaseSession {
    username: Option<String>,
    password: Option<String>,
    user_id: Option<String>,
    selected_profile: Option<GameProfile>,
    user_type: Option<UserType>,
    properties: PropertyMap,
}

impl BaseSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn set_username(&mut self, username: Option<String>) {
        self.username = username;
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    pub fn set_password(&mut self, password: Option<String>) {
        self.password = password;
    }

    /// Stable account id: the service's user id, or the username when the
    /// service did not send one.
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn set_user_id(&mut self, user_id: Option<String>) {
        self.user_id = user_id;
    }

    pub fn selected_profile(&self) -> Option<&GameProfile> {
        self.selected_profile.as_ref()
    }

    pub fn set_selected_profile(&mut self, profile: Option<GameProfile>) {
        self.selected_profile = profile;
    }

    pub fn user_type(&self) -> Option<UserType> {
        self.user_type
    }

    pub fn set_user_type(&mut self, user_type: Option<UserType>) {
        self.user_type = user_type;
    }

    pub fn properties(&self) -> &PropertyMap {
        &self.properties
    }

    pub fn properties_mut(&mut self) -> &mut PropertyMap {
        &mut self.properties
    }

    /// Forgets everything except the username.
    pub fn log_out(&mut self) {
        self.password = None;
        self.user_id = None;
        self.selected_profile = None;
        self.user_type = None;
        self.properties.clear();
    }

    /// Replaces the current state with what `storage` holds.
    ///
    /// The user id falls back to the username when not stored. A selected
    /// profile is only restored when both its id and name are present.
    pub fn load_from_storage(&mut self, storage: &StorageMap) {
        self.log_out();

        self.username = string_at(storage, STORAGE_KEY_USERNAME);
        self.user_id = string_at(storage, STORAGE_KEY_USER_ID)
            .or_else(|| self.username.clone());
        self.user_type = string_at(storage, STORAGE_KEY_USER_TYPE)
            .and_then(|ty| ty.parse().ok());

        if let Some(value) = storage.get(STORAGE_KEY_USER_PROPERTIES) {
            match serde_json::from_value::<PropertyMap>(value.clone()) {
                Ok(properties) => self.properties.replace_with(properties),
                Err(e) => {
                    tracing::warn!(error = %e, "ignoring unreadable stored properties");
                }
            }
        }

        if let (Some(id), Some(name)) = (
            string_at(storage, STORAGE_KEY_PROFILE_ID),
            string_at(storage, STORAGE_KEY_PROFILE_NAME),
        ) {
            self.selected_profile = Some(GameProfile::new(id, name));
        }
    }

    /// Writes every field that is set into `storage`. The password is
    /// never persisted.
    pub fn save_for_storage(&self, storage: &mut StorageMap) {
        if let Some(username) = &self.username {
            storage.insert(STORAGE_KEY_USERNAME.into(), username.clone().into());
        }
        if let Some(user_id) = &self.user_id {
            storage.insert(STORAGE_KEY_USER_ID.into(), user_id.clone().into());
        }
        if let Some(user_type) = self.user_type {
            storage.insert(STORAGE_KEY_USER_TYPE.into(), user_type.name().into());
        }
        if !self.properties.is_empty() {
            match serde_json::to_value(&self.properties) {
                Ok(value) => {
                    storage.insert(STORAGE_KEY_USER_PROPERTIES.into(), value);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "not storing unserializable properties");
                }
            }
        }
        if let Some(profile) = &self.selected_profile {
            storage.insert(STORAGE_KEY_PROFILE_ID.into(), profile.id.clone().into());
            storage.insert(STORAGE_KEY_PROFILE_NAME.into(), profile.name.clone().into());
        }
    }
}

fn string_at(storage: &StorageMap, key: &str) -> Option<String> {
    storage.get(key).and_then(Value::as_str).map(str::to_owned)
}

impl fmt::Debug for BaseSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaseSession")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("user_id", &self.user_id)
            .field("selected_profile", &self.selected_profile)
            .field("user_type", &self.user_type)
            .field("properties", &self.properties)
            .finish()
    }
}
