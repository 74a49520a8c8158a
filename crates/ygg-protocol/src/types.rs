//! Identity records shared by requests, responses, and the session.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ---------------------------------------------------------------------------
// Agent
// ---------------------------------------------------------------------------

/// Which client/game variant is authenticating.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Agent {
    pub name: String,
    pub version: u32,
}

impl Agent {
    pub fn new(name: impl Into<String>, version: u32) -> Self {
        Self {
            name: name.into(),
            version,
        }
    }

    /// The stock game client.
    pub fn minecraft() -> Self {
        Self::new("Minecraft", 1)
    }
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.version)
    }
}

// ---------------------------------------------------------------------------
// GameProfile
// ---------------------------------------------------------------------------

/// A game identity bound to an account.
///
/// Two profiles are the same profile when their `id` and `name` match;
/// the `legacy` flag does not take part in equality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameProfile {
    pub id: String,
    pub name: String,

    /// Set for profiles that belong to a pre-migration account.
    #[serde(default, deserialize_with = "null_as_default")]
    pub legacy: bool,
}

/// Decodes an explicit `null` the same way as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl GameProfile {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            legacy: false,
        }
    }

    /// Marks the profile as legacy.
    #[must_use]
    pub fn with_legacy(mut self, legacy: bool) -> Self {
        self.legacy = legacy;
        self
    }
}

impl PartialEq for GameProfile {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.name == other.name
    }
}

impl Eq for GameProfile {}

impl fmt::Display for GameProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

// ---------------------------------------------------------------------------
// UserType
// ---------------------------------------------------------------------------

/// Account tier derived from the selected (or first available) profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Legacy,
    Mojang,
}

impl UserType {
    /// `Legacy` for legacy profiles, `Mojang` otherwise.
    pub fn from_profile(profile: &GameProfile) -> Self {
        if profile.legacy {
            Self::Legacy
        } else {
            Self::Mojang
        }
    }

    /// Wire and storage name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::Mojang => "mojang",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for UserType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "legacy" => Ok(Self::Legacy),
            "mojang" => Ok(Self::Mojang),
            other => Err(format!("unknown user type '{other}'")),
        }
    }
}

// ---------------------------------------------------------------------------
// PropertyMap
// ---------------------------------------------------------------------------

/// Opaque user attributes: each key maps to one or more values.
///
/// The session keeps exactly one of these and only ever replaces its
/// contents wholesale (see [`PropertyMap::replace_with`]); there is no
/// merge operation.
///
/// On the wire it is accepted in two shapes:
///
/// ```text
/// {"preferredLanguage": ["en"]}
/// [{"name": "preferredLanguage", "value": "en", "signature": "..."}]
/// ```
///
/// and always written in the first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyMap(BTreeMap<String, Vec<String>>);

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one value under `key`, keeping existing values.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.entry(key.into()).or_default().push(value.into());
    }

    /// All values stored under `key` (empty if none).
    pub fn get(&self, key: &str) -> &[String] {
        self.0.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Discards every current entry and takes `other`'s entries instead.
    pub fn replace_with(&mut self, other: PropertyMap) {
        self.0 = other.0;
    }

    /// Iterates `(key, values)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

impl Serialize for PropertyMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PropertyMapRepr {
    Map(BTreeMap<String, Vec<String>>),
    List(Vec<PropertyEntry>),
}

#[derive(Deserialize)]
struct PropertyEntry {
    name: String,
    value: String,
}

impl<'de> Deserialize<'de> for PropertyMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match PropertyMapRepr::deserialize(deserializer)? {
            PropertyMapRepr::Map(map) => Self(map),
            PropertyMapRepr::List(entries) => {
                let mut map = Self::new();
                for entry in entries {
                    map.insert(entry.name, entry.value);
                }
                map
            }
        })
    }
}

// ---------------------------------------------------------------------------
// UserRecord
// ---------------------------------------------------------------------------

/// Account record returned when a request sets `requestUser`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub properties: PropertyMap,
}
