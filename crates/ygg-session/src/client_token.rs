//! The per-process client identifier.

use std::fmt;

use uuid::Uuid;

/// Opaque identifier the service ties access tokens to.
///
/// Generated once when the service is built and never changed afterwards;
/// every refresh must present the same value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientToken(String);

impl ClientToken {
    /// Generates a random version-4 UUID string.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().hyphenated().to_string())
    }

    /// Wraps an externally supplied identifier.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_produces_v4_uuid() {
        let token = ClientToken::generate();
        let parsed = Uuid::parse_str(token.as_str()).expect("valid uuid");
        assert_eq!(parsed.get_version_num(), 4);
        assert_eq!(token.as_str().len(), 36);
    }

    #[test]
    fn test_generate_is_unique() {
        assert_ne!(ClientToken::generate(), ClientToken::generate());
    }

    #[test]
    fn test_new_keeps_supplied_value() {
        assert_eq!(ClientToken::new("ct-1").to_string(), "ct-1");
    }
}
