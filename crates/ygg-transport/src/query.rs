//! Query-string helpers for GET requests.

use url::Url;
use url::form_urlencoded::byte_serialize;

/// Builds a URL-encoded query string from key/value pairs.
///
/// Pairs are joined with `&`. A key whose value is `None` is emitted on
/// its own, without `=`.
///
/// ```rust
/// use ygg_transport::build_query;
///
/// let query = build_query(&[("name", Some("Steve Jobs")), ("flag", None)]);
/// assert_eq!(query, "name=Steve+Jobs&flag");
/// ```
pub fn build_query(pairs: &[(&str, Option<&str>)]) -> String {
    let mut query = String::new();
    for (key, value) in pairs {
        if !query.is_empty() {
            query.push('&');
        }
        query.extend(byte_serialize(key.as_bytes()));
        if let Some(value) = value {
            query.push('=');
            query.extend(byte_serialize(value.as_bytes()));
        }
    }
    query
}

/// Appends an already-encoded query string to a URL.
///
/// Uses `&` when the URL already carries a non-empty query, `?` otherwise.
pub fn concatenate_url(url: &Url, query: &str) -> Url {
    let mut joined = url.clone();
    let combined = match url.query() {
        Some(existing) if !existing.is_empty() => {
            format!("{existing}&{query}")
        }
        _ => query.to_string(),
    };
    joined.set_query(Some(&combined));
    joined
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_query_encodes_keys_and_values() {
        let query = build_query(&[("user name", Some("a&b=c"))]);
        assert_eq!(query, "user+name=a%26b%3Dc");
    }

    #[test]
    fn test_build_query_key_without_value() {
        let query = build_query(&[("a", Some("1")), ("b", None), ("c", Some("3"))]);
        assert_eq!(query, "a=1&b&c=3");
    }

    #[test]
    fn test_build_query_empty() {
        assert_eq!(build_query(&[]), "");
    }

    #[test]
    fn test_concatenate_url_without_existing_query() {
        let url = Url::parse("http://localhost/session/hasJoined").unwrap();
        let joined = concatenate_url(&url, "username=alice");
        assert_eq!(
            joined.as_str(),
            "http://localhost/session/hasJoined?username=alice"
        );
    }

    #[test]
    fn test_concatenate_url_with_existing_query() {
        let url = Url::parse("http://localhost/profiles?agent=minecraft").unwrap();
        let joined = concatenate_url(&url, "name=alice");
        assert_eq!(
            joined.as_str(),
            "http://localhost/profiles?agent=minecraft&name=alice"
        );
    }
}
