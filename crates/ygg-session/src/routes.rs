//! The fixed route table of the authentication service.

use std::fmt;

use url::Url;

use crate::AuthError;

/// One of the five endpoints the service exposes. Requests only ever go to
/// URLs from a [`RouteTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Authenticate,
    Refresh,
    Validate,
    Invalidate,
    Signout,
}

impl Route {
    /// Every route, in table order.
    pub const ALL: [Route; 5] = [
        Route::Authenticate,
        Route::Refresh,
        Route::Validate,
        Route::Invalidate,
        Route::Signout,
    ];

    /// Path segment appended to the base URL.
    pub fn path(self) -> &'static str {
        match self {
            Self::Authenticate => "authenticate",
            Self::Refresh => "refresh",
            Self::Validate => "validate",
            Self::Invalidate => "invalidate",
            Self::Signout => "signout",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Absolute URLs of every [`Route`], resolved once against a base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    base: Url,
    urls: [Url; 5],
}

impl RouteTable {
    /// Resolves every route against `base`.
    ///
    /// A missing trailing slash is added, so `http://host/auth` and
    /// `http://host/auth/` both yield `http://host/auth/refresh`.
    pub fn new(base: &str) -> Result<Self, AuthError> {
        let base = if base.ends_with('/') {
            Url::parse(base)?
        } else {
            Url::parse(&format!("{base}/"))?
        };
        let urls = [
            base.join(Route::Authenticate.path())?,
            base.join(Route::Refresh.path())?,
            base.join(Route::Validate.path())?,
            base.join(Route::Invalidate.path())?,
            base.join(Route::Signout.path())?,
        ];
        Ok(Self { base, urls })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// The absolute URL for `route`.
    pub fn url(&self, route: Route) -> &Url {
        let index = match route {
            Route::Authenticate => 0,
            Route::Refresh => 1,
            Route::Validate => 2,
            Route::Invalidate => 3,
            Route::Signout => 4,
        };
        &self.urls[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_table_resolves_every_route() {
        let table = RouteTable::new("http://localhost/minecraft/auth/").unwrap();
        for route in Route::ALL {
            assert_eq!(
                table.url(route).as_str(),
                format!("http://localhost/minecraft/auth/{}", route.path())
            );
        }
    }

    #[test]
    fn test_route_table_adds_missing_trailing_slash() {
        let table = RouteTable::new("https://auth.example.com/api").unwrap();
        assert_eq!(
            table.url(Route::Validate).as_str(),
            "https://auth.example.com/api/validate"
        );
        assert_eq!(table.base().as_str(), "https://auth.example.com/api/");
    }

    #[test]
    fn test_route_table_rejects_relative_base() {
        let result = RouteTable::new("minecraft/auth/");
        assert!(matches!(result, Err(AuthError::InvalidBaseUrl(_))));
    }

    #[test]
    fn test_route_display_is_path() {
        assert_eq!(Route::Signout.to_string(), "signout");
    }
}
