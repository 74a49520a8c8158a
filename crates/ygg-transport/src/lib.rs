//! Transport abstraction layer for ygg.
//!
//! Provides the [`Transport`] trait: the minimal capability the
//! authentication service needs from the network, "send this request, give
//! me back the status and body". Connection pooling, TLS, proxies and
//! timeouts all live behind it.
//!
//! # Feature Flags
//!
//! - `http` (default): real HTTP transport via `reqwest`
//! - `test-util`: [`ScriptedTransport`], a fake that replays queued responses

#![allow(async_fn_in_trait)]

mod config;
mod error;
#[cfg(feature = "http")]
mod http;
mod query;
#[cfg(feature = "test-util")]
mod scripted;

pub use config::TransportConfig;
pub use error::TransportError;
#[cfg(feature = "http")]
pub use http::HttpTransport;
pub use query::{build_query, concatenate_url};
#[cfg(feature = "test-util")]
pub use scripted::ScriptedTransport;

use std::fmt;

use url::Url;

/// Content type used for every POST the service sends.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// HTTP method of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
        }
    }
}

/// A single outgoing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// GET or POST.
    pub method: Method,
    /// Absolute target URL.
    pub url: Url,
    /// Value of the `Content-Type` header, if a body is sent.
    pub content_type: Option<String>,
    /// Request body, already encoded.
    pub body: Option<String>,
}

impl HttpRequest {
    /// Creates a body-less GET request.
    pub fn get(url: Url) -> Self {
        Self {
            method: Method::Get,
            url,
            content_type: None,
            body: None,
        }
    }

    /// Creates a POST request with a form-encoded body.
    pub fn post_form(url: Url, body: impl Into<String>) -> Self {
        Self {
            method: Method::Post,
            url,
            content_type: Some(FORM_CONTENT_TYPE.to_string()),
            body: Some(body.into()),
        }
    }
}

/// The status and raw body text of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// Creates a response from a status code and body text.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns `true` if the body is empty or only whitespace.
    pub fn is_body_blank(&self) -> bool {
        self.body.trim().is_empty()
    }
}

/// Sends requests and returns responses.
///
/// Implementations must return `Ok` for *every* response that arrived,
/// whatever its status, and read the body in both the success and the
/// error case. `Err` is reserved for requests that produced no response.
pub trait Transport: Send + Sync + 'static {
    /// Sends one request and waits for its response.
    async fn send(
        &self,
        request: HttpRequest,
    ) -> Result<HttpResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url() -> Url {
        Url::parse("http://localhost/minecraft/auth/validate").unwrap()
    }

    #[test]
    fn test_method_display() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Post.to_string(), "POST");
    }

    #[test]
    fn test_post_form_sets_form_content_type() {
        let req = HttpRequest::post_form(url(), "data=%7B%7D");
        assert_eq!(req.method, Method::Post);
        assert_eq!(req.content_type.as_deref(), Some(FORM_CONTENT_TYPE));
        assert_eq!(req.body.as_deref(), Some("data=%7B%7D"));
    }

    #[test]
    fn test_get_has_no_body() {
        let req = HttpRequest::get(url());
        assert_eq!(req.method, Method::Get);
        assert!(req.body.is_none());
        assert!(req.content_type.is_none());
    }

    #[test]
    fn test_response_is_success_only_for_2xx() {
        assert!(HttpResponse::new(200, "").is_success());
        assert!(HttpResponse::new(204, "").is_success());
        assert!(!HttpResponse::new(199, "").is_success());
        assert!(!HttpResponse::new(403, "").is_success());
        assert!(!HttpResponse::new(500, "").is_success());
    }

    #[test]
    fn test_response_blank_body_detection() {
        assert!(HttpResponse::new(204, "").is_body_blank());
        assert!(HttpResponse::new(204, "  \n").is_body_blank());
        assert!(!HttpResponse::new(200, "{}").is_body_blank());
    }
}
