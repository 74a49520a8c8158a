//! HTTP transport implementation using `reqwest`.

use reqwest::header::CONTENT_TYPE;

use crate::{
    HttpRequest, HttpResponse, Method, Transport, TransportConfig,
    TransportError,
};

/// A [`Transport`] backed by a pooled `reqwest` client.
///
/// Cloning is cheap: clones share the same connection pool.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Builds a transport with the given timeouts and proxy.
    pub fn new(config: &TransportConfig) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.read_timeout);

        if let Some(proxy) = &config.proxy {
            let proxy = reqwest::Proxy::all(proxy.as_str())
                .map_err(|e| TransportError::Build(e.to_string()))?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| TransportError::Build(e.to_string()))?;
        Ok(Self { client })
    }

    /// Wraps an existing client (for connection pool reuse).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    async fn send(
        &self,
        request: HttpRequest,
    ) -> Result<HttpResponse, TransportError> {
        let url = request.url.to_string();
        tracing::debug!(method = %request.method, %url, "opening connection");

        let mut builder = match request.method {
            Method::Get => self.client.get(request.url),
            Method::Post => self.client.post(request.url),
        };
        if let Some(content_type) = &request.content_type {
            builder = builder.header(CONTENT_TYPE, content_type.as_str());
        }
        if let Some(body) = request.body {
            tracing::debug!(%url, bytes = body.len(), "writing request body");
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| request_error(&url, e))?;

        // Error statuses are read the same way as successes: the service
        // puts its structured error object in the body.
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout(url.clone())
            } else {
                TransportError::ReceiveFailed {
                    url: url.clone(),
                    reason: e.to_string(),
                }
            }
        })?;

        tracing::debug!(%url, status, bytes = body.len(), "response read");
        Ok(HttpResponse { status, body })
    }
}

fn request_error(url: &str, err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout(url.to_string())
    } else {
        tracing::debug!(%url, error = %err, "request failed");
        TransportError::RequestFailed {
            url: url.to_string(),
            reason: err.to_string(),
        }
    }
}
