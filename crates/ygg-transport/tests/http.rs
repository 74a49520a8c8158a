//! Integration tests for the reqwest-backed HTTP transport.
//!
//! Each test spins up a one-shot HTTP server on a loopback port, so the
//! real client stack (connection, headers, body reading) is exercised.

#[cfg(feature = "http")]
mod http {
    use std::time::Duration;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use url::Url;
    use ygg_transport::{
        HttpRequest, HttpTransport, Transport, TransportConfig,
        TransportError,
    };

    /// Serves exactly one request with the given status line and body.
    /// The join handle resolves to the raw request text the server saw.
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (Url, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let raw = read_request(&mut stream).await;
            let response = format!(
                "HTTP/1.1 {status_line}\r\n\
                 Content-Type: application/json\r\n\
                 Content-Length: {}\r\n\
                 Connection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            let _ = stream.shutdown().await;
            raw
        });

        let url = Url::parse(&format!("http://{addr}/auth/validate")).unwrap();
        (url, handle)
    }

    /// Reads one request: headers, then as many body bytes as
    /// `Content-Length` announces.
    async fn read_request(stream: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = stream.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            if let Some(end) = header_end(&buf) {
                let headers = String::from_utf8_lossy(&buf[..end]).to_lowercase();
                let len = headers
                    .lines()
                    .find_map(|l| l.strip_prefix("content-length:"))
                    .map(|v| v.trim().parse::<usize>().unwrap())
                    .unwrap_or(0);
                if buf.len() >= end + 4 + len {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    fn header_end(buf: &[u8]) -> Option<usize> {
        buf.windows(4).position(|w| w == b"\r\n\r\n")
    }

    fn transport() -> HttpTransport {
        HttpTransport::new(&TransportConfig::default()).expect("client builds")
    }

    #[tokio::test]
    async fn test_post_form_sends_content_type_and_body() {
        let (url, server) = serve_once("200 OK", r#"{"ok":true}"#).await;

        let response = transport()
            .send(HttpRequest::post_form(url, "data=%7B%7D"))
            .await
            .expect("request should succeed");

        assert_eq!(response.status, 200);
        assert_eq!(response.body, r#"{"ok":true}"#);

        let raw = server.await.unwrap();
        let lower = raw.to_lowercase();
        assert!(raw.starts_with("POST /auth/validate HTTP/1.1"));
        assert!(
            lower.contains("content-type: application/x-www-form-urlencoded")
        );
        assert!(lower.contains("content-length: 11"));
        assert!(raw.ends_with("data=%7B%7D"));
    }

    #[tokio::test]
    async fn test_error_status_body_is_still_read() {
        // The service embeds its structured error in 4xx bodies, so an
        // error status must come back as Ok with the body intact.
        let body = r#"{"error":"ForbiddenOperationException","errorMessage":"Invalid token."}"#;
        let (url, server) = serve_once("403 Forbidden", body).await;

        let response = transport()
            .send(HttpRequest::post_form(url, "data=%7B%7D"))
            .await
            .expect("an error status is still a response");

        assert_eq!(response.status, 403);
        assert!(!response.is_success());
        assert_eq!(response.body, body);
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_get_request_has_no_body() {
        let (url, server) = serve_once("204 No Content", "").await;

        let response = transport()
            .send(HttpRequest::get(url))
            .await
            .expect("request should succeed");

        assert_eq!(response.status, 204);
        assert!(response.is_body_blank());
        let raw = server.await.unwrap();
        assert!(raw.starts_with("GET /auth/validate HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_with_client_reuses_given_client() {
        let (url, server) = serve_once("200 OK", "{}").await;
        let transport = HttpTransport::with_client(reqwest::Client::new());

        let response = transport
            .send(HttpRequest::get(url))
            .await
            .expect("request should succeed");

        assert_eq!(response.status, 200);
        assert_eq!(response.body, "{}");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        // Bind to learn a free port, then close it so nothing listens.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let url = Url::parse(&format!("http://{addr}/auth/validate")).unwrap();

        let result = transport().send(HttpRequest::post_form(url, "data=")).await;

        assert!(
            matches!(result, Err(TransportError::RequestFailed { .. })),
            "expected RequestFailed, got {result:?}"
        );
    }

    #[tokio::test]
    async fn test_read_timeout_is_reported() {
        // Accept the connection but never answer.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
            drop(stream);
        });

        let config =
            TransportConfig::default().with_timeout(Duration::from_millis(200));
        let transport = HttpTransport::new(&config).unwrap();
        let url = Url::parse(&format!("http://{addr}/auth/refresh")).unwrap();

        let result = transport.send(HttpRequest::post_form(url, "data=")).await;

        assert!(
            matches!(result, Err(TransportError::Timeout(_))),
            "expected Timeout, got {result:?}"
        );
        server.abort();
    }

    #[test]
    fn test_invalid_proxy_fails_to_build() {
        let config = TransportConfig::default().with_proxy("not a url");
        let result = HttpTransport::new(&config);
        assert!(matches!(result, Err(TransportError::Build(_))));
    }
}
