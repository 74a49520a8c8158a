//! End-to-end tests: a `Ygg` client over real HTTP against a scripted
//! loopback authentication server.

use std::time::Duration;

use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use ygg::prelude::*;

// =========================================================================
// Scripted auth server
// =========================================================================

/// Serves one connection per scripted `(status line, body)` pair, in
/// order. Resolves to the raw requests it received.
async fn serve(
    script: Vec<(&'static str, String)>,
) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let mut seen = Vec::new();
        for (status_line, body) in script {
            let (mut stream, _) = listener.accept().await.unwrap();
            seen.push(read_request(&mut stream).await);
            let response = format!(
                "HTTP/1.1 {status_line}\r\n\
                 Content-Type: application/json\r\n\
                 Content-Length: {}\r\n\
                 Connection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            let _ = stream.shutdown().await;
        }
        seen
    });

    (format!("http://{addr}/auth"), handle)
}

async fn read_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
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

fn client(base_url: &str) -> Ygg {
    Ygg::builder()
        .base_url(base_url)
        .client_token("ct-e2e")
        .timeout(Duration::from_secs(5))
        .build()
        .expect("client builds")
}

// =========================================================================
// Tests
// =========================================================================

#[tokio::test]
async fn test_login_then_select_profile_over_http() {
    let (base, server) = serve(vec![
        (
            "200 OK",
            json!({
                "accessToken": "abc",
                "clientToken": "ct-e2e",
                "availableProfiles": [{"id": "p1", "name": "Alice"}],
                "user": {"id": "u-1", "properties": [{"name": "lang", "value": "en"}]}
            })
            .to_string(),
        ),
        (
            "200 OK",
            json!({
                "accessToken": "abc-2",
                "clientToken": "ct-e2e",
                "selectedProfile": {"id": "p1", "name": "Alice"}
            })
            .to_string(),
        ),
    ])
    .await;

    let ygg = client(&base);
    let mut session = ygg.session();
    session.set_username("alice");
    session.set_password("secret");

    session.log_in().await.expect("login succeeds");
    assert!(session.is_logged_in());
    assert!(!session.can_play_online());

    let profile = session.available_profiles()[0].clone();
    session
        .select_game_profile(Some(&profile))
        .await
        .expect("selection succeeds");

    assert!(session.can_play_online());
    assert_eq!(session.user_id(), Some("u-1"));
    assert_eq!(session.user_properties().get("lang"), ["en"]);
    assert_eq!(session.session_token().as_deref(), Some("token:abc-2:p1"));

    let seen = server.await.unwrap();
    assert!(seen[0].starts_with("POST /auth/authenticate HTTP/1.1"));
    assert!(seen[0].contains("\r\n\r\ndata=%7B"));
    assert!(seen[0].contains("%22username%22%3A%22alice%22"));
    assert!(seen[1].starts_with("POST /auth/refresh HTTP/1.1"));
    assert!(seen[1].contains("%22selectedProfile%22"));
}

#[tokio::test]
async fn test_rejected_login_surfaces_remote_error() {
    let (base, server) = serve(vec![(
        "403 Forbidden",
        json!({
            "error": "ForbiddenOperationException",
            "errorMessage": "Invalid credentials. Invalid username or password."
        })
        .to_string(),
    )])
    .await;

    let mut session = client(&base).session();
    session.set_username("alice");
    session.set_password("wrong");

    let err: YggError = session.log_in().await.unwrap_err().into();

    let auth = err.as_auth().expect("an auth error");
    assert!(auth.is_invalid_credentials());
    assert!(err.to_string().contains("Invalid username or password"));
    assert!(!session.is_logged_in());
    server.await.unwrap();
}

#[tokio::test]
async fn test_stored_token_validates_over_http() {
    let (base, server) = serve(vec![("204 No Content", String::new())]).await;

    let mut storage = StorageMap::new();
    storage.insert("username".into(), json!("alice"));
    storage.insert("uuid".into(), json!("p1"));
    storage.insert("displayName".into(), json!("Alice"));
    storage.insert("accessToken".into(), json!("cached"));

    let mut session = client(&base).session();
    session.load_from_storage(&storage);
    assert_eq!(session.state(), SessionState::LoggedIn { online: false });

    session.log_in().await.expect("token still valid");

    assert_eq!(session.state(), SessionState::LoggedIn { online: true });
    assert!(session.can_play_online());
    let seen = server.await.unwrap();
    assert_eq!(seen.len(), 1);
    assert!(seen[0].starts_with("POST /auth/validate HTTP/1.1"));
}

#[tokio::test]
async fn test_unreachable_service_is_unavailable() {
    // Bind then drop to get a port nothing listens on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut session = client(&format!("http://{addr}/auth")).session();
    session.set_username("alice");
    session.set_password("secret");

    let err = session.log_in().await.unwrap_err();

    assert!(err.is_unavailable());
    assert!(matches!(err, AuthError::Transport(_)));
}
