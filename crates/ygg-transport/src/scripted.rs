//! A fake transport that replays queued responses.
//!
//! Used by tests of the layers above: queue the bodies the service should
//! "return", run the operation, then inspect which requests were sent.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use crate::{HttpRequest, HttpResponse, Transport, TransportError};

/// Replays queued responses in FIFO order and records every request.
///
/// When the queue is empty, `send` fails with
/// [`TransportError::ConnectionClosed`].
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    /// Creates a transport with nothing queued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response with the given status and body.
    pub fn push_response(&self, status: u16, body: impl Into<String>) {
        lock(&self.responses).push_back(Ok(HttpResponse::new(status, body)));
    }

    /// Queues a 200 response with the given body.
    pub fn push_ok(&self, body: impl Into<String>) {
        self.push_response(200, body);
    }

    /// Queues a transport failure.
    pub fn push_error(&self, error: TransportError) {
        lock(&self.responses).push_back(Err(error));
    }

    /// Returns a copy of every request sent so far.
    pub fn requests(&self) -> Vec<HttpRequest> {
        lock(&self.requests).clone()
    }

    /// Number of requests sent so far.
    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }

    /// Number of queued responses not yet consumed.
    pub fn remaining(&self) -> usize {
        lock(&self.responses).len()
    }
}

impl Transport for ScriptedTransport {
    async fn send(
        &self,
        request: HttpRequest,
    ) -> Result<HttpResponse, TransportError> {
        let url = request.url.to_string();
        lock(&self.requests).push(request);
        lock(&self.responses).pop_front().unwrap_or_else(|| {
            Err(TransportError::ConnectionClosed(format!(
                "no scripted response for {url}"
            )))
        })
    }
}

// A poisoned lock only means another test thread panicked; the queue
// itself is still usable.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
