//! Recording transport.
//!
//! `RecordingTransport` implements [`Transport`] without a network. Every
//! request is recorded in order and answered from a queue of canned
//! responses, so the same [`ticketweb_client::ApiClient`] and
//! [`ticketweb_app::Runtime`] code that runs in production runs in tests.

#![allow(clippy::disallowed_types, reason = "Synchronous locking operations only")]

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, PoisonError},
};

use serde_json::Value;
use ticketweb_client::{ClientError, HttpRequest, Transport};

#[derive(Debug, Default)]
struct Recorded {
    requests: Vec<HttpRequest>,
    responses: VecDeque<Result<Value, ClientError>>,
}

/// In-memory transport that records requests and replays canned responses.
///
/// Clones share state: keep one handle in the test and give another to the
/// client. When the queue is empty a request is answered with JSON `null`.
#[derive(Debug, Clone, Default)]
pub struct RecordingTransport {
    state: Arc<Mutex<Recorded>>,
}

impl RecordingTransport {
    /// Transport with no queued responses.
    pub fn new() -> Self {
        Self::default()
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut Recorded) -> R) -> R {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }

    /// Queue a successful response body.
    pub fn respond_with(&self, body: Value) {
        self.with_state(|s| s.responses.push_back(Ok(body)));
    }

    /// Queue a failure.
    pub fn fail_with(&self, error: ClientError) {
        self.with_state(|s| s.responses.push_back(Err(error)));
    }

    /// Requests seen so far, in order.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.with_state(|s| s.requests.clone())
    }

    /// Drain the recorded requests.
    pub fn take_requests(&self) -> Vec<HttpRequest> {
        self.with_state(|s| std::mem::take(&mut s.requests))
    }

    /// Responses still queued.
    pub fn pending_responses(&self) -> usize {
        self.with_state(|s| s.responses.len())
    }
}

impl Transport for RecordingTransport {
    async fn execute(&self, request: HttpRequest) -> Result<Value, ClientError> {
        tracing::trace!(operation = request.operation, path = %request.path, "recorded request");
        self.with_state(|s| {
            s.requests.push(request);
            s.responses.pop_front().unwrap_or(Ok(Value::Null))
        })
    }
}
