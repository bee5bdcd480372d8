//! Test utilities for exercising the client without a running OSRM server.
//!
//! [`StubTransport`] answers every call with a canned outcome and records the
//! calls it received so tests can inspect the URLs the client produced.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use crate::config::DEFAULT_TIMEOUT;
use crate::error::TransportError;
use crate::transport::{HttpCall, HttpReply, HttpTransport};

/// Stub [`HttpTransport`] for testing.
///
/// # Example
///
/// ```
/// use osrm_client::test_support::StubTransport;
///
/// let transport = StubTransport::with_json(200, r#"{"code":"Ok","waypoints":[]}"#);
/// assert!(transport.calls().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct StubTransport {
    behaviour: StubBehaviour,
    calls: Arc<Mutex<Vec<HttpCall>>>,
}

#[derive(Debug, Clone)]
enum StubBehaviour {
    Reply(HttpReply),
    Timeout(Duration),
    Network(String),
    Pending,
}

impl StubTransport {
    fn with_behaviour(behaviour: StubBehaviour) -> Self {
        Self {
            behaviour,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Answer every call with `status` and `body`.
    #[must_use]
    pub fn with_reply(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self::with_behaviour(StubBehaviour::Reply(HttpReply {
            status,
            body: body.into(),
        }))
    }

    /// Answer every call with `status` and a JSON text body.
    #[must_use]
    pub fn with_json(status: u16, body: &str) -> Self {
        Self::with_reply(status, body.as_bytes())
    }

    /// Fail every call with a timeout.
    #[must_use]
    pub fn timing_out() -> Self {
        Self::with_behaviour(StubBehaviour::Timeout(DEFAULT_TIMEOUT))
    }

    /// Fail every call with a network error carrying `message`.
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_behaviour(StubBehaviour::Network(message.into()))
    }

    /// Never answer; useful for exercising cancellation.
    #[must_use]
    pub fn pending() -> Self {
        Self::with_behaviour(StubBehaviour::Pending)
    }

    /// Calls received so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<HttpCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, call: HttpCall) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }
}

#[async_trait]
impl HttpTransport for StubTransport {
    async fn send(&self, call: HttpCall) -> Result<HttpReply, TransportError> {
        let url = call.url.clone();
        self.record(call);
        match &self.behaviour {
            StubBehaviour::Reply(reply) => Ok(reply.clone()),
            StubBehaviour::Timeout(timeout) => Err(TransportError::Timeout {
                url,
                timeout: *timeout,
            }),
            StubBehaviour::Network(message) => Err(TransportError::Network {
                url,
                source: message.clone().into(),
            }),
            StubBehaviour::Pending => std::future::pending().await,
        }
    }
}
