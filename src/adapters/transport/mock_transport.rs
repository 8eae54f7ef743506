//! Scripted transport for tests.
//!
//! Responses are returned in the order they were queued; every request is
//! recorded so tests can assert on the exact headers and body that went out.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::ports::{HttpTransport, TransportError, TransportRequest, TransportResponse};

/// Mock transport.
///
/// # Example
///
/// ```ignore
/// let transport = MockTransport::new();
/// transport.push_json(200, r#"{"balance":{"pending":"0","available":"10"}}"#);
///
/// let gateway = DokuGatewayAdapter::new(config, signer, Arc::new(transport.clone()));
/// gateway.get_balance("SAC-1").await?;
///
/// assert_eq!(transport.requests()[0].method, Method::GET);
/// ```
#[derive(Clone, Default)]
pub struct MockTransport {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    responses: VecDeque<Result<TransportResponse, TransportError>>,
    requests: Vec<TransportRequest>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Methods
    // ════════════════════════════════════════════════════════════════════════════

    /// Queues a response with `status` and a JSON body.
    pub fn push_json(&self, status: u16, body: &str) {
        self.push_response(TransportResponse::new(status, body.as_bytes().to_vec()));
    }

    pub fn push_response(&self, response: TransportResponse) {
        self.state().responses.push_back(Ok(response));
    }

    /// Queues a transport failure.
    pub fn push_error(&self, error: TransportError) {
        self.state().responses.push_back(Err(error));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Assertion Helpers
    // ════════════════════════════════════════════════════════════════════════════

    /// All requests sent so far, oldest first.
    pub fn requests(&self) -> Vec<TransportRequest> {
        self.state().requests.clone()
    }

    pub fn last_request(&self) -> Option<TransportRequest> {
        self.state().requests.last().cloned()
    }

    pub fn request_count(&self) -> usize {
        self.state().requests.len()
    }

    /// Responses queued but not yet consumed.
    pub fn pending_responses(&self) -> usize {
        self.state().responses.len()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let mut state = self.state();
        state.requests.push(request);
        state.responses.pop_front().unwrap_or_else(|| {
            Err(TransportError::Connection(
                "no scripted response queued".to_string(),
            ))
        })
    }
}
