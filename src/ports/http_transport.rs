//! HTTP transport port.
//!
//! The gateway adapter builds fully signed requests and hands them to a
//! transport. Retries, TLS and connection pooling live behind this trait;
//! any HTTP status, 2xx or not, is a successful transport outcome.

use std::time::Duration;

use async_trait::async_trait;
use http::Method;
use thiserror::Error;

/// Port for sending one HTTP request.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends `request` and returns the response status and body.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` only when no HTTP response was received.
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}

/// A fully built outbound request.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    pub url: String,
    /// Header names are sent exactly as given.
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
    pub timeout: Duration,
}

impl TransportRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Status and body of a received response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failure to obtain any HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl TransportError {
    /// Timeouts and connection failures may succeed on another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            TransportError::Timeout(_) | TransportError::Connection(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_transport_is_object_safe() {
        fn _accepts_dyn(_transport: &dyn HttpTransport) {}
    }

    #[test]
    fn success_covers_2xx_only() {
        assert!(TransportResponse::new(200, "").is_success());
        assert!(TransportResponse::new(201, "").is_success());
        assert!(!TransportResponse::new(199, "").is_success());
        assert!(!TransportResponse::new(302, "").is_success());
        assert!(!TransportResponse::new(401, "").is_success());
    }

    #[test]
    fn header_lookup_ignores_case() {
        let request = TransportRequest {
            method: Method::GET,
            url: "https://example.test".to_string(),
            headers: vec![("Request-Id".to_string(), "abc".to_string())],
            body: Vec::new(),
            timeout: Duration::from_secs(1),
        };
        assert_eq!(request.header("request-id"), Some("abc"));
        assert_eq!(request.header("Signature"), None);
    }

    #[test]
    fn only_network_failures_are_retryable() {
        assert!(TransportError::Timeout(Duration::from_secs(30)).is_retryable());
        assert!(TransportError::Connection("reset".to_string()).is_retryable());
        assert!(!TransportError::InvalidRequest("bad url".to_string()).is_retryable());
    }
}
