//! HandlePaymentNotificationHandler - Command handler for gateway payment notifications.

use std::sync::Arc;

use axum::http::StatusCode;
use thiserror::Error;

use crate::domain::notification::{PaymentNotification, TransactionStatus};
use crate::domain::signing::{InboundNotification, NotificationVerifier, SignatureError};

/// Command to handle a payment notification.
#[derive(Debug, Clone)]
pub struct HandlePaymentNotificationCommand {
    /// `Signature` header, `HMACSHA256=...`.
    pub signature: String,
    /// `Request-Id` header.
    pub request_id: String,
    /// `Request-Timestamp` header.
    pub request_timestamp: String,
    /// Raw notification body, exactly as received.
    pub body: Vec<u8>,
}

/// Result of notification processing.
#[derive(Debug, Clone, PartialEq)]
pub enum HandlePaymentNotificationResult {
    /// The gateway reports the order as paid.
    PaymentSucceeded {
        invoice_number: String,
        amount: i64,
        channel: Option<String>,
    },
    /// The payment failed or expired.
    PaymentFailed {
        invoice_number: String,
        status: TransactionStatus,
    },
    /// Authentic, but no final outcome yet.
    Acknowledged {
        invoice_number: String,
        status: TransactionStatus,
    },
}

impl HandlePaymentNotificationResult {
    pub fn invoice_number(&self) -> &str {
        match self {
            HandlePaymentNotificationResult::PaymentSucceeded { invoice_number, .. }
            | HandlePaymentNotificationResult::PaymentFailed { invoice_number, .. }
            | HandlePaymentNotificationResult::Acknowledged { invoice_number, .. } => {
                invoice_number
            }
        }
    }
}

/// Errors from notification handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotificationError {
    #[error(transparent)]
    Verification(#[from] SignatureError),

    #[error("Malformed notification payload: {0}")]
    MalformedPayload(String),
}

impl NotificationError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            NotificationError::Verification(err) => err.status_code(),
            NotificationError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            NotificationError::Verification(SignatureError::SignatureMismatch { .. }) => {
                "INVALID_SIGNATURE"
            }
            NotificationError::Verification(SignatureError::StaleTimestamp { .. }) => {
                "STALE_TIMESTAMP"
            }
            NotificationError::Verification(SignatureError::MalformedTimestamp { .. }) => {
                "MALFORMED_TIMESTAMP"
            }
            NotificationError::Verification(_) => "CONFIGURATION_ERROR",
            NotificationError::MalformedPayload(_) => "MALFORMED_PAYLOAD",
        }
    }
}

/// Handler for inbound payment notifications.
///
/// Authenticates the notification before the body is parsed, so nothing
/// from an unauthenticated payload reaches the logs.
pub struct HandlePaymentNotificationHandler {
    verifier: Arc<NotificationVerifier>,
}

impl HandlePaymentNotificationHandler {
    pub fn new(verifier: Arc<NotificationVerifier>) -> Self {
        Self { verifier }
    }

    pub async fn handle(
        &self,
        cmd: HandlePaymentNotificationCommand,
    ) -> Result<HandlePaymentNotificationResult, NotificationError> {
        // 1. Authenticate
        self.verifier.verify(&InboundNotification {
            signature: &cmd.signature,
            request_id: &cmd.request_id,
            request_timestamp: &cmd.request_timestamp,
            body: &cmd.body,
        })?;

        // 2. Parse
        let notification: PaymentNotification = serde_json::from_slice(&cmd.body)
            .map_err(|e| NotificationError::MalformedPayload(e.to_string()))?;

        let status = notification.status();
        tracing::info!(
            request_id = %cmd.request_id,
            invoice_number = %notification.order.invoice_number,
            status = ?status,
            "Payment notification accepted"
        );

        // 3. Classify
        let invoice_number = notification.order.invoice_number.clone();
        Ok(match status {
            TransactionStatus::Success => HandlePaymentNotificationResult::PaymentSucceeded {
                invoice_number,
                amount: notification.order.amount,
                channel: notification.channel_id().map(str::to_string),
            },
            TransactionStatus::Failed | TransactionStatus::Expired => {
                HandlePaymentNotificationResult::PaymentFailed {
                    invoice_number,
                    status,
                }
            }
            TransactionStatus::Pending | TransactionStatus::Other => {
                HandlePaymentNotificationResult::Acknowledged {
                    invoice_number,
                    status,
                }
            }
        })
    }
}
