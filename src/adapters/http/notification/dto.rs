//! Response bodies for the notification endpoint.

use serde::{Deserialize, Serialize};

use crate::application::handlers::notification::HandlePaymentNotificationResult;

/// Acknowledgement returned to the gateway once a notification is accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationAckResponse {
    pub invoice_number: String,
    /// `payment_succeeded`, `payment_failed` or `acknowledged`.
    pub outcome: String,
}

impl From<HandlePaymentNotificationResult> for NotificationAckResponse {
    fn from(result: HandlePaymentNotificationResult) -> Self {
        let outcome = match &result {
            HandlePaymentNotificationResult::PaymentSucceeded { .. } => "payment_succeeded",
            HandlePaymentNotificationResult::PaymentFailed { .. } => "payment_failed",
            HandlePaymentNotificationResult::Acknowledged { .. } => "acknowledged",
        };
        Self {
            invoice_number: result.invoice_number().to_string(),
            outcome: outcome.to_string(),
        }
    }
}
