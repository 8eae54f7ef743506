//! Payment notification payloads.
//!
//! Only the fields needed to settle an order are captured; everything else in
//! the gateway's notification body is ignored.

use serde::{Deserialize, Serialize};

/// Notification body posted by the gateway when a payment changes state.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PaymentNotification {
    pub order: NotificationOrder,

    pub transaction: NotificationTransaction,

    /// Product family, e.g. `VIRTUAL_ACCOUNT`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<NotificationRef>,

    /// Specific channel, e.g. `VIRTUAL_ACCOUNT_BCA`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<NotificationRef>,

    /// Acquiring bank or provider, e.g. `BCA`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acquirer: Option<NotificationRef>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotificationOrder {
    pub invoice_number: String,
    pub amount: i64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotificationTransaction {
    pub status: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_request_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotificationRef {
    pub id: String,
}

/// Transaction outcome carried by a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Success,
    Failed,
    Pending,
    Expired,
    /// Any status this service does not act on.
    Other,
}

impl TransactionStatus {
    /// Parses a gateway status, case-insensitively.
    pub fn from_gateway(status: &str) -> Self {
        match status.trim().to_ascii_uppercase().as_str() {
            "SUCCESS" => TransactionStatus::Success,
            "FAILED" => TransactionStatus::Failed,
            "PENDING" => TransactionStatus::Pending,
            "EXPIRED" => TransactionStatus::Expired,
            _ => TransactionStatus::Other,
        }
    }

    /// Returns true once no further notification will change the outcome.
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            TransactionStatus::Success | TransactionStatus::Failed | TransactionStatus::Expired
        )
    }
}

impl PaymentNotification {
    pub fn status(&self) -> TransactionStatus {
        TransactionStatus::from_gateway(&self.transaction.status)
    }

    pub fn channel_id(&self) -> Option<&str> {
        self.channel.as_ref().map(|c| c.id.as_str())
    }
}
