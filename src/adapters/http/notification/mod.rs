//! HTTP adapter for inbound payment notifications.
//!
//! - `POST {notification_path}` - Verify and classify a gateway notification

pub mod dto;
mod handlers;
mod routes;

pub use dto::NotificationAckResponse;
pub use handlers::{handle_payment_notification, NotificationApiError, NotificationAppState};
pub use routes::notification_router;
