//! Notification handlers.
//!
//! Authenticates and classifies payment notifications pushed by the gateway.

mod handle_payment_notification;

pub use handle_payment_notification::{
    HandlePaymentNotificationCommand, HandlePaymentNotificationHandler,
    HandlePaymentNotificationResult, NotificationError,
};
