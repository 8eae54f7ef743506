//! Inbound payment notifications.

mod payment_notification;

pub use payment_notification::{
    NotificationOrder, NotificationRef, NotificationTransaction, PaymentNotification,
    TransactionStatus,
};
