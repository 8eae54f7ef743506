//! Axum router configuration for the notification endpoint.

use axum::{routing::post, Router};

use super::handlers::{handle_payment_notification, NotificationAppState};

/// Create the notification router.
///
/// # Routes
/// - `POST {path}` - Handle gateway payment notifications (signature verified)
///
/// `path` must equal the request target the verifier was built with, since it
/// is part of the signed canonical string.
pub fn notification_router(path: &str) -> Router<NotificationAppState> {
    Router::new().route(path, post(handle_payment_notification))
}
