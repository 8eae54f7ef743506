//! HTTP handler for gateway payment notifications.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};

use crate::adapters::http::error_response::{ErrorResponse, RequestError};
use crate::application::handlers::notification::{
    HandlePaymentNotificationCommand, HandlePaymentNotificationHandler, NotificationError,
};
use crate::domain::signing::NotificationVerifier;

use super::dto::NotificationAckResponse;

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct NotificationAppState {
    pub verifier: Arc<NotificationVerifier>,
}

impl NotificationAppState {
    pub fn new(verifier: Arc<NotificationVerifier>) -> Self {
        Self { verifier }
    }

    pub fn notification_handler(&self) -> HandlePaymentNotificationHandler {
        HandlePaymentNotificationHandler::new(self.verifier.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST {notification_path} - Receive a payment notification
///
/// The body is passed through untouched; its exact bytes are covered by the
/// signature.
pub async fn handle_payment_notification(
    State(state): State<NotificationAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, NotificationApiError> {
    let cmd = HandlePaymentNotificationCommand {
        signature: required_header(&headers, "Signature")?,
        request_id: required_header(&headers, "Request-Id")?,
        request_timestamp: required_header(&headers, "Request-Timestamp")?,
        body: body.to_vec(),
    };

    let result = state.notification_handler().handle(cmd).await?;

    Ok(Json(NotificationAckResponse::from(result)))
}

fn required_header(headers: &HeaderMap, name: &str) -> Result<String, NotificationApiError> {
    let value = headers.get(name).ok_or_else(|| {
        NotificationApiError::Request(RequestError::bad_request(
            "MISSING_HEADER",
            format!("Missing {} header", name),
        ))
    })?;

    value.to_str().map(str::to_string).map_err(|_| {
        NotificationApiError::Request(RequestError::bad_request(
            "INVALID_HEADER",
            format!("{} header is not visible ASCII", name),
        ))
    })
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts notification errors to HTTP responses.
pub enum NotificationApiError {
    Request(RequestError),
    Notification(NotificationError),
}

impl From<NotificationError> for NotificationApiError {
    fn from(err: NotificationError) -> Self {
        Self::Notification(err)
    }
}

impl IntoResponse for NotificationApiError {
    fn into_response(self) -> Response {
        match self {
            NotificationApiError::Request(err) => err.into_response(),
            NotificationApiError::Notification(err) => {
                let status = err.status_code();
                // Local faults are logged here and kept out of the response body
                let message = if status.is_server_error() {
                    tracing::error!(error = %err, "Notification verification could not run");
                    "Notification could not be processed".to_string()
                } else {
                    err.to_string()
                };
                let body = ErrorResponse::new(err.error_code(), message);
                (status, Json(body)).into_response()
            }
        }
    }
}
