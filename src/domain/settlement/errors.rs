//! Settlement calculation errors.

use axum::http::StatusCode;
use thiserror::Error;

/// Errors raised by the settlement-fee calculator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettlementError {
    #[error("Payment method is empty")]
    EmptyPaymentMethod,

    #[error("Unknown payment method: {0}")]
    UnknownPaymentMethod(String),

    #[error("Invalid {field}: must be greater than 0, got {value}")]
    InvalidAmount { field: &'static str, value: f64 },

    /// Percentage fee plus tax reaches 100 % of the amount.
    #[error("Invalid fee configuration for {method}: fees exceed 100%")]
    FeesExceedAmount { method: String },

    #[error("Invalid fee schedule: {0}")]
    InvalidFeeSchedule(String),
}

impl SettlementError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            SettlementError::EmptyPaymentMethod
            | SettlementError::UnknownPaymentMethod(_)
            | SettlementError::InvalidAmount { .. } => StatusCode::BAD_REQUEST,
            SettlementError::FeesExceedAmount { .. } | SettlementError::InvalidFeeSchedule(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
