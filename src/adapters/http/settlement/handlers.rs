//! HTTP handlers for settlement endpoints.

use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Json, Query, State};
use axum::response::{IntoResponse, Response};

use crate::adapters::http::error_response::{ErrorResponse, RequestError};
use crate::application::handlers::settlement::{
    CalculateGrossAmountHandler, CalculateGrossAmountQuery, CalculateSettlementFeeHandler,
    CalculateSettlementFeeQuery,
};
use crate::domain::settlement::{SettlementCalculator, SettlementError};

use super::dto::{GrossAmountParams, SettlementFeeParams, SettlementResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct SettlementAppState {
    pub calculator: Arc<SettlementCalculator>,
}

impl SettlementAppState {
    pub fn new(calculator: Arc<SettlementCalculator>) -> Self {
        Self { calculator }
    }

    pub fn settlement_fee_handler(&self) -> CalculateSettlementFeeHandler {
        CalculateSettlementFeeHandler::new(self.calculator.clone())
    }

    pub fn gross_amount_handler(&self) -> CalculateGrossAmountHandler {
        CalculateGrossAmountHandler::new(self.calculator.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /settlement/fee - Fee breakdown for a gross amount
pub async fn get_settlement_fee(
    State(state): State<SettlementAppState>,
    params: Result<Query<SettlementFeeParams>, QueryRejection>,
) -> Result<Json<SettlementResponse>, SettlementApiError> {
    let Query(params) = params.map_err(RequestError::from)?;

    let result = state
        .settlement_fee_handler()
        .handle(CalculateSettlementFeeQuery {
            payment_method: params.payment_method,
            amount: params.amount,
        })?;

    Ok(Json(result.into()))
}

/// GET /settlement/gross - Gross amount that nets at least `net_amount`
pub async fn get_gross_amount(
    State(state): State<SettlementAppState>,
    params: Result<Query<GrossAmountParams>, QueryRejection>,
) -> Result<Json<SettlementResponse>, SettlementApiError> {
    let Query(params) = params.map_err(RequestError::from)?;

    let result = state
        .gross_amount_handler()
        .handle(CalculateGrossAmountQuery {
            payment_method: params.payment_method,
            net_amount: params.net_amount,
        })?;

    Ok(Json(result.into()))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts settlement errors to HTTP responses.
pub enum SettlementApiError {
    Request(RequestError),
    Settlement(SettlementError),
}

impl From<RequestError> for SettlementApiError {
    fn from(err: RequestError) -> Self {
        Self::Request(err)
    }
}

impl From<SettlementError> for SettlementApiError {
    fn from(err: SettlementError) -> Self {
        Self::Settlement(err)
    }
}

impl IntoResponse for SettlementApiError {
    fn into_response(self) -> Response {
        let err = match self {
            SettlementApiError::Request(err) => return err.into_response(),
            SettlementApiError::Settlement(err) => err,
        };

        let error_code = match &err {
            SettlementError::EmptyPaymentMethod | SettlementError::UnknownPaymentMethod(_) => {
                "INVALID_PAYMENT_METHOD"
            }
            SettlementError::InvalidAmount { .. } => "INVALID_AMOUNT",
            SettlementError::FeesExceedAmount { .. } | SettlementError::InvalidFeeSchedule(_) => {
                tracing::error!(error = %err, "Fee schedule rejected a calculation");
                "FEE_SCHEDULE_ERROR"
            }
        };

        let body = ErrorResponse::new(error_code, err.to_string());
        (err.status_code(), Json(body)).into_response()
    }
}
