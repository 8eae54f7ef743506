//! HTTP handlers for merchant endpoints.
//!
//! These handlers connect Axum routes to the gateway command/query handlers.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::adapters::http::error_response::{ErrorResponse, RequestError};
use crate::application::handlers::merchant::{
    CreatePaymentCommand, CreatePaymentHandler, CreateSubAccountCommand, CreateSubAccountHandler,
    GetBalanceHandler, GetBalanceQuery, InquireBankAccountCommand, InquireBankAccountHandler,
};
use crate::ports::{GatewayError, GatewayErrorCode, PaymentGateway};

use super::dto::{
    BalanceResponse, BankAccountInquiryBody, BankAccountInquiryResponse, CheckoutResponse,
    CreatePaymentBody, CreateSubAccountBody, SubAccountResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct MerchantAppState {
    pub gateway: Arc<dyn PaymentGateway>,
}

impl MerchantAppState {
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }

    pub fn create_sub_account_handler(&self) -> CreateSubAccountHandler {
        CreateSubAccountHandler::new(self.gateway.clone())
    }

    pub fn create_payment_handler(&self) -> CreatePaymentHandler {
        CreatePaymentHandler::new(self.gateway.clone())
    }

    pub fn get_balance_handler(&self) -> GetBalanceHandler {
        GetBalanceHandler::new(self.gateway.clone())
    }

    pub fn inquire_bank_account_handler(&self) -> InquireBankAccountHandler {
        InquireBankAccountHandler::new(self.gateway.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /merchant/accounts - Register a sub-account
pub async fn create_sub_account(
    State(state): State<MerchantAppState>,
    body: Result<Json<CreateSubAccountBody>, JsonRejection>,
) -> Result<impl IntoResponse, MerchantApiError> {
    let Json(body) = body.map_err(RequestError::from)?;

    let account = state
        .create_sub_account_handler()
        .handle(CreateSubAccountCommand {
            email: body.email,
            name: body.name,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(SubAccountResponse::from(account))))
}

/// GET /merchant/accounts/:sac_id/balance - Sub-account balance
pub async fn get_balance(
    State(state): State<MerchantAppState>,
    Path(sac_id): Path<String>,
) -> Result<Json<BalanceResponse>, MerchantApiError> {
    let balance = state
        .get_balance_handler()
        .handle(GetBalanceQuery {
            sac_id: sac_id.clone(),
        })
        .await?;

    Ok(Json(BalanceResponse::new(sac_id, balance)))
}

/// POST /merchant/payments - Create a hosted checkout payment
pub async fn create_payment(
    State(state): State<MerchantAppState>,
    body: Result<Json<CreatePaymentBody>, JsonRejection>,
) -> Result<impl IntoResponse, MerchantApiError> {
    let Json(body) = body.map_err(RequestError::from)?;
    let payment_method_types = body
        .payment_methods()
        .map_err(|e| RequestError::bad_request("INVALID_PAYMENT_METHOD", e.to_string()))?;

    let checkout = state
        .create_payment_handler()
        .handle(CreatePaymentCommand {
            amount: body.amount,
            customer_name: body.customer_name,
            customer_email: body.customer_email,
            sac_id: body.sac_id,
            payment_due_minutes: body.payment_due_minutes,
            invoice_number: body.invoice_number,
            payment_method_types,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(CheckoutResponse::from(checkout))))
}

/// POST /merchant/account-inquiries - Resolve an account holder
pub async fn inquire_bank_account(
    State(state): State<MerchantAppState>,
    body: Result<Json<BankAccountInquiryBody>, JsonRejection>,
) -> Result<Json<BankAccountInquiryResponse>, MerchantApiError> {
    let Json(body) = body.map_err(RequestError::from)?;

    let inquiry = state
        .inquire_bank_account_handler()
        .handle(InquireBankAccountCommand {
            customer_number: body.customer_number,
            amount_value: body.amount_value,
            currency: body.currency,
            partner_reference_no: body.partner_reference_no,
        })
        .await?;

    Ok(Json(inquiry.into()))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts gateway errors to HTTP responses.
pub enum MerchantApiError {
    Request(RequestError),
    Gateway(GatewayError),
}

impl From<RequestError> for MerchantApiError {
    fn from(err: RequestError) -> Self {
        Self::Request(err)
    }
}

impl From<GatewayError> for MerchantApiError {
    fn from(err: GatewayError) -> Self {
        Self::Gateway(err)
    }
}

impl IntoResponse for MerchantApiError {
    fn into_response(self) -> Response {
        let err = match self {
            MerchantApiError::Request(err) => return err.into_response(),
            MerchantApiError::Gateway(err) => err,
        };

        let (status, error_code) = match err.code {
            GatewayErrorCode::InvalidRequest => (StatusCode::BAD_REQUEST, "INVALID_REQUEST"),
            GatewayErrorCode::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            GatewayErrorCode::RateLimitExceeded => {
                (StatusCode::SERVICE_UNAVAILABLE, "GATEWAY_RATE_LIMITED")
            }
            GatewayErrorCode::AuthenticationError => {
                (StatusCode::BAD_GATEWAY, "GATEWAY_AUTHENTICATION_FAILED")
            }
            GatewayErrorCode::NetworkError
            | GatewayErrorCode::GatewayUnavailable
            | GatewayErrorCode::InvalidResponse
            | GatewayErrorCode::Unknown => (StatusCode::BAD_GATEWAY, "GATEWAY_ERROR"),
            GatewayErrorCode::ConfigurationError | GatewayErrorCode::SigningError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %err, "Gateway call could not be signed");
            "Internal error".to_string()
        } else {
            err.message.clone()
        };

        let body = ErrorResponse::with_details(
            error_code,
            message,
            json!({ "retryable": err.retryable, "gateway_status": err.status }),
        );
        (status, Json(body)).into_response()
    }
}
