//! Axum router configuration for merchant endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_payment, create_sub_account, get_balance, inquire_bank_account, MerchantAppState,
};

/// Create the merchant router.
///
/// # Routes
/// - `POST /accounts` - Register a sub-account
/// - `GET /accounts/:sac_id/balance` - Sub-account balance
/// - `POST /payments` - Create a hosted checkout payment
/// - `POST /account-inquiries` - Resolve an account holder
pub fn merchant_routes() -> Router<MerchantAppState> {
    Router::new()
        .route("/accounts", post(create_sub_account))
        .route("/accounts/:sac_id/balance", get(get_balance))
        .route("/payments", post(create_payment))
        .route("/account-inquiries", post(inquire_bank_account))
}

/// Merchant routes mounted at `/merchant`.
pub fn merchant_router() -> Router<MerchantAppState> {
    Router::new().nest("/merchant", merchant_routes())
}
