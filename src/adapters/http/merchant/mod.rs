//! HTTP adapter for merchant operations against the gateway.
//!
//! - `POST /merchant/accounts` - Register a sub-account
//! - `GET /merchant/accounts/:sac_id/balance` - Sub-account balance
//! - `POST /merchant/payments` - Create a hosted checkout payment
//! - `POST /merchant/account-inquiries` - Resolve an account holder

pub mod dto;
mod handlers;
mod routes;

pub use handlers::{
    create_payment, create_sub_account, get_balance, inquire_bank_account, MerchantApiError,
    MerchantAppState,
};
pub use routes::{merchant_router, merchant_routes};
