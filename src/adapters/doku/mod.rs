//! DOKU payment gateway adapter.
//!
//! Implements the `PaymentGateway` port over any `HttpTransport`:
//! - Sub-account creation and balance queries
//! - Hosted checkout payments
//! - SNAP token issuance and account inquiry
//!
//! `MockPaymentGateway` stands in for the adapter in handler and HTTP tests.
//!
//! # Security
//!
//! - Every request is signed per call with a fresh request id and timestamp
//! - Credentials and the RSA key stay inside `RequestSigner`; only finished
//!   headers reach the transport

mod error_body;
mod gateway_adapter;
mod mock_gateway;
mod wire_types;

pub use error_body::parse_error_message;
pub use gateway_adapter::{
    DokuGatewayAdapter, DokuGatewayConfig, ACCESS_TOKEN_PATH, BALANCES_PATH,
    BANK_ACCOUNT_INQUIRY_PATH, CHECKOUT_PATH, PRODUCTION_BASE_URL, SANDBOX_BASE_URL,
    SUB_ACCOUNTS_PATH,
};
pub use mock_gateway::{MethodCall, MockPaymentGateway, MOCK_ACCESS_TOKEN};
