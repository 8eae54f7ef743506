//! HTTP adapter for the settlement-fee calculator.
//!
//! - `GET /settlement/fee` - Fee breakdown for a gross amount
//! - `GET /settlement/gross` - Gross amount for a desired net amount

pub mod dto;
mod handlers;
mod routes;

pub use dto::{GrossAmountParams, SettlementFeeParams, SettlementResponse};
pub use handlers::{get_gross_amount, get_settlement_fee, SettlementApiError, SettlementAppState};
pub use routes::{settlement_router, settlement_routes};
