//! Settlement handlers.
//!
//! ## Queries
//! - Fee breakdown for a gross amount
//! - Gross amount that nets a desired amount

mod calculate_gross_amount;
mod calculate_settlement_fee;

pub use calculate_gross_amount::{
    CalculateGrossAmountHandler, CalculateGrossAmountQuery, CalculateGrossAmountResult,
};
pub use calculate_settlement_fee::{
    CalculateSettlementFeeHandler, CalculateSettlementFeeQuery, CalculateSettlementFeeResult,
};
