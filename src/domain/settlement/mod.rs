//! Settlement-fee calculation.
//!
//! Derives the fee, tax and net amount of a payment from the published fee
//! table, and the inverse: the price to charge for a desired net amount.

mod calculator;
mod errors;
mod fee_schedule;
mod payment_method;

pub use calculator::{SettlementCalculator, SettlementResult};
pub use errors::SettlementError;
pub use fee_schedule::{FeeRate, FeeSchedule};
pub use payment_method::{FeeCategory, PaymentMethod};
