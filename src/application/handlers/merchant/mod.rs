//! Merchant handlers.
//!
//! Command and query handlers that drive the payment gateway:
//!
//! ## Commands
//! - Registering sub-accounts
//! - Creating hosted checkout payments
//! - Account-holder inquiries (token issuance plus inquiry)
//!
//! ## Queries
//! - Sub-account balance

mod create_payment;
mod create_sub_account;
mod get_balance;
mod inquire_bank_account;

// Commands
pub use create_payment::{CreatePaymentCommand, CreatePaymentHandler, CreatePaymentResult};
pub use create_sub_account::{
    CreateSubAccountCommand, CreateSubAccountHandler, CreateSubAccountResult,
};
pub use inquire_bank_account::{
    InquireBankAccountCommand, InquireBankAccountHandler, InquireBankAccountResult,
};

// Queries
pub use get_balance::{GetBalanceHandler, GetBalanceQuery, GetBalanceResult};
