//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `signing` - Canonical strings, signatures and notification verification
//! - `notification` - Payment notification payloads
//! - `settlement` - Fee schedule and settlement arithmetic

pub mod notification;
pub mod settlement;
pub mod signing;
