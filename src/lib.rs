//! DOKU Gateway - request authentication for the DOKU payment gateway
//!
//! This crate signs outbound gateway calls with the three DOKU schemes (core
//! API HMAC-SHA256, SNAP token issuance RSA-SHA256, SNAP transactional
//! HMAC-SHA512), verifies inbound payment notifications and quotes settlement
//! fees.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
