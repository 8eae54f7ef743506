//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `transport` - HTTP transports (reqwest, scripted mock)
//! - `doku` - DOKU implementation of the payment gateway port
//! - `http` - Axum endpoints

pub mod doku;
pub mod http;
pub mod transport;
