//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod merchant;
pub mod notification;
pub mod settlement;
