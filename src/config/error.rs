//! Configuration error types

use thiserror::Error;

use crate::domain::signing::SignatureError;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    #[error("Private key could not be loaded: {0}")]
    PrivateKey(#[from] SignatureError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Server host must be an IP address")]
    InvalidHost,

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid gateway base URL")]
    InvalidBaseUrl,

    #[error("Gateway base URL must use HTTPS in production")]
    BaseUrlMustBeHttps,

    #[error("Set either private_key_pem or private_key_path, not both")]
    AmbiguousPrivateKey,

    #[error("Notification path must be a literal path starting with '/', outside /merchant and /settlement")]
    InvalidNotificationPath,

    #[error("Notification max age must be between 1 second and 1 year")]
    InvalidNotificationMaxAge,

    #[error("Invalid payment due minutes")]
    InvalidPaymentDue,

    #[error("Invalid fee schedule: {0}")]
    InvalidFeeSchedule(String),
}
