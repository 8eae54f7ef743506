//! Gateway configuration

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use serde::Deserialize;

use crate::adapters::doku::{DokuGatewayConfig, SANDBOX_BASE_URL};
use crate::domain::signing::{
    KeyMaterial, NotificationVerifier, SignerCredentials, DEFAULT_CHANNEL_ID,
};

use super::error::{ConfigError, ValidationError};
use super::server::Environment;

/// Gateway credentials and endpoints
#[derive(Clone, Default, Deserialize)]
pub struct GatewayConfig {
    /// API base URL (sandbox by default)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Merchant client id, `MCH-…` for the core API
    #[serde(default)]
    pub client_id: String,

    /// Shared secret for the HMAC schemes
    #[serde(default)]
    pub secret_key: String,

    /// RSA private key as PEM text; `\n` escapes are accepted
    pub private_key_pem: Option<String>,

    /// Path to an RSA private key PEM file
    pub private_key_path: Option<PathBuf>,

    /// `X-PARTNER-ID` for SNAP calls; the client id when absent
    pub partner_id: Option<String>,

    /// `CHANNEL-ID` for SNAP calls
    #[serde(default = "default_channel_id")]
    pub channel_id: String,

    /// Timeout per gateway call, in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Default checkout expiry, in minutes
    #[serde(default = "default_payment_due_minutes")]
    pub payment_due_minutes: i64,

    /// Path the gateway posts notifications to
    #[serde(default = "default_notification_path")]
    pub notification_path: String,

    /// Oldest accepted notification timestamp, in seconds; unchecked when absent
    pub notification_max_age_secs: Option<i64>,
}

impl GatewayConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn has_private_key(&self) -> bool {
        self.private_key_pem.is_some() || self.private_key_path.is_some()
    }

    /// Validate gateway configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.client_id.trim().is_empty() {
            return Err(ValidationError::MissingRequired("GATEWAY__CLIENT_ID"));
        }
        if self.secret_key.is_empty() {
            return Err(ValidationError::MissingRequired("GATEWAY__SECRET_KEY"));
        }
        if self.private_key_pem.is_some() && self.private_key_path.is_some() {
            return Err(ValidationError::AmbiguousPrivateKey);
        }

        let is_https = self.base_url.starts_with("https://");
        if !is_https && !self.base_url.starts_with("http://") {
            return Err(ValidationError::InvalidBaseUrl);
        }
        if *environment == Environment::Production && !is_https {
            return Err(ValidationError::BaseUrlMustBeHttps);
        }

        if self.request_timeout_secs == 0 || self.request_timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.payment_due_minutes <= 0 {
            return Err(ValidationError::InvalidPaymentDue);
        }
        if !is_static_notification_path(&self.notification_path) {
            return Err(ValidationError::InvalidNotificationPath);
        }
        if matches!(
            self.notification_max_age_secs,
            Some(secs) if secs <= 0 || secs > MAX_NOTIFICATION_AGE_SECS
        ) {
            return Err(ValidationError::InvalidNotificationMaxAge);
        }
        Ok(())
    }

    /// Builds the signer credentials, decoding the private key if one is set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::PrivateKey` if the configured key cannot be read
    /// or is not an RSA private key.
    pub fn signer_credentials(&self) -> Result<SignerCredentials, ConfigError> {
        let mut credentials = SignerCredentials::new(
            self.client_id.trim(),
            SecretString::new(self.secret_key.clone()),
        )
        .with_channel_id(self.channel_id.clone());

        if let Some(partner_id) = &self.partner_id {
            credentials = credentials.with_partner_id(partner_id.clone());
        }

        let key = match (&self.private_key_pem, &self.private_key_path) {
            (Some(pem), _) => Some(KeyMaterial::from_pem(&pem.replace("\\n", "\n"))?),
            (None, Some(path)) => Some(KeyMaterial::from_pem_file(path)?),
            (None, None) => None,
        };
        if let Some(key) = key {
            credentials = credentials.with_private_key(key);
        }

        Ok(credentials)
    }

    /// Builds the verifier for inbound notifications.
    pub fn notification_verifier(&self) -> NotificationVerifier {
        let verifier = NotificationVerifier::new(
            self.client_id.trim(),
            SecretString::new(self.secret_key.clone()),
            self.notification_path.clone(),
        );
        match self
            .notification_max_age_secs
            .and_then(chrono::Duration::try_seconds)
        {
            Some(max_age) => verifier.with_max_age(max_age),
            None => verifier,
        }
    }

    /// Endpoint settings for the gateway adapter.
    pub fn adapter_config(&self) -> DokuGatewayConfig {
        DokuGatewayConfig::new()
            .with_base_url(self.base_url.clone())
            .with_timeout(self.request_timeout())
            .with_payment_due_minutes(self.payment_due_minutes)
    }
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("base_url", &self.base_url)
            .field("client_id", &self.client_id)
            .field("secret_key", &"[REDACTED]")
            .field(
                "private_key_pem",
                &self.private_key_pem.as_ref().map(|_| "[REDACTED]"),
            )
            .field("private_key_path", &self.private_key_path)
            .field("partner_id", &self.partner_id)
            .field("channel_id", &self.channel_id)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("payment_due_minutes", &self.payment_due_minutes)
            .field("notification_path", &self.notification_path)
            .field("notification_max_age_secs", &self.notification_max_age_secs)
            .finish()
    }
}

/// Longest accepted freshness window: one year.
const MAX_NOTIFICATION_AGE_SECS: i64 = 86_400 * 365;

/// Prefixes owned by the other routes of the service.
const RESERVED_PATH_PREFIXES: [&str; 2] = ["/merchant", "/settlement"];

/// A literal route path that the router can mount next to the other routes:
/// leading `/`, no query, no route parameters or wildcards, no reserved prefix.
fn is_static_notification_path(path: &str) -> bool {
    if !path.starts_with('/') || path.len() < 2 {
        return false;
    }
    if path
        .chars()
        .any(|c| matches!(c, '?' | '#' | ':' | '*' | '{' | '}') || c.is_whitespace())
    {
        return false;
    }
    !RESERVED_PATH_PREFIXES.iter().any(|prefix| {
        path == *prefix || path.starts_with(&format!("{}/", prefix))
    })
}

fn default_base_url() -> String {
    SANDBOX_BASE_URL.to_string()
}

fn default_channel_id() -> String {
    DEFAULT_CHANNEL_ID.to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_payment_due_minutes() -> i64 {
    60
}

fn default_notification_path() -> String {
    "/payments/notifications".to_string()
}
