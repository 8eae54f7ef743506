//! Inbound payment notification verification.
//!
//! The gateway signs notifications with the core API scheme, using the
//! notification endpoint's own path as `Request-Target`. The verifier rebuilds
//! the canonical string from the received headers and body, recomputes the
//! HMAC with the shared secret and compares it to the presented signature in
//! constant time.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::{DateTime, Duration, Utc};
use http::Method;
use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;

use super::canonical::CanonicalString;
use super::context::{Credential, SigningContext};
use super::errors::SignatureError;
use super::scheme::SigningScheme;
use super::signer::{hmac_sha256, HMAC_SHA256_PREFIX};
use super::timestamp::parse_core_api_timestamp;

/// Maximum allowed clock skew for notifications stamped in the future.
const MAX_CLOCK_SKEW_SECS: i64 = 60;

/// Header values and body of one inbound notification.
#[derive(Debug, Clone, Copy)]
pub struct InboundNotification<'a> {
    /// `Signature` header, `HMACSHA256=` followed by base64.
    pub signature: &'a str,
    /// `Request-Id` header.
    pub request_id: &'a str,
    /// `Request-Timestamp` header.
    pub request_timestamp: &'a str,
    /// Raw body bytes exactly as received.
    pub body: &'a [u8],
}

/// Verifier for gateway payment notifications.
pub struct NotificationVerifier {
    client_id: String,
    secret: SecretString,
    request_target: String,
    max_age: Option<Duration>,
}

impl NotificationVerifier {
    /// Creates a verifier for notifications delivered to `request_target`.
    pub fn new(
        client_id: impl Into<String>,
        secret: SecretString,
        request_target: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            secret,
            request_target: request_target.into(),
            max_age: None,
        }
    }

    /// Rejects notifications whose timestamp is older than `max_age`.
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = Some(max_age);
        self
    }

    pub fn request_target(&self) -> &str {
        &self.request_target
    }

    /// Verifies a notification against the current time.
    ///
    /// # Errors
    ///
    /// - `MalformedTimestamp` - `Request-Timestamp` is not in the core API layout
    /// - `StaleTimestamp` - outside the freshness window, when one is configured
    /// - `SignatureMismatch` - the signature does not match the recomputed HMAC
    /// - `MissingCredential` - the verifier was built with an empty client id or secret
    pub fn verify(&self, notification: &InboundNotification<'_>) -> Result<(), SignatureError> {
        self.verify_at(notification, Utc::now())
    }

    /// Verifies a notification as of `now`.
    pub fn verify_at(
        &self,
        notification: &InboundNotification<'_>,
        now: DateTime<Utc>,
    ) -> Result<(), SignatureError> {
        // 1. Parse timestamp
        let timestamp = parse_core_api_timestamp(notification.request_timestamp)?;

        // 2. Freshness
        self.validate_age(timestamp, now)?;

        // 3. Recompute HMAC over the rebuilt canonical string, using the
        //    header text exactly as signed
        let ctx = SigningContext {
            http_method: Method::POST,
            request_target: &self.request_target,
            timestamp: notification.request_timestamp,
            request_id: notification.request_id,
            body: notification.body,
            client_id: &self.client_id,
            access_token: None,
            credential: Credential::SharedSecret(&self.secret),
        };
        let canonical = CanonicalString::build(SigningScheme::CoreApiHmac, &ctx)?;
        let secret = self.secret.expose_secret().as_bytes();
        if secret.is_empty() {
            return Err(SignatureError::missing_credential(
                SigningScheme::CoreApiHmac,
                "shared_secret",
            ));
        }
        let expected = hmac_sha256(secret, canonical.as_bytes())?;

        // 4. Compare (constant-time)
        let presented = decode_presented(notification.signature);
        if !constant_time_compare(&expected, &presented) {
            tracing::warn!(
                request_id = %notification.request_id,
                request_target = %self.request_target,
                "Notification signature mismatch"
            );
            return Err(SignatureError::SignatureMismatch {
                scheme: SigningScheme::CoreApiHmac,
            });
        }

        Ok(())
    }

    fn validate_age(&self, timestamp: DateTime<Utc>, now: DateTime<Utc>) -> Result<(), SignatureError> {
        let Some(max_age) = self.max_age else {
            return Ok(());
        };

        let age = now.signed_duration_since(timestamp);
        if age > max_age || age < -Duration::seconds(MAX_CLOCK_SKEW_SECS) {
            return Err(SignatureError::StaleTimestamp {
                age_secs: age.num_seconds(),
            });
        }
        Ok(())
    }
}

impl std::fmt::Debug for NotificationVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationVerifier")
            .field("client_id", &self.client_id)
            .field("request_target", &self.request_target)
            .field("max_age", &self.max_age)
            .finish_non_exhaustive()
    }
}

/// Raw MAC bytes from a `Signature` header; empty when the header is not
/// prefixed base64, which never matches.
fn decode_presented(signature: &str) -> Vec<u8> {
    signature
        .trim()
        .strip_prefix(HMAC_SHA256_PREFIX)
        .and_then(|encoded| BASE64.decode(encoded).ok())
        .unwrap_or_default()
}

fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
