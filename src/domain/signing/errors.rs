//! Error types for request signing and notification verification.
//!
//! Every variant names the scheme or field involved so failures can be
//! diagnosed, but none of them carry key bytes, secrets or computed MACs.

use axum::http::StatusCode;
use thiserror::Error;

use super::scheme::SigningScheme;

/// Errors raised while loading keys, signing outbound requests or verifying
/// inbound notifications.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    /// A credential required by the scheme is empty or of the wrong kind.
    #[error("{scheme} signing requires a non-empty {field}")]
    MissingCredential {
        scheme: SigningScheme,
        field: &'static str,
    },

    /// The PEM text or the DER inside it could not be decoded.
    #[error("Invalid private key: {0}")]
    KeyFormat(String),

    /// The PEM block decoded but does not hold an RSA private key.
    #[error("Unsupported private key type: {0}")]
    UnsupportedKeyType(String),

    /// An inbound timestamp did not match the expected layout.
    #[error("Malformed {field} '{value}': expected {expected}")]
    MalformedTimestamp {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    /// The presented signature does not match the recomputed one.
    #[error("{scheme} signature mismatch")]
    SignatureMismatch { scheme: SigningScheme },

    /// The underlying cryptographic primitive failed.
    #[error("{scheme} signing failed: {reason}")]
    Signing {
        scheme: SigningScheme,
        reason: String,
    },

    /// The notification timestamp falls outside the configured freshness window.
    #[error("Notification timestamp outside accepted window (age {age_secs}s)")]
    StaleTimestamp { age_secs: i64 },
}

impl SignatureError {
    pub fn missing_credential(scheme: SigningScheme, field: &'static str) -> Self {
        SignatureError::MissingCredential { scheme, field }
    }

    pub fn signing(scheme: SigningScheme, reason: impl Into<String>) -> Self {
        SignatureError::Signing {
            scheme,
            reason: reason.into(),
        }
    }

    /// Returns true for errors caused by local configuration (credentials, keys).
    ///
    /// These are fatal to the call and must be fixed before retrying.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            SignatureError::MissingCredential { .. }
                | SignatureError::KeyFormat(_)
                | SignatureError::UnsupportedKeyType(_)
        )
    }

    /// Maps the error to the status returned to an inbound caller.
    ///
    /// Authentication failures are 401 so the gateway does not treat the
    /// notification as delivered; malformed input is 400; local faults are 500.
    pub fn status_code(&self) -> StatusCode {
        match self {
            SignatureError::SignatureMismatch { .. } | SignatureError::StaleTimestamp { .. } => {
                StatusCode::UNAUTHORIZED
            }
            SignatureError::MalformedTimestamp { .. } => StatusCode::BAD_REQUEST,
            SignatureError::MissingCredential { .. }
            | SignatureError::KeyFormat(_)
            | SignatureError::UnsupportedKeyType(_)
            | SignatureError::Signing { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ══════════════════════════════════════════════════════════════
    // Display Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn missing_credential_names_scheme_and_field() {
        let err = SignatureError::missing_credential(SigningScheme::CoreApiHmac, "client_id");
        assert_eq!(
            err.to_string(),
            "core_api_hmac signing requires a non-empty client_id"
        );
    }

    #[test]
    fn malformed_timestamp_shows_value_and_layout() {
        let err = SignatureError::MalformedTimestamp {
            field: "Request-Timestamp",
            value: "yesterday".to_string(),
            expected: "YYYY-MM-DDTHH:MM:SSZ",
        };
        assert_eq!(
            err.to_string(),
            "Malformed Request-Timestamp 'yesterday': expected YYYY-MM-DDTHH:MM:SSZ"
        );
    }

    #[test]
    fn signature_mismatch_names_scheme() {
        let err = SignatureError::SignatureMismatch {
            scheme: SigningScheme::CoreApiHmac,
        };
        assert_eq!(err.to_string(), "core_api_hmac signature mismatch");
    }

    // ══════════════════════════════════════════════════════════════
    // Classification Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn key_errors_are_configuration_errors() {
        assert!(SignatureError::KeyFormat("bad".into()).is_configuration());
        assert!(SignatureError::UnsupportedKeyType("EC".into()).is_configuration());
        assert!(
            SignatureError::missing_credential(SigningScheme::TokenIssuanceRsa, "private_key")
                .is_configuration()
        );
    }

    #[test]
    fn verification_errors_are_not_configuration_errors() {
        let err = SignatureError::SignatureMismatch {
            scheme: SigningScheme::CoreApiHmac,
        };
        assert!(!err.is_configuration());
    }

    // ══════════════════════════════════════════════════════════════
    // Status Code Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn mismatch_returns_unauthorized() {
        let err = SignatureError::SignatureMismatch {
            scheme: SigningScheme::CoreApiHmac,
        };
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn stale_timestamp_returns_unauthorized() {
        let err = SignatureError::StaleTimestamp { age_secs: 900 };
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn malformed_timestamp_returns_bad_request() {
        let err = SignatureError::MalformedTimestamp {
            field: "Request-Timestamp",
            value: "x".into(),
            expected: "YYYY-MM-DDTHH:MM:SSZ",
        };
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn signing_failure_returns_internal_error() {
        let err = SignatureError::signing(SigningScheme::TokenIssuanceRsa, "message too long");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
