//! Signing scheme selection.
//!
//! The gateway exposes three endpoint families, each authenticated with its own
//! canonical-string grammar, primitive and encoding. The scheme is chosen by the
//! caller per endpoint and never changes during a call.

use serde::{Deserialize, Serialize};

use super::digest::DigestEncoding;

/// One of the three request-authentication variants accepted by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SigningScheme {
    /// HMAC-SHA256 over a labelled, newline-delimited string with a base64 body
    /// digest. Used by the core API (accounts, checkout, balances) and by
    /// inbound payment notifications.
    CoreApiHmac,

    /// RSA-SHA256 (PKCS#1 v1.5) over `client_id|timestamp`. Used to obtain a
    /// SNAP bearer token.
    TokenIssuanceRsa,

    /// HMAC-SHA512 over a colon-delimited string with a hex body digest. Used by
    /// SNAP transactional calls made with a bearer token.
    TransactionalHmac512,
}

impl SigningScheme {
    /// All schemes, in declaration order.
    pub const ALL: [SigningScheme; 3] = [
        SigningScheme::CoreApiHmac,
        SigningScheme::TokenIssuanceRsa,
        SigningScheme::TransactionalHmac512,
    ];

    /// Encoding of the body digest bound into the canonical string, if any.
    pub fn digest_encoding(&self) -> Option<DigestEncoding> {
        match self {
            SigningScheme::CoreApiHmac => Some(DigestEncoding::Base64),
            SigningScheme::TokenIssuanceRsa => None,
            SigningScheme::TransactionalHmac512 => Some(DigestEncoding::HexLower),
        }
    }

    /// Whether the scheme is keyed by the shared secret (as opposed to the RSA key).
    pub fn uses_shared_secret(&self) -> bool {
        !matches!(self, SigningScheme::TokenIssuanceRsa)
    }

    /// Stable identifier used in logs and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            SigningScheme::CoreApiHmac => "core_api_hmac",
            SigningScheme::TokenIssuanceRsa => "token_issuance_rsa",
            SigningScheme::TransactionalHmac512 => "transactional_hmac512",
        }
    }
}

impl std::fmt::Display for SigningScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
