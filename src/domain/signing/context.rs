//! Inputs for a single signing operation.

use http::Method;
use secrecy::SecretString;

use super::key_material::KeyMaterial;

/// Secret that keys the signature.
#[derive(Debug, Clone, Copy)]
pub enum Credential<'a> {
    /// Symmetric key shared with the gateway (HMAC schemes).
    SharedSecret(&'a SecretString),
    /// RSA private key registered with the gateway (token issuance).
    PrivateKey(&'a KeyMaterial),
}

/// Everything needed to build and sign one canonical string.
///
/// Borrowed from the caller and built fresh for each outbound call; the
/// timestamp and request id must never be reused across calls.
#[derive(Debug, Clone)]
pub struct SigningContext<'a> {
    pub http_method: Method,
    /// Path only, no scheme, host or query string.
    pub request_target: &'a str,
    /// Already formatted in the scheme's layout.
    pub timestamp: &'a str,
    /// `Request-Id` for the core API, `X-EXTERNAL-ID` for SNAP calls.
    pub request_id: &'a str,
    pub body: &'a [u8],
    pub client_id: &'a str,
    /// Bearer token, transactional scheme only.
    pub access_token: Option<&'a str>,
    pub credential: Credential<'a>,
}
