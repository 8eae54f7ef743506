//! Canonical string construction.
//!
//! The gateway recomputes the signature over its own rendering of these
//! strings, so field order, separators and digest encoding must match exactly.
//!
//! ```text
//! CoreApiHmac           Client-Id:{id}\nRequest-Id:{rid}\nRequest-Timestamp:{ts}\nRequest-Target:{path}[\nDigest:{b64}]
//! TokenIssuanceRsa      {client_id}|{ts}
//! TransactionalHmac512  {METHOD}:{path}:{token}:{hex}:{ts}
//! ```

use super::context::SigningContext;
use super::digest::{BodyDigest, DigestEncoding};
use super::errors::SignatureError;
use super::scheme::SigningScheme;

/// The exact text a signature is computed over.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalString(String);

impl CanonicalString {
    /// Builds the canonical string for `scheme` from `ctx`.
    ///
    /// # Errors
    ///
    /// Returns `MissingCredential` when the client id is empty (core API and
    /// token issuance) or the access token is absent (transactional).
    pub fn build(scheme: SigningScheme, ctx: &SigningContext<'_>) -> Result<Self, SignatureError> {
        let text = match scheme {
            SigningScheme::CoreApiHmac => {
                require_client_id(scheme, ctx)?;
                core_api(ctx)
            }
            SigningScheme::TokenIssuanceRsa => {
                require_client_id(scheme, ctx)?;
                format!("{}|{}", ctx.client_id, ctx.timestamp)
            }
            SigningScheme::TransactionalHmac512 => {
                let access_token = ctx
                    .access_token
                    .filter(|token| !token.is_empty())
                    .ok_or(SignatureError::missing_credential(scheme, "access_token"))?;
                let digest = BodyDigest::compute_always(ctx.body, DigestEncoding::HexLower);
                format!(
                    "{}:{}:{}:{}:{}",
                    ctx.http_method.as_str(),
                    ctx.request_target,
                    access_token,
                    digest,
                    ctx.timestamp.trim()
                )
            }
        };
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl std::fmt::Display for CanonicalString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn require_client_id(scheme: SigningScheme, ctx: &SigningContext<'_>) -> Result<(), SignatureError> {
    if ctx.client_id.is_empty() {
        return Err(SignatureError::missing_credential(scheme, "client_id"));
    }
    Ok(())
}

fn core_api(ctx: &SigningContext<'_>) -> String {
    let mut text = format!(
        "Client-Id:{}\nRequest-Id:{}\nRequest-Timestamp:{}\nRequest-Target:{}",
        ctx.client_id, ctx.request_id, ctx.timestamp, ctx.request_target
    );
    if let Some(digest) = BodyDigest::compute(ctx.body, DigestEncoding::Base64) {
        text.push_str("\nDigest:");
        text.push_str(digest.as_str());
    }
    text
}
