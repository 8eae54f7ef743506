//! Request body digests.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use sha2::{Digest as _, Sha256};

/// Text encoding applied to the raw SHA-256 bytes of a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DigestEncoding {
    /// Standard base64 with padding (core API `Digest:` line).
    Base64,
    /// Lowercase hexadecimal (SNAP transactional string-to-sign).
    HexLower,
}

/// Encoded SHA-256 digest of a request body.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BodyDigest {
    encoding: DigestEncoding,
    value: String,
}

impl BodyDigest {
    /// Digests `body`, returning `None` when the body is empty.
    ///
    /// Bodiless requests (e.g. `GET`) carry no digest in the core API scheme.
    pub fn compute(body: &[u8], encoding: DigestEncoding) -> Option<Self> {
        if body.is_empty() {
            return None;
        }
        Some(Self::compute_always(body, encoding))
    }

    /// Digests `body` unconditionally; an empty body hashes to SHA-256 of `""`.
    pub fn compute_always(body: &[u8], encoding: DigestEncoding) -> Self {
        let hash = Sha256::digest(body);
        let value = match encoding {
            DigestEncoding::Base64 => BASE64.encode(hash),
            DigestEncoding::HexLower => hex::encode(hash),
        };
        Self { encoding, value }
    }

    pub fn encoding(&self) -> DigestEncoding {
        self.encoding
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for BodyDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}

/// Computes the digest of `body` in `encoding`, absent for an empty body.
pub fn compute_digest(body: &[u8], encoding: DigestEncoding) -> Option<BodyDigest> {
    BodyDigest::compute(body, encoding)
}
