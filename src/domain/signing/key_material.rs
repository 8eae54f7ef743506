//! RSA private key loading for the token-issuance scheme.
//!
//! Accepts exactly one PEM block, either a PKCS#8 `PRIVATE KEY` holding an RSA
//! key or a PKCS#1 `RSA PRIVATE KEY`. Anything else is rejected rather than
//! coerced. The key is decoded once and owned by the signer for its lifetime.

use std::path::Path;

use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs8::PrivateKeyInfo;
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};

use super::errors::SignatureError;

const PKCS8_TAG: &str = "PRIVATE KEY";
const PKCS1_TAG: &str = "RSA PRIVATE KEY";

/// A decoded RSA private key.
///
/// `Debug` only reveals the modulus size; the key itself never reaches logs or
/// error messages.
pub struct KeyMaterial {
    key: RsaPrivateKey,
}

impl KeyMaterial {
    /// Decodes an RSA private key from PEM text.
    ///
    /// # Errors
    ///
    /// - `KeyFormat` if no PEM block is found or the DER inside is malformed
    /// - `UnsupportedKeyType` if the block is not an RSA private key
    pub fn from_pem(pem_text: &str) -> Result<Self, SignatureError> {
        let block = pem::parse(pem_text)
            .map_err(|e| SignatureError::KeyFormat(format!("failed to decode PEM block: {}", e)))?;

        let key = match block.tag() {
            PKCS8_TAG => decode_pkcs8(block.contents())?,
            PKCS1_TAG => RsaPrivateKey::from_pkcs1_der(block.contents()).map_err(|e| {
                SignatureError::KeyFormat(format!("failed to parse PKCS#1 private key: {}", e))
            })?,
            other => return Err(SignatureError::UnsupportedKeyType(other.to_string())),
        };

        Ok(Self { key })
    }

    /// Reads and decodes a PEM file.
    ///
    /// # Errors
    ///
    /// Returns `KeyFormat` if the file cannot be read, otherwise the errors of
    /// [`KeyMaterial::from_pem`].
    pub fn from_pem_file(path: impl AsRef<Path>) -> Result<Self, SignatureError> {
        let path = path.as_ref();
        let pem_text = std::fs::read_to_string(path).map_err(|e| {
            SignatureError::KeyFormat(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_pem(&pem_text)
    }

    /// Public half of the key, for verifying signatures produced with it.
    pub fn public_key(&self) -> RsaPublicKey {
        self.key.to_public_key()
    }

    /// Modulus size in bits.
    pub fn size_bits(&self) -> usize {
        self.key.size() * 8
    }

    pub(crate) fn rsa_key(&self) -> &RsaPrivateKey {
        &self.key
    }
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("bits", &self.size_bits())
            .finish_non_exhaustive()
    }
}

fn decode_pkcs8(der: &[u8]) -> Result<RsaPrivateKey, SignatureError> {
    let info = PrivateKeyInfo::try_from(der).map_err(|e| {
        SignatureError::KeyFormat(format!("failed to parse PKCS#8 private key: {}", e))
    })?;

    if info.algorithm.oid != rsa::pkcs1::ALGORITHM_OID {
        return Err(SignatureError::UnsupportedKeyType(format!(
            "PKCS#8 key with algorithm {}",
            info.algorithm.oid
        )));
    }

    RsaPrivateKey::try_from(info).map_err(|e| {
        SignatureError::KeyFormat(format!("failed to parse PKCS#8 RSA private key: {}", e))
    })
}
