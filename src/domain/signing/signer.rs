//! Signature computation.
//!
//! Applies the scheme's primitive to a canonical string:
//!
//! | Scheme | Primitive | Output |
//! |---|---|---|
//! | `CoreApiHmac` | HMAC-SHA256 | `HMACSHA256=` + base64 |
//! | `TokenIssuanceRsa` | RSA PKCS#1 v1.5 over SHA-256 | base64 |
//! | `TransactionalHmac512` | HMAC-SHA512 | base64 |

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use hmac::{Hmac, Mac};
use rsa::Pkcs1v15Sign;
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256, Sha512};

use super::canonical::CanonicalString;
use super::context::Credential;
use super::errors::SignatureError;
use super::key_material::KeyMaterial;
use super::scheme::SigningScheme;

type HmacSha256 = Hmac<Sha256>;
type HmacSha512 = Hmac<Sha512>;

/// Literal prefix of core API signatures.
pub const HMAC_SHA256_PREFIX: &str = "HMACSHA256=";

/// Encoded signature, ready to be used as a header value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature(String);

impl Signature {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Signs `canonical` with the primitive of `scheme`.
///
/// # Errors
///
/// - `MissingCredential` if the credential is empty or does not fit the scheme
/// - `Signing` if the RSA primitive fails (e.g. key too small)
pub fn sign(
    scheme: SigningScheme,
    canonical: &CanonicalString,
    credential: Credential<'_>,
) -> Result<Signature, SignatureError> {
    match (scheme, credential) {
        (SigningScheme::CoreApiHmac, Credential::SharedSecret(secret)) => {
            let mac = hmac_sha256(shared_secret_bytes(scheme, secret)?, canonical.as_bytes())?;
            Ok(Signature(format!(
                "{}{}",
                HMAC_SHA256_PREFIX,
                BASE64.encode(mac)
            )))
        }
        (SigningScheme::TransactionalHmac512, Credential::SharedSecret(secret)) => {
            let mac = hmac_sha512(shared_secret_bytes(scheme, secret)?, canonical.as_bytes())?;
            Ok(Signature(BASE64.encode(mac)))
        }
        (SigningScheme::TokenIssuanceRsa, Credential::PrivateKey(key)) => {
            let signature = rsa_sha256(key, canonical.as_bytes())?;
            Ok(Signature(BASE64.encode(signature)))
        }
        (SigningScheme::TokenIssuanceRsa, Credential::SharedSecret(_)) => {
            Err(SignatureError::missing_credential(scheme, "private_key"))
        }
        (_, Credential::PrivateKey(_)) => {
            Err(SignatureError::missing_credential(scheme, "shared_secret"))
        }
    }
}

/// Raw HMAC-SHA256 of `message` keyed by `secret`.
pub(crate) fn hmac_sha256(secret: &[u8], message: &[u8]) -> Result<Vec<u8>, SignatureError> {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(secret)
        .map_err(|e| SignatureError::signing(SigningScheme::CoreApiHmac, e.to_string()))?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}

fn hmac_sha512(secret: &[u8], message: &[u8]) -> Result<Vec<u8>, SignatureError> {
    let mut mac = <HmacSha512 as Mac>::new_from_slice(secret).map_err(|e| {
        SignatureError::signing(SigningScheme::TransactionalHmac512, e.to_string())
    })?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}

fn rsa_sha256(key: &KeyMaterial, message: &[u8]) -> Result<Vec<u8>, SignatureError> {
    let hashed = Sha256::digest(message);
    key.rsa_key()
        .sign(Pkcs1v15Sign::new::<Sha256>(), &hashed)
        .map_err(|e| SignatureError::signing(SigningScheme::TokenIssuanceRsa, e.to_string()))
}

fn shared_secret_bytes(
    scheme: SigningScheme,
    secret: &SecretString,
) -> Result<&[u8], SignatureError> {
    let bytes = secret.expose_secret().as_bytes();
    if bytes.is_empty() {
        return Err(SignatureError::missing_credential(scheme, "shared_secret"));
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use http::Method;
    use rsa::pkcs1v15::{Signature as RsaSignature, VerifyingKey};
    use rsa::signature::Verifier;

    use super::*;
    use crate::domain::signing::context::SigningContext;

    const RSA_PKCS8: &str = include_str!("../../../tests/fixtures/rsa_pkcs8.pem");
    const RSA_PKCS1: &str = include_str!("../../../tests/fixtures/rsa_pkcs1.pem");

    const CORE_SECRET: &str = "SK-hCJ42G28TA0MKG9LE2E_1";
    const PAYMENT_BODY: &[u8] =
        br#"{"order":{"invoice_number":"INV-20210124-0001","amount":150000}}"#;

    fn secret(value: &str) -> SecretString {
        SecretString::new(value.to_string())
    }

    fn core_context<'a>(
        secret: &'a SecretString,
        target: &'a str,
        body: &'a [u8],
    ) -> SigningContext<'a> {
        SigningContext {
            http_method: Method::POST,
            request_target: target,
            timestamp: "2020-10-21T03:38:28Z",
            request_id: "cc682442-6c22-493e-8121-b9ef6b3fa728",
            body,
            client_id: "MCH-0001-10791114622547",
            access_token: None,
            credential: Credential::SharedSecret(secret),
        }
    }

    fn canonical_from(text: &str) -> CanonicalString {
        let secret = secret("unused");
        let ctx = SigningContext {
            http_method: Method::POST,
            request_target: "/",
            timestamp: text,
            request_id: "",
            body: b"",
            client_id: "c",
            access_token: None,
            credential: Credential::SharedSecret(&secret),
        };
        let built = CanonicalString::build(SigningScheme::TokenIssuanceRsa, &ctx).unwrap();
        assert_eq!(built.as_str(), format!("c|{}", text));
        built
    }

    // ══════════════════════════════════════════════════════════════
    // HMAC Primitives
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn hmac_sha256_matches_reference_vector() {
        let mac = hmac_sha256(b"key", b"The quick brown fox jumps over the lazy dog").unwrap();
        assert_eq!(
            hex::encode(&mac),
            "f7bc83f430538424b13298e6aa6fb143ef4d59a14946175997479dbc2d1a3cd8"
        );
        assert_eq!(BASE64.encode(&mac), "97yD9DBThCSxMpjmqm+xQ+9NWaFJRhdZl0edvC0aPNg=");
    }

    // ══════════════════════════════════════════════════════════════
    // Core API Signatures
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn core_api_signature_matches_known_value() {
        let secret = secret(CORE_SECRET);
        let ctx = core_context(&secret, "/checkout/v1/payment", PAYMENT_BODY);
        let canonical = CanonicalString::build(SigningScheme::CoreApiHmac, &ctx).unwrap();

        let signature = sign(SigningScheme::CoreApiHmac, &canonical, ctx.credential).unwrap();

        assert_eq!(
            signature.as_str(),
            "HMACSHA256=L5spKh4Ce7fXbFe8YB+eIcAqVPT8RsNQCl86RenmY+g="
        );
    }

    #[test]
    fn core_api_signature_without_body_matches_known_value() {
        let secret = secret(CORE_SECRET);
        let mut ctx = core_context(
            &secret,
            "/sac-merchant/v1/balances/SAC-8760-1762081713175",
            b"",
        );
        ctx.http_method = Method::GET;
        let canonical = CanonicalString::build(SigningScheme::CoreApiHmac, &ctx).unwrap();

        let signature = sign(SigningScheme::CoreApiHmac, &canonical, ctx.credential).unwrap();

        assert_eq!(
            signature.as_str(),
            "HMACSHA256=ekJjmrgmcxHOvqJ4FRzF+5FSY8cTjKQ5BgbtCtCgxS0="
        );
    }

    #[test]
    fn core_api_signature_is_deterministic() {
        let secret = secret(CORE_SECRET);
        let ctx = core_context(&secret, "/checkout/v1/payment", PAYMENT_BODY);
        let canonical = CanonicalString::build(SigningScheme::CoreApiHmac, &ctx).unwrap();

        let first = sign(SigningScheme::CoreApiHmac, &canonical, ctx.credential).unwrap();
        let second = sign(SigningScheme::CoreApiHmac, &canonical, ctx.credential).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn core_api_rejects_empty_secret() {
        let secret = secret("");
        let canonical = canonical_from("x");

        let result = sign(
            SigningScheme::CoreApiHmac,
            &canonical,
            Credential::SharedSecret(&secret),
        );

        assert_eq!(
            result,
            Err(SignatureError::missing_credential(
                SigningScheme::CoreApiHmac,
                "shared_secret"
            ))
        );
    }

    // ══════════════════════════════════════════════════════════════
    // Transactional Signatures
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn transactional_signature_matches_known_value() {
        let secret = secret("client-secret");
        let body = br#"{"partnerReferenceNo":"hsjkans284b2he54","customerNumber":"628115678890","amount":{"value":"200000.00","currency":"IDR"}}"#;
        let ctx = SigningContext {
            http_method: Method::POST,
            request_target: "/snap/v1.1/emoney/bank-account-inquiry",
            timestamp: "2024-01-01T00:00:00+00:00",
            request_id: "ext-1",
            body,
            client_id: "BRN-0230-1696820291289",
            access_token: Some("test-access-token"),
            credential: Credential::SharedSecret(&secret),
        };
        let canonical =
            CanonicalString::build(SigningScheme::TransactionalHmac512, &ctx).unwrap();

        let signature =
            sign(SigningScheme::TransactionalHmac512, &canonical, ctx.credential).unwrap();

        assert_eq!(
            signature.as_str(),
            "2fcQJbahX0osYl7DVHwpqs2k6vLnXbPAXSQyWTlri6AiRz/mxmtNTCnSg3jMOlIYp2nbSpi1AZTpyMpjH0NAZA=="
        );
        assert!(!signature.as_str().starts_with(HMAC_SHA256_PREFIX));
    }

    // ══════════════════════════════════════════════════════════════
    // Token Issuance Signatures
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn token_signature_matches_known_value() {
        let key = KeyMaterial::from_pem(RSA_PKCS8).unwrap();
        let ctx = SigningContext {
            http_method: Method::POST,
            request_target: "/authorization/v1/access-token/b2b",
            timestamp: "2024-01-01T00:00:00+00:00",
            request_id: "",
            body: b"",
            client_id: "BRN-0230-1696820291289",
            access_token: None,
            credential: Credential::PrivateKey(&key),
        };
        let canonical = CanonicalString::build(SigningScheme::TokenIssuanceRsa, &ctx).unwrap();

        let signature = sign(SigningScheme::TokenIssuanceRsa, &canonical, ctx.credential).unwrap();

        assert_eq!(
            signature.as_str(),
            "shUruGVwNHM6RGjAUKSFJ+wf3IqZz3lVrvFem0nAqIKTj9wf29e2aTxcMEPJXiP06+8v7ZRDwOFqsA2v2JnSqXPPplZt1aWeLKpJH8lqXo8w9f/Qgb8LN6ws9U0nPbsy0ax3RFSFmb99DxAhyVsJFWzxsINub9jIjP6gBj++IhW98WGKpMJRJZhNm7J2IVhG6iC3FJh+y6Ll+qhiEqu+lrWvbOpQlzkkCsvGXelgCWYUKQ5e2+BLHeT3WpvBB1tSk4qBkn5+/PQB9lNKIJzGfSrzyN/hkZwydne19AOJqnZWYvXiFIGxW6Uwm13MVWjtVNUC4b+RLojGyCBAjlgoUQ=="
        );
    }

    #[test]
    fn token_signature_verifies_with_public_key() {
        let key = KeyMaterial::from_pem(RSA_PKCS1).unwrap();
        let canonical = canonical_from("2024-06-30T12:00:00+00:00");

        let signature =
            sign(SigningScheme::TokenIssuanceRsa, &canonical, Credential::PrivateKey(&key))
                .unwrap();

        let raw = BASE64.decode(signature.as_str()).unwrap();
        let verifying_key = VerifyingKey::<Sha256>::new(key.public_key());
        let rsa_signature = RsaSignature::try_from(raw.as_slice()).unwrap();
        assert!(verifying_key
            .verify(canonical.as_bytes(), &rsa_signature)
            .is_ok());
    }

    #[test]
    fn token_issuance_rejects_shared_secret() {
        let secret = secret(CORE_SECRET);
        let canonical = canonical_from("2024-01-01T00:00:00+00:00");

        let result = sign(
            SigningScheme::TokenIssuanceRsa,
            &canonical,
            Credential::SharedSecret(&secret),
        );

        assert_eq!(
            result,
            Err(SignatureError::missing_credential(
                SigningScheme::TokenIssuanceRsa,
                "private_key"
            ))
        );
    }

    #[test]
    fn hmac_schemes_reject_private_key() {
        let key = KeyMaterial::from_pem(RSA_PKCS8).unwrap();
        let canonical = canonical_from("x");

        for scheme in [SigningScheme::CoreApiHmac, SigningScheme::TransactionalHmac512] {
            let result = sign(scheme, &canonical, Credential::PrivateKey(&key));
            assert_eq!(
                result,
                Err(SignatureError::missing_credential(scheme, "shared_secret"))
            );
        }
    }
}
