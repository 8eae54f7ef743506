//! Per-call signing orchestration.
//!
//! [`RequestSigner`] owns the merchant credentials and turns an outbound
//! request into the finished header set for its scheme. It keeps no state
//! between calls: every invocation draws a fresh request id and timestamp.

use chrono::{DateTime, Utc};
use http::Method;
use secrecy::SecretString;
use uuid::Uuid;

use super::canonical::CanonicalString;
use super::context::{Credential, SigningContext};
use super::errors::SignatureError;
use super::key_material::KeyMaterial;
use super::scheme::SigningScheme;
use super::signer::sign;
use super::timestamp::format_timestamp;

/// Channel identifier sent on SNAP transactional calls.
pub const DEFAULT_CHANNEL_ID: &str = "H2H";

/// Merchant credentials, immutable for the lifetime of the signer.
pub struct SignerCredentials {
    pub client_id: String,
    pub shared_secret: SecretString,
    /// Required only for token issuance.
    pub private_key: Option<KeyMaterial>,
    /// `X-PARTNER-ID`; the client id is used when absent.
    pub partner_id: Option<String>,
    pub channel_id: String,
}

impl SignerCredentials {
    pub fn new(client_id: impl Into<String>, shared_secret: SecretString) -> Self {
        Self {
            client_id: client_id.into(),
            shared_secret,
            private_key: None,
            partner_id: None,
            channel_id: DEFAULT_CHANNEL_ID.to_string(),
        }
    }

    pub fn with_private_key(mut self, key: KeyMaterial) -> Self {
        self.private_key = Some(key);
        self
    }

    pub fn with_partner_id(mut self, partner_id: impl Into<String>) -> Self {
        self.partner_id = Some(partner_id.into());
        self
    }

    pub fn with_channel_id(mut self, channel_id: impl Into<String>) -> Self {
        self.channel_id = channel_id.into();
        self
    }
}

impl std::fmt::Debug for SignerCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignerCredentials")
            .field("client_id", &self.client_id)
            .field("shared_secret", &"[REDACTED]")
            .field("private_key", &self.private_key)
            .field("partner_id", &self.partner_id)
            .field("channel_id", &self.channel_id)
            .finish()
    }
}

/// The parts of an outbound request that are bound into its signature.
#[derive(Debug, Clone, Copy)]
pub struct OutboundRequest<'a> {
    pub method: &'a Method,
    /// Path only, e.g. `/checkout/v1/payment`.
    pub request_target: &'a str,
    pub body: &'a [u8],
    /// Bearer token, transactional calls only.
    pub access_token: Option<&'a str>,
}

/// Authentication headers for one signed request, in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    scheme: SigningScheme,
    request_id: String,
    entries: Vec<(&'static str, String)>,
}

impl SignedHeaders {
    pub fn scheme(&self) -> SigningScheme {
        self.scheme
    }

    /// Identifier drawn for this call (`Request-Id` or `X-EXTERNAL-ID`).
    ///
    /// Token issuance sends no id header, but one is still drawn for logging.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Value of the header named exactly `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.entries.iter().map(|(key, value)| (*key, value.as_str()))
    }

    pub fn into_pairs(self) -> Vec<(&'static str, String)> {
        self.entries
    }
}

/// Produces signed header sets for outbound gateway calls.
#[derive(Debug)]
pub struct RequestSigner {
    credentials: SignerCredentials,
}

impl RequestSigner {
    pub fn new(credentials: SignerCredentials) -> Self {
        Self { credentials }
    }

    pub fn client_id(&self) -> &str {
        &self.credentials.client_id
    }

    /// Signs `request` with a fresh request id and the current time.
    ///
    /// # Errors
    ///
    /// Returns `SignatureError` when a credential the scheme needs is missing
    /// or the primitive fails.
    pub fn sign_request(
        &self,
        scheme: SigningScheme,
        request: &OutboundRequest<'_>,
    ) -> Result<SignedHeaders, SignatureError> {
        let request_id = generate_request_id(scheme);
        self.sign_request_at(scheme, request, &request_id, Utc::now())
    }

    /// Signs `request` with an explicit request id and instant.
    pub fn sign_request_at(
        &self,
        scheme: SigningScheme,
        request: &OutboundRequest<'_>,
        request_id: &str,
        now: DateTime<Utc>,
    ) -> Result<SignedHeaders, SignatureError> {
        let timestamp = format_timestamp(scheme, now);
        let credential = self.credential_for(scheme)?;

        let ctx = SigningContext {
            http_method: request.method.clone(),
            request_target: request.request_target,
            timestamp: &timestamp,
            request_id,
            body: request.body,
            client_id: &self.credentials.client_id,
            access_token: request.access_token,
            credential,
        };
        let canonical = CanonicalString::build(scheme, &ctx)?;
        let signature = sign(scheme, &canonical, credential)?.into_string();

        tracing::debug!(
            scheme = %scheme,
            request_id = %request_id,
            request_target = %request.request_target,
            "Signed outbound request"
        );

        let client_id = self.credentials.client_id.clone();
        let entries = match scheme {
            SigningScheme::CoreApiHmac => vec![
                ("Client-Id", client_id),
                ("Request-Id", request_id.to_string()),
                ("Request-Timestamp", timestamp),
                ("Signature", signature),
            ],
            SigningScheme::TokenIssuanceRsa => vec![
                ("X-Timestamp", timestamp),
                ("X-Signature", signature),
                ("X-Client-Key", client_id),
            ],
            SigningScheme::TransactionalHmac512 => {
                // CanonicalString::build already rejected a missing token
                let token = request.access_token.unwrap_or_default();
                let partner_id = self
                    .credentials
                    .partner_id
                    .clone()
                    .unwrap_or(client_id);
                vec![
                    ("Authorization", format!("Bearer {}", token)),
                    ("X-TIMESTAMP", timestamp),
                    ("X-SIGNATURE", signature),
                    ("X-EXTERNAL-ID", request_id.to_string()),
                    ("CHANNEL-ID", self.credentials.channel_id.clone()),
                    ("X-PARTNER-ID", partner_id),
                ]
            }
        };

        Ok(SignedHeaders {
            scheme,
            request_id: request_id.to_string(),
            entries,
        })
    }

    fn credential_for(&self, scheme: SigningScheme) -> Result<Credential<'_>, SignatureError> {
        if scheme.uses_shared_secret() {
            return Ok(Credential::SharedSecret(&self.credentials.shared_secret));
        }
        self.credentials
            .private_key
            .as_ref()
            .map(Credential::PrivateKey)
            .ok_or(SignatureError::missing_credential(scheme, "private_key"))
    }
}

/// Draws a fresh 128-bit random request identifier.
///
/// Hyphenated for `Request-Id`; the compact form for `X-EXTERNAL-ID`.
pub fn generate_request_id(scheme: SigningScheme) -> String {
    let id = Uuid::new_v4();
    match scheme {
        SigningScheme::TransactionalHmac512 => id.simple().to_string(),
        SigningScheme::CoreApiHmac | SigningScheme::TokenIssuanceRsa => id.to_string(),
    }
}
