//! Request authentication protocol for the DOKU gateway.
//!
//! # Module Structure
//!
//! - `scheme` - The three signing variants
//! - `key_material` - RSA private key loading
//! - `digest` - Body digests (base64 or hex)
//! - `timestamp` - Scheme-specific timestamp layouts
//! - `context` - Inputs for one signing operation
//! - `canonical` - Canonical string builder
//! - `signer` - HMAC-SHA256, RSA-SHA256 and HMAC-SHA512 signatures
//! - `verifier` - Inbound notification verification
//! - `assembler` - Per-call header assembly
//! - `errors` - Protocol error taxonomy

mod assembler;
mod canonical;
mod context;
mod digest;
mod errors;
mod key_material;
mod scheme;
mod signer;
mod timestamp;
mod verifier;

pub use assembler::{
    generate_request_id, OutboundRequest, RequestSigner, SignedHeaders, SignerCredentials,
    DEFAULT_CHANNEL_ID,
};
pub use canonical::CanonicalString;
pub use context::{Credential, SigningContext};
pub use digest::{compute_digest, BodyDigest, DigestEncoding};
pub use errors::SignatureError;
pub use key_material::KeyMaterial;
pub use scheme::SigningScheme;
pub use signer::{sign, Signature, HMAC_SHA256_PREFIX};
pub use timestamp::{
    format_timestamp, parse_core_api_timestamp, CORE_API_TIMESTAMP_FORMAT, SNAP_TIMESTAMP_FORMAT,
};
pub use verifier::{InboundNotification, NotificationVerifier};
