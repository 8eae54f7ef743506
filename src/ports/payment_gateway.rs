//! Payment gateway port.
//!
//! Defines the business operations the merchant backend performs against the
//! gateway. Implementations sign every call with the scheme its endpoint family
//! requires and translate non-2xx responses into [`GatewayError`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::settlement::PaymentMethod;
use crate::domain::signing::SignatureError;
use crate::ports::TransportError;

/// Port for gateway integrations.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Registers a merchant sub-account.
    async fn create_sub_account(
        &self,
        request: CreateSubAccountRequest,
    ) -> Result<SubAccount, GatewayError>;

    /// Creates a hosted checkout payment routed to a sub-account.
    async fn create_payment(
        &self,
        request: CreatePaymentRequest,
    ) -> Result<PaymentCheckout, GatewayError>;

    /// Reads the balance of a sub-account.
    async fn get_balance(&self, sac_id: &str) -> Result<Balance, GatewayError>;

    /// Obtains a bearer token for transactional calls.
    ///
    /// The token is not cached; callers decide when to reuse or refresh it.
    async fn issue_access_token(&self) -> Result<AccessToken, GatewayError>;

    /// Resolves the holder of an e-money or bank account.
    async fn bank_account_inquiry(
        &self,
        token: &AccessToken,
        request: BankAccountInquiryRequest,
    ) -> Result<BankAccountInquiry, GatewayError>;
}

/// Request to create a sub-account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSubAccountRequest {
    pub email: String,
    pub name: String,
}

/// Sub-account as returned by the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubAccount {
    /// `SAC-…` identifier.
    pub id: String,
    pub name: String,
    pub account_type: String,
    pub status: String,
    pub created_date: Option<DateTime<Utc>>,
    pub updated_date: Option<DateTime<Utc>>,
}

/// Request to create a checkout payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePaymentRequest {
    /// Amount in rupiah.
    pub amount: i64,
    pub customer_name: String,
    pub customer_email: String,
    /// Sub-account that receives the funds.
    pub sac_id: String,
    /// Minutes until the payment expires; 60 when absent.
    #[serde(default)]
    pub payment_due_minutes: Option<i64>,
    /// Generated from the current time when absent.
    #[serde(default)]
    pub invoice_number: Option<String>,
    /// Restricts the checkout page to these channels; all when empty.
    #[serde(default)]
    pub payment_method_types: Vec<PaymentMethod>,
}

/// Hosted checkout created for a payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentCheckout {
    pub invoice_number: String,
    pub amount: i64,
    pub session_id: Option<String>,
    /// Checkout page the customer is redirected to.
    pub payment_url: Option<String>,
    pub token_id: Option<String>,
    pub expired_date: Option<String>,
    /// `Request-Id` the gateway echoed back.
    pub request_id: Option<String>,
}

/// Sub-account balance, as decimal strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub pending: String,
    pub available: String,
}

/// Bearer token for transactional calls.
#[derive(Debug, Clone)]
pub struct AccessToken {
    token: SecretString,
    pub token_type: String,
    /// Lifetime in seconds, as reported by the gateway.
    pub expires_in: i64,
}

impl AccessToken {
    pub fn new(token: impl Into<String>, token_type: impl Into<String>, expires_in: i64) -> Self {
        Self {
            token: SecretString::new(token.into()),
            token_type: token_type.into(),
            expires_in,
        }
    }

    pub fn expose(&self) -> &str {
        self.token.expose_secret()
    }
}

/// Account inquiry request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankAccountInquiryRequest {
    pub partner_reference_no: String,
    pub customer_number: String,
    /// Decimal string with two fraction digits, e.g. `"200000.00"`.
    pub amount_value: String,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "IDR".to_string()
}

/// Account inquiry result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankAccountInquiry {
    pub response_code: String,
    pub response_message: String,
    pub reference_no: Option<String>,
    pub partner_reference_no: Option<String>,
    pub customer_number: Option<String>,
    pub customer_name: Option<String>,
}

/// Errors from gateway operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayError {
    pub code: GatewayErrorCode,

    pub message: String,

    /// HTTP status of the gateway response, when one was received.
    pub status: Option<u16>,

    pub retryable: bool,
}

impl GatewayError {
    pub fn new(code: GatewayErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            status: None,
            retryable: code.is_retryable(),
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Classifies a non-2xx response.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let code = match status {
            400 | 409 | 422 => GatewayErrorCode::InvalidRequest,
            401 | 403 => GatewayErrorCode::AuthenticationError,
            404 => GatewayErrorCode::NotFound,
            429 => GatewayErrorCode::RateLimitExceeded,
            500..=599 => GatewayErrorCode::GatewayUnavailable,
            _ => GatewayErrorCode::Unknown,
        };
        Self::new(code, message).with_status(status)
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorCode::InvalidResponse, message)
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorCode::ConfigurationError, message)
    }
}

impl std::fmt::Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} ({}): {}", self.code, status, self.message),
            None => write!(f, "{}: {}", self.code, self.message),
        }
    }
}

impl std::error::Error for GatewayError {}

impl From<SignatureError> for GatewayError {
    fn from(err: SignatureError) -> Self {
        let code = if err.is_configuration() {
            GatewayErrorCode::ConfigurationError
        } else {
            GatewayErrorCode::SigningError
        };
        Self::new(code, err.to_string())
    }
}

impl From<TransportError> for GatewayError {
    fn from(err: TransportError) -> Self {
        let mut error = Self::new(GatewayErrorCode::NetworkError, err.to_string());
        error.retryable = err.is_retryable();
        error
    }
}

/// Gateway error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatewayErrorCode {
    /// Missing client id, secret or private key.
    ConfigurationError,

    /// The signing primitive failed.
    SigningError,

    /// No response was received.
    NetworkError,

    /// The gateway rejected our credentials or signature.
    AuthenticationError,

    /// The gateway rejected the request payload.
    InvalidRequest,

    NotFound,

    RateLimitExceeded,

    /// 5xx from the gateway.
    GatewayUnavailable,

    /// A 2xx response whose body could not be decoded.
    InvalidResponse,

    Unknown,
}

impl GatewayErrorCode {
    /// Check if this error type is typically retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GatewayErrorCode::NetworkError
                | GatewayErrorCode::RateLimitExceeded
                | GatewayErrorCode::GatewayUnavailable
        )
    }
}

impl std::fmt::Display for GatewayErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            GatewayErrorCode::ConfigurationError => "configuration_error",
            GatewayErrorCode::SigningError => "signing_error",
            GatewayErrorCode::NetworkError => "network_error",
            GatewayErrorCode::AuthenticationError => "authentication_error",
            GatewayErrorCode::InvalidRequest => "invalid_request",
            GatewayErrorCode::NotFound => "not_found",
            GatewayErrorCode::RateLimitExceeded => "rate_limit_exceeded",
            GatewayErrorCode::GatewayUnavailable => "gateway_unavailable",
            GatewayErrorCode::InvalidResponse => "invalid_response",
            GatewayErrorCode::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}
