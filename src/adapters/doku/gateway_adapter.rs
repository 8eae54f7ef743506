//! DOKU gateway adapter.
//!
//! Implements the `PaymentGateway` port. Core API calls (sub-accounts,
//! checkout, balances) are signed with HMAC-SHA256, token issuance with RSA and
//! SNAP transactional calls with HMAC-SHA512.
//!
//! # Configuration
//!
//! ```ignore
//! let config = DokuGatewayConfig::new().with_base_url(SANDBOX_BASE_URL);
//! let adapter = DokuGatewayAdapter::new(config, Arc::new(signer), Arc::new(ReqwestTransport::new()));
//! ```

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use http::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::signing::{OutboundRequest, RequestSigner, SigningScheme};
use crate::ports::{
    AccessToken, Balance, BankAccountInquiry, BankAccountInquiryRequest, CreatePaymentRequest,
    CreateSubAccountRequest, GatewayError, GatewayErrorCode, HttpTransport, PaymentCheckout,
    PaymentGateway, SubAccount, TransportRequest,
};

use super::error_body::parse_error_message;
use super::wire_types::{
    AccessTokenBody, AccessTokenResponse, AccountRef, AdditionalInfoBody, AmountBody,
    BalanceResponse, BankAccountInquiryBody, BankAccountInquiryResponse, CreatePaymentBody,
    CreatePaymentResponse, CreateSubAccountBody, CreateSubAccountResponse, CustomerBody,
    OrderBody, PaymentBody, SubAccountBody, GRANT_TYPE_CLIENT_CREDENTIALS, SUB_ACCOUNT_TYPE,
};

pub const SANDBOX_BASE_URL: &str = "https://api-sandbox.doku.com";
pub const PRODUCTION_BASE_URL: &str = "https://api.doku.com";

pub const SUB_ACCOUNTS_PATH: &str = "/sac-merchant/v1/accounts";
pub const CHECKOUT_PATH: &str = "/checkout/v1/payment";
pub const BALANCES_PATH: &str = "/sac-merchant/v1/balances";
pub const ACCESS_TOKEN_PATH: &str = "/authorization/v1/access-token/b2b";
pub const BANK_ACCOUNT_INQUIRY_PATH: &str = "/snap/v1.1/emoney/bank-account-inquiry";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_PAYMENT_DUE_MINUTES: i64 = 60;

/// Gateway endpoint configuration.
#[derive(Debug, Clone)]
pub struct DokuGatewayConfig {
    base_url: String,
    timeout: Duration,
    payment_due_minutes: i64,
}

impl Default for DokuGatewayConfig {
    fn default() -> Self {
        Self {
            base_url: SANDBOX_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            payment_due_minutes: DEFAULT_PAYMENT_DUE_MINUTES,
        }
    }
}

impl DokuGatewayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API base URL; a trailing slash is ignored.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Default checkout expiry when a request does not set one.
    pub fn with_payment_due_minutes(mut self, minutes: i64) -> Self {
        self.payment_due_minutes = minutes;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// DOKU implementation of `PaymentGateway`.
pub struct DokuGatewayAdapter {
    config: DokuGatewayConfig,
    signer: Arc<RequestSigner>,
    transport: Arc<dyn HttpTransport>,
}

impl DokuGatewayAdapter {
    pub fn new(
        config: DokuGatewayConfig,
        signer: Arc<RequestSigner>,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            config,
            signer,
            transport,
        }
    }

    /// Signs, sends and decodes one gateway call.
    async fn call<T: DeserializeOwned>(
        &self,
        scheme: SigningScheme,
        method: Method,
        path: &str,
        body: Vec<u8>,
        access_token: Option<&str>,
    ) -> Result<T, GatewayError> {
        let signed = self.signer.sign_request(
            scheme,
            &OutboundRequest {
                method: &method,
                request_target: path,
                body: &body,
                access_token,
            },
        )?;
        let request_id = signed.request_id().to_string();

        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        headers.extend(
            signed
                .into_pairs()
                .into_iter()
                .map(|(name, value)| (name.to_string(), value)),
        );

        let request = TransportRequest {
            method: method.clone(),
            url: format!("{}{}", self.config.base_url, path),
            headers,
            body,
            timeout: self.config.timeout,
        };

        let response = self.transport.send(request).await.map_err(|e| {
            tracing::warn!(
                scheme = %scheme,
                request_id = %request_id,
                path = %path,
                error = %e,
                "Gateway request failed"
            );
            GatewayError::from(e)
        })?;

        if !response.is_success() {
            let message = parse_error_message(&response.body);
            tracing::warn!(
                scheme = %scheme,
                request_id = %request_id,
                path = %path,
                status = response.status,
                message = %message,
                "Gateway returned error"
            );
            return Err(GatewayError::from_status(response.status, message));
        }

        tracing::info!(
            scheme = %scheme,
            request_id = %request_id,
            method = %method,
            path = %path,
            status = response.status,
            "Gateway call succeeded"
        );

        serde_json::from_slice(&response.body).map_err(|e| {
            GatewayError::invalid_response(format!("failed to decode {} response: {}", path, e))
                .with_status(response.status)
        })
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<Vec<u8>, GatewayError> {
    serde_json::to_vec(value)
        .map_err(|e| GatewayError::new(GatewayErrorCode::InvalidRequest, e.to_string()))
}

fn require_non_empty(field: &str, value: &str) -> Result<(), GatewayError> {
    if value.trim().is_empty() {
        return Err(GatewayError::new(
            GatewayErrorCode::InvalidRequest,
            format!("{} is empty", field),
        ));
    }
    Ok(())
}

/// `INV-` followed by the current Unix time in nanoseconds.
fn generate_invoice_number() -> String {
    let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
    format!("INV-{}", nanos)
}

#[async_trait]
impl PaymentGateway for DokuGatewayAdapter {
    async fn create_sub_account(
        &self,
        request: CreateSubAccountRequest,
    ) -> Result<SubAccount, GatewayError> {
        require_non_empty("email", &request.email)?;
        require_non_empty("name", &request.name)?;

        let body = to_json(&CreateSubAccountBody {
            account: SubAccountBody {
                email: &request.email,
                account_type: SUB_ACCOUNT_TYPE,
                name: &request.name,
            },
        })?;

        let response: CreateSubAccountResponse = self
            .call(SigningScheme::CoreApiHmac, Method::POST, SUB_ACCOUNTS_PATH, body, None)
            .await?;
        Ok(response.account.into())
    }

    async fn create_payment(
        &self,
        request: CreatePaymentRequest,
    ) -> Result<PaymentCheckout, GatewayError> {
        require_non_empty("sac_id", &request.sac_id)?;
        if request.amount <= 0 {
            return Err(GatewayError::new(
                GatewayErrorCode::InvalidRequest,
                "amount must be greater than 0",
            ));
        }

        let invoice_number = request
            .invoice_number
            .clone()
            .unwrap_or_else(generate_invoice_number);
        let body = to_json(&CreatePaymentBody {
            order: OrderBody {
                invoice_number: &invoice_number,
                amount: request.amount,
            },
            payment: PaymentBody {
                payment_due_date: request
                    .payment_due_minutes
                    .unwrap_or(self.config.payment_due_minutes),
                payment_method_types: request.payment_method_types.clone(),
            },
            customer: CustomerBody {
                name: &request.customer_name,
                email: &request.customer_email,
            },
            additional_info: AdditionalInfoBody {
                account: AccountRef {
                    id: &request.sac_id,
                },
            },
        })?;

        let response: CreatePaymentResponse = self
            .call(SigningScheme::CoreApiHmac, Method::POST, CHECKOUT_PATH, body, None)
            .await?;
        Ok(response.response.into_checkout(&invoice_number, request.amount))
    }

    async fn get_balance(&self, sac_id: &str) -> Result<Balance, GatewayError> {
        require_non_empty("sac_id", sac_id)?;

        let path = format!("{}/{}", BALANCES_PATH, sac_id);
        let response: BalanceResponse = self
            .call(SigningScheme::CoreApiHmac, Method::GET, &path, Vec::new(), None)
            .await?;
        Ok(response.balance.into())
    }

    async fn issue_access_token(&self) -> Result<AccessToken, GatewayError> {
        let body = to_json(&AccessTokenBody {
            grant_type: GRANT_TYPE_CLIENT_CREDENTIALS,
        })?;

        let response: AccessTokenResponse = self
            .call(
                SigningScheme::TokenIssuanceRsa,
                Method::POST,
                ACCESS_TOKEN_PATH,
                body,
                None,
            )
            .await?;

        if response.access_token.is_empty() {
            return Err(GatewayError::invalid_response(format!(
                "token response {} carried no access token",
                response.response_code.as_deref().unwrap_or("without code")
            )));
        }

        Ok(AccessToken::new(
            response.access_token,
            response.token_type,
            response.expires_in,
        ))
    }

    async fn bank_account_inquiry(
        &self,
        token: &AccessToken,
        request: BankAccountInquiryRequest,
    ) -> Result<BankAccountInquiry, GatewayError> {
        require_non_empty("partner_reference_no", &request.partner_reference_no)?;
        require_non_empty("customer_number", &request.customer_number)?;

        let body = to_json(&BankAccountInquiryBody {
            partner_reference_no: &request.partner_reference_no,
            customer_number: &request.customer_number,
            amount: AmountBody {
                value: &request.amount_value,
                currency: &request.currency,
            },
        })?;

        let response: BankAccountInquiryResponse = self
            .call(
                SigningScheme::TransactionalHmac512,
                Method::POST,
                BANK_ACCOUNT_INQUIRY_PATH,
                body,
                Some(token.expose()),
            )
            .await?;
        Ok(response.into())
    }
}
