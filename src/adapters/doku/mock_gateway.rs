//! Mock payment gateway for testing.
//!
//! Provides a configurable implementation of `PaymentGateway` for handler and
//! HTTP tests. Supports:
//! - Pre-configured responses
//! - Error injection per method
//! - Call tracking

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::ports::{
    AccessToken, Balance, BankAccountInquiry, BankAccountInquiryRequest, CreatePaymentRequest,
    CreateSubAccountRequest, GatewayError, PaymentCheckout, PaymentGateway, SubAccount,
};

/// Mock payment gateway.
///
/// # Example
///
/// ```ignore
/// let gateway = MockPaymentGateway::new();
/// gateway.set_balance(Balance { pending: "0".into(), available: "150000".into() });
/// gateway.set_method_error("create_payment", GatewayError::from_status(400, "Invalid email"));
///
/// let balance = gateway.get_balance("SAC-1").await?;
/// assert_eq!(gateway.call_count("get_balance"), 1);
/// ```
#[derive(Clone, Default)]
pub struct MockPaymentGateway {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    sub_account: Option<SubAccount>,
    checkout: Option<PaymentCheckout>,
    balance: Option<Balance>,
    inquiry: Option<BankAccountInquiry>,
    method_errors: HashMap<String, GatewayError>,
    call_log: Vec<MethodCall>,
}

/// Recorded method call for assertions.
#[derive(Debug, Clone)]
pub struct MethodCall {
    pub method: String,
    pub args: Vec<String>,
}

/// Token handed out by `issue_access_token`.
pub const MOCK_ACCESS_TOKEN: &str = "mock-access-token";

impl MockPaymentGateway {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Methods
    // ════════════════════════════════════════════════════════════════════════════

    pub fn set_sub_account(&self, account: SubAccount) {
        self.state().sub_account = Some(account);
    }

    pub fn set_checkout(&self, checkout: PaymentCheckout) {
        self.state().checkout = Some(checkout);
    }

    pub fn set_balance(&self, balance: Balance) {
        self.state().balance = Some(balance);
    }

    pub fn set_inquiry(&self, inquiry: BankAccountInquiry) {
        self.state().inquiry = Some(inquiry);
    }

    /// Makes every call to `method` fail with `error`.
    pub fn set_method_error(&self, method: &str, error: GatewayError) {
        self.state().method_errors.insert(method.to_string(), error);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Call Tracking
    // ════════════════════════════════════════════════════════════════════════════

    pub fn calls(&self) -> Vec<MethodCall> {
        self.state().call_log.clone()
    }

    pub fn was_called(&self, method: &str) -> bool {
        self.state().call_log.iter().any(|c| c.method == method)
    }

    pub fn call_count(&self, method: &str) -> usize {
        self.state()
            .call_log
            .iter()
            .filter(|c| c.method == method)
            .count()
    }

    fn record_call(&self, method: &str, args: Vec<String>) -> Result<(), GatewayError> {
        let mut state = self.state();
        state.call_log.push(MethodCall {
            method: method.to_string(),
            args,
        });
        match state.method_errors.get(method) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn create_sub_account(
        &self,
        request: CreateSubAccountRequest,
    ) -> Result<SubAccount, GatewayError> {
        self.record_call(
            "create_sub_account",
            vec![request.email.clone(), request.name.clone()],
        )?;
        Ok(self.state().sub_account.clone().unwrap_or_else(|| SubAccount {
            id: "SAC-0000-0000000000001".to_string(),
            name: request.name,
            account_type: "STANDARD".to_string(),
            status: "PENDING".to_string(),
            created_date: None,
            updated_date: None,
        }))
    }

    async fn create_payment(
        &self,
        request: CreatePaymentRequest,
    ) -> Result<PaymentCheckout, GatewayError> {
        self.record_call(
            "create_payment",
            vec![request.sac_id.clone(), request.amount.to_string()],
        )?;
        Ok(self.state().checkout.clone().unwrap_or_else(|| PaymentCheckout {
            invoice_number: request
                .invoice_number
                .unwrap_or_else(|| "INV-MOCK-0001".to_string()),
            amount: request.amount,
            session_id: None,
            payment_url: Some("https://sandbox.doku.com/checkout-link-v2/mock".to_string()),
            token_id: None,
            expired_date: None,
            request_id: None,
        }))
    }

    async fn get_balance(&self, sac_id: &str) -> Result<Balance, GatewayError> {
        self.record_call("get_balance", vec![sac_id.to_string()])?;
        Ok(self.state().balance.clone().unwrap_or_else(|| Balance {
            pending: "0".to_string(),
            available: "0".to_string(),
        }))
    }

    async fn issue_access_token(&self) -> Result<AccessToken, GatewayError> {
        self.record_call("issue_access_token", Vec::new())?;
        Ok(AccessToken::new(MOCK_ACCESS_TOKEN, "Bearer", 900))
    }

    async fn bank_account_inquiry(
        &self,
        token: &AccessToken,
        request: BankAccountInquiryRequest,
    ) -> Result<BankAccountInquiry, GatewayError> {
        // Records whether the issued token was passed through, never the token itself
        let token_matches = (token.expose() == MOCK_ACCESS_TOKEN).to_string();
        self.record_call(
            "bank_account_inquiry",
            vec![request.customer_number.clone(), token_matches],
        )?;
        Ok(self.state().inquiry.clone().unwrap_or_else(|| BankAccountInquiry {
            response_code: "2004200".to_string(),
            response_message: "Successful".to_string(),
            reference_no: None,
            partner_reference_no: Some(request.partner_reference_no),
            customer_number: Some(request.customer_number),
            customer_name: None,
        }))
    }
}
