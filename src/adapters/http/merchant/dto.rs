//! Request and response types for merchant endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::settlement::{PaymentMethod, SettlementError};
use crate::ports::{Balance, BankAccountInquiry, PaymentCheckout, SubAccount};

// ════════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubAccountBody {
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePaymentBody {
    pub amount: i64,
    pub customer_name: String,
    pub customer_email: String,
    pub sac_id: String,
    #[serde(default)]
    pub payment_due_minutes: Option<i64>,
    #[serde(default)]
    pub invoice_number: Option<String>,
    /// Gateway payment-method codes, e.g. `["QRIS", "VIRTUAL_ACCOUNT_BCA"]`.
    #[serde(default)]
    pub payment_method_types: Vec<String>,
}

impl CreatePaymentBody {
    /// Parses the requested channel codes.
    pub fn payment_methods(&self) -> Result<Vec<PaymentMethod>, SettlementError> {
        self.payment_method_types
            .iter()
            .map(|code| code.parse())
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BankAccountInquiryBody {
    pub customer_number: String,
    pub amount_value: String,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub partner_reference_no: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubAccountResponse {
    pub id: String,
    pub name: String,
    pub account_type: String,
    pub status: String,
    pub created_date: Option<DateTime<Utc>>,
}

impl From<SubAccount> for SubAccountResponse {
    fn from(account: SubAccount) -> Self {
        Self {
            id: account.id,
            name: account.name,
            account_type: account.account_type,
            status: account.status,
            created_date: account.created_date,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutResponse {
    pub invoice_number: String,
    pub amount: i64,
    pub payment_url: Option<String>,
    pub expired_date: Option<String>,
}

impl From<PaymentCheckout> for CheckoutResponse {
    fn from(checkout: PaymentCheckout) -> Self {
        Self {
            invoice_number: checkout.invoice_number,
            amount: checkout.amount,
            payment_url: checkout.payment_url,
            expired_date: checkout.expired_date,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceResponse {
    pub sac_id: String,
    pub pending: String,
    pub available: String,
}

impl BalanceResponse {
    pub fn new(sac_id: impl Into<String>, balance: Balance) -> Self {
        Self {
            sac_id: sac_id.into(),
            pending: balance.pending,
            available: balance.available,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankAccountInquiryResponse {
    pub response_code: String,
    pub response_message: String,
    pub partner_reference_no: Option<String>,
    pub customer_number: Option<String>,
    pub customer_name: Option<String>,
}

impl From<BankAccountInquiry> for BankAccountInquiryResponse {
    fn from(inquiry: BankAccountInquiry) -> Self {
        Self {
            response_code: inquiry.response_code,
            response_message: inquiry.response_message,
            partner_reference_no: inquiry.partner_reference_no,
            customer_number: inquiry.customer_number,
            customer_name: inquiry.customer_name,
        }
    }
}
