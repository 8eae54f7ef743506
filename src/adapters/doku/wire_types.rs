//! Gateway JSON shapes.
//!
//! Core API bodies use snake_case; SNAP bodies use camelCase. Response types
//! only capture the fields mapped into port types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::settlement::PaymentMethod;
use crate::ports::{Balance, BankAccountInquiry, PaymentCheckout, SubAccount};

// ════════════════════════════════════════════════════════════════════════════════
// Sub-accounts
// ════════════════════════════════════════════════════════════════════════════════

pub const SUB_ACCOUNT_TYPE: &str = "STANDARD";

#[derive(Debug, Serialize)]
pub struct CreateSubAccountBody<'a> {
    pub account: SubAccountBody<'a>,
}

#[derive(Debug, Serialize)]
pub struct SubAccountBody<'a> {
    pub email: &'a str,
    #[serde(rename = "type")]
    pub account_type: &'a str,
    pub name: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct CreateSubAccountResponse {
    pub account: SubAccountWire,
}

#[derive(Debug, Deserialize)]
pub struct SubAccountWire {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub account_type: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_date: Option<DateTime<Utc>>,
}

impl From<SubAccountWire> for SubAccount {
    fn from(wire: SubAccountWire) -> Self {
        Self {
            id: wire.id,
            name: wire.name,
            account_type: wire.account_type,
            status: wire.status,
            created_date: wire.created_date,
            updated_date: wire.updated_date,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Checkout
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
pub struct CreatePaymentBody<'a> {
    pub order: OrderBody<'a>,
    pub payment: PaymentBody,
    pub customer: CustomerBody<'a>,
    pub additional_info: AdditionalInfoBody<'a>,
}

#[derive(Debug, Serialize)]
pub struct OrderBody<'a> {
    pub invoice_number: &'a str,
    pub amount: i64,
}

#[derive(Debug, Serialize)]
pub struct PaymentBody {
    pub payment_due_date: i64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub payment_method_types: Vec<PaymentMethod>,
}

#[derive(Debug, Serialize)]
pub struct CustomerBody<'a> {
    pub name: &'a str,
    pub email: &'a str,
}

/// Routes the payment to a sub-account.
#[derive(Debug, Serialize)]
pub struct AdditionalInfoBody<'a> {
    pub account: AccountRef<'a>,
}

#[derive(Debug, Serialize)]
pub struct AccountRef<'a> {
    pub id: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct CreatePaymentResponse {
    pub response: CheckoutWire,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CheckoutWire {
    pub order: Option<CheckoutOrderWire>,
    pub payment: Option<CheckoutPaymentWire>,
    pub headers: Option<CheckoutHeadersWire>,
}

#[derive(Debug, Deserialize)]
pub struct CheckoutOrderWire {
    pub invoice_number: String,
    pub amount: i64,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CheckoutPaymentWire {
    #[serde(default)]
    pub token_id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub expired_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CheckoutHeadersWire {
    #[serde(default)]
    pub request_id: Option<String>,
}

impl CheckoutWire {
    /// Maps to the port type, falling back to what was sent when the gateway
    /// omits the order echo.
    pub fn into_checkout(self, invoice_number: &str, amount: i64) -> PaymentCheckout {
        let (invoice_number, amount, session_id) = match self.order {
            Some(order) => (order.invoice_number, order.amount, order.session_id),
            None => (invoice_number.to_string(), amount, None),
        };
        let (token_id, payment_url, expired_date) = match self.payment {
            Some(payment) => (payment.token_id, payment.url, payment.expired_date),
            None => (None, None, None),
        };
        PaymentCheckout {
            invoice_number,
            amount,
            session_id,
            payment_url,
            token_id,
            expired_date,
            request_id: self.headers.and_then(|h| h.request_id),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Balance
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
pub struct BalanceResponse {
    pub balance: BalanceWire,
}

#[derive(Debug, Deserialize)]
pub struct BalanceWire {
    pub pending: String,
    pub available: String,
}

impl From<BalanceWire> for Balance {
    fn from(wire: BalanceWire) -> Self {
        Self {
            pending: wire.pending,
            available: wire.available,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// SNAP
// ════════════════════════════════════════════════════════════════════════════════

pub const GRANT_TYPE_CLIENT_CREDENTIALS: &str = "client_credentials";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenBody<'a> {
    pub grant_type: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenResponse {
    #[serde(default)]
    pub response_code: Option<String>,
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: i64,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BankAccountInquiryBody<'a> {
    pub partner_reference_no: &'a str,
    pub customer_number: &'a str,
    pub amount: AmountBody<'a>,
}

#[derive(Debug, Serialize)]
pub struct AmountBody<'a> {
    pub value: &'a str,
    pub currency: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankAccountInquiryResponse {
    pub response_code: String,
    #[serde(default)]
    pub response_message: String,
    #[serde(default)]
    pub reference_no: Option<String>,
    #[serde(default)]
    pub partner_reference_no: Option<String>,
    #[serde(default)]
    pub customer_number: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
}

impl From<BankAccountInquiryResponse> for BankAccountInquiry {
    fn from(wire: BankAccountInquiryResponse) -> Self {
        Self {
            response_code: wire.response_code,
            response_message: wire.response_message,
            reference_no: wire.reference_no,
            partner_reference_no: wire.partner_reference_no,
            customer_number: wire.customer_number,
            customer_name: wire.customer_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sub_account_body_uses_type_key() {
        let body = CreateSubAccountBody {
            account: SubAccountBody {
                email: "merchant@example.com",
                account_type: SUB_ACCOUNT_TYPE,
                name: "Toko Maju",
            },
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"account":{"email":"merchant@example.com","type":"STANDARD","name":"Toko Maju"}}"#
        );
    }

    #[test]
    fn payment_body_omits_empty_method_list() {
        let body = CreatePaymentBody {
            order: OrderBody {
                invoice_number: "INV-1",
                amount: 150000,
            },
            payment: PaymentBody {
                payment_due_date: 60,
                payment_method_types: Vec::new(),
            },
            customer: CustomerBody {
                name: "Budi",
                email: "budi@example.com",
            },
            additional_info: AdditionalInfoBody {
                account: AccountRef { id: "SAC-1" },
            },
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"order":{"invoice_number":"INV-1","amount":150000},"payment":{"payment_due_date":60},"customer":{"name":"Budi","email":"budi@example.com"},"additional_info":{"account":{"id":"SAC-1"}}}"#
        );
    }

    #[test]
    fn checkout_response_maps_payment_url() {
        let json = r#"{
            "message": ["SUCCESS"],
            "response": {
                "order": {"amount": 150000, "invoice_number": "INV-1", "currency": "IDR", "session_id": "sess-1"},
                "payment": {"payment_method_types": ["QRIS"], "payment_due_date": 60, "token_id": "tok-1",
                            "url": "https://sandbox.doku.com/checkout-link-v2/tok-1", "expired_date": "20240301091500"},
                "uuid": 2110262001000000000,
                "headers": {"request_id": "req-1", "signature": "HMACSHA256=x", "date": "2024-03-01T08:15:00Z", "client_id": "MCH-1"}
            }
        }"#;
        let response: CreatePaymentResponse = serde_json::from_str(json).unwrap();
        let checkout = response.response.into_checkout("ignored", 0);

        assert_eq!(checkout.invoice_number, "INV-1");
        assert_eq!(checkout.amount, 150000);
        assert_eq!(
            checkout.payment_url.as_deref(),
            Some("https://sandbox.doku.com/checkout-link-v2/tok-1")
        );
        assert_eq!(checkout.request_id.as_deref(), Some("req-1"));
    }

    #[test]
    fn checkout_without_order_echo_keeps_request_values() {
        let response: CreatePaymentResponse = serde_json::from_str(r#"{"response":{}}"#).unwrap();
        let checkout = response.response.into_checkout("INV-9", 5000);
        assert_eq!(checkout.invoice_number, "INV-9");
        assert_eq!(checkout.amount, 5000);
        assert!(checkout.payment_url.is_none());
    }

    #[test]
    fn token_body_is_camel_case() {
        let body = AccessTokenBody {
            grant_type: GRANT_TYPE_CLIENT_CREDENTIALS,
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"grantType":"client_credentials"}"#
        );
    }

    #[test]
    fn inquiry_body_matches_gateway_layout() {
        let body = BankAccountInquiryBody {
            partner_reference_no: "hsjkans284b2he54",
            customer_number: "628115678890",
            amount: AmountBody {
                value: "200000.00",
                currency: "IDR",
            },
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"partnerReferenceNo":"hsjkans284b2he54","customerNumber":"628115678890","amount":{"value":"200000.00","currency":"IDR"}}"#
        );
    }

    #[test]
    fn token_response_parses() {
        let json = r#"{"responseCode":"2007300","responseMessage":"Successful","accessToken":"eyJ.abc","tokenType":"Bearer","expiresIn":900,"additionalInfo":""}"#;
        let response: AccessTokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.access_token, "eyJ.abc");
        assert_eq!(response.expires_in, 900);
        assert_eq!(response.response_code.as_deref(), Some("2007300"));
    }
}
