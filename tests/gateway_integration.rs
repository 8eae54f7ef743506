//! Integration tests for the DOKU gateway adapter.
//!
//! The adapter runs against `MockTransport`, so these tests see exactly what
//! would go over the wire:
//! 1. URLs, methods and signed headers per endpoint
//! 2. Signatures that recompute from the recorded request alone
//! 3. Error bodies and transport failures mapped to gateway errors

use std::sync::Arc;
use std::time::Duration;

use http::Method;
use secrecy::SecretString;

use doku_gateway::adapters::doku::{DokuGatewayAdapter, DokuGatewayConfig};
use doku_gateway::adapters::transport::MockTransport;
use doku_gateway::domain::settlement::PaymentMethod;
use doku_gateway::domain::signing::{
    sign, CanonicalString, Credential, KeyMaterial, RequestSigner, SignerCredentials,
    SigningContext, SigningScheme,
};
use doku_gateway::ports::{
    BankAccountInquiryRequest, CreatePaymentRequest, CreateSubAccountRequest, GatewayErrorCode,
    PaymentGateway, TransportError, TransportRequest,
};

const RSA_PKCS8: &str = include_str!("fixtures/rsa_pkcs8.pem");

const CLIENT_ID: &str = "MCH-0001-10791114622547";
const SECRET: &str = "SK-hCJ42G28TA0MKG9LE2E_1";
const BASE_URL: &str = "https://api-sandbox.doku.com";

// =============================================================================
// Test Infrastructure
// =============================================================================

fn secret() -> SecretString {
    SecretString::new(SECRET.to_string())
}

fn gateway(transport: &MockTransport) -> DokuGatewayAdapter {
    let key = KeyMaterial::from_pem(RSA_PKCS8).unwrap();
    let signer = RequestSigner::new(
        SignerCredentials::new(CLIENT_ID, secret())
            .with_private_key(key)
            .with_partner_id("PARTNER-1"),
    );
    DokuGatewayAdapter::new(
        DokuGatewayConfig::new()
            .with_base_url(format!("{}/", BASE_URL))
            .with_timeout(Duration::from_secs(10)),
        Arc::new(signer),
        Arc::new(transport.clone()),
    )
}

fn path_of(request: &TransportRequest) -> &str {
    request.url.strip_prefix(BASE_URL).unwrap()
}

/// Recomputes the core API signature from nothing but the recorded request.
fn recompute_core_signature(request: &TransportRequest) -> String {
    let shared = secret();
    let context = SigningContext {
        http_method: request.method.clone(),
        request_target: path_of(request),
        timestamp: request.header("Request-Timestamp").unwrap(),
        request_id: request.header("Request-Id").unwrap(),
        body: &request.body,
        client_id: request.header("Client-Id").unwrap(),
        access_token: None,
        credential: Credential::SharedSecret(&shared),
    };
    let canonical = CanonicalString::build(SigningScheme::CoreApiHmac, &context).unwrap();
    sign(
        SigningScheme::CoreApiHmac,
        &canonical,
        Credential::SharedSecret(&shared),
    )
    .unwrap()
    .into_string()
}

fn payment_request() -> CreatePaymentRequest {
    CreatePaymentRequest {
        amount: 150000,
        customer_name: "Budi".to_string(),
        customer_email: "budi@example.com".to_string(),
        sac_id: "SAC-8760-1762081713175".to_string(),
        payment_due_minutes: None,
        invoice_number: Some("INV-20240301-0001".to_string()),
        payment_method_types: vec![PaymentMethod::Qris, PaymentMethod::VirtualAccountBca],
    }
}

// =============================================================================
// Core API
// =============================================================================

#[tokio::test]
async fn create_payment_sends_signed_json_post() {
    let transport = MockTransport::new();
    transport.push_json(
        200,
        r#"{"response":{"order":{"invoice_number":"INV-20240301-0001","amount":150000,"session_id":"S-1"},"payment":{"token_id":"T-1","url":"https://sandbox.doku.com/checkout/T-1","expired_date":"20240301120000"},"headers":{"request_id":"R-1"}}}"#,
    );

    let checkout = gateway(&transport)
        .create_payment(payment_request())
        .await
        .unwrap();

    assert_eq!(checkout.invoice_number, "INV-20240301-0001");
    assert_eq!(
        checkout.payment_url.as_deref(),
        Some("https://sandbox.doku.com/checkout/T-1")
    );

    let sent = transport.last_request().unwrap();
    assert_eq!(sent.method, Method::POST);
    assert_eq!(sent.url, "https://api-sandbox.doku.com/checkout/v1/payment");
    assert_eq!(sent.timeout, Duration::from_secs(10));
    assert_eq!(sent.header("Content-Type"), Some("application/json"));
    assert_eq!(sent.header("Client-Id"), Some(CLIENT_ID));
    assert_eq!(
        sent.header("Signature"),
        Some(recompute_core_signature(&sent).as_str())
    );

    let body: serde_json::Value = serde_json::from_slice(&sent.body).unwrap();
    assert_eq!(body["order"]["amount"], 150000);
    assert_eq!(body["payment"]["payment_due_date"], 60);
    assert_eq!(
        body["payment"]["payment_method_types"],
        serde_json::json!(["QRIS", "VIRTUAL_ACCOUNT_BCA"])
    );
    assert_eq!(body["additional_info"]["account"]["id"], "SAC-8760-1762081713175");
}

#[tokio::test]
async fn balance_get_signs_without_body() {
    let transport = MockTransport::new();
    transport.push_json(200, r#"{"balance":{"pending":"0","available":"150000"}}"#);

    let balance = gateway(&transport)
        .get_balance("SAC-8760-1762081713175")
        .await
        .unwrap();

    assert_eq!(balance.available, "150000");
    let sent = transport.last_request().unwrap();
    assert_eq!(sent.method, Method::GET);
    assert_eq!(
        path_of(&sent),
        "/sac-merchant/v1/balances/SAC-8760-1762081713175"
    );
    assert!(sent.body.is_empty());
    assert_eq!(
        sent.header("Signature"),
        Some(recompute_core_signature(&sent).as_str())
    );
}

#[tokio::test]
async fn each_call_gets_a_fresh_request_id() {
    let transport = MockTransport::new();
    transport.push_json(200, r#"{"balance":{"pending":"0","available":"0"}}"#);
    transport.push_json(200, r#"{"balance":{"pending":"0","available":"0"}}"#);
    let gateway = gateway(&transport);

    gateway.get_balance("SAC-1").await.unwrap();
    gateway.get_balance("SAC-1").await.unwrap();

    let requests = transport.requests();
    assert_ne!(
        requests[0].header("Request-Id"),
        requests[1].header("Request-Id")
    );
}

#[tokio::test]
async fn sub_account_request_uses_standard_type() {
    let transport = MockTransport::new();
    transport.push_json(
        200,
        r#"{"account":{"id":"SAC-1","name":"Toko Budi","type":"STANDARD","status":"PENDING"}}"#,
    );

    let account = gateway(&transport)
        .create_sub_account(CreateSubAccountRequest {
            email: "budi@example.com".to_string(),
            name: "Toko Budi".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(account.id, "SAC-1");
    let sent = transport.last_request().unwrap();
    assert_eq!(path_of(&sent), "/sac-merchant/v1/accounts");
    let body: serde_json::Value = serde_json::from_slice(&sent.body).unwrap();
    assert_eq!(body["account"]["type"], "STANDARD");
}

// =============================================================================
// SNAP
// =============================================================================

#[tokio::test]
async fn token_then_inquiry_carries_bearer_and_sha512_signature() {
    let transport = MockTransport::new();
    transport.push_json(
        200,
        r#"{"responseCode":"2007300","accessToken":"snap-token-1","tokenType":"Bearer","expiresIn":900}"#,
    );
    transport.push_json(
        200,
        r#"{"responseCode":"2004200","responseMessage":"Successful","partnerReferenceNo":"ref-1","customerNumber":"628115678890","customerName":"Budi"}"#,
    );
    let gateway = gateway(&transport);

    let token = gateway.issue_access_token().await.unwrap();
    let inquiry = gateway
        .bank_account_inquiry(
            &token,
            BankAccountInquiryRequest {
                partner_reference_no: "ref-1".to_string(),
                customer_number: "628115678890".to_string(),
                amount_value: "200000.00".to_string(),
                currency: "IDR".to_string(),
            },
        )
        .await
        .unwrap();

    assert_eq!(inquiry.customer_name.as_deref(), Some("Budi"));

    let requests = transport.requests();
    let token_request = &requests[0];
    assert_eq!(path_of(token_request), "/authorization/v1/access-token/b2b");
    assert_eq!(token_request.header("X-Client-Key"), Some(CLIENT_ID));
    assert!(token_request.header("X-Signature").is_some());

    let inquiry_request = &requests[1];
    assert_eq!(
        path_of(inquiry_request),
        "/snap/v1.1/emoney/bank-account-inquiry"
    );
    assert_eq!(
        inquiry_request.header("Authorization"),
        Some("Bearer snap-token-1")
    );
    assert_eq!(inquiry_request.header("X-PARTNER-ID"), Some("PARTNER-1"));
    assert_eq!(inquiry_request.header("CHANNEL-ID"), Some("H2H"));
    assert!(inquiry_request.header("X-EXTERNAL-ID").is_some());

    let shared = secret();
    let context = SigningContext {
        http_method: Method::POST,
        request_target: path_of(inquiry_request),
        timestamp: inquiry_request.header("X-TIMESTAMP").unwrap(),
        request_id: inquiry_request.header("X-EXTERNAL-ID").unwrap(),
        body: &inquiry_request.body,
        client_id: CLIENT_ID,
        access_token: Some("snap-token-1"),
        credential: Credential::SharedSecret(&shared),
    };
    let canonical = CanonicalString::build(SigningScheme::TransactionalHmac512, &context).unwrap();
    let expected = sign(
        SigningScheme::TransactionalHmac512,
        &canonical,
        Credential::SharedSecret(&shared),
    )
    .unwrap();
    assert_eq!(inquiry_request.header("X-SIGNATURE"), Some(expected.as_str()));
}

#[tokio::test]
async fn token_response_without_token_is_invalid_response() {
    let transport = MockTransport::new();
    transport.push_json(200, r#"{"responseCode":"4017300","accessToken":""}"#);

    let err = gateway(&transport).issue_access_token().await.unwrap_err();

    assert_eq!(err.code, GatewayErrorCode::InvalidResponse);
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn message_list_error_body_is_invalid_request() {
    let transport = MockTransport::new();
    transport.push_json(400, r#"{"message":["Invalid email","Name is required"]}"#);

    let err = gateway(&transport)
        .create_sub_account(CreateSubAccountRequest {
            email: "not-an-email".to_string(),
            name: "Toko".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.code, GatewayErrorCode::InvalidRequest);
    assert_eq!(err.status, Some(400));
    assert!(err.message.contains("Invalid email; Name is required"));
    assert!(!err.retryable);
}

#[tokio::test]
async fn server_errors_are_retryable() {
    let transport = MockTransport::new();
    transport.push_json(503, r#"{"error":{"message":"Service unavailable"}}"#);

    let err = gateway(&transport).get_balance("SAC-1").await.unwrap_err();

    assert_eq!(err.code, GatewayErrorCode::GatewayUnavailable);
    assert!(err.retryable);
    assert!(err.message.contains("Service unavailable"));
}

#[tokio::test]
async fn transport_timeout_is_retryable_network_error() {
    let transport = MockTransport::new();
    transport.push_error(TransportError::Timeout(Duration::from_secs(10)));

    let err = gateway(&transport).get_balance("SAC-1").await.unwrap_err();

    assert_eq!(err.code, GatewayErrorCode::NetworkError);
    assert!(err.retryable);
    assert_eq!(err.status, None);
}

#[tokio::test]
async fn invalid_amount_never_reaches_transport() {
    let transport = MockTransport::new();
    let request = CreatePaymentRequest {
        amount: 0,
        ..payment_request()
    };

    let err = gateway(&transport).create_payment(request).await.unwrap_err();

    assert_eq!(err.code, GatewayErrorCode::InvalidRequest);
    assert_eq!(transport.request_count(), 0);
}
