//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `HttpTransport` - Sends a fully signed request and returns the raw response
//! - `PaymentGateway` - Business operations against the payment gateway

mod http_transport;
mod payment_gateway;

pub use http_transport::{HttpTransport, TransportError, TransportRequest, TransportResponse};
pub use payment_gateway::{
    AccessToken, Balance, BankAccountInquiry, BankAccountInquiryRequest, CreatePaymentRequest,
    CreateSubAccountRequest, GatewayError, GatewayErrorCode, PaymentCheckout, PaymentGateway,
    SubAccount,
};
