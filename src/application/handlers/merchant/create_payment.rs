//! CreatePaymentHandler - Command handler for hosted checkout payments.

use std::sync::Arc;

use crate::domain::settlement::PaymentMethod;
use crate::ports::{
    CreatePaymentRequest, GatewayError, GatewayErrorCode, PaymentCheckout, PaymentGateway,
};

/// Command to create a checkout payment routed to a sub-account.
#[derive(Debug, Clone)]
pub struct CreatePaymentCommand {
    /// Amount in rupiah.
    pub amount: i64,
    pub customer_name: String,
    pub customer_email: String,
    pub sac_id: String,
    pub payment_due_minutes: Option<i64>,
    pub invoice_number: Option<String>,
    pub payment_method_types: Vec<PaymentMethod>,
}

pub type CreatePaymentResult = PaymentCheckout;

/// Handler for checkout creation.
pub struct CreatePaymentHandler {
    gateway: Arc<dyn PaymentGateway>,
}

impl CreatePaymentHandler {
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }

    pub async fn handle(&self, cmd: CreatePaymentCommand) -> Result<CreatePaymentResult, GatewayError> {
        if cmd.amount <= 0 {
            return Err(GatewayError::new(
                GatewayErrorCode::InvalidRequest,
                format!("amount must be positive, got {}", cmd.amount),
            ));
        }
        if let Some(minutes) = cmd.payment_due_minutes {
            if minutes <= 0 {
                return Err(GatewayError::new(
                    GatewayErrorCode::InvalidRequest,
                    format!("payment_due_minutes must be positive, got {}", minutes),
                ));
            }
        }

        let checkout = self
            .gateway
            .create_payment(CreatePaymentRequest {
                amount: cmd.amount,
                customer_name: cmd.customer_name,
                customer_email: cmd.customer_email,
                sac_id: cmd.sac_id,
                payment_due_minutes: cmd.payment_due_minutes,
                invoice_number: cmd.invoice_number,
                payment_method_types: cmd.payment_method_types,
            })
            .await?;

        tracing::info!(
            invoice_number = %checkout.invoice_number,
            amount = checkout.amount,
            "Checkout payment created"
        );

        Ok(checkout)
    }
}
