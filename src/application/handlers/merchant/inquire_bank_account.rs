//! InquireBankAccountHandler - Command handler for SNAP account inquiries.
//!
//! Issues a fresh access token and spends it on a single inquiry.

use std::sync::Arc;

use uuid::Uuid;

use crate::ports::{BankAccountInquiry, BankAccountInquiryRequest, GatewayError, PaymentGateway};

/// Command to look up the holder of an account.
#[derive(Debug, Clone)]
pub struct InquireBankAccountCommand {
    pub customer_number: String,
    /// Decimal string with two fraction digits.
    pub amount_value: String,
    /// `IDR` when absent.
    pub currency: Option<String>,
    /// Generated when absent.
    pub partner_reference_no: Option<String>,
}

pub type InquireBankAccountResult = BankAccountInquiry;

/// Handler for account inquiries.
pub struct InquireBankAccountHandler {
    gateway: Arc<dyn PaymentGateway>,
}

impl InquireBankAccountHandler {
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }

    pub async fn handle(
        &self,
        cmd: InquireBankAccountCommand,
    ) -> Result<InquireBankAccountResult, GatewayError> {
        // 1. Token
        let token = self.gateway.issue_access_token().await?;

        // 2. Inquiry
        let partner_reference_no = cmd
            .partner_reference_no
            .unwrap_or_else(|| Uuid::new_v4().simple().to_string());
        let inquiry = self
            .gateway
            .bank_account_inquiry(
                &token,
                BankAccountInquiryRequest {
                    partner_reference_no,
                    customer_number: cmd.customer_number,
                    amount_value: cmd.amount_value,
                    currency: cmd.currency.unwrap_or_else(|| "IDR".to_string()),
                },
            )
            .await?;

        tracing::info!(
            response_code = %inquiry.response_code,
            partner_reference_no = ?inquiry.partner_reference_no,
            "Bank account inquiry completed"
        );

        Ok(inquiry)
    }
}
