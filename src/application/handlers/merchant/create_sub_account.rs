//! CreateSubAccountHandler - Command handler for registering merchant sub-accounts.

use std::sync::Arc;

use crate::ports::{CreateSubAccountRequest, GatewayError, PaymentGateway, SubAccount};

/// Command to create a sub-account.
#[derive(Debug, Clone)]
pub struct CreateSubAccountCommand {
    pub email: String,
    pub name: String,
}

pub type CreateSubAccountResult = SubAccount;

/// Handler for sub-account registration.
pub struct CreateSubAccountHandler {
    gateway: Arc<dyn PaymentGateway>,
}

impl CreateSubAccountHandler {
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }

    pub async fn handle(
        &self,
        cmd: CreateSubAccountCommand,
    ) -> Result<CreateSubAccountResult, GatewayError> {
        let account = self
            .gateway
            .create_sub_account(CreateSubAccountRequest {
                email: cmd.email.trim().to_string(),
                name: cmd.name.trim().to_string(),
            })
            .await?;

        tracing::info!(sac_id = %account.id, status = %account.status, "Sub-account created");

        Ok(account)
    }
}
