//! GetBalanceHandler - Query handler for sub-account balances.

use std::sync::Arc;

use crate::ports::{Balance, GatewayError, PaymentGateway};

#[derive(Debug, Clone)]
pub struct GetBalanceQuery {
    pub sac_id: String,
}

pub type GetBalanceResult = Balance;

/// Handler for balance queries.
pub struct GetBalanceHandler {
    gateway: Arc<dyn PaymentGateway>,
}

impl GetBalanceHandler {
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }

    pub async fn handle(&self, query: GetBalanceQuery) -> Result<GetBalanceResult, GatewayError> {
        self.gateway.get_balance(query.sac_id.trim()).await
    }
}
