//! CalculateSettlementFeeHandler - Query handler for the fee breakdown of a payment.

use std::sync::Arc;

use crate::domain::settlement::{SettlementCalculator, SettlementError, SettlementResult};

/// Query for the settlement of a payment.
#[derive(Debug, Clone)]
pub struct CalculateSettlementFeeQuery {
    /// Gateway payment-method code, e.g. `QRIS`.
    pub payment_method: String,
    /// Gross amount paid by the customer, in rupiah.
    pub amount: f64,
}

pub type CalculateSettlementFeeResult = SettlementResult;

/// Handler for fee breakdowns.
pub struct CalculateSettlementFeeHandler {
    calculator: Arc<SettlementCalculator>,
}

impl CalculateSettlementFeeHandler {
    pub fn new(calculator: Arc<SettlementCalculator>) -> Self {
        Self { calculator }
    }

    pub fn handle(
        &self,
        query: CalculateSettlementFeeQuery,
    ) -> Result<CalculateSettlementFeeResult, SettlementError> {
        let result = self
            .calculator
            .calculate_settlement_fee(&query.payment_method, query.amount)?;

        tracing::debug!(
            payment_method = %result.payment_method,
            gross_amount = result.gross_amount,
            net_amount = result.net_amount,
            "Settlement fee calculated"
        );

        Ok(result)
    }
}
