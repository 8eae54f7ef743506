//! CalculateGrossAmountHandler - Query handler for pricing a desired net amount.

use std::sync::Arc;

use crate::domain::settlement::{SettlementCalculator, SettlementError, SettlementResult};

/// Query for the gross amount that settles to at least `net_amount`.
#[derive(Debug, Clone)]
pub struct CalculateGrossAmountQuery {
    pub payment_method: String,
    /// Amount the merchant wants to receive, in rupiah.
    pub net_amount: f64,
}

/// Settlement of the quoted gross amount; `net_amount` is what will actually
/// be received and is never below the requested amount.
pub type CalculateGrossAmountResult = SettlementResult;

/// Handler for price quotes.
pub struct CalculateGrossAmountHandler {
    calculator: Arc<SettlementCalculator>,
}

impl CalculateGrossAmountHandler {
    pub fn new(calculator: Arc<SettlementCalculator>) -> Self {
        Self { calculator }
    }

    pub fn handle(
        &self,
        query: CalculateGrossAmountQuery,
    ) -> Result<CalculateGrossAmountResult, SettlementError> {
        let result = self
            .calculator
            .calculate_gross_amount(&query.payment_method, query.net_amount)?;

        tracing::debug!(
            payment_method = %result.payment_method,
            requested_net = query.net_amount,
            gross_amount = result.gross_amount,
            "Gross amount quoted"
        );

        Ok(result)
    }
}
