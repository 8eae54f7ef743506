//! Request and response types for settlement endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::settlement::SettlementResult;

/// Query string of `GET /settlement/fee`.
#[derive(Debug, Clone, Deserialize)]
pub struct SettlementFeeParams {
    pub payment_method: String,
    pub amount: f64,
}

/// Query string of `GET /settlement/gross`.
#[derive(Debug, Clone, Deserialize)]
pub struct GrossAmountParams {
    pub payment_method: String,
    pub net_amount: f64,
}

/// Settlement breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementResponse {
    pub payment_method: String,
    pub gross_amount: f64,
    pub transaction_fee: f64,
    pub tax: f64,
    pub total_deduction: f64,
    pub net_amount: f64,
}

impl From<SettlementResult> for SettlementResponse {
    fn from(result: SettlementResult) -> Self {
        Self {
            payment_method: result.payment_method.to_string(),
            gross_amount: result.gross_amount,
            transaction_fee: result.transaction_fee,
            tax: result.tax,
            total_deduction: result.total_deduction,
            net_amount: result.net_amount,
        }
    }
}
