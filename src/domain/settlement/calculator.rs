//! Settlement-fee arithmetic.
//!
//! For a gross amount `g`, percentage rate `r`, flat fee `f` and tax rate `t`:
//!
//! ```text
//! fee = g * r + f
//! tax = fee * t
//! net = g - fee - tax
//! ```
//!
//! The inverse, used to quote a price that yields a desired net amount:
//!
//! ```text
//! g = (net + f * (1 + t)) / (1 - r * (1 + t))
//! ```

use serde::Serialize;

use super::errors::SettlementError;
use super::fee_schedule::FeeSchedule;
use super::payment_method::PaymentMethod;

/// Breakdown of one settlement. Fee figures are rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettlementResult {
    pub payment_method: PaymentMethod,
    pub gross_amount: f64,
    pub transaction_fee: f64,
    pub tax: f64,
    pub total_deduction: f64,
    pub net_amount: f64,
}

/// Computes fees and net amounts from a [`FeeSchedule`].
#[derive(Debug, Clone, Default)]
pub struct SettlementCalculator {
    schedule: FeeSchedule,
}

impl SettlementCalculator {
    pub fn new(schedule: FeeSchedule) -> Self {
        Self { schedule }
    }

    pub fn schedule(&self) -> &FeeSchedule {
        &self.schedule
    }

    /// Settles a payment of `amount` made with `payment_method`.
    ///
    /// # Errors
    ///
    /// - `EmptyPaymentMethod` / `UnknownPaymentMethod` - the code is not recognised
    /// - `InvalidAmount` - `amount` is zero, negative or not finite
    pub fn calculate_settlement_fee(
        &self,
        payment_method: &str,
        amount: f64,
    ) -> Result<SettlementResult, SettlementError> {
        let method: PaymentMethod = payment_method.parse()?;
        require_positive("amount", amount)?;
        Ok(self.settle(method, amount))
    }

    /// Finds the smallest whole gross amount whose settlement nets at least
    /// `desired_net_amount`, and reports the actual settlement of it.
    ///
    /// # Errors
    ///
    /// - `EmptyPaymentMethod` / `UnknownPaymentMethod` - the code is not recognised
    /// - `InvalidAmount` - `desired_net_amount` is zero, negative or not finite
    /// - `FeesExceedAmount` - percentage fee plus tax reaches 100 %
    pub fn calculate_gross_amount(
        &self,
        payment_method: &str,
        desired_net_amount: f64,
    ) -> Result<SettlementResult, SettlementError> {
        let method: PaymentMethod = payment_method.parse()?;
        require_positive("net_amount", desired_net_amount)?;

        let rate = self.schedule.rate_for(method);
        let tax_multiplier = 1.0 + self.schedule.tax_rate_for(rate);
        let divisor = 1.0 - (rate.percentage_rate / 100.0) * tax_multiplier;
        if divisor <= 0.0 {
            return Err(SettlementError::FeesExceedAmount {
                method: method.to_string(),
            });
        }

        let gross = (desired_net_amount + rate.flat_fee * tax_multiplier) / divisor;
        // Settle to cents before the ceiling so float noise never adds a rupiah
        let gross = round_to_two_decimals(gross).ceil();

        Ok(self.settle(method, gross))
    }

    fn settle(&self, method: PaymentMethod, gross: f64) -> SettlementResult {
        let rate = self.schedule.rate_for(method);
        let transaction_fee = gross * (rate.percentage_rate / 100.0) + rate.flat_fee;
        let tax = transaction_fee * self.schedule.tax_rate_for(rate);
        let total_deduction = transaction_fee + tax;
        let net_amount = gross - total_deduction;

        SettlementResult {
            payment_method: method,
            gross_amount: gross,
            transaction_fee: round_to_two_decimals(transaction_fee),
            tax: round_to_two_decimals(tax),
            total_deduction: round_to_two_decimals(total_deduction),
            net_amount: round_to_two_decimals(net_amount),
        }
    }
}

fn require_positive(field: &'static str, value: f64) -> Result<(), SettlementError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(SettlementError::InvalidAmount { field, value })
    }
}

fn round_to_two_decimals(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::settlement::fee_schedule::FeeRate;

    fn calculator() -> SettlementCalculator {
        SettlementCalculator::default()
    }

    // ══════════════════════════════════════════════════════════════
    // Settlement From Gross
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn net_amounts_for_published_rates() {
        let cases = [
            ("VIRTUAL_ACCOUNT_BCA", 4000.0, 440.0, 95560.0),
            ("VIRTUAL_ACCOUNT_BANK_MANDIRI", 4000.0, 440.0, 95560.0),
            ("ONLINE_TO_OFFLINE_ALFA", 5000.0, 550.0, 94450.0),
            ("ONLINE_TO_OFFLINE_INDOMARET", 6500.0, 715.0, 92785.0),
            ("QRIS", 700.0, 0.0, 99300.0),
            ("EMONEY_SHOPEE_PAY", 2000.0, 220.0, 97780.0),
            ("EMONEY_OVO", 2000.0, 220.0, 97780.0),
            ("EMONEY_LINKAJA", 2000.0, 220.0, 97780.0),
            ("EMONEY_DOKU", 1500.0, 165.0, 98335.0),
            ("EMONEY_DANA", 1500.0, 165.0, 98335.0),
            ("PEER_TO_PEER_AKULAKU", 1500.0, 165.0, 98335.0),
            ("PEER_TO_PEER_KREDIVO", 2300.0, 253.0, 97447.0),
            ("PEER_TO_PEER_INDODANA", 2300.0, 253.0, 97447.0),
        ];

        for (method, fee, tax, net) in cases {
            let result = calculator()
                .calculate_settlement_fee(method, 100_000.0)
                .unwrap();
            assert_eq!(result.transaction_fee, fee, "{} fee", method);
            assert_eq!(result.tax, tax, "{} tax", method);
            assert_eq!(result.net_amount, net, "{} net", method);
            assert_eq!(result.total_deduction, fee + tax, "{} deduction", method);
            assert_eq!(result.gross_amount, 100_000.0);
        }
    }

    #[test]
    fn cards_charge_percentage_plus_flat_fee() {
        let result = calculator()
            .calculate_settlement_fee("CREDIT_CARD", 100_000.0)
            .unwrap();

        assert_eq!(result.transaction_fee, 4800.0);
        assert_eq!(result.tax, 528.0);
        assert_eq!(result.net_amount, 94672.0);
    }

    #[test]
    fn large_amounts_stay_exact() {
        let result = calculator()
            .calculate_settlement_fee("EMONEY_SHOPEE_PAY", 10_000_000.0)
            .unwrap();

        assert_eq!(result.transaction_fee, 200_000.0);
        assert_eq!(result.tax, 22_000.0);
        assert_eq!(result.net_amount, 9_778_000.0);
    }

    #[test]
    fn fees_are_rounded_to_cents() {
        let result = calculator()
            .calculate_settlement_fee("EMONEY_OVO", 12_345.0)
            .unwrap();

        // 246.9 fee, 27.159 tax
        assert_eq!(result.transaction_fee, 246.9);
        assert_eq!(result.tax, 27.16);
        assert_eq!(result.net_amount, 12_070.94);
    }

    #[test]
    fn rejects_empty_method() {
        let result = calculator().calculate_settlement_fee("", 100_000.0);
        assert_eq!(result, Err(SettlementError::EmptyPaymentMethod));
    }

    #[test]
    fn rejects_unknown_method() {
        let result = calculator().calculate_settlement_fee("UNKNOWN_PAYMENT_METHOD", 100_000.0);
        assert!(matches!(
            result,
            Err(SettlementError::UnknownPaymentMethod(ref code)) if code == "UNKNOWN_PAYMENT_METHOD"
        ));
    }

    #[test]
    fn rejects_non_positive_amounts() {
        for amount in [0.0, -100_000.0, f64::NAN, f64::INFINITY] {
            let result = calculator().calculate_settlement_fee("VIRTUAL_ACCOUNT_BCA", amount);
            assert!(
                matches!(result, Err(SettlementError::InvalidAmount { field: "amount", .. })),
                "amount {}",
                amount
            );
        }
    }

    // ══════════════════════════════════════════════════════════════
    // Gross From Net
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn gross_amount_inverts_published_rates() {
        let cases = [
            ("VIRTUAL_ACCOUNT_BNI", 95560.0),
            ("ONLINE_TO_OFFLINE_ALFA", 94450.0),
            ("ONLINE_TO_OFFLINE_INDOMARET", 92785.0),
            ("QRIS", 99300.0),
            ("EMONEY_SHOPEE_PAY", 97780.0),
            ("EMONEY_DANA", 98335.0),
            ("PEER_TO_PEER_KREDIVO", 97447.0),
            ("CREDIT_CARD", 94672.0),
        ];

        for (method, net) in cases {
            let result = calculator().calculate_gross_amount(method, net).unwrap();
            assert_eq!(result.gross_amount, 100_000.0, "{} gross", method);
            assert_eq!(result.net_amount, net, "{} net", method);
        }
    }

    #[test]
    fn gross_amount_rounds_up_to_whole_rupiah() {
        let result = calculator()
            .calculate_gross_amount("EMONEY_OVO", 50_000.0)
            .unwrap();

        assert_eq!(result.gross_amount, 51_136.0);
        assert!(result.net_amount >= 50_000.0);
        assert_eq!(result.gross_amount.fract(), 0.0);
    }

    #[test]
    fn gross_amount_never_nets_less_than_requested() {
        let calculator = calculator();
        for method in PaymentMethod::ALL {
            for net in [1.0, 999.0, 12_345.0, 77_777.0, 1_000_001.0] {
                let result = calculator
                    .calculate_gross_amount(method.as_str(), net)
                    .unwrap();
                assert!(
                    result.net_amount >= net,
                    "{} net {} gave {}",
                    method,
                    net,
                    result.net_amount
                );
            }
        }
    }

    #[test]
    fn gross_amount_rejects_non_positive_net() {
        let result = calculator().calculate_gross_amount("QRIS", 0.0);
        assert!(matches!(
            result,
            Err(SettlementError::InvalidAmount { field: "net_amount", .. })
        ));
    }

    #[test]
    fn gross_amount_rejects_fees_over_one_hundred_percent() {
        let schedule = FeeSchedule {
            tax_percent: 11.0,
            ovo: FeeRate::percentage(95.0),
            ..Default::default()
        };
        let calculator = SettlementCalculator::new(schedule);

        let result = calculator.calculate_gross_amount("EMONEY_OVO", 1000.0);

        assert_eq!(
            result,
            Err(SettlementError::FeesExceedAmount {
                method: "EMONEY_OVO".to_string()
            })
        );
    }

    #[test]
    fn result_serializes_with_gateway_code() {
        let result = calculator()
            .calculate_settlement_fee("QRIS", 100_000.0)
            .unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["payment_method"], "QRIS");
        assert_eq!(json["net_amount"], 99300.0);
    }
}
