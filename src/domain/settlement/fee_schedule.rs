//! Published transaction fees per payment channel.
//!
//! Percentages are expressed in percent (`2.8` means 2.8 %), flat fees in
//! rupiah. Every channel line can be overridden from configuration; omitted
//! lines keep the defaults below. An overridden line is replaced whole, with
//! `taxable` defaulting to true.

use serde::{Deserialize, Serialize};

use super::errors::SettlementError;
use super::payment_method::PaymentMethod;

/// Fee charged for one channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeRate {
    #[serde(default)]
    pub percentage_rate: f64,
    #[serde(default)]
    pub flat_fee: f64,
    /// Whether VAT is charged on top of the fee.
    #[serde(default = "default_taxable")]
    pub taxable: bool,
}

fn default_taxable() -> bool {
    true
}

impl FeeRate {
    pub const fn percentage(rate: f64) -> Self {
        Self {
            percentage_rate: rate,
            flat_fee: 0.0,
            taxable: true,
        }
    }

    pub const fn flat(fee: f64) -> Self {
        Self {
            percentage_rate: 0.0,
            flat_fee: fee,
            taxable: true,
        }
    }

    pub const fn untaxed(self) -> Self {
        Self {
            taxable: false,
            ..self
        }
    }
}

/// Fee table for every supported channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeSchedule {
    /// VAT on fees, in percent.
    pub tax_percent: f64,
    pub cards: FeeRate,
    pub virtual_account: FeeRate,
    pub alfamart: FeeRate,
    pub indomaret: FeeRate,
    pub qris: FeeRate,
    pub shopeepay: FeeRate,
    pub ovo: FeeRate,
    pub linkaja: FeeRate,
    pub doku_wallet: FeeRate,
    pub dana: FeeRate,
    pub bri_direct_debit: FeeRate,
    pub jenius_pay: FeeRate,
    pub akulaku: FeeRate,
    pub kredivo: FeeRate,
    pub indodana: FeeRate,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            tax_percent: 11.0,
            cards: FeeRate {
                percentage_rate: 2.8,
                flat_fee: 2000.0,
                taxable: true,
            },
            virtual_account: FeeRate::flat(4000.0),
            alfamart: FeeRate::flat(5000.0),
            indomaret: FeeRate::flat(6500.0),
            qris: FeeRate::flat(700.0).untaxed(),
            shopeepay: FeeRate::percentage(2.0),
            ovo: FeeRate::percentage(2.0),
            linkaja: FeeRate::percentage(2.0),
            doku_wallet: FeeRate::percentage(1.5),
            dana: FeeRate::percentage(1.5),
            bri_direct_debit: FeeRate::percentage(1.5),
            jenius_pay: FeeRate::percentage(1.5),
            akulaku: FeeRate::percentage(1.5),
            kredivo: FeeRate::percentage(2.3),
            indodana: FeeRate::percentage(2.3),
        }
    }
}

impl FeeSchedule {
    /// Fee line applied to `method`.
    pub fn rate_for(&self, method: PaymentMethod) -> &FeeRate {
        match method {
            PaymentMethod::CreditCard | PaymentMethod::KartuKreditIndonesia => &self.cards,
            PaymentMethod::VirtualAccount
            | PaymentMethod::VirtualAccountBca
            | PaymentMethod::VirtualAccountBankMandiri
            | PaymentMethod::VirtualAccountBankSyariahMandiri
            | PaymentMethod::VirtualAccountBri
            | PaymentMethod::VirtualAccountBni
            | PaymentMethod::VirtualAccountDoku
            | PaymentMethod::VirtualAccountBankPermata
            | PaymentMethod::VirtualAccountBankCimb
            | PaymentMethod::VirtualAccountBankDanamon
            | PaymentMethod::VirtualAccountBtn
            | PaymentMethod::VirtualAccountBnc => &self.virtual_account,
            PaymentMethod::OnlineToOfflineAlfa => &self.alfamart,
            PaymentMethod::OnlineToOfflineIndomaret => &self.indomaret,
            PaymentMethod::Qris => &self.qris,
            PaymentMethod::EmoneyShopeePay => &self.shopeepay,
            PaymentMethod::EmoneyOvo => &self.ovo,
            PaymentMethod::EmoneyLinkaja => &self.linkaja,
            PaymentMethod::EmoneyDoku => &self.doku_wallet,
            PaymentMethod::EmoneyDana => &self.dana,
            PaymentMethod::DirectDebitBri => &self.bri_direct_debit,
            PaymentMethod::JeniusPay => &self.jenius_pay,
            PaymentMethod::PeerToPeerAkulaku => &self.akulaku,
            PaymentMethod::PeerToPeerKredivo => &self.kredivo,
            PaymentMethod::PeerToPeerIndodana => &self.indodana,
        }
    }

    /// Tax rate as a fraction, zero when `rate` is untaxed.
    pub fn tax_rate_for(&self, rate: &FeeRate) -> f64 {
        if rate.taxable {
            self.tax_percent / 100.0
        } else {
            0.0
        }
    }

    /// Checks that every line is non-negative and below 100 %.
    pub fn validate(&self) -> Result<(), SettlementError> {
        if !(0.0..100.0).contains(&self.tax_percent) {
            return Err(SettlementError::InvalidFeeSchedule(format!(
                "tax_percent must be in [0, 100), got {}",
                self.tax_percent
            )));
        }
        for method in PaymentMethod::ALL {
            let rate = self.rate_for(method);
            if !(0.0..100.0).contains(&rate.percentage_rate) {
                return Err(SettlementError::InvalidFeeSchedule(format!(
                    "{} percentage_rate must be in [0, 100), got {}",
                    method, rate.percentage_rate
                )));
            }
            if rate.flat_fee < 0.0 || !rate.flat_fee.is_finite() {
                return Err(SettlementError::InvalidFeeSchedule(format!(
                    "{} flat_fee must be non-negative, got {}",
                    method, rate.flat_fee
                )));
            }
        }
        Ok(())
    }
}
