//! Payment method codes accepted by the checkout API.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::SettlementError;

/// A payment channel with its own fee line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    CreditCard,
    KartuKreditIndonesia,
    VirtualAccount,
    VirtualAccountBca,
    VirtualAccountBankMandiri,
    VirtualAccountBankSyariahMandiri,
    VirtualAccountBri,
    VirtualAccountBni,
    VirtualAccountDoku,
    VirtualAccountBankPermata,
    VirtualAccountBankCimb,
    VirtualAccountBankDanamon,
    VirtualAccountBtn,
    VirtualAccountBnc,
    OnlineToOfflineAlfa,
    OnlineToOfflineIndomaret,
    Qris,
    EmoneyShopeePay,
    EmoneyOvo,
    EmoneyLinkaja,
    EmoneyDoku,
    EmoneyDana,
    DirectDebitBri,
    JeniusPay,
    PeerToPeerAkulaku,
    PeerToPeerKredivo,
    PeerToPeerIndodana,
}

/// How a method is charged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeeCategory {
    Card,
    VirtualAccount,
    ConvenienceStore,
    Qris,
    EWallet,
    DirectDebit,
    DigitalBanking,
    PayLater,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 27] = [
        PaymentMethod::CreditCard,
        PaymentMethod::KartuKreditIndonesia,
        PaymentMethod::VirtualAccount,
        PaymentMethod::VirtualAccountBca,
        PaymentMethod::VirtualAccountBankMandiri,
        PaymentMethod::VirtualAccountBankSyariahMandiri,
        PaymentMethod::VirtualAccountBri,
        PaymentMethod::VirtualAccountBni,
        PaymentMethod::VirtualAccountDoku,
        PaymentMethod::VirtualAccountBankPermata,
        PaymentMethod::VirtualAccountBankCimb,
        PaymentMethod::VirtualAccountBankDanamon,
        PaymentMethod::VirtualAccountBtn,
        PaymentMethod::VirtualAccountBnc,
        PaymentMethod::OnlineToOfflineAlfa,
        PaymentMethod::OnlineToOfflineIndomaret,
        PaymentMethod::Qris,
        PaymentMethod::EmoneyShopeePay,
        PaymentMethod::EmoneyOvo,
        PaymentMethod::EmoneyLinkaja,
        PaymentMethod::EmoneyDoku,
        PaymentMethod::EmoneyDana,
        PaymentMethod::DirectDebitBri,
        PaymentMethod::JeniusPay,
        PaymentMethod::PeerToPeerAkulaku,
        PaymentMethod::PeerToPeerKredivo,
        PaymentMethod::PeerToPeerIndodana,
    ];

    /// Gateway code, as used in `payment_method_types`.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "CREDIT_CARD",
            PaymentMethod::KartuKreditIndonesia => "KARTU_KREDIT_INDONESIA",
            PaymentMethod::VirtualAccount => "VIRTUAL_ACCOUNT",
            PaymentMethod::VirtualAccountBca => "VIRTUAL_ACCOUNT_BCA",
            PaymentMethod::VirtualAccountBankMandiri => "VIRTUAL_ACCOUNT_BANK_MANDIRI",
            PaymentMethod::VirtualAccountBankSyariahMandiri => {
                "VIRTUAL_ACCOUNT_BANK_SYARIAH_MANDIRI"
            }
            PaymentMethod::VirtualAccountBri => "VIRTUAL_ACCOUNT_BRI",
            PaymentMethod::VirtualAccountBni => "VIRTUAL_ACCOUNT_BNI",
            PaymentMethod::VirtualAccountDoku => "VIRTUAL_ACCOUNT_DOKU",
            PaymentMethod::VirtualAccountBankPermata => "VIRTUAL_ACCOUNT_BANK_PERMATA",
            PaymentMethod::VirtualAccountBankCimb => "VIRTUAL_ACCOUNT_BANK_CIMB",
            PaymentMethod::VirtualAccountBankDanamon => "VIRTUAL_ACCOUNT_BANK_DANAMON",
            PaymentMethod::VirtualAccountBtn => "VIRTUAL_ACCOUNT_BTN",
            PaymentMethod::VirtualAccountBnc => "VIRTUAL_ACCOUNT_BNC",
            PaymentMethod::OnlineToOfflineAlfa => "ONLINE_TO_OFFLINE_ALFA",
            PaymentMethod::OnlineToOfflineIndomaret => "ONLINE_TO_OFFLINE_INDOMARET",
            PaymentMethod::Qris => "QRIS",
            PaymentMethod::EmoneyShopeePay => "EMONEY_SHOPEE_PAY",
            PaymentMethod::EmoneyOvo => "EMONEY_OVO",
            PaymentMethod::EmoneyLinkaja => "EMONEY_LINKAJA",
            PaymentMethod::EmoneyDoku => "EMONEY_DOKU",
            PaymentMethod::EmoneyDana => "EMONEY_DANA",
            PaymentMethod::DirectDebitBri => "DIRECT_DEBIT_BRI",
            PaymentMethod::JeniusPay => "JENIUS_PAY",
            PaymentMethod::PeerToPeerAkulaku => "PEER_TO_PEER_AKULAKU",
            PaymentMethod::PeerToPeerKredivo => "PEER_TO_PEER_KREDIVO",
            PaymentMethod::PeerToPeerIndodana => "PEER_TO_PEER_INDODANA",
        }
    }

    pub fn category(&self) -> FeeCategory {
        match self {
            PaymentMethod::CreditCard | PaymentMethod::KartuKreditIndonesia => FeeCategory::Card,
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
            | PaymentMethod::VirtualAccountBnc => FeeCategory::VirtualAccount,
            PaymentMethod::OnlineToOfflineAlfa | PaymentMethod::OnlineToOfflineIndomaret => {
                FeeCategory::ConvenienceStore
            }
            PaymentMethod::Qris => FeeCategory::Qris,
            PaymentMethod::EmoneyShopeePay
            | PaymentMethod::EmoneyOvo
            | PaymentMethod::EmoneyLinkaja
            | PaymentMethod::EmoneyDoku
            | PaymentMethod::EmoneyDana => FeeCategory::EWallet,
            PaymentMethod::DirectDebitBri => FeeCategory::DirectDebit,
            PaymentMethod::JeniusPay => FeeCategory::DigitalBanking,
            PaymentMethod::PeerToPeerAkulaku
            | PaymentMethod::PeerToPeerKredivo
            | PaymentMethod::PeerToPeerIndodana => FeeCategory::PayLater,
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = SettlementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        if code.is_empty() {
            return Err(SettlementError::EmptyPaymentMethod);
        }
        PaymentMethod::ALL
            .iter()
            .copied()
            .find(|method| method.as_str() == code)
            .ok_or_else(|| SettlementError::UnknownPaymentMethod(code.to_string()))
    }
}
