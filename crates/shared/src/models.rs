use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lamports in one SOL
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// One token account owned by a scanned wallet, as reported by the RPC provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenAccountSnapshot {
    pub address: String,
    pub mint: String,
    /// UI token balance. `None` when the provider did not report one.
    pub balance_units: Option<Decimal>,
    /// Lamports held by the account (its rent deposit). `None` when missing
    /// or not representable as an unsigned integer.
    pub lamports: Option<u64>,
}

impl TokenAccountSnapshot {
    /// Snapshot with placeholder address and mint, used where only the
    /// balance and lamports matter
    pub fn new(balance_units: Option<Decimal>, lamports: Option<u64>) -> Self {
        Self {
            address: String::new(),
            mint: String::new(),
            balance_units,
            lamports,
        }
    }
}

/// Reclaimable rent found in a set of token accounts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentReport {
    pub reclaimable_lamports: u64,
    pub junk_account_count: u64,
}

impl RentReport {
    pub fn reclaimable_sol(&self) -> Decimal {
        Decimal::from(self.reclaimable_lamports) / Decimal::from(LAMPORTS_PER_SOL)
    }

    pub fn has_reclaimable_rent(&self) -> bool {
        self.reclaimable_lamports > 0
    }
}

/// Display metadata for a token mint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub image: String,
}

impl TokenMetadata {
    pub const UNKNOWN_NAME: &'static str = "Unknown Project";
    pub const UNKNOWN_SYMBOL: &'static str = "TOKEN";

    /// Placeholder metadata shown when a lookup fails
    pub fn unknown(default_image: &str) -> Self {
        Self {
            name: Self::UNKNOWN_NAME.to_string(),
            symbol: Self::UNKNOWN_SYMBOL.to_string(),
            image: default_image.to_string(),
        }
    }
}
