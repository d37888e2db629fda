//! Classification of token accounts into reclaimable ("junk") and active.
//!
//! A token account is junk when its token balance is exactly zero while it
//! still holds a rent deposit. Closing it returns the deposit to the owner.

use rust_decimal::Decimal;
use shared::{RentReport, TokenAccountSnapshot};

/// Lamports recoverable by closing this account, or `None` if it is not junk.
///
/// Accounts with an unknown balance or without a lamport figure are never junk.
pub fn reclaimable_lamports(snapshot: &TokenAccountSnapshot) -> Option<u64> {
    let balance = snapshot.balance_units?;
    let lamports = snapshot.lamports?;

    (balance == Decimal::ZERO && lamports > 0).then_some(lamports)
}

/// Total the reclaimable rent over a wallet's token accounts
pub fn scan_rent<'a, I>(snapshots: I) -> RentReport
where
    I: IntoIterator<Item = &'a TokenAccountSnapshot>,
{
    snapshots
        .into_iter()
        .filter_map(reclaimable_lamports)
        .fold(RentReport::default(), |report, lamports| RentReport {
            reclaimable_lamports: report.reclaimable_lamports.saturating_add(lamports),
            junk_account_count: report.junk_account_count + 1,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(balance: i64, lamports: u64) -> TokenAccountSnapshot {
        TokenAccountSnapshot::new(Some(Decimal::from(balance)), Some(lamports))
    }

    #[test]
    fn test_empty_input() {
        let accounts: Vec<TokenAccountSnapshot> = Vec::new();
        let report = scan_rent(&accounts);
        assert_eq!(report, RentReport { reclaimable_lamports: 0, junk_account_count: 0 });
    }

    #[test]
    fn test_mixed_accounts() {
        let accounts = vec![snapshot(0, 1000), snapshot(5, 2000), snapshot(0, 300)];
        let report = scan_rent(&accounts);
        assert_eq!(report.reclaimable_lamports, 1300);
        assert_eq!(report.junk_account_count, 2);
    }

    #[test]
    fn test_all_accounts_funded() {
        let accounts = vec![snapshot(1, 2_039_280), snapshot(42, 2_039_280)];
        assert_eq!(scan_rent(&accounts), RentReport::default());
    }

    #[test]
    fn test_zero_balance_without_rent_is_not_junk() {
        let accounts = vec![snapshot(0, 0)];
        assert_eq!(scan_rent(&accounts), RentReport::default());
    }

    #[test]
    fn test_unknown_balance_is_not_junk() {
        let accounts = vec![TokenAccountSnapshot::new(None, Some(2_039_280))];
        assert_eq!(reclaimable_lamports(&accounts[0]), None);
        assert_eq!(scan_rent(&accounts), RentReport::default());
    }

    #[test]
    fn test_missing_lamports_are_excluded() {
        let accounts = vec![
            TokenAccountSnapshot::new(Some(Decimal::ZERO), None),
            snapshot(0, 500),
        ];
        let report = scan_rent(&accounts);
        assert_eq!(report.reclaimable_lamports, 500);
        assert_eq!(report.junk_account_count, 1);
    }

    #[test]
    fn test_fractional_dust_is_not_junk() {
        let dust = TokenAccountSnapshot::new(Some(Decimal::new(1, 9)), Some(2_039_280));
        assert_eq!(reclaimable_lamports(&dust), None);
    }

    #[test]
    fn test_zero_with_scale_is_junk() {
        // "0.000000" from uiAmountString parses with a non-zero scale
        let zero = TokenAccountSnapshot::new(Some(Decimal::new(0, 6)), Some(2_039_280));
        assert_eq!(reclaimable_lamports(&zero), Some(2_039_280));
    }

    #[test]
    fn test_accumulation_saturates() {
        let accounts = vec![snapshot(0, u64::MAX), snapshot(0, 10)];
        let report = scan_rent(&accounts);
        assert_eq!(report.reclaimable_lamports, u64::MAX);
        assert_eq!(report.junk_account_count, 2);
    }
}
