use blockchain::{scan_rent, validation_transaction_base64, ChainDataSource, SnapshotFilter};
use serde::Serialize;
use shared::{RentReport, Result};
use solana_sdk::pubkey::Pubkey;
use std::sync::Arc;
use tracing::info;

/// Result of scanning one owner's token accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletAudit {
    #[serde(flatten)]
    pub report: RentReport,
    pub scanned_account_count: usize,
}

/// Runs rent scans against a chain data source
#[derive(Clone)]
pub struct RentAuditService {
    chain: Arc<dyn ChainDataSource>,
}

impl RentAuditService {
    pub fn new(chain: Arc<dyn ChainDataSource>) -> Self {
        Self { chain }
    }

    pub async fn audit(&self, owner: &Pubkey, filter: SnapshotFilter) -> Result<WalletAudit> {
        let snapshots = self.chain.token_account_snapshots(owner, filter).await?;
        let report = scan_rent(&snapshots);

        info!(
            owner = %owner,
            scanned = snapshots.len(),
            junk = report.junk_account_count,
            reclaimable_lamports = report.reclaimable_lamports,
            "Rent scan complete"
        );

        Ok(WalletAudit {
            report,
            scanned_account_count: snapshots.len(),
        })
    }

    /// Base64 zero-value self-transfer for `signer` on the latest blockhash
    pub async fn validation_transaction(&self, signer: &Pubkey) -> Result<String> {
        let blockhash = self.chain.latest_blockhash().await?;
        validation_transaction_base64(signer, blockhash)
    }

    /// Scan and transaction built concurrently; either failure fails both
    pub async fn audit_with_transaction(
        &self,
        owner: &Pubkey,
        filter: SnapshotFilter,
        signer: &Pubkey,
    ) -> Result<(WalletAudit, String)> {
        tokio::try_join!(self.audit(owner, filter), self.validation_transaction(signer))
    }

    pub async fn is_chain_reachable(&self) -> bool {
        self.chain.latest_blockhash().await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use shared::{Error, TokenAccountSnapshot};
    use solana_sdk::hash::Hash;
    use std::sync::Mutex;

    struct StubChain {
        snapshots: Vec<TokenAccountSnapshot>,
        fail_blockhash: bool,
        seen_filters: Mutex<Vec<SnapshotFilter>>,
    }

    #[async_trait]
    impl ChainDataSource for StubChain {
        async fn token_account_snapshots(
            &self,
            _owner: &Pubkey,
            filter: SnapshotFilter,
        ) -> Result<Vec<TokenAccountSnapshot>> {
            self.seen_filters.lock().unwrap().push(filter);
            Ok(self.snapshots.clone())
        }

        async fn latest_blockhash(&self) -> Result<Hash> {
            if self.fail_blockhash {
                Err(Error::SolanaRpc("node behind".to_string()))
            } else {
                Ok(Hash::new_unique())
            }
        }
    }

    fn stub(fail_blockhash: bool) -> Arc<StubChain> {
        Arc::new(StubChain {
            snapshots: vec![
                TokenAccountSnapshot::new(Some(Decimal::ZERO), Some(2_039_280)),
                TokenAccountSnapshot::new(Some(Decimal::ONE), Some(2_039_280)),
                TokenAccountSnapshot::new(None, Some(2_039_280)),
            ],
            fail_blockhash,
            seen_filters: Mutex::new(Vec::new()),
        })
    }

    #[tokio::test]
    async fn test_audit_counts_junk_accounts() {
        let chain = stub(false);
        let service = RentAuditService::new(chain.clone());
        let mint = Pubkey::new_unique();

        let audit = service
            .audit(&Pubkey::new_unique(), SnapshotFilter::Mint(mint))
            .await
            .unwrap();

        assert_eq!(audit.report.junk_account_count, 1);
        assert_eq!(audit.report.reclaimable_lamports, 2_039_280);
        assert_eq!(audit.scanned_account_count, 3);
        assert_eq!(*chain.seen_filters.lock().unwrap(), vec![SnapshotFilter::Mint(mint)]);
    }

    #[tokio::test]
    async fn test_blockhash_failure_fails_combined_call() {
        let service = RentAuditService::new(stub(true));
        let owner = Pubkey::new_unique();

        let result = service
            .audit_with_transaction(&owner, SnapshotFilter::AllTokenAccounts, &owner)
            .await;

        assert!(matches!(result, Err(Error::SolanaRpc(_))));
        assert!(!service.is_chain_reachable().await);
    }

    #[test]
    fn test_wallet_audit_serializes_flat() {
        let audit = WalletAudit {
            report: RentReport {
                reclaimable_lamports: 10,
                junk_account_count: 1,
            },
            scanned_account_count: 4,
        };
        let value = serde_json::to_value(audit).unwrap();
        assert_eq!(value["reclaimableLamports"], 10);
        assert_eq!(value["junkAccountCount"], 1);
        assert_eq!(value["scannedAccountCount"], 4);
    }
}
