use async_trait::async_trait;
use shared::{Result, TokenAccountSnapshot};
use solana_client::rpc_request::TokenAccountsFilter;
use solana_sdk::{hash::Hash, pubkey::Pubkey};

/// Which token accounts of an owner to fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFilter {
    /// Every account owned through the SPL Token program
    AllTokenAccounts,
    /// Only accounts holding the given mint
    Mint(Pubkey),
}

impl SnapshotFilter {
    pub fn to_rpc_filter(self) -> TokenAccountsFilter {
        match self {
            SnapshotFilter::AllTokenAccounts => TokenAccountsFilter::ProgramId(spl_token::id()),
            SnapshotFilter::Mint(mint) => TokenAccountsFilter::Mint(mint),
        }
    }
}

/// Read-only chain queries needed to audit a wallet and build its validation transaction
#[async_trait]
pub trait ChainDataSource: Send + Sync {
    async fn token_account_snapshots(
        &self,
        owner: &Pubkey,
        filter: SnapshotFilter,
    ) -> Result<Vec<TokenAccountSnapshot>>;

    async fn latest_blockhash(&self) -> Result<Hash>;
}
