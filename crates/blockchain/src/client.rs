use async_trait::async_trait;
use rust_decimal::Decimal;
use shared::{Error, Result, TokenAccountSnapshot};
use solana_account_decoder::UiAccountData;
use solana_client::{nonblocking::rpc_client::RpcClient, rpc_response::RpcKeyedAccount};
use solana_sdk::{commitment_config::CommitmentConfig, hash::Hash, pubkey::Pubkey};
use std::future::Future;
use std::str::FromStr;
use tracing::{debug, error, info, warn};

use crate::circuit_breaker::{CircuitBreaker, CircuitBreakerConfig};
use crate::retry::{retry_with_backoff, RetryConfig, Retryable};
use crate::source::{ChainDataSource, SnapshotFilter};

struct RpcEndpoint {
    label: &'static str,
    client: RpcClient,
    circuit_breaker: CircuitBreaker,
}

impl RpcEndpoint {
    fn new(label: &'static str, url: String, config: CircuitBreakerConfig) -> Self {
        let circuit_breaker = CircuitBreaker::new(format!("{}-rpc", label), config);
        let client = RpcClient::new_with_commitment(url, CommitmentConfig::confirmed());
        Self {
            label,
            client,
            circuit_breaker,
        }
    }
}

/// Solana JSON-RPC client with primary/fallback failover
///
/// Each endpoint has its own circuit breaker; every call is retried with
/// exponential backoff before moving on to the next endpoint.
pub struct SolanaClient {
    endpoints: Vec<RpcEndpoint>,
    retry_config: RetryConfig,
}

impl SolanaClient {
    pub fn new(rpc_url: String, fallback_url: Option<String>) -> Self {
        Self::new_with_config(
            rpc_url,
            fallback_url,
            RetryConfig::default(),
            CircuitBreakerConfig::default(),
        )
    }

    pub fn new_with_config(
        rpc_url: String,
        fallback_url: Option<String>,
        retry_config: RetryConfig,
        circuit_breaker_config: CircuitBreakerConfig,
    ) -> Self {
        // Query strings may carry provider api keys
        info!("Initializing Solana client with primary RPC {}", redact_url(&rpc_url));

        let mut endpoints = vec![RpcEndpoint::new(
            "primary",
            rpc_url,
            circuit_breaker_config.clone(),
        )];

        if let Some(url) = fallback_url {
            info!("Configuring fallback RPC {}", redact_url(&url));
            endpoints.push(RpcEndpoint::new("fallback", url, circuit_breaker_config));
        }

        Self {
            endpoints,
            retry_config,
        }
    }

    /// Parse a base58 Solana address
    pub fn validate_address(address: &str) -> Result<Pubkey> {
        Pubkey::from_str(address.trim()).map_err(|e| {
            warn!("Invalid address format: {} - {}", address, e);
            Error::InvalidWalletAddress(format!("Invalid Solana address format: {}", e))
        })
    }

    /// Fetch jsonParsed token accounts of `owner` and turn them into snapshots
    pub async fn get_token_account_snapshots(
        &self,
        owner: &Pubkey,
        filter: SnapshotFilter,
    ) -> Result<Vec<TokenAccountSnapshot>> {
        debug!("Fetching token accounts for {} ({:?})", owner, filter);

        let owner = *owner;
        let accounts = self
            .call("get_token_accounts_by_owner", move |client| async move {
                client
                    .get_token_accounts_by_owner(&owner, filter.to_rpc_filter())
                    .await
                    .map_err(|e| Error::SolanaRpc(format!("getTokenAccountsByOwner failed: {}", e)))
            })
            .await?;

        let snapshots: Vec<TokenAccountSnapshot> = accounts
            .iter()
            .filter_map(|account| match snapshot_from_keyed_account(account) {
                Ok(snapshot) => Some(snapshot),
                Err(e) => {
                    warn!("Skipping token account {}: {}", account.pubkey, e);
                    None
                }
            })
            .collect();

        debug!("Parsed {}/{} token accounts for {}", snapshots.len(), accounts.len(), owner);
        Ok(snapshots)
    }

    pub async fn get_latest_blockhash(&self) -> Result<Hash> {
        self.call("get_latest_blockhash", |client| async move {
            client
                .get_latest_blockhash()
                .await
                .map_err(|e| Error::SolanaRpc(format!("getLatestBlockhash failed: {}", e)))
        })
        .await
    }

    /// Health check for RPC connectivity
    pub async fn health_check(&self) -> Result<()> {
        self.get_latest_blockhash().await.map(|_| ())
    }

    /// Run `operation` against each endpoint in order until one succeeds
    async fn call<'a, T, F, Fut>(&'a self, operation_name: &str, operation: F) -> Result<T>
    where
        F: Fn(&'a RpcClient) -> Fut,
        Fut: Future<Output = Result<T>> + 'a,
    {
        let mut last_error = None;

        for endpoint in &self.endpoints {
            if !endpoint.circuit_breaker.is_request_allowed() {
                warn!("Skipping {} RPC for {}: circuit open", endpoint.label, operation_name);
                last_error = Some(Error::CircuitBreakerOpen(format!(
                    "{} RPC unavailable for {}",
                    endpoint.label, operation_name
                )));
                continue;
            }

            let name = format!("{}@{}", operation_name, endpoint.label);
            let result =
                retry_with_backoff(&name, &self.retry_config, || operation(&endpoint.client)).await;

            match result {
                Ok(value) => {
                    endpoint.circuit_breaker.record_success();
                    return Ok(value);
                }
                Err(e) if !e.is_retryable() => return Err(e),
                Err(e) => {
                    endpoint.circuit_breaker.record_failure();
                    warn!("{} RPC failed for {}: {}", endpoint.label, operation_name, e);
                    last_error = Some(e);
                }
            }
        }

        let e = last_error
            .unwrap_or_else(|| Error::SolanaRpc(format!("No RPC endpoint for {}", operation_name)));
        error!("All RPC endpoints failed for {}: {}", operation_name, e);
        Err(e)
    }
}

#[async_trait]
impl ChainDataSource for SolanaClient {
    async fn token_account_snapshots(
        &self,
        owner: &Pubkey,
        filter: SnapshotFilter,
    ) -> Result<Vec<TokenAccountSnapshot>> {
        self.get_token_account_snapshots(owner, filter).await
    }

    async fn latest_blockhash(&self) -> Result<Hash> {
        self.get_latest_blockhash().await
    }
}

/// Convert a jsonParsed SPL token account into a snapshot
pub fn snapshot_from_keyed_account(account: &RpcKeyedAccount) -> Result<TokenAccountSnapshot> {
    let parsed = match &account.account.data {
        UiAccountData::Json(parsed_account) => &parsed_account.parsed,
        _ => {
            return Err(Error::Validation(
                "Expected jsonParsed account data".to_string(),
            ))
        }
    };

    let info = parsed
        .get("info")
        .ok_or_else(|| Error::Validation("Missing info field".to_string()))?;

    let mint = info
        .get("mint")
        .and_then(|v| v.as_str())
        .ok_or_else(|| Error::Validation("Missing mint field".to_string()))?
        .to_string();

    let balance_units = info.get("tokenAmount").and_then(balance_from_token_amount);

    Ok(TokenAccountSnapshot {
        address: account.pubkey.clone(),
        mint,
        balance_units,
        lamports: Some(account.account.lamports),
    })
}

/// UI balance of a parsed `tokenAmount` object.
///
/// Prefers the exact `uiAmountString`, then the raw `amount` scaled by
/// `decimals`, then the float `uiAmount`. `None` if none is usable.
pub fn balance_from_token_amount(token_amount: &serde_json::Value) -> Option<Decimal> {
    if let Some(ui_string) = token_amount.get("uiAmountString").and_then(|v| v.as_str()) {
        if let Ok(balance) = Decimal::from_str(ui_string) {
            return Some(balance);
        }
    }

    let raw = token_amount
        .get("amount")
        .and_then(|v| v.as_str())
        .and_then(|s| s.parse::<u64>().ok());
    let decimals = token_amount.get("decimals").and_then(|v| v.as_u64());
    if let (Some(raw), Some(decimals)) = (raw, decimals) {
        if let Ok(balance) = Decimal::try_from_i128_with_scale(raw as i128, decimals as u32) {
            return Some(balance);
        }
    }

    token_amount
        .get("uiAmount")
        .and_then(|v| v.as_f64())
        .and_then(Decimal::from_f64_retain)
}

fn redact_url(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}
