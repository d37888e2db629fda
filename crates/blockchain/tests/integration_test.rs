use blockchain::{ChainDataSource, CircuitBreakerConfig, RetryConfig, SnapshotFilter, SolanaClient};
use shared::Error;
use solana_sdk::pubkey::Pubkey;
use std::time::Duration;

// Nothing listens on port 1, so every call fails fast with a connection error
const DEAD_RPC: &str = "http://127.0.0.1:1";

fn dead_client(fallback: Option<&str>) -> SolanaClient {
    SolanaClient::new_with_config(
        DEAD_RPC.to_string(),
        fallback.map(str::to_string),
        RetryConfig::single_attempt(),
        CircuitBreakerConfig {
            failure_threshold: 1,
            success_threshold: 1,
            timeout: Duration::from_secs(60),
        },
    )
}

#[tokio::test]
async fn test_unreachable_rpc_surfaces_error() {
    let client = dead_client(None);
    let result = client
        .token_account_snapshots(&Pubkey::new_unique(), SnapshotFilter::AllTokenAccounts)
        .await;

    assert!(matches!(result, Err(Error::SolanaRpc(_))));
}

#[tokio::test]
async fn test_circuit_opens_after_failures() {
    let client = dead_client(None);

    assert!(client.latest_blockhash().await.is_err());

    match client.latest_blockhash().await {
        Err(Error::CircuitBreakerOpen(msg)) => assert!(msg.contains("primary")),
        other => panic!("Expected open circuit, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fallback_is_tried_after_primary() {
    let client = dead_client(Some("http://127.0.0.1:2"));

    // Both endpoints fail; the error reported comes from the fallback
    match client.health_check().await {
        Err(Error::SolanaRpc(msg)) => assert!(msg.contains("getLatestBlockhash")),
        other => panic!("Expected RPC error, got {:?}", other),
    }

    // Both circuits are now open
    assert!(matches!(
        client.health_check().await,
        Err(Error::CircuitBreakerOpen(_))
    ));
}

#[test]
fn test_validate_addresses() {
    assert!(SolanaClient::validate_address("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA").is_ok());
    assert!(matches!(
        SolanaClient::validate_address("not-a-key"),
        Err(Error::InvalidWalletAddress(_))
    ));
}
