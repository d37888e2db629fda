pub mod circuit_breaker;
pub mod client;
pub mod rent_scanner;
pub mod retry;
pub mod source;
pub mod validation_tx;

pub use circuit_breaker::{CircuitBreaker, CircuitBreakerConfig, CircuitState};
pub use client::SolanaClient;
pub use rent_scanner::{reclaimable_lamports, scan_rent};
pub use retry::{retry_with_backoff, RetryConfig, Retryable};
pub use source::{ChainDataSource, SnapshotFilter};
pub use validation_tx::{build_validation_transaction, encode_transaction, validation_transaction_base64};
