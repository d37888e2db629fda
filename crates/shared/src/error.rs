use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Solana RPC error: {0}")]
    SolanaRpc(String),

    #[error("Invalid wallet address: {0}")]
    InvalidWalletAddress(String),

    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Circuit breaker open: {0}")]
    CircuitBreakerOpen(String),
}

pub type Result<T> = std::result::Result<T, Error>;
