use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::error;

/// Shown to callers in place of upstream failure details
pub const ANALYSIS_FAILED_MESSAGE: &str = "Analysis failed. Please try again later.";

/// Error type for the HTTP layer
#[derive(Debug)]
pub enum ApiError {
    // Caller errors
    InvalidInput(String),
    WalletRequired,

    // Upstream errors
    BlockchainRpcError(String),
    ExternalService(String),
    CircuitBreakerOpen(String),

    // Internal errors
    InternalError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            ApiError::WalletRequired => write!(f, "Wallet required"),
            ApiError::BlockchainRpcError(msg) => write!(f, "Blockchain RPC error: {}", msg),
            ApiError::ExternalService(msg) => write!(f, "External service error: {}", msg),
            ApiError::CircuitBreakerOpen(msg) => write!(f, "Service temporarily unavailable: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// Error body; `message` doubles as the Actions error shape
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub timestamp: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ApiError::InvalidInput(msg) => {
                (StatusCode::BAD_REQUEST, "invalid_input", msg.clone())
            }
            ApiError::WalletRequired => {
                (StatusCode::BAD_REQUEST, "invalid_input", "Wallet required".to_string())
            }
            ApiError::BlockchainRpcError(msg) => {
                error!("Blockchain RPC error: {}", msg);
                (StatusCode::BAD_GATEWAY, "upstream_error", ANALYSIS_FAILED_MESSAGE.to_string())
            }
            ApiError::ExternalService(msg) => {
                error!("External service error: {}", msg);
                (StatusCode::BAD_GATEWAY, "upstream_error", ANALYSIS_FAILED_MESSAGE.to_string())
            }
            ApiError::CircuitBreakerOpen(msg) => {
                error!("Circuit breaker open: {}", msg);
                (StatusCode::BAD_GATEWAY, "upstream_error", ANALYSIS_FAILED_MESSAGE.to_string())
            }
            ApiError::InternalError(msg) => {
                error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", "An internal error occurred".to_string())
            }
        };

        let error_response = ErrorResponse {
            error: error_type.to_string(),
            message,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, Json(error_response)).into_response()
    }
}

impl From<shared::Error> for ApiError {
    fn from(err: shared::Error) -> Self {
        match err {
            shared::Error::InvalidWalletAddress(msg) | shared::Error::Validation(msg) => {
                ApiError::InvalidInput(msg)
            }
            shared::Error::SolanaRpc(msg) => ApiError::BlockchainRpcError(msg),
            shared::Error::ExternalService(msg) => ApiError::ExternalService(msg),
            shared::Error::CircuitBreakerOpen(msg) => ApiError::CircuitBreakerOpen(msg),
            shared::Error::Serialization(msg) | shared::Error::Config(msg) => {
                ApiError::InternalError(msg)
            }
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::InvalidInput("bad".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::WalletRequired.into_response().status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::BlockchainRpcError("timeout".into()).into_response().status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError::InternalError("oops".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_shared_error_mapping() {
        assert!(matches!(
            ApiError::from(shared::Error::InvalidWalletAddress("x".into())),
            ApiError::InvalidInput(_)
        ));
        assert!(matches!(
            ApiError::from(shared::Error::CircuitBreakerOpen("primary".into())),
            ApiError::CircuitBreakerOpen(_)
        ));
        assert!(matches!(
            ApiError::from(shared::Error::Serialization("bincode".into())),
            ApiError::InternalError(_)
        ));
    }
}
