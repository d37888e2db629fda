use crate::{Error, Result};
use rust_decimal::Decimal;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, warn};

/// SOL/USD quotes from an externally configured simple-price endpoint
///
/// There are no built-in prices: when no endpoint is configured, or the
/// endpoint fails, callers get `None` and leave USD figures out.
#[derive(Clone)]
pub struct PriceFeedService {
    client: reqwest::Client,
    api_url: Option<String>,
}

impl PriceFeedService {
    pub fn new(api_url: Option<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, api_url })
    }

    /// Service that never quotes a price
    pub fn disabled() -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.api_url.is_some()
    }

    /// Current SOL price in USD, or `None` if unavailable
    pub async fn sol_price_usd(&self) -> Option<Decimal> {
        let url = self.api_url.as_ref()?;

        match self.fetch_sol_price(url).await {
            Ok(price) => {
                debug!("SOL price: ${}", price);
                Some(price)
            }
            Err(e) => {
                warn!("SOL price unavailable: {}", e);
                None
            }
        }
    }

    async fn fetch_sol_price(&self, url: &str) -> Result<Decimal> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::ExternalService(format!("Price request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::ExternalService(format!(
                "Price endpoint returned {}",
                response.status()
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| Error::ExternalService(format!("Invalid price response: {}", e)))?;

        parse_sol_price(&body)
    }
}

/// Extract `solana.usd` from a simple-price response body
pub fn parse_sol_price(body: &serde_json::Value) -> Result<Decimal> {
    let number = match body.get("solana").and_then(|s| s.get("usd")) {
        Some(serde_json::Value::Number(number)) => number,
        _ => {
            return Err(Error::ExternalService(
                "Missing solana.usd in price response".to_string(),
            ))
        }
    };

    let price = Decimal::from_str(&number.to_string())
        .map_err(|e| Error::ExternalService(format!("Unparseable price {}: {}", number, e)))?;

    if price <= Decimal::ZERO {
        return Err(Error::ExternalService(format!("Non-positive price {}", price)));
    }

    Ok(price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_sol_price() {
        let body = json!({ "solana": { "usd": 187.42 } });
        assert_eq!(parse_sol_price(&body).unwrap(), Decimal::from_str("187.42").unwrap());
    }

    #[test]
    fn test_parse_sol_price_integer() {
        let body = json!({ "solana": { "usd": 210 } });
        assert_eq!(parse_sol_price(&body).unwrap(), Decimal::from(210));
    }

    #[test]
    fn test_parse_sol_price_missing_field() {
        let body = json!({ "bitcoin": { "usd": 60000 } });
        assert!(parse_sol_price(&body).is_err());
    }

    #[test]
    fn test_parse_sol_price_rejects_zero() {
        let body = json!({ "solana": { "usd": 0 } });
        assert!(parse_sol_price(&body).is_err());
    }

    #[tokio::test]
    async fn test_disabled_service_has_no_price() {
        let service = PriceFeedService::disabled();
        assert!(!service.is_enabled());
        assert_eq!(service.sol_price_usd().await, None);
    }
}
