use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use shared::{Error, Result, TokenMetadata};
use std::time::Duration;
use tracing::{debug, warn};

/// Lookup of display metadata (name, symbol, image) for a mint
#[async_trait]
pub trait TokenMetadataSource: Send + Sync {
    async fn token_metadata(&self, mint: &str) -> Result<TokenMetadata>;

    /// Image used when a mint has none
    fn default_image(&self) -> &str;

    /// Metadata for `mint`, or the "unknown" placeholder if the lookup fails
    async fn token_metadata_or_default(&self, mint: &str) -> TokenMetadata {
        match self.token_metadata(mint).await {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!("Metadata lookup failed for {}: {}", mint, e);
                TokenMetadata::unknown(self.default_image())
            }
        }
    }
}

/// Client for the DAS `getAsset` method (Helius compatible)
pub struct DasMetadataClient {
    client: Client,
    das_url: String,
    default_image: String,
}

impl DasMetadataClient {
    pub fn new(das_url: String, default_image: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            das_url,
            default_image,
        })
    }
}

#[async_trait]
impl TokenMetadataSource for DasMetadataClient {
    async fn token_metadata(&self, mint: &str) -> Result<TokenMetadata> {
        debug!("Fetching asset metadata for {}", mint);

        let request_body = serde_json::json!({
            "jsonrpc": "2.0",
            "id": "token-audit",
            "method": "getAsset",
            "params": {
                "id": mint,
                "displayOptions": { "showFungible": true }
            }
        });

        let response = self
            .client
            .post(&self.das_url)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| Error::ExternalService(format!("getAsset request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::ExternalService(format!(
                "getAsset returned status {}",
                response.status()
            )));
        }

        let json_response: Value = response
            .json()
            .await
            .map_err(|e| Error::ExternalService(format!("Failed to parse getAsset response: {}", e)))?;

        if let Some(error) = json_response.get("error") {
            let error_msg = error
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("Unknown error");
            return Err(Error::ExternalService(format!("getAsset error: {}", error_msg)));
        }

        let asset = json_response
            .get("result")
            .ok_or_else(|| Error::ExternalService("Missing result in getAsset response".to_string()))?;

        Ok(parse_asset_metadata(asset, &self.default_image))
    }

    fn default_image(&self) -> &str {
        &self.default_image
    }
}

/// Reads name, symbol and image from a DAS asset, filling gaps with defaults
///
/// The image is the first present of `content.links.image`,
/// `content.files[0].uri` and `content.json_uri`.
pub fn parse_asset_metadata(asset: &Value, default_image: &str) -> TokenMetadata {
    let content = asset.get("content");
    let metadata = content.and_then(|c| c.get("metadata"));

    let name = non_empty_str(metadata.and_then(|m| m.get("name")))
        .unwrap_or(TokenMetadata::UNKNOWN_NAME);

    let symbol = non_empty_str(metadata.and_then(|m| m.get("symbol")))
        .or_else(|| non_empty_str(asset.get("token_info").and_then(|t| t.get("symbol"))))
        .unwrap_or(TokenMetadata::UNKNOWN_SYMBOL);

    let image = non_empty_str(content.and_then(|c| c.pointer("/links/image")))
        .or_else(|| non_empty_str(content.and_then(|c| c.pointer("/files/0/uri"))))
        .or_else(|| non_empty_str(content.and_then(|c| c.get("json_uri"))))
        .unwrap_or(default_image);

    TokenMetadata {
        name: name.trim().to_string(),
        symbol: symbol.trim().to_string(),
        image: image.to_string(),
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(|v| v.as_str())
        .filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const DEFAULT_IMAGE: &str = "https://default.example/icon.png";

    #[test]
    fn test_parse_full_asset() {
        let asset = json!({
            "id": "DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263",
            "content": {
                "json_uri": "https://arweave.net/bonk.json",
                "files": [{ "uri": "https://arweave.net/bonk-file.png" }],
                "metadata": { "name": "Bonk", "symbol": "Bonk" },
                "links": { "image": "https://arweave.net/bonk.png" }
            }
        });

        let metadata = parse_asset_metadata(&asset, DEFAULT_IMAGE);
        assert_eq!(metadata.name, "Bonk");
        assert_eq!(metadata.symbol, "Bonk");
        assert_eq!(metadata.image, "https://arweave.net/bonk.png");
    }

    #[test]
    fn test_image_falls_back_to_files_then_json_uri() {
        let asset = json!({
            "content": {
                "json_uri": "https://arweave.net/meta.json",
                "files": [{ "uri": "https://arweave.net/file.png" }],
                "links": {}
            }
        });
        assert_eq!(
            parse_asset_metadata(&asset, DEFAULT_IMAGE).image,
            "https://arweave.net/file.png"
        );

        let asset = json!({
            "content": { "json_uri": "https://arweave.net/meta.json", "files": [] }
        });
        assert_eq!(
            parse_asset_metadata(&asset, DEFAULT_IMAGE).image,
            "https://arweave.net/meta.json"
        );
    }

    #[test]
    fn test_missing_content_uses_defaults() {
        let metadata = parse_asset_metadata(&json!({}), DEFAULT_IMAGE);
        assert_eq!(metadata, TokenMetadata::unknown(DEFAULT_IMAGE));
    }

    #[test]
    fn test_blank_fields_count_as_missing() {
        let asset = json!({
            "content": { "metadata": { "name": "  ", "symbol": "" }, "json_uri": "" },
            "token_info": { "symbol": "USDC" }
        });

        let metadata = parse_asset_metadata(&asset, DEFAULT_IMAGE);
        assert_eq!(metadata.name, TokenMetadata::UNKNOWN_NAME);
        assert_eq!(metadata.symbol, "USDC");
        assert_eq!(metadata.image, DEFAULT_IMAGE);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_falls_back_to_unknown() {
        let client = DasMetadataClient::new(
            "http://127.0.0.1:1".to_string(),
            DEFAULT_IMAGE.to_string(),
            Duration::from_secs(1),
        )
        .unwrap();

        assert!(client.token_metadata("So11111111111111111111111111111111111111112").await.is_err());
        assert_eq!(
            client
                .token_metadata_or_default("So11111111111111111111111111111111111111112")
                .await,
            TokenMetadata::unknown(DEFAULT_IMAGE)
        );
    }
}
