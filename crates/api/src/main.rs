use anyhow::Result;
use api::{logging, AppState, DasMetadataClient};
use blockchain::SolanaClient;
use shared::{config::Config, PriceFeedService};
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    logging::init_logging(config.logging.json);

    tracing::info!("Starting Rent Audit Blinks API");

    let timeout = Duration::from_secs(config.http.timeout_secs);

    let solana_client = Arc::new(SolanaClient::new(
        config.solana.rpc_url.clone(),
        config.solana.rpc_fallback_url.clone(),
    ));
    tracing::info!("Solana client initialized");

    let metadata_client = Arc::new(DasMetadataClient::new(
        config.solana.das_url.clone(),
        config.site.default_icon_url.clone(),
        timeout,
    )?);
    tracing::info!("Token metadata client initialized");

    let price_feed = PriceFeedService::new(config.price.api_url.clone(), timeout)?;
    if !price_feed.is_enabled() {
        tracing::info!("PRICE_API_URL not set; USD figures disabled");
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app_state = Arc::new(AppState::new(config, solana_client, metadata_client, price_feed));
    let app = api::routes::create_router(app_state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("API server listening on {}", addr);
    tracing::info!("Actions manifest at http://{}/actions.json", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
