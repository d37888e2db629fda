pub mod actions;
pub mod audit_service;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod presenter;
pub mod profiles;
pub mod routes;
pub mod token_metadata_service;

pub use actions::{ActionGetResponse, ActionPostRequest, ActionPostResponse, ActionsJson};
pub use audit_service::{RentAuditService, WalletAudit};
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use presenter::ResponsePresenter;
pub use profiles::{BlinkKind, BlinkProfile, BlinkProfiles};
pub use token_metadata_service::{DasMetadataClient, TokenMetadataSource};

use blockchain::ChainDataSource;
use shared::{config::Config, PriceFeedService};
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub audits: RentAuditService,
    pub metadata: Arc<dyn TokenMetadataSource>,
    pub prices: PriceFeedService,
    pub profiles: BlinkProfiles,
    pub presenter: ResponsePresenter,
}

impl AppState {
    pub fn new(
        config: Config,
        chain: Arc<dyn ChainDataSource>,
        metadata: Arc<dyn TokenMetadataSource>,
        prices: PriceFeedService,
    ) -> Self {
        let profiles = BlinkProfiles::from_site(&config.site);
        let presenter = ResponsePresenter::new(config.site.clone());

        Self {
            config: Arc::new(config),
            audits: RentAuditService::new(chain),
            metadata,
            prices,
            profiles,
            presenter,
        }
    }
}
