use serde::Deserialize;
use std::env;

pub const DEFAULT_RPC_URL: &str = "https://api.mainnet-beta.solana.com";
pub const DEFAULT_MAIN_SITE_URL: &str = "https://shenlongdapp.xyz";
pub const DEFAULT_ICON_URL: &str = "https://cryptologos.cc/logos/solana-sol-logo.png";
pub const DEFAULT_SHARE_HANDLE: &str = "@ShenlongProtocol";
pub const DEFAULT_ACTION_VERSION: &str = "1";
/// CAIP-2 id of Solana mainnet-beta
pub const DEFAULT_BLOCKCHAIN_ID: &str = "solana:5eykt4UsFv8P8NJdTREpY1vzqKqZKvdp";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub solana: SolanaConfig,
    pub server: ServerConfig,
    pub site: SiteConfig,
    pub actions: ActionsConfig,
    pub price: PriceConfig,
    pub http: HttpConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SolanaConfig {
    pub rpc_url: String,
    pub rpc_fallback_url: Option<String>,
    /// Endpoint serving the DAS `getAsset` method. Usually the same Helius URL as `rpc_url`.
    pub das_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Absolute base URL used in action links. Derived from the `Host` header when unset.
    pub public_base_url: Option<String>,
    pub static_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    pub main_site_url: String,
    pub default_icon_url: String,
    pub share_handle: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ActionsConfig {
    pub action_version: String,
    pub blockchain_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PriceConfig {
    /// Simple-price endpoint returning `{"solana":{"usd":<n>}}`. USD figures are omitted when unset.
    pub api_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// JSON lines when true, human-readable output otherwise
    pub json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            solana: SolanaConfig {
                rpc_url: DEFAULT_RPC_URL.to_string(),
                rpc_fallback_url: None,
                das_url: DEFAULT_RPC_URL.to_string(),
            },
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                public_base_url: None,
                static_dir: "web".to_string(),
            },
            site: SiteConfig {
                main_site_url: DEFAULT_MAIN_SITE_URL.to_string(),
                default_icon_url: DEFAULT_ICON_URL.to_string(),
                share_handle: DEFAULT_SHARE_HANDLE.to_string(),
            },
            actions: ActionsConfig {
                action_version: DEFAULT_ACTION_VERSION.to_string(),
                blockchain_id: DEFAULT_BLOCKCHAIN_ID.to_string(),
            },
            price: PriceConfig { api_url: None },
            http: HttpConfig { timeout_secs: 10 },
            logging: LoggingConfig { json: true },
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let defaults = Config::default();
        let rpc_url = env::var("SOLANA_RPC_URL").unwrap_or(defaults.solana.rpc_url);

        Ok(Config {
            solana: SolanaConfig {
                das_url: env::var("DAS_RPC_URL").unwrap_or_else(|_| rpc_url.clone()),
                rpc_fallback_url: non_empty_var("SOLANA_RPC_FALLBACK_URL"),
                rpc_url,
            },
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or(defaults.server.host),
                port: env::var("SERVER_PORT")
                    .unwrap_or_else(|_| "8080".to_string())
                    .parse()?,
                public_base_url: non_empty_var("PUBLIC_BASE_URL")
                    .map(|url| url.trim_end_matches('/').to_string()),
                static_dir: env::var("STATIC_DIR").unwrap_or(defaults.server.static_dir),
            },
            site: SiteConfig {
                main_site_url: env::var("MAIN_SITE_URL")
                    .map(|url| url.trim_end_matches('/').to_string())
                    .unwrap_or(defaults.site.main_site_url),
                default_icon_url: env::var("DEFAULT_ICON_URL")
                    .unwrap_or(defaults.site.default_icon_url),
                share_handle: env::var("SHARE_HANDLE").unwrap_or(defaults.site.share_handle),
            },
            actions: ActionsConfig {
                action_version: env::var("ACTION_VERSION")
                    .unwrap_or(defaults.actions.action_version),
                blockchain_id: env::var("BLOCKCHAIN_ID")
                    .unwrap_or(defaults.actions.blockchain_id),
            },
            price: PriceConfig {
                api_url: non_empty_var("PRICE_API_URL"),
            },
            http: HttpConfig {
                timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()?,
            },
            logging: LoggingConfig {
                json: env::var("LOG_FORMAT")
                    .map(|format| !format.eq_ignore_ascii_case("pretty"))
                    .unwrap_or(defaults.logging.json),
            },
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
