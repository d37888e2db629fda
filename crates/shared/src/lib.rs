pub mod config;
pub mod error;
pub mod models;
pub mod price_feed;

pub use error::{Error, Result};
pub use models::{RentReport, TokenAccountSnapshot, TokenMetadata, LAMPORTS_PER_SOL};
pub use price_feed::PriceFeedService;
