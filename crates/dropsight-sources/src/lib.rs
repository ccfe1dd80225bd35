//! Signal source adapters for the trend pipeline.
//!
//! Each external signal (search-interest growth, marketplace price/order
//! data, social buzz) has one concrete async fetcher. Fetchers never abort a
//! cycle: per-product misses are skipped and whole-source failures surface a
//! [`SourceError`] to [`collect::collect_signals`], which substitutes values
//! from the central [`fallback`] policy so every cycle yields a complete
//! batch.

mod client;
mod collect;
mod creatives;
mod error;
pub mod fallback;
pub mod marketplace;
mod scan;
pub mod search_interest;
pub mod social_buzz;

pub use client::build_client;
pub use collect::{collect_signals, ProductSignals};
pub use creatives::{fetch_ad_creatives, placeholder_image_url, AdCreative, MAX_CREATIVES};
pub use error::SourceError;
pub use marketplace::MarketQuote;

use dropsight_core::AppConfig;

/// Connection settings for all signal sources, carved out of [`AppConfig`]
/// so the pipeline does not need the full server configuration.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Base URL of the search-interest trend service; `None` disables the
    /// adapter (the search signal then always takes its fallback value).
    pub trends_url: Option<String>,
    pub market_url: String,
    /// Base URL of the social-buzz service; `None` selects the documented
    /// random stand-in.
    pub buzz_url: Option<String>,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl SourceConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            trends_url: config.trends_url.clone(),
            market_url: config.market_url.clone(),
            buzz_url: config.buzz_url.clone(),
            timeout_secs: config.source_timeout_secs,
            user_agent: config.source_user_agent.clone(),
        }
    }
}
