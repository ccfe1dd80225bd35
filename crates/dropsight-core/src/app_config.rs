use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub products_path: PathBuf,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    /// Per-request timeout for all external signal sources.
    pub source_timeout_secs: u64,
    pub source_user_agent: String,
    /// Base URL of the search-interest trend service. `None` disables the
    /// adapter; the search signal then takes its fallback value every cycle.
    pub trends_url: Option<String>,
    /// Base URL of the marketplace catalog used for price/order scraping.
    pub market_url: String,
    /// Base URL of the social-buzz service. `None` selects the documented
    /// random stand-in.
    pub buzz_url: Option<String>,
    /// Cron expression driving the periodic refresh job.
    pub refresh_cron: String,
    /// Markup multiplier used by scheduled cycles.
    pub default_markup: f64,
    /// Shipping cost used by scheduled cycles.
    pub default_shipping: f64,
    /// Ad-creative cache freshness window, in hours.
    pub creative_ttl_hours: i64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("products_path", &self.products_path)
            .field("database_url", &"[redacted]")
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("source_timeout_secs", &self.source_timeout_secs)
            .field("source_user_agent", &self.source_user_agent)
            .field("trends_url", &self.trends_url)
            .field("market_url", &self.market_url)
            .field("buzz_url", &self.buzz_url)
            .field("refresh_cron", &self.refresh_cron)
            .field("default_markup", &self.default_markup)
            .field("default_shipping", &self.default_shipping)
            .field("creative_ttl_hours", &self.creative_ttl_hours)
            .finish()
    }
}
