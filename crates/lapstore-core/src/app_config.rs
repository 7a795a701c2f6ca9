use std::net::SocketAddr;

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

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Base of the ERP item controller; `itemList` is appended per request.
    pub erp_base_url: String,
    /// Secondary endpoint tried when the primary is unavailable. `None`
    /// skips straight to the built-in sample catalog.
    pub erp_fallback_url: Option<String>,
    /// Prefix joined onto relative image paths from the ERP.
    pub asset_base_url: String,
    pub erp_timeout_secs: u64,
    pub erp_user_agent: String,
    pub erp_max_retries: u32,
    pub erp_initial_backoff_ms: u64,
    pub featured_count: usize,
    pub rate_limit_per_minute: usize,
}
