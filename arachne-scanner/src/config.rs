use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Limits and request profile for a single crawl.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub max_pages: usize,
    pub max_depth: usize,
    /// Total per-request budget, connect included.
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Pause between successive fetches.
    pub delay: Duration,
    pub user_agent: String,
    /// Idle connections kept per host.
    pub pool_size: usize,
    pub accept_invalid_certs: bool,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_pages: 50,
            max_depth: 3,
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            delay: Duration::from_millis(100),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            pool_size: 20,
            accept_invalid_certs: true,
        }
    }
}
