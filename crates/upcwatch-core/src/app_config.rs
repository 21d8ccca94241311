use std::path::PathBuf;

/// Runtime configuration for a crawl run, sourced from environment
/// variables (see [`crate::config::load_app_config`]).
#[derive(Clone)]
pub struct AppConfig {
    /// CSV of input rows: `upc_code`, `zoro_no`, `sales_price`.
    pub input_path: PathBuf,
    /// JSON result store; also the resume cursor between runs.
    pub results_path: PathBuf,
    /// Destination of the flat CSV export.
    pub export_path: PathBuf,
    /// Origin of the target site, e.g. `https://www.amazon.com`.
    /// Overridable so tests can point the crawler at a local mock server.
    pub search_base_url: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Optional proxy applied to every request. May embed credentials,
    /// hence the redacting `Debug` impl.
    pub http_proxy: Option<String>,
    /// Base politeness delay between page fetches.
    pub inter_request_delay_ms: u64,
    /// Upper bound of the random jitter added to the politeness delay.
    pub delay_jitter_ms: u64,
    /// Additional attempts after the first failure for transient HTTP errors.
    pub max_retries: u32,
    /// Base for the exponential retry backoff, in seconds.
    pub retry_backoff_base_secs: u64,
    /// Pause before the single re-fetch of a blocked page.
    pub blocked_retry_delay_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("input_path", &self.input_path)
            .field("results_path", &self.results_path)
            .field("export_path", &self.export_path)
            .field("search_base_url", &self.search_base_url)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("http_proxy", &self.http_proxy.as_ref().map(|_| "[redacted]"))
            .field("inter_request_delay_ms", &self.inter_request_delay_ms)
            .field("delay_jitter_ms", &self.delay_jitter_ms)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_secs", &self.retry_backoff_base_secs)
            .field("blocked_retry_delay_secs", &self.blocked_retry_delay_secs)
            .finish()
    }
}
