use std::path::PathBuf;

/// Runtime configuration for the catalog sync pipeline and CLI.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the upstream catalog API. The one required setting: a run
    /// without it fails at startup, before any mapping logic executes.
    pub catalog_base_url: String,
    pub log_level: String,
    /// Directory the JSON artifacts are written into.
    pub output_dir: PathBuf,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Page size for upstream catalog pagination.
    pub per_page: u32,
    /// Delay between page requests, in milliseconds.
    pub inter_request_delay_ms: u64,
}
