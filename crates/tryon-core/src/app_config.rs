use std::path::PathBuf;

/// Application configuration shared by the CLI and the host runtime.
///
/// Every field has a default; configuration is entirely optional. See
/// [`crate::load_app_config`] for the `TRYON_*` environment variables that
/// override each field.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Log filter directive for `tracing_subscriber` (e.g. `"info"`,
    /// `"tryon_detector=debug"`).
    pub log_level: String,
    /// Optional YAML overlay of extra site profiles.
    pub sites_path: Option<PathBuf>,
    /// HTTP timeout for CLI page fetches.
    pub fetch_timeout_secs: u64,
    /// User-agent sent on CLI page fetches.
    pub fetch_user_agent: String,
    /// Delay before the first detection pass after page load.
    pub detect_initial_delay_ms: u64,
    /// Delay before the one retry pass when the first pass finds nothing.
    pub detect_retry_delay_ms: u64,
    /// Quiet period a mutation burst must observe before re-detection runs.
    pub detect_debounce_ms: u64,
    /// Added-node count above which a mutation batch is significant.
    pub mutation_node_threshold: usize,
}
