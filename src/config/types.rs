use serde::Deserialize;

/// Top-level configuration, loaded once per run
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    pub output: OutputConfig,
}

/// Remote API endpoint configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Hostname of the map API, requests go to `https://<host>`
    pub host: String,

    /// API version segment used in every request path
    #[serde(default = "default_version")]
    pub version: String,
}

/// Fetch engine tuning
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// Attempts per resource before the run is aborted
    #[serde(rename = "max-retries", default = "default_max_retries")]
    pub max_retries: u32,

    /// Wait after a failed attempt before the next one (seconds)
    #[serde(rename = "retry-timeout-secs", default = "default_retry_timeout")]
    pub retry_timeout_secs: f64,

    /// Wait before re-establishing a connection on the second attempt (seconds)
    #[serde(rename = "reopen-timeout-secs", default = "default_reopen_timeout")]
    pub reopen_timeout_secs: f64,

    /// Target request rate per worker (requests per second)
    #[serde(rename = "request-rate", default = "default_request_rate")]
    pub request_rate: f64,

    /// Number of parallel fetch workers
    #[serde(default = "default_workers")]
    pub workers: u32,
}

/// Snapshot output settings
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path the snapshot document is written to
    #[serde(rename = "snapshot-path")]
    pub snapshot_path: String,
}

fn default_version() -> String {
    "latest".to_string()
}

fn default_max_retries() -> u32 {
    5
}

fn default_retry_timeout() -> f64 {
    5.0
}

fn default_reopen_timeout() -> f64 {
    5.0
}

fn default_request_rate() -> f64 {
    20.0
}

fn default_workers() -> u32 {
    20
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            retry_timeout_secs: default_retry_timeout(),
            reopen_timeout_secs: default_reopen_timeout(),
            request_rate: default_request_rate(),
            workers: default_workers(),
        }
    }
}
