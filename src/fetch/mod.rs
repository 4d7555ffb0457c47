//! Concurrent fetch engine
//!
//! This module contains the core fetch machinery:
//! - Per-request retry, backoff, and reconnect policy
//! - Request rate limiting
//! - Partitioning the system list across a bounded worker pool
//! - Private-then-merge aggregation of worker results

mod aggregate;
mod coordinator;
mod executor;
mod partition;
mod rate_limit;
mod transport;
mod worker;

pub use aggregate::merge_outputs;
pub use coordinator::Coordinator;
pub use executor::RequestExecutor;
pub use partition::partition;
pub use rate_limit::RateLimiter;
pub use transport::{HttpTransport, RawResponse, Transport, TransportError};
pub use worker::{Worker, WorkerOutput};

use crate::config::Config;
use crate::model::Snapshot;
use crate::{ConfigError, MapError};
use url::Url;

/// Runs a complete fetch against the configured API
///
/// This is the main entry point for producing a snapshot. It builds the
/// HTTPS base URL from the configured host, then drives a full
/// partition/fetch/merge cycle.
///
/// # Arguments
///
/// * `config` - The loaded and validated configuration
///
/// # Returns
///
/// * `Ok(Snapshot)` - The consolidated universe map
/// * `Err(MapError)` - Any resource stayed unfetchable after retries
pub async fn run_fetch(config: &Config) -> Result<Snapshot, MapError> {
    let base_url = Url::parse(&format!("https://{}", config.api.host))
        .map_err(|e| ConfigError::InvalidHost(e.to_string()))?;

    let coordinator = Coordinator::new(base_url, &config.api.version, config.fetch.clone());
    coordinator.run().await
}
