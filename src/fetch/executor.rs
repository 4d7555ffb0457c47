//! Request executor with retry, backoff, and reconnect policy
//!
//! One executor backs one worker. It turns "fetch resource by ID" into a
//! sequence of paced HTTP attempts:
//! - up to `max-retries` attempts per resource
//! - rate-limit spacing before every attempt except the reconnect one
//! - before the second attempt, a longer pause and a connection rebuild
//!   (recovers from stale or half-closed connections)
//! - a `retry-timeout-secs` pause after each failed attempt but the last
//!
//! Bad statuses, unparseable bodies, and transport errors are all soft:
//! they are logged and retried, and become visible to the caller only
//! when every attempt is spent.

use crate::config::FetchConfig;
use crate::fetch::rate_limit::RateLimiter;
use crate::fetch::transport::Transport;
use crate::model::{ResourceId, ResourceKind, ResourceRecord};
use crate::FetchError;
use serde_json::Value;
use std::time::Duration;

/// Executes individual fetches against the remote API
pub struct RequestExecutor<T: Transport> {
    transport: T,
    limiter: RateLimiter,
    version: String,
    max_retries: u32,
    retry_timeout: Duration,
    reopen_timeout: Duration,
}

impl<T: Transport> RequestExecutor<T> {
    /// Creates an executor over the given transport
    ///
    /// # Arguments
    ///
    /// * `transport` - The connection this executor owns exclusively
    /// * `version` - API version segment used in every request path
    /// * `config` - Retry and rate-limit tuning
    pub fn new(transport: T, version: &str, config: &FetchConfig) -> Self {
        Self {
            transport,
            limiter: RateLimiter::new(config.request_rate),
            version: version.to_string(),
            max_retries: config.max_retries,
            retry_timeout: Duration::from_secs_f64(config.retry_timeout_secs),
            reopen_timeout: Duration::from_secs_f64(config.reopen_timeout_secs),
        }
    }

    /// Fetches the full ID listing for a resource kind
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ResourceId>)` - The listed IDs, in server order
    /// * `Err(FetchError)` - Retries exhausted, or the listing was not an
    ///   array of integer IDs
    pub async fn fetch_index(&mut self, kind: ResourceKind) -> Result<Vec<ResourceId>, FetchError> {
        let path = kind.path_segment().to_string();
        let value = self.fetch_json(&path).await?;
        serde_json::from_value(value).map_err(|_| FetchError::UnexpectedShape { path })
    }

    /// Fetches one resource record by ID
    ///
    /// # Returns
    ///
    /// * `Ok(ResourceRecord)` - The fetched document
    /// * `Err(FetchError)` - Retries exhausted, or the response was not a
    ///   JSON object
    pub async fn fetch_record(
        &mut self,
        kind: ResourceKind,
        id: ResourceId,
    ) -> Result<ResourceRecord, FetchError> {
        let path = format!("{}/{}", kind.path_segment(), id);
        let value = self.fetch_json(&path).await?;
        serde_json::from_value(value).map_err(|_| FetchError::UnexpectedShape { path })
    }

    /// Read access to the owned transport, for assertions on fakes
    #[cfg(test)]
    pub(crate) fn transport(&self) -> &T {
        &self.transport
    }

    /// Shared retry core: fetches a path and parses the body as JSON
    ///
    /// The request target is `/<version>/<path>/`, matching the remote
    /// API's trailing-slash convention.
    async fn fetch_json(&mut self, path: &str) -> Result<Value, FetchError> {
        let url_path = format!("/{}/{}/", self.version, path);

        for attempt in 0..self.max_retries {
            if attempt == 1 {
                // Second attempt: assume the connection went stale and
                // rebuild it instead of just pacing.
                tokio::time::sleep(self.reopen_timeout).await;
                if let Err(e) = self.transport.reconnect() {
                    tracing::warn!("reconnect failed for {}: {}", url_path, e);
                }
            } else {
                self.limiter.throttle().await;
            }

            match self.transport.request(&url_path).await {
                Ok(response) if response.status == 200 => {
                    match serde_json::from_slice(&response.body) {
                        Ok(value) => return Ok(value),
                        Err(e) => tracing::warn!("json error for {}: {}", url_path, e),
                    }
                }
                Ok(response) => {
                    tracing::warn!("bad response status for {}: {}", url_path, response.status)
                }
                Err(e) => tracing::warn!("http error for {}: {}", url_path, e),
            }

            if attempt + 1 < self.max_retries {
                tokio::time::sleep(self.retry_timeout).await;
            }
        }

        tracing::error!("fetch failed for {}", url_path);
        Err(FetchError::Exhausted { path: url_path })
    }
}
