//! Fetch coordination: fan-out, join barrier, merge
//!
//! The coordinator discovers the system list, partitions it, spawns one
//! worker task per slice, and waits for all of them at a single join
//! barrier. Only after every worker has terminated successfully does the
//! merge run, so the global snapshot is never observed half-built. A
//! single worker failure aborts the remaining tasks and fails the run:
//! a snapshot with silently missing systems would be worse than none.

use crate::config::FetchConfig;
use crate::fetch::aggregate::merge_outputs;
use crate::fetch::executor::RequestExecutor;
use crate::fetch::partition::partition;
use crate::fetch::transport::HttpTransport;
use crate::fetch::worker::Worker;
use crate::model::{ResourceKind, Snapshot};
use crate::{FetchError, MapError};
use tokio::task::JoinSet;
use url::Url;

/// Orchestrates one complete fetch run
pub struct Coordinator {
    base_url: Url,
    version: String,
    fetch: FetchConfig,
}

impl Coordinator {
    /// Creates a coordinator for the given endpoint and tuning
    ///
    /// # Arguments
    ///
    /// * `base_url` - Scheme and host of the remote API
    /// * `version` - API version segment for every request path
    /// * `fetch` - Retry, rate, and worker-count configuration
    pub fn new(base_url: Url, version: &str, fetch: FetchConfig) -> Self {
        Self {
            base_url,
            version: version.to_string(),
            fetch,
        }
    }

    /// Runs the full fetch and returns the merged snapshot
    ///
    /// # Returns
    ///
    /// * `Ok(Snapshot)` - Every listed system and every referenced
    ///   stargate, fetched and merged
    /// * `Err(MapError)` - The listing or any single resource stayed
    ///   unfetchable after retries, or a worker task died
    pub async fn run(&self) -> Result<Snapshot, MapError> {
        // Discover the work list with a coordinator-owned executor.
        let mut index_executor = self.new_executor()?;
        let system_ids = index_executor.fetch_index(ResourceKind::System).await?;
        tracing::info!("{} systems", system_ids.len());

        let slices = partition(&system_ids, self.fetch.workers as usize);
        tracing::info!("spawning {} workers", slices.len());

        // One task per slice, each with its own executor and connection.
        // No state is shared during the parallel phase.
        let mut tasks = JoinSet::new();
        for slice in slices {
            let executor = self.new_executor()?;
            tasks.spawn(async move { Worker::new(executor).run(slice).await });
        }

        let mut outputs = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok(output)) => outputs.push(output),
                Ok(Err(e)) => {
                    // One exhausted resource fails the run; stop waiting
                    // on the rest.
                    tasks.abort_all();
                    return Err(e.into());
                }
                Err(e) => {
                    tasks.abort_all();
                    return Err(MapError::Worker(e.to_string()));
                }
            }
        }

        // Every worker has joined; the single merge step runs alone.
        Ok(merge_outputs(outputs))
    }

    /// Builds an executor with its own fresh transport
    fn new_executor(&self) -> Result<RequestExecutor<HttpTransport>, MapError> {
        let transport =
            HttpTransport::new(self.base_url.clone()).map_err(FetchError::Client)?;
        Ok(RequestExecutor::new(transport, &self.version, &self.fetch))
    }
}
