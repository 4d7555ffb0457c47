//! Fetch worker
//!
//! One worker owns one executor (and through it one connection) plus two
//! private stores, and runs a slice of the system ID list to completion:
//! first every system in slice order, then every stargate those systems
//! reference. Nothing here is shared with other workers; the private
//! stores go back to the coordinator for the single merge step.

use crate::fetch::executor::RequestExecutor;
use crate::fetch::transport::Transport;
use crate::model::{ResourceKind, ResourceStore, WorkSlice};
use crate::FetchError;

/// The private stores a worker hands back after finishing its slice
#[derive(Debug, Default)]
pub struct WorkerOutput {
    /// Systems fetched by this worker, keyed by ID
    pub systems: ResourceStore,

    /// Stargates referenced by those systems, keyed by ID
    pub stargates: ResourceStore,
}

/// A single fetch worker
pub struct Worker<T: Transport> {
    executor: RequestExecutor<T>,
}

impl<T: Transport> Worker<T> {
    /// Creates a worker around an executor it will own exclusively
    pub fn new(executor: RequestExecutor<T>) -> Self {
        Self { executor }
    }

    /// Fetches every system in the slice, then their stargates
    ///
    /// Systems are fetched in slice order and logged by name as they
    /// land. Stargates follow in discovery order: systems in the order
    /// they were fetched, references in the order each record lists
    /// them. The first executor error aborts the worker; the coordinator
    /// treats that as fatal for the whole run.
    ///
    /// # Returns
    ///
    /// * `Ok(WorkerOutput)` - Both private stores, fully populated
    /// * `Err(FetchError)` - A resource stayed unfetchable after retries
    pub async fn run(&mut self, slice: WorkSlice) -> Result<WorkerOutput, FetchError> {
        let mut output = WorkerOutput::default();

        // Grab the systems.
        for &system_id in &slice.ids {
            let system = self
                .executor
                .fetch_record(ResourceKind::System, system_id)
                .await?;
            match system.label() {
                Some(name) => tracing::info!("{}", name),
                None => tracing::info!("{}", system_id),
            }
            output.systems.insert(system_id, system);
        }

        // Grab the stargates for each system. Iterating the slice again
        // preserves the order systems were fetched in.
        for &system_id in &slice.ids {
            let system = &output.systems[&system_id];
            let label = system
                .label()
                .map(str::to_string)
                .unwrap_or_else(|| system_id.to_string());

            for stargate_id in system.stargate_refs() {
                let stargate = self
                    .executor
                    .fetch_record(ResourceKind::Stargate, stargate_id)
                    .await?;
                tracing::info!("{} -> {}", label, stargate_id);
                output.stargates.insert(stargate_id, stargate);
            }
        }

        Ok(output)
    }
}
