//! Data model for the universe map
//!
//! This module defines the core types the fetch engine moves around:
//! - Resource identifiers and kinds (systems, stargates)
//! - Fetched records (opaque JSON documents with a couple of known fields)
//! - Per-worker and global stores
//! - The final snapshot document

mod id;
mod record;

pub use id::{ResourceId, ResourceKind};
pub use record::ResourceRecord;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from resource ID to its fetched record.
///
/// Each worker owns two private stores during the fetch phase; the
/// aggregator merges them into the global stores after every worker has
/// joined. Keys serialize as strings in the snapshot document, and the
/// ordered map keeps the written output deterministic.
pub type ResourceStore = BTreeMap<ResourceId, ResourceRecord>;

/// The consolidated result of a complete fetch run
///
/// Produced exactly once, after all workers have terminated and their
/// private stores have been merged. Immutable from then on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// All fetched systems, keyed by system ID
    pub systems: ResourceStore,

    /// All stargates referenced by those systems, keyed by stargate ID
    pub stargates: ResourceStore,
}

impl Snapshot {
    /// Creates an empty snapshot
    pub fn new() -> Self {
        Self {
            systems: ResourceStore::new(),
            stargates: ResourceStore::new(),
        }
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::new()
    }
}

/// A contiguous run of system IDs assigned to exactly one worker
///
/// Slices are produced by the partitioner; concatenating them in order
/// reproduces the full ID list, so no two workers ever fetch the same
/// system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkSlice {
    /// The system IDs this worker is responsible for, in fetch order
    pub ids: Vec<ResourceId>,
}

impl WorkSlice {
    /// Creates a work slice from a list of system IDs
    pub fn new(ids: Vec<ResourceId>) -> Self {
        Self { ids }
    }

    /// Returns the number of IDs in this slice
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns whether this slice is empty
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
