//! Output module for persisting fetch results
//!
//! This module handles writing the merged snapshot to disk as a single
//! JSON document.

mod snapshot;

pub use snapshot::write_snapshot;
