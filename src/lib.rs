//! Starmap: a universe map snapshot fetcher
//!
//! This crate fetches the full graph of solar systems and the stargates
//! they reference from a read-only HTTP/JSON map API, using a bounded pool
//! of parallel workers, and writes both collections into a single JSON
//! snapshot document.

pub mod config;
pub mod fetch;
pub mod model;
pub mod output;

use thiserror::Error;

/// Main error type for starmap operations
#[derive(Debug, Error)]
pub enum MapError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Worker task failed: {0}")]
    Worker(String),

    #[error("Snapshot serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid API host: {0}")]
    InvalidHost(String),
}

/// Errors produced by the request executor
#[derive(Debug, Error)]
pub enum FetchError {
    /// Retries were exhausted for one resource. Fatal for the whole run:
    /// a snapshot with silently missing nodes is worse than no snapshot.
    #[error("fetch failed for {path}")]
    Exhausted { path: String },

    /// The response parsed as JSON but did not have the expected shape.
    #[error("unexpected response shape for {path}")]
    UnexpectedShape { path: String },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

/// Result type alias for starmap operations
pub type Result<T> = std::result::Result<T, MapError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use model::{ResourceId, ResourceKind, ResourceRecord, ResourceStore, Snapshot};
