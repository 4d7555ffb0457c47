//! Configuration loading and validation
//!
//! All runtime tuning comes from a single TOML file with three tables:
//! `[api]` (endpoint host and version), `[fetch]` (retry, rate, and
//! worker-pool tuning), and `[output]` (snapshot destination). Loading
//! parses and validates in one step, and a SHA-256 content hash ties
//! each run's logs to the exact file it ran with.

mod parser;
mod types;
mod validation;

pub use parser::{load_config, load_config_with_hash};
pub use types::{ApiConfig, Config, FetchConfig, OutputConfig};
