use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigResult;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads, parses, and validates a TOML configuration file
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use starmap::config::load_config;
///
/// let config = load_config(Path::new("starmap.toml")).unwrap();
/// println!("fetching from {}", config.api.host);
/// ```
pub fn load_config(path: &Path) -> ConfigResult<Config> {
    Ok(load_config_with_hash(path)?.0)
}

/// Loads a configuration file along with the hash of its content
///
/// The hash is logged at startup so any snapshot can be traced back to
/// the exact configuration that produced it. The file is read once;
/// parsing, validation, and hashing all work from the same content.
///
/// # Returns
///
/// * `Ok((Config, String))` - The validated configuration and the
///   hex-encoded SHA-256 of the raw file content
/// * `Err(ConfigError)` - The file was unreadable, not TOML, or invalid
pub fn load_config_with_hash(path: &Path) -> ConfigResult<(Config, String)> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    validate(&config)?;
    Ok((config, content_hash(&content)))
}

fn content_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConfigError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_full_config_parses() {
        let file = write_config(
            r#"
[api]
host = "esi.evetech.net"
version = "v4"

[fetch]
max-retries = 3
retry-timeout-secs = 2.5
reopen-timeout-secs = 4.0
request-rate = 10.0
workers = 8

[output]
snapshot-path = "./universe-map.json"
"#,
        );

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.api.host, "esi.evetech.net");
        assert_eq!(config.api.version, "v4");
        assert_eq!(config.fetch.max_retries, 3);
        assert_eq!(config.fetch.retry_timeout_secs, 2.5);
        assert_eq!(config.fetch.request_rate, 10.0);
        assert_eq!(config.fetch.workers, 8);
        assert_eq!(config.output.snapshot_path, "./universe-map.json");
    }

    #[test]
    fn test_minimal_config_fills_defaults() {
        let file = write_config(
            r#"
[api]
host = "esi.evetech.net"

[output]
snapshot-path = "./universe-map.json"
"#,
        );

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.api.version, "latest");
        assert_eq!(config.fetch.max_retries, 5);
        assert_eq!(config.fetch.retry_timeout_secs, 5.0);
        assert_eq!(config.fetch.reopen_timeout_secs, 5.0);
        assert_eq!(config.fetch.request_rate, 20.0);
        assert_eq!(config.fetch.workers, 20);
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_config(Path::new("/nonexistent/starmap.toml")),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_not_toml() {
        let file = write_config("{ this is not toml");
        assert!(matches!(
            load_config(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_invalid_values_rejected_on_load() {
        let file = write_config(
            r#"
[api]
host = "esi.evetech.net"

[fetch]
workers = 0

[output]
snapshot-path = "./universe-map.json"
"#,
        );

        assert!(matches!(
            load_config(file.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_hash_is_stable_and_content_sensitive() {
        // 64 hex chars, identical for identical content, different otherwise.
        let a = content_hash("[api]\nhost = \"a\"\n");
        let b = content_hash("[api]\nhost = \"a\"\n");
        let c = content_hash("[api]\nhost = \"b\"\n");

        assert_eq!(a.len(), 64);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_load_with_hash_matches_content() {
        let content = r#"
[api]
host = "esi.evetech.net"

[output]
snapshot-path = "./out.json"
"#;
        let file = write_config(content);

        let (_, hash) = load_config_with_hash(file.path()).unwrap();
        assert_eq!(hash, content_hash(content));
    }
}
