use crate::config::types::{ApiConfig, Config, FetchConfig, OutputConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_api_config(&config.api)?;
    validate_fetch_config(&config.fetch)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates API endpoint configuration
fn validate_api_config(config: &ApiConfig) -> Result<(), ConfigError> {
    validate_host(&config.host)?;

    if config.version.is_empty() {
        return Err(ConfigError::Validation(
            "api.version cannot be empty".to_string(),
        ));
    }

    if config.version.contains('/') {
        return Err(ConfigError::Validation(format!(
            "api.version must be a single path segment, got '{}'",
            config.version
        )));
    }

    Ok(())
}

/// Validates fetch engine tuning
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.max_retries < 1 {
        return Err(ConfigError::Validation(format!(
            "max-retries must be >= 1, got {}",
            config.max_retries
        )));
    }

    if !config.retry_timeout_secs.is_finite() || config.retry_timeout_secs < 0.0 {
        return Err(ConfigError::Validation(format!(
            "retry-timeout-secs must be a non-negative number, got {}",
            config.retry_timeout_secs
        )));
    }

    if !config.reopen_timeout_secs.is_finite() || config.reopen_timeout_secs < 0.0 {
        return Err(ConfigError::Validation(format!(
            "reopen-timeout-secs must be a non-negative number, got {}",
            config.reopen_timeout_secs
        )));
    }

    if !config.request_rate.is_finite() || config.request_rate <= 0.0 {
        return Err(ConfigError::Validation(format!(
            "request-rate must be a positive number, got {}",
            config.request_rate
        )));
    }

    // The aggregate rate against the remote service is workers * request-rate.
    if config.workers < 1 || config.workers > 100 {
        return Err(ConfigError::Validation(format!(
            "workers must be between 1 and 100, got {}",
            config.workers
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.snapshot_path.is_empty() {
        return Err(ConfigError::Validation(
            "snapshot-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates an API hostname, with an optional port suffix
fn validate_host(host: &str) -> Result<(), ConfigError> {
    if host.is_empty() {
        return Err(ConfigError::InvalidHost("host cannot be empty".to_string()));
    }

    if host.contains("://") {
        return Err(ConfigError::InvalidHost(format!(
            "host must not include a scheme, got '{}'",
            host
        )));
    }

    // Split off an optional :port suffix before checking the name itself.
    let (name, port) = match host.rsplit_once(':') {
        Some((name, port)) => (name, Some(port)),
        None => (host, None),
    };

    if let Some(port) = port {
        if port.parse::<u16>().is_err() {
            return Err(ConfigError::InvalidHost(format!(
                "invalid port in host '{}'",
                host
            )));
        }
    }

    if name.is_empty() {
        return Err(ConfigError::InvalidHost(format!(
            "host '{}' has no hostname part",
            host
        )));
    }

    if !name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '.' || c == '-')
    {
        return Err(ConfigError::InvalidHost(format!(
            "host '{}' contains invalid characters",
            name
        )));
    }

    if name.starts_with('.') || name.ends_with('.') || name.starts_with('-') || name.ends_with('-')
    {
        return Err(ConfigError::InvalidHost(format!(
            "host '{}' cannot start or end with '.' or '-'",
            name
        )));
    }

    if name.contains("..") {
        return Err(ConfigError::InvalidHost(format!(
            "host '{}' cannot contain consecutive dots",
            name
        )));
    }

    Ok(())
}
