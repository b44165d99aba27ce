//! Configuration validation.

use crate::config::types::MixoConfig;
use crate::errors::ConfigError;

/// Validate a merged configuration.
///
/// Checks that the base URL uses http(s), the timeout is non-zero and header
/// names are non-empty.
pub fn validate_config(config: &MixoConfig) -> Result<(), ConfigError> {
    if let Some(url) = &config.api.base_url {
        let trimmed = url.trim();
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl { url: url.clone() });
        }
    }

    if config.api.timeout_secs == Some(0) {
        return Err(ConfigError::InvalidConfiguration {
            message: "api.timeout_secs must be greater than 0".to_string(),
        });
    }

    if config.api.headers.keys().any(|name| name.trim().is_empty()) {
        return Err(ConfigError::InvalidConfiguration {
            message: "api.headers contains an empty header name".to_string(),
        });
    }

    Ok(())
}
