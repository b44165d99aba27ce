//! Configuration loading and merging logic.
//!
//! Missing config files are expected and skipped. Files that exist but fail
//! to parse are hard errors: silently falling back to defaults would point
//! the client at the wrong server.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::defaults::{ENV_API_URL, ENV_CSRF_TOKEN};
use crate::config::types::{ApiConfig, GenerationConfig, ListConfig, MixoConfig};
use crate::config::validation::validate_config;
use crate::errors::ConfigError;

/// Load configuration from the hierarchy of config files and the environment.
///
/// Loads and merges configuration from:
/// 1. Default values
/// 2. User config (`~/.mixo/config.toml`)
/// 3. Project config (`./.mixo/config.toml`)
/// 4. `MIXO_API_URL` / `MIXO_CSRF_TOKEN`
///
/// # Errors
///
/// Returns an error if a config file cannot be parsed or validation fails.
pub fn load_hierarchy() -> Result<MixoConfig, ConfigError> {
    let user_path = user_config_path();
    let project_path = std::env::current_dir()
        .ok()
        .map(|dir| dir.join(".mixo").join("config.toml"));

    let config = load_from_paths(user_path.as_deref(), project_path.as_deref())?;
    let config = apply_env_overrides(config, |key| std::env::var(key).ok());

    validate_config(&config)?;

    info!(
        event = "core.config.load_completed",
        base_url = %config.client_config().base_url
    );

    Ok(config)
}

/// Load and merge the user and project config files, in that order.
///
/// Paths that are `None` or do not exist are skipped. No validation is
/// performed here.
pub fn load_from_paths(
    user_path: Option<&Path>,
    project_path: Option<&Path>,
) -> Result<MixoConfig, ConfigError> {
    let mut config = MixoConfig::default();

    for path in [user_path, project_path].into_iter().flatten() {
        if let Some(file_config) = load_config_file(path)? {
            config = merge_configs(config, file_config);
        }
    }

    Ok(config)
}

/// Load a configuration file, returning `Ok(None)` if it does not exist.
pub fn load_config_file(path: &Path) -> Result<Option<MixoConfig>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(event = "core.config.file_missing", path = %path.display());
            return Ok(None);
        }
        Err(e) => {
            return Err(ConfigError::ConfigReadError {
                path: path.display().to_string(),
                message: e.to_string(),
            });
        }
    };

    let config: MixoConfig =
        toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
            message: format!("'{}': {}", path.display(), e),
        })?;

    debug!(event = "core.config.file_loaded", path = %path.display());

    Ok(Some(config))
}

/// Merge two configurations, with `override_config` taking precedence.
///
/// Optional fields are replaced only when the override sets them. Header maps
/// are merged key by key.
pub fn merge_configs(base: MixoConfig, override_config: MixoConfig) -> MixoConfig {
    MixoConfig {
        api: ApiConfig {
            base_url: override_config.api.base_url.or(base.api.base_url),
            timeout_secs: override_config.api.timeout_secs.or(base.api.timeout_secs),
            csrf_token: override_config.api.csrf_token.or(base.api.csrf_token),
            headers: {
                let mut merged = base.api.headers;
                merged.extend(override_config.api.headers);
                merged
            },
        },
        list: ListConfig {
            debounce_ms: override_config.list.debounce_ms.or(base.list.debounce_ms),
        },
        generation: GenerationConfig {
            mode: override_config.generation.mode.or(base.generation.mode),
        },
    }
}

/// Apply environment overrides using the given variable lookup.
///
/// Empty values are ignored.
pub fn apply_env_overrides<F>(mut config: MixoConfig, lookup: F) -> MixoConfig
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    if let Some(url) = non_empty(ENV_API_URL) {
        config.api.base_url = Some(url);
    }
    if let Some(token) = non_empty(ENV_CSRF_TOKEN) {
        config.api.csrf_token = Some(token);
    }

    config
}

/// Path of the user-level config file, if a home directory exists.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".mixo").join("config.toml"))
}
