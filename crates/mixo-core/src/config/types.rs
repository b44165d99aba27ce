//! Configuration type definitions for the Mixo client.
//!
//! `MixoConfig` is what lives in the TOML files. `ClientConfig` is the
//! resolved, explicit configuration handed to the HTTP gateway at
//! construction time.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::generation::GenerationMode;
use crate::list::RefreshPolicy;

/// Main configuration loaded from TOML config files.
///
/// Every leaf is optional so that merging can tell "unset" apart from
/// "explicitly set to the default".
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct MixoConfig {
    /// Remote service connection settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Recipe list behavior
    #[serde(default)]
    pub list: ListConfig,

    /// Generation request settings
    #[serde(default)]
    pub generation: GenerationConfig,
}

/// Connection settings for the recipe service.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ApiConfig {
    /// Base URL of the service, e.g. `http://127.0.0.1:8000`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds.
    /// Default: 30 seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// CSRF token sent as `X-CSRFToken` on every request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub csrf_token: Option<String>,

    /// Extra headers attached to every request.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}

/// Recipe list settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ListConfig {
    /// Delay before a criteria change triggers a fetch.
    /// Default: 0 (fetch immediately).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debounce_ms: Option<u64>,
}

/// Generation request settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct GenerationConfig {
    /// Which generation endpoint to call.
    /// Default: `with-media`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<GenerationMode>,
}

/// Resolved connection configuration passed to the gateway at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL without trailing slash.
    pub base_url: String,
    /// Headers attached to every request (CSRF token excluded).
    pub default_headers: BTreeMap<String, String>,
    /// CSRF token, if the hosting environment provides one.
    pub csrf_token: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a config for `base_url` with default timeout and no extra headers.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            default_headers: BTreeMap::new(),
            csrf_token: None,
            timeout: Duration::from_secs(super::defaults::DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Join an API path onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl MixoConfig {
    /// Resolve the connection settings, filling unset values with defaults.
    pub fn client_config(&self) -> ClientConfig {
        let base_url = self
            .api
            .base_url
            .clone()
            .unwrap_or_else(super::defaults::default_base_url);

        let mut client = ClientConfig::new(base_url);
        client.default_headers = self.api.headers.clone();
        client.csrf_token = self.api.csrf_token.clone();
        client.timeout = Duration::from_secs(
            self.api
                .timeout_secs
                .unwrap_or(super::defaults::DEFAULT_TIMEOUT_SECS),
        );
        client
    }

    /// Resolve the list refresh policy.
    pub fn refresh_policy(&self) -> RefreshPolicy {
        RefreshPolicy {
            debounce: Duration::from_millis(
                self.list
                    .debounce_ms
                    .unwrap_or(super::defaults::DEFAULT_DEBOUNCE_MS),
            ),
        }
    }

    /// Resolve the generation endpoint mode.
    pub fn generation_mode(&self) -> GenerationMode {
        self.generation.mode.unwrap_or_default()
    }
}
