//! Default values for configuration types.

/// Base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// List re-fetch debounce in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 0;

/// Environment variable overriding the base URL.
pub const ENV_API_URL: &str = "MIXO_API_URL";

/// Environment variable providing the CSRF token.
pub const ENV_CSRF_TOKEN: &str = "MIXO_CSRF_TOKEN";

/// Returns the default base URL as an owned string.
pub fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
