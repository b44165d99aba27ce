//! # Configuration System
//!
//! Hierarchical TOML configuration for the Mixo client.
//!
//! ## Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.mixo/config.toml` (global user preferences)
//! 3. **Project config** - `./.mixo/config.toml` (project-specific overrides)
//! 4. **Environment** - `MIXO_API_URL`, `MIXO_CSRF_TOKEN`
//! 5. **CLI arguments** - Command-line flags (highest priority)
//!
//! ## Usage Example
//!
//! ```toml
//! # ~/.mixo/config.toml
//! [api]
//! base_url = "https://mixo.example.com"
//! timeout_secs = 60
//!
//! [api.headers]
//! Accept-Language = "fr-FR"
//!
//! [list]
//! debounce_ms = 250
//!
//! [generation]
//! mode = "simple"
//! ```
//!
//! ## Loading Configuration
//!
//! ```rust,no_run
//! use mixo_core::config::MixoConfig;
//!
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = MixoConfig::load_hierarchy()?;
//!     let client_config = config.client_config();
//!     println!("talking to {}", client_config.base_url);
//!     Ok(())
//! }
//! ```

pub mod defaults;
pub mod loading;
pub mod types;
pub mod validation;

pub use types::{ApiConfig, ClientConfig, GenerationConfig, ListConfig, MixoConfig};
pub use validation::validate_config;

impl MixoConfig {
    /// Load configuration from the hierarchy of config files and environment.
    ///
    /// See [`loading::load_hierarchy`] for details.
    pub fn load_hierarchy() -> Result<Self, crate::errors::ConfigError> {
        loading::load_hierarchy()
    }

    /// Validate the configuration.
    ///
    /// See [`validation::validate_config`] for details.
    pub fn validate(&self) -> Result<(), crate::errors::ConfigError> {
        validation::validate_config(self)
    }
}
