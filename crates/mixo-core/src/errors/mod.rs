use std::error::Error;

/// Base trait for all application errors
pub trait MixoError: Error + Send + Sync + 'static {
    /// Error code for programmatic handling
    fn error_code(&self) -> &'static str;

    /// Whether this error should be logged as an error or warning
    fn is_user_error(&self) -> bool {
        false
    }
}

/// Common result type for the application
pub type MixoResult<T> = Result<T, Box<dyn MixoError>>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {message}")]
    ConfigReadError { path: String, message: String },

    #[error("Failed to parse config file: {message}")]
    ConfigParseError { message: String },

    #[error("Invalid base URL '{url}': must start with http:// or https://")]
    InvalidBaseUrl { url: String },

    #[error("Invalid generation mode '{mode}'. Supported modes: simple, with-media")]
    InvalidGenerationMode { mode: String },

    #[error("Invalid filter '{filter}'. Valid: all, favorites, recent")]
    InvalidFilterMode { filter: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("IO error reading config: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl MixoError for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            ConfigError::ConfigReadError { .. } => "CONFIG_READ_ERROR",
            ConfigError::ConfigParseError { .. } => "CONFIG_PARSE_ERROR",
            ConfigError::InvalidBaseUrl { .. } => "INVALID_BASE_URL",
            ConfigError::InvalidGenerationMode { .. } => "INVALID_GENERATION_MODE",
            ConfigError::InvalidFilterMode { .. } => "INVALID_FILTER_MODE",
            ConfigError::InvalidConfiguration { .. } => "INVALID_CONFIGURATION",
            ConfigError::IoError { .. } => "CONFIG_IO_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            ConfigError::ConfigParseError { .. }
                | ConfigError::InvalidBaseUrl { .. }
                | ConfigError::InvalidGenerationMode { .. }
                | ConfigError::InvalidFilterMode { .. }
                | ConfigError::InvalidConfiguration { .. }
        )
    }
}
