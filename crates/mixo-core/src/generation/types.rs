use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Which generation endpoint to call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GenerationMode {
    /// Recipe only.
    Simple,
    /// Recipe plus image prompt and music suggestions.
    #[default]
    WithMedia,
}

impl GenerationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationMode::Simple => "simple",
            GenerationMode::WithMedia => "with-media",
        }
    }

    /// Endpoint path for this mode.
    pub fn path(&self) -> &'static str {
        match self {
            GenerationMode::Simple => "/api/generate-cocktail/",
            GenerationMode::WithMedia => "/api/generate-cocktail-with-media/",
        }
    }
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GenerationMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(GenerationMode::Simple),
            "with-media" | "media" => Ok(GenerationMode::WithMedia),
            _ => Err(ConfigError::InvalidGenerationMode {
                mode: s.to_string(),
            }),
        }
    }
}

/// Where a generation request stands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GenerationPhase {
    /// Ready for a submission. A successful result is kept separately.
    #[default]
    Idle,
    Submitting,
    /// The last submission failed; cleared by the next attempt.
    Failed { error: String },
}

impl GenerationPhase {
    pub fn is_submitting(&self) -> bool {
        matches!(self, GenerationPhase::Submitting)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            GenerationPhase::Failed { error } => Some(error),
            _ => None,
        }
    }
}
