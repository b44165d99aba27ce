//! mixo-core: client library for the Mixo cocktail recipe service
//!
//! Talks to the recipe service over HTTP and keeps a local, consistent view
//! of the user's recipes. Used by the `mixo` CLI.
//!
//! # Main Entry Points
//!
//! - [`api`] - Gateway to the remote service (envelope in, envelope out)
//! - [`list`] - Authoritative recipe list, filter criteria and derived view
//! - [`mutations`] - Favorite toggle and confirmed delete
//! - [`generation`] - Validated generation requests
//! - [`state`] - Change notifications and the assembled [`AppState`]
//! - [`config`] - Configuration management

pub mod api;
pub mod config;
pub mod errors;
pub mod events;
pub mod generation;
pub mod list;
pub mod logging;
pub mod mutations;
pub mod recipes;
pub mod state;

// Re-export commonly used types at crate root for convenience
pub use api::{ApiError, ApiOperation, ApiResponse, HttpGateway, ListQuery, RecipeGateway};
pub use config::{ClientConfig, MixoConfig};
pub use errors::{ConfigError, MixoError, MixoResult};
pub use generation::{GenerationController, GenerationError, GenerationMode, GenerationPhase};
pub use list::{FetchOutcome, RecipeList, RefreshPolicy, ViewStatus};
pub use mutations::{MutationController, MutationError, MutationOutcome, OperationErrors};
pub use recipes::{FilterCriteria, FilterMode, MusicSource, MusicSuggestion, Recipe, RecipeId};
pub use state::{AppState, EventBus, RecipeEvent};

#[cfg(any(test, feature = "test-support"))]
pub use api::FakeGateway;

// Re-export logging initialization
pub use logging::init_logging;
