//! Gateway to the remote recipe service.
//!
//! Every operation returns an [`ApiResponse`] envelope. Nothing fails across
//! this boundary: transport errors, non-2xx statuses and undecodable bodies
//! are all folded into `success: false` with a user-facing message.

pub mod envelope;
pub mod errors;
#[cfg(any(test, feature = "test-support"))]
pub mod fake;
pub mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::generation::GenerationMode;
use crate::recipes::{FilterCriteria, FilterMode, Recipe, RecipeId};

pub use envelope::{ApiOperation, ApiResponse};
pub use errors::ApiError;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeGateway;
pub use http::HttpGateway;

/// Query parameters for the list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

impl ListQuery {
    /// Build the query the list view sends for `criteria`.
    ///
    /// Empty search and the `all` filter are omitted.
    pub fn from_criteria(criteria: &FilterCriteria) -> Self {
        Self {
            search: criteria.search_query().map(str::to_string),
            filter: criteria.mode.as_query().map(|_| criteria.mode),
            page: Some(criteria.page),
        }
    }
}

/// Body returned by the favorite endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteState {
    pub is_favorite: bool,
}

/// Operations offered by the recipe service.
///
/// Implementations must never panic or return early with an error: every
/// outcome is reported through the envelope.
#[async_trait]
pub trait RecipeGateway: Send + Sync {
    /// Generate and store a new recipe from free-text `request_text`.
    async fn create_recipe(&self, request_text: &str, mode: GenerationMode)
    -> ApiResponse<Recipe>;

    async fn list_recipes(&self, query: &ListQuery) -> ApiResponse<Vec<Recipe>>;

    async fn get_recipe(&self, id: RecipeId) -> ApiResponse<Recipe>;

    /// Flip the favorite flag server-side and return the new state.
    ///
    /// Not idempotent: each call flips.
    async fn set_favorite(&self, id: RecipeId) -> ApiResponse<FavoriteState>;

    async fn delete_recipe(&self, id: RecipeId) -> ApiResponse<()>;
}
