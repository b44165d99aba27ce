//! In-memory gateway for tests.
//!
//! Behaves like the real service: ids are assigned on create, favorite flips
//! server-side, list applies search and filter. Individual operations can be
//! made to fail and every call is counted.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use crate::api::envelope::{ApiOperation, ApiResponse};
use crate::api::{FavoriteState, ListQuery, RecipeGateway};
use crate::generation::GenerationMode;
use crate::recipes::{FilterCriteria, MusicSuggestion, Recipe, RecipeId, derive_view};

#[derive(Debug, Default)]
struct FakeState {
    recipes: Vec<Recipe>,
    next_id: RecipeId,
    failing: HashSet<ApiOperation>,
    calls: Vec<(ApiOperation, Option<RecipeId>)>,
}

#[derive(Debug, Default)]
pub struct FakeGateway {
    state: Mutex<FakeState>,
    latency: Duration,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::with_recipes(Vec::new())
    }

    /// Seed the fake server with `recipes`; new ids continue after the highest one.
    pub fn with_recipes(recipes: Vec<Recipe>) -> Self {
        let next_id = recipes.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        Self {
            state: Mutex::new(FakeState {
                recipes,
                next_id,
                ..FakeState::default()
            }),
            latency: Duration::ZERO,
        }
    }

    /// Delay every response by `latency` (tokio time).
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Make every subsequent `operation` fail with a server rejection.
    pub fn fail(&self, operation: ApiOperation) {
        self.lock().failing.insert(operation);
    }

    pub fn recover(&self, operation: ApiOperation) {
        self.lock().failing.remove(&operation);
    }

    /// Number of calls made for `operation`.
    pub fn calls(&self, operation: ApiOperation) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|(op, _)| *op == operation)
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.lock().calls.len()
    }

    /// Recipes currently stored server-side.
    pub fn stored(&self) -> Vec<Recipe> {
        self.lock().recipes.clone()
    }

    /// A plain recipe created now, for seeding.
    pub fn recipe(id: RecipeId, name: &str) -> Recipe {
        Recipe {
            id,
            name: name.to_string(),
            description: format!("{} served cold", name),
            ingredients: "4 cl spirit\n2 cl citrus\nIce".to_string(),
            musical_ambiance: "Lounge".to_string(),
            image_prompt: None,
            music_suggestions: None,
            user_request: format!("Something like a {}", name),
            created_at: Utc::now().to_rfc3339(),
            is_favorite: false,
        }
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record the call and report whether it should fail.
    async fn begin(&self, operation: ApiOperation, id: Option<RecipeId>) -> bool {
        let failing = {
            let mut state = self.lock();
            state.calls.push((operation, id));
            state.failing.contains(&operation)
        };
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        failing
    }
}

#[async_trait]
impl RecipeGateway for FakeGateway {
    async fn create_recipe(
        &self,
        request_text: &str,
        mode: GenerationMode,
    ) -> ApiResponse<Recipe> {
        if self.begin(ApiOperation::CreateRecipe, None).await {
            return ApiResponse::failure(ApiOperation::CreateRecipe.failure_message());
        }

        let mut state = self.lock();
        let id = state.next_id;
        state.next_id += 1;

        let mut recipe = Self::recipe(id, &format!("Cocktail {}", id));
        recipe.user_request = request_text.to_string();
        if mode == GenerationMode::WithMedia {
            recipe.image_prompt = Some(format!("A photo of cocktail {}", id));
            recipe.music_suggestions = Some(MusicSuggestion {
                genres: vec!["Lounge".to_string()],
                ..MusicSuggestion::default()
            });
        }

        state.recipes.insert(0, recipe.clone());
        ApiResponse::ok(recipe)
    }

    async fn list_recipes(&self, query: &ListQuery) -> ApiResponse<Vec<Recipe>> {
        if self.begin(ApiOperation::ListRecipes, None).await {
            return ApiResponse::failure(ApiOperation::ListRecipes.failure_message());
        }

        let criteria = FilterCriteria::new(
            query.search.clone().unwrap_or_default(),
            query.filter.unwrap_or_default(),
            query.page.unwrap_or(1),
        );
        let state = self.lock();
        let recipes = derive_view(&state.recipes, &criteria, Utc::now())
            .into_iter()
            .cloned()
            .collect();
        ApiResponse::ok(recipes)
    }

    async fn get_recipe(&self, id: RecipeId) -> ApiResponse<Recipe> {
        if self.begin(ApiOperation::GetRecipe, Some(id)).await {
            return ApiResponse::failure(ApiOperation::GetRecipe.failure_message());
        }

        match self.lock().recipes.iter().find(|r| r.id == id) {
            Some(recipe) => ApiResponse::ok(recipe.clone()),
            None => ApiResponse::failure(ApiOperation::GetRecipe.failure_message()),
        }
    }

    async fn set_favorite(&self, id: RecipeId) -> ApiResponse<FavoriteState> {
        if self.begin(ApiOperation::SetFavorite, Some(id)).await {
            return ApiResponse::failure(ApiOperation::SetFavorite.failure_message());
        }

        match self.lock().recipes.iter_mut().find(|r| r.id == id) {
            Some(recipe) => {
                recipe.is_favorite = !recipe.is_favorite;
                ApiResponse::ok(FavoriteState {
                    is_favorite: recipe.is_favorite,
                })
            }
            None => ApiResponse::failure(ApiOperation::SetFavorite.failure_message()),
        }
    }

    /// Deleting an unknown id succeeds.
    async fn delete_recipe(&self, id: RecipeId) -> ApiResponse<()> {
        if self.begin(ApiOperation::DeleteRecipe, Some(id)).await {
            return ApiResponse::failure(ApiOperation::DeleteRecipe.failure_message());
        }

        self.lock().recipes.retain(|r| r.id != id);
        ApiResponse::ok(())
    }
}
