use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::api::{ListQuery, RecipeGateway};
use crate::list::types::{FetchOutcome, RefreshPolicy, ViewStatus};
use crate::recipes::{FilterCriteria, FilterMode, Recipe, RecipeId, derive_view};
use crate::state::events::{EventBus, RecipeEvent};

#[derive(Debug, Default)]
struct ListState {
    recipes: Vec<Recipe>,
    criteria: FilterCriteria,
    /// Set once a fetch has succeeded.
    loaded: bool,
    loading: bool,
    load_error: Option<String>,
    /// Sequence number of the most recently issued fetch.
    fetch_seq: u64,
    disposed: bool,
}

/// Owner of the authoritative recipe list.
///
/// Cheap to clone; clones share the same list. The lock is never held across
/// an await, so readers always see a consistent snapshot.
#[derive(Clone)]
pub struct RecipeList {
    state: Arc<Mutex<ListState>>,
    gateway: Arc<dyn RecipeGateway>,
    policy: RefreshPolicy,
    events: EventBus,
}

impl RecipeList {
    pub fn new(gateway: Arc<dyn RecipeGateway>, policy: RefreshPolicy, events: EventBus) -> Self {
        Self {
            state: Arc::new(Mutex::new(ListState::default())),
            gateway,
            policy,
            events,
        }
    }

    /// Change the search text. Resets the page to 1 and fetches.
    pub async fn set_search(&self, search: impl Into<String>) -> FetchOutcome {
        let search = search.into();
        self.update_criteria(|criteria| {
            criteria.search = search;
            criteria.page = 1;
        });
        self.fetch().await
    }

    /// Change the filter mode. Resets the page to 1 and fetches.
    pub async fn set_filter_mode(&self, mode: FilterMode) -> FetchOutcome {
        self.update_criteria(|criteria| {
            criteria.mode = mode;
            criteria.page = 1;
        });
        self.fetch().await
    }

    pub async fn set_page(&self, page: u32) -> FetchOutcome {
        self.update_criteria(|criteria| criteria.page = page.max(1));
        self.fetch().await
    }

    /// Replace all criteria at once and fetch.
    pub async fn set_criteria(&self, criteria: FilterCriteria) -> FetchOutcome {
        self.update_criteria(|current| *current = criteria);
        self.fetch().await
    }

    /// Re-issue the fetch for the current criteria.
    pub async fn refresh(&self) -> FetchOutcome {
        self.fetch().await
    }

    async fn fetch(&self) -> FetchOutcome {
        let (seq, query) = {
            let mut state = self.lock();
            if state.disposed {
                return FetchOutcome::Disposed;
            }
            state.fetch_seq += 1;
            state.loading = true;
            (state.fetch_seq, ListQuery::from_criteria(&state.criteria))
        };

        if !self.policy.debounce.is_zero() {
            tokio::time::sleep(self.policy.debounce).await;
            if let Some(outcome) = self.stale_outcome(seq) {
                debug!(event = "core.list.fetch_debounced", seq = seq);
                return outcome;
            }
        }

        info!(
            event = "core.list.fetch_started",
            seq = seq,
            search = query.search.as_deref().unwrap_or(""),
            filter = query.filter.map(|m| m.as_str()).unwrap_or("all"),
            page = query.page.unwrap_or(1)
        );

        let response = self.gateway.list_recipes(&query).await;

        let count = {
            let mut state = self.lock();
            if state.disposed {
                debug!(event = "core.list.fetch_discarded", seq = seq, reason = "disposed");
                return FetchOutcome::Disposed;
            }
            if state.fetch_seq != seq {
                // A newer fetch owns the loading flag.
                debug!(event = "core.list.fetch_discarded", seq = seq, reason = "superseded");
                return FetchOutcome::Superseded;
            }

            state.loading = false;
            match response.into_result() {
                Ok(recipes) => {
                    let count = recipes.len();
                    state.recipes = recipes;
                    state.loaded = true;
                    state.load_error = None;
                    count
                }
                Err(error) => {
                    warn!(event = "core.list.fetch_failed", seq = seq, error = %error);
                    state.load_error = Some(error.clone());
                    return FetchOutcome::Failed { error };
                }
            }
        };

        info!(event = "core.list.fetch_completed", seq = seq, count = count);
        self.events.publish(RecipeEvent::ListRefreshed { count });
        FetchOutcome::Applied { count }
    }

    /// Outcome to return if fetch `seq` must not proceed.
    fn stale_outcome(&self, seq: u64) -> Option<FetchOutcome> {
        let state = self.lock();
        if state.disposed {
            Some(FetchOutcome::Disposed)
        } else if state.fetch_seq != seq {
            Some(FetchOutcome::Superseded)
        } else {
            None
        }
    }

    fn update_criteria(&self, change: impl FnOnce(&mut FilterCriteria)) {
        let mut state = self.lock();
        change(&mut state.criteria);
    }

    /// Snapshot of the authoritative list, in server order.
    pub fn recipes(&self) -> Vec<Recipe> {
        self.lock().recipes.clone()
    }

    pub fn get(&self, id: RecipeId) -> Option<Recipe> {
        self.lock().recipes.iter().find(|r| r.id == id).cloned()
    }

    pub fn contains(&self, id: RecipeId) -> bool {
        self.lock().recipes.iter().any(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.lock().recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().recipes.is_empty()
    }

    pub fn criteria(&self) -> FilterCriteria {
        self.lock().criteria.clone()
    }

    /// Recipes passing the current criteria.
    pub fn view(&self) -> Vec<Recipe> {
        self.view_at(Utc::now())
    }

    /// Recipes passing the current criteria, with `now` anchoring the recent window.
    pub fn view_at(&self, now: DateTime<Utc>) -> Vec<Recipe> {
        let state = self.lock();
        derive_view(&state.recipes, &state.criteria, now)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn status(&self) -> ViewStatus {
        self.status_at(Utc::now())
    }

    pub fn status_at(&self, now: DateTime<Utc>) -> ViewStatus {
        let state = self.lock();
        if state.loading {
            return ViewStatus::Loading;
        }
        if let Some(error) = &state.load_error {
            return ViewStatus::Failed {
                error: error.clone(),
            };
        }
        // A recipe generated before the first fetch still counts as content.
        if !state.loaded && state.recipes.is_empty() {
            return ViewStatus::NotLoaded;
        }
        if state.recipes.is_empty() {
            return ViewStatus::Empty;
        }

        match derive_view(&state.recipes, &state.criteria, now).len() {
            0 => ViewStatus::NoMatches,
            count => ViewStatus::Ready { count },
        }
    }

    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    /// Error from the last fetch, cleared by the next successful one.
    pub fn load_error(&self) -> Option<String> {
        self.lock().load_error.clone()
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RecipeEvent> {
        self.events.subscribe()
    }

    /// Tear down the list. Completions arriving afterwards are discarded.
    pub fn dispose(&self) {
        let mut state = self.lock();
        state.disposed = true;
        state.loading = false;
        debug!(event = "core.list.disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.lock().disposed
    }

    /// Set the favorite flag of recipe `id` in place.
    ///
    /// Returns the updated recipe, or `None` if it is not in the list.
    pub(crate) fn apply_favorite(&self, id: RecipeId, is_favorite: bool) -> Option<Recipe> {
        let updated = {
            let mut state = self.lock();
            if state.disposed {
                return None;
            }
            let recipe = state.recipes.iter_mut().find(|r| r.id == id)?;
            recipe.is_favorite = is_favorite;
            recipe.clone()
        };

        self.events.publish(RecipeEvent::FavoriteChanged {
            recipe: updated.clone(),
        });
        Some(updated)
    }

    /// Remove recipe `id`. Returns whether it was present.
    pub(crate) fn remove(&self, id: RecipeId) -> bool {
        let removed = {
            let mut state = self.lock();
            if state.disposed {
                return false;
            }
            let before = state.recipes.len();
            state.recipes.retain(|r| r.id != id);
            state.recipes.len() != before
        };

        if removed {
            self.events.publish(RecipeEvent::RecipeDeleted { id });
        }
        removed
    }

    /// Put `recipe` at the head of the list.
    ///
    /// A recipe whose id is already listed replaces that entry in place.
    pub(crate) fn prepend(&self, recipe: Recipe) -> bool {
        {
            let mut state = self.lock();
            if state.disposed {
                return false;
            }
            match state.recipes.iter_mut().find(|r| r.id == recipe.id) {
                Some(existing) => *existing = recipe.clone(),
                None => state.recipes.insert(0, recipe.clone()),
            }
        }

        self.events.publish(RecipeEvent::RecipeAdded { recipe });
        true
    }

    fn lock(&self) -> MutexGuard<'_, ListState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for RecipeList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("RecipeList")
            .field("len", &state.recipes.len())
            .field("criteria", &state.criteria)
            .field("loading", &state.loading)
            .field("disposed", &state.disposed)
            .finish()
    }
}
