use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use crate::api::RecipeGateway;
use crate::list::RecipeList;
use crate::mutations::errors::MutationError;
use crate::mutations::operation_errors::{MutationKind, OperationError, OperationErrors};
use crate::recipes::RecipeId;

/// What a mutation call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The server confirmed and the list was updated.
    Applied,
    /// The server confirmed but the recipe was not in the list.
    NotInList,
    /// The same mutation was already in flight for this recipe.
    Ignored,
    /// The delete confirmation was declined. No request was sent.
    Cancelled,
    /// The list was disposed before the response arrived.
    Discarded,
}

#[derive(Debug, Default)]
struct MutationState {
    in_flight: HashSet<(MutationKind, RecipeId)>,
    pending_delete: Option<RecipeId>,
    errors: OperationErrors,
}

type SharedState = Arc<Mutex<MutationState>>;

fn lock_state(state: &SharedState) -> MutexGuard<'_, MutationState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Marks a mutation in flight until dropped.
struct InFlight {
    state: SharedState,
    key: (MutationKind, RecipeId),
}

impl Drop for InFlight {
    fn drop(&mut self) {
        lock_state(&self.state).in_flight.remove(&self.key);
    }
}

/// Applies favorite and delete mutations to a [`RecipeList`].
///
/// Nothing changes locally until the server confirms. A second request for
/// the same recipe and kind while one is in flight is ignored, not queued.
#[derive(Clone)]
pub struct MutationController {
    list: RecipeList,
    gateway: Arc<dyn RecipeGateway>,
    state: SharedState,
}

impl MutationController {
    pub fn new(list: RecipeList, gateway: Arc<dyn RecipeGateway>) -> Self {
        Self {
            list,
            gateway,
            state: Arc::new(Mutex::new(MutationState::default())),
        }
    }

    /// Flip the favorite flag of recipe `id` on the server, then in the list.
    ///
    /// # Errors
    ///
    /// Returns [`MutationError::FavoriteFailed`] if the server call fails. The
    /// list is left unchanged and the error is recorded for `id`.
    pub async fn toggle_favorite(&self, id: RecipeId) -> Result<MutationOutcome, MutationError> {
        let Some(_in_flight) = self.try_begin(MutationKind::Favorite, id) else {
            debug!(event = "core.mutation.favorite_ignored", recipe_id = id);
            return Ok(MutationOutcome::Ignored);
        };

        info!(event = "core.mutation.favorite_started", recipe_id = id);
        let response = self.gateway.set_favorite(id).await;

        if self.list.is_disposed() {
            return Ok(MutationOutcome::Discarded);
        }

        match response.into_result() {
            Ok(state) => {
                self.clear_error(id);
                let outcome = match self.list.apply_favorite(id, state.is_favorite) {
                    Some(_) => MutationOutcome::Applied,
                    None => MutationOutcome::NotInList,
                };
                info!(
                    event = "core.mutation.favorite_completed",
                    recipe_id = id,
                    is_favorite = state.is_favorite,
                    outcome = ?outcome
                );
                Ok(outcome)
            }
            Err(message) => {
                warn!(event = "core.mutation.favorite_failed", recipe_id = id, error = %message);
                self.record_error(id, MutationKind::Favorite, &message);
                Err(MutationError::FavoriteFailed { id, message })
            }
        }
    }

    /// Ask for confirmation before deleting `id`.
    ///
    /// Only one delete can await confirmation; a new request replaces it.
    pub fn request_delete(&self, id: RecipeId) {
        let mut state = lock_state(&self.state);
        if let Some(previous) = state.pending_delete.replace(id)
            && previous != id
        {
            debug!(
                event = "core.mutation.delete_request_replaced",
                previous = previous,
                recipe_id = id
            );
        }
    }

    /// The recipe awaiting delete confirmation, if any.
    pub fn pending_delete(&self) -> Option<RecipeId> {
        lock_state(&self.state).pending_delete
    }

    /// Answer the pending confirmation.
    ///
    /// Declining sends nothing. Accepting deletes on the server and removes
    /// the recipe from the list once the server confirms.
    ///
    /// # Errors
    ///
    /// Returns [`MutationError::NoPendingDelete`] without a pending request,
    /// or [`MutationError::DeleteFailed`] if the server call fails.
    pub async fn resolve_delete(&self, confirmed: bool) -> Result<MutationOutcome, MutationError> {
        let id = lock_state(&self.state)
            .pending_delete
            .take()
            .ok_or(MutationError::NoPendingDelete)?;

        if !confirmed {
            info!(event = "core.mutation.delete_cancelled", recipe_id = id);
            return Ok(MutationOutcome::Cancelled);
        }

        self.perform_delete(id).await
    }

    /// Request and resolve a delete in one step.
    pub async fn delete(
        &self,
        id: RecipeId,
        confirmed: bool,
    ) -> Result<MutationOutcome, MutationError> {
        self.request_delete(id);
        self.resolve_delete(confirmed).await
    }

    async fn perform_delete(&self, id: RecipeId) -> Result<MutationOutcome, MutationError> {
        let Some(_in_flight) = self.try_begin(MutationKind::Delete, id) else {
            debug!(event = "core.mutation.delete_ignored", recipe_id = id);
            return Ok(MutationOutcome::Ignored);
        };

        info!(event = "core.mutation.delete_started", recipe_id = id);
        let response = self.gateway.delete_recipe(id).await;

        if self.list.is_disposed() {
            return Ok(MutationOutcome::Discarded);
        }

        match response.into_result() {
            Ok(()) => {
                self.clear_error(id);
                let outcome = if self.list.remove(id) {
                    MutationOutcome::Applied
                } else {
                    MutationOutcome::NotInList
                };
                info!(
                    event = "core.mutation.delete_completed",
                    recipe_id = id,
                    outcome = ?outcome
                );
                Ok(outcome)
            }
            Err(message) => {
                warn!(event = "core.mutation.delete_failed", recipe_id = id, error = %message);
                self.record_error(id, MutationKind::Delete, &message);
                Err(MutationError::DeleteFailed { id, message })
            }
        }
    }

    /// Whether a mutation of `kind` is in flight for `id`.
    pub fn is_in_flight(&self, kind: MutationKind, id: RecipeId) -> bool {
        lock_state(&self.state).in_flight.contains(&(kind, id))
    }

    /// Snapshot of the per-recipe error registry.
    pub fn errors(&self) -> OperationErrors {
        lock_state(&self.state).errors.clone()
    }

    pub fn error_for(&self, id: RecipeId) -> Option<OperationError> {
        lock_state(&self.state).errors.get(id).cloned()
    }

    fn try_begin(&self, kind: MutationKind, id: RecipeId) -> Option<InFlight> {
        let key = (kind, id);
        if !lock_state(&self.state).in_flight.insert(key) {
            return None;
        }
        Some(InFlight {
            state: Arc::clone(&self.state),
            key,
        })
    }

    fn record_error(&self, id: RecipeId, kind: MutationKind, message: &str) {
        lock_state(&self.state).errors.set(OperationError {
            recipe_id: id,
            kind,
            message: message.to_string(),
        });
    }

    fn clear_error(&self, id: RecipeId) {
        lock_state(&self.state).errors.clear(id);
    }
}
