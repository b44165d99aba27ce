use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use crate::api::RecipeGateway;
use crate::generation::errors::{GenerationError, ValidationError};
use crate::generation::types::{GenerationMode, GenerationPhase};
use crate::generation::validation::validate_request;
use crate::list::RecipeList;
use crate::recipes::Recipe;

#[derive(Debug, Default)]
struct GenerationState {
    phase: GenerationPhase,
    last_generated: Option<Recipe>,
    validation_error: Option<ValidationError>,
}

/// Drives one generation request at a time.
///
/// `Idle -> Submitting -> Idle` on success (the recipe is prepended to the
/// list and kept as [`last_generated`](Self::last_generated)), or
/// `Submitting -> Failed` until the next attempt. Validation failures never
/// leave `Idle`.
#[derive(Clone)]
pub struct GenerationController {
    list: RecipeList,
    gateway: Arc<dyn RecipeGateway>,
    mode: GenerationMode,
    state: Arc<Mutex<GenerationState>>,
}

impl GenerationController {
    pub fn new(list: RecipeList, gateway: Arc<dyn RecipeGateway>, mode: GenerationMode) -> Self {
        Self {
            list,
            gateway,
            mode,
            state: Arc::new(Mutex::new(GenerationState::default())),
        }
    }

    /// Validate `request_text` and ask the server for a new recipe.
    ///
    /// # Errors
    ///
    /// - [`GenerationError::Validation`] if the text is out of bounds; no
    ///   request is sent.
    /// - [`GenerationError::AlreadySubmitting`] while another request is pending.
    /// - [`GenerationError::Failed`] if the server call fails.
    /// - [`GenerationError::Discarded`] if the list was disposed meanwhile.
    pub async fn submit(&self, request_text: &str) -> Result<Recipe, GenerationError> {
        let request = {
            let mut state = self.lock();
            if state.phase.is_submitting() {
                debug!(event = "core.generation.submit_rejected", reason = "in_progress");
                return Err(GenerationError::AlreadySubmitting);
            }

            match validate_request(request_text) {
                Ok(request) => {
                    state.validation_error = None;
                    state.phase = GenerationPhase::Submitting;
                    request.to_string()
                }
                Err(error) => {
                    debug!(event = "core.generation.validation_failed", error = %error);
                    state.validation_error = Some(error.clone());
                    state.phase = GenerationPhase::Idle;
                    return Err(error.into());
                }
            }
        };

        info!(
            event = "core.generation.submit_started",
            mode = %self.mode,
            chars = request.chars().count()
        );

        let response = self.gateway.create_recipe(&request, self.mode).await;

        if self.list.is_disposed() {
            self.lock().phase = GenerationPhase::Idle;
            debug!(event = "core.generation.submit_discarded", reason = "disposed");
            return Err(GenerationError::Discarded);
        }

        match response.into_result() {
            Ok(recipe) => {
                self.list.prepend(recipe.clone());
                {
                    let mut state = self.lock();
                    state.phase = GenerationPhase::Idle;
                    state.last_generated = Some(recipe.clone());
                }
                info!(
                    event = "core.generation.submit_completed",
                    recipe_id = recipe.id,
                    name = %recipe.name
                );
                Ok(recipe)
            }
            Err(message) => {
                warn!(event = "core.generation.submit_failed", error = %message);
                self.lock().phase = GenerationPhase::Failed {
                    error: message.clone(),
                };
                Err(GenerationError::Failed { message })
            }
        }
    }

    pub fn phase(&self) -> GenerationPhase {
        self.lock().phase.clone()
    }

    /// The most recent successfully generated recipe.
    pub fn last_generated(&self) -> Option<Recipe> {
        self.lock().last_generated.clone()
    }

    /// Why the last submission was rejected locally, if it was.
    pub fn validation_error(&self) -> Option<ValidationError> {
        self.lock().validation_error.clone()
    }

    pub fn mode(&self) -> GenerationMode {
        self.mode
    }

    /// Forget the last result and any error, ready for a new request.
    ///
    /// Has no effect while a request is pending.
    pub fn reset(&self) {
        let mut state = self.lock();
        if state.phase.is_submitting() {
            return;
        }
        *state = GenerationState::default();
    }

    fn lock(&self) -> MutexGuard<'_, GenerationState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
