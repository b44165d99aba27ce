use std::sync::Arc;

use tracing::info;

use crate::api::{ApiError, HttpGateway, RecipeGateway};
use crate::config::MixoConfig;
use crate::generation::GenerationController;
use crate::list::RecipeList;
use crate::mutations::MutationController;
use crate::state::events::{EventBus, RecipeEvent};

/// The recipe list and its controllers, wired to one gateway.
#[derive(Clone)]
pub struct AppState {
    pub list: RecipeList,
    pub mutations: MutationController,
    pub generation: GenerationController,
    gateway: Arc<dyn RecipeGateway>,
    events: EventBus,
}

impl AppState {
    /// Assemble the controllers around `gateway` using settings from `config`.
    pub fn new(gateway: Arc<dyn RecipeGateway>, config: &MixoConfig) -> Self {
        let events = EventBus::default();
        let list = RecipeList::new(gateway.clone(), config.refresh_policy(), events.clone());
        let mutations = MutationController::new(list.clone(), gateway.clone());
        let generation =
            GenerationController::new(list.clone(), gateway.clone(), config.generation_mode());

        Self {
            list,
            mutations,
            generation,
            gateway,
            events,
        }
    }

    /// Build an HTTP gateway from `config` and assemble the controllers.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built from the config.
    pub fn connect(config: &MixoConfig) -> Result<Self, ApiError> {
        let client_config = config.client_config();
        info!(event = "core.state.connect_started", base_url = %client_config.base_url);

        let gateway = HttpGateway::new(client_config)?;
        Ok(Self::new(Arc::new(gateway), config))
    }

    /// Direct access to the gateway, for reads that do not touch the list.
    pub fn gateway(&self) -> &Arc<dyn RecipeGateway> {
        &self.gateway
    }

    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<RecipeEvent> {
        self.events.subscribe()
    }

    /// Tear down; pending completions are discarded.
    pub fn dispose(&self) {
        self.list.dispose();
    }
}
