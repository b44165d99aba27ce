use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

use crate::recipes::{Recipe, RecipeId};

/// Default number of buffered events per subscriber.
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Changes applied to the recipe list.
///
/// Only confirmed changes produce events. Failures are reported through the
/// caller's `Result`, not the event stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RecipeEvent {
    /// The server confirmed a favorite flip; carries the updated recipe.
    FavoriteChanged { recipe: Recipe },
    /// The server confirmed a delete and the recipe left the list.
    RecipeDeleted { id: RecipeId },
    /// A freshly generated recipe was prepended.
    RecipeAdded { recipe: Recipe },
    /// The list was replaced by a fetch result.
    ListRefreshed { count: usize },
}

/// Fan-out of [`RecipeEvent`]s to any number of listeners.
///
/// Publishing never blocks. Slow subscribers lag and lose the oldest events.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<RecipeEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RecipeEvent> {
        self.sender.subscribe()
    }

    /// Send `event` to every current subscriber. Returns how many received it.
    pub fn publish(&self, event: RecipeEvent) -> usize {
        match self.sender.send(event) {
            Ok(receivers) => receivers,
            Err(_) => {
                debug!(event = "core.state.event_dropped", reason = "no subscribers");
                0
            }
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}
