//! Shared client state: change notifications and the assembled controllers.

pub mod app_state;
pub mod events;

pub use app_state::AppState;
pub use events::{EventBus, RecipeEvent};
