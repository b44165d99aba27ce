pub mod filter;
pub mod types;

pub use filter::{derive_view, matches_mode, matches_search};
pub use types::{FilterCriteria, FilterMode, MusicSource, MusicSuggestion, Recipe, RecipeId};
