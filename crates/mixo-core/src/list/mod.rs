//! Authoritative recipe list with filter criteria and a derived view.

pub mod store;
pub mod types;

pub use store::RecipeList;
pub use types::{FetchOutcome, RefreshPolicy, ViewStatus};
