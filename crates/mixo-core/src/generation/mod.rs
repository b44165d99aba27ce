//! Turning a free-text request into a new recipe.

pub mod controller;
pub mod errors;
pub mod types;
pub mod validation;

pub use controller::GenerationController;
pub use errors::{GenerationError, ValidationError};
pub use types::{GenerationMode, GenerationPhase};
pub use validation::{MAX_REQUEST_CHARS, MIN_REQUEST_CHARS, validate_request};
