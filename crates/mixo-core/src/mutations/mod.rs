//! Favorite toggle and delete, applied only after the server confirms.

pub mod controller;
pub mod errors;
pub mod operation_errors;

pub use controller::{MutationController, MutationOutcome};
pub use errors::MutationError;
pub use operation_errors::{MutationKind, OperationError, OperationErrors};
