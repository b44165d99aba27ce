use crate::errors::MixoError;

/// A request text rejected before reaching the network.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please describe the cocktail you want")]
    Empty,

    #[error("Your request must contain at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("Your request cannot exceed {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("A generation request is already in progress")]
    AlreadySubmitting,

    #[error("{message}")]
    Failed { message: String },

    #[error("Generation result discarded: the recipe list was closed")]
    Discarded,
}

impl MixoError for GenerationError {
    fn error_code(&self) -> &'static str {
        match self {
            GenerationError::Validation(ValidationError::Empty) => "REQUEST_EMPTY",
            GenerationError::Validation(ValidationError::TooShort { .. }) => "REQUEST_TOO_SHORT",
            GenerationError::Validation(ValidationError::TooLong { .. }) => "REQUEST_TOO_LONG",
            GenerationError::AlreadySubmitting => "GENERATION_IN_PROGRESS",
            GenerationError::Failed { .. } => "GENERATION_FAILED",
            GenerationError::Discarded => "GENERATION_DISCARDED",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            GenerationError::Validation(_) | GenerationError::AlreadySubmitting
        )
    }
}
