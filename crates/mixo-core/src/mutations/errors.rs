use crate::errors::MixoError;
use crate::recipes::RecipeId;

#[derive(Debug, thiserror::Error)]
pub enum MutationError {
    #[error("{message}")]
    FavoriteFailed { id: RecipeId, message: String },

    #[error("{message}")]
    DeleteFailed { id: RecipeId, message: String },

    #[error("No delete is awaiting confirmation")]
    NoPendingDelete,
}

impl MutationError {
    pub fn recipe_id(&self) -> Option<RecipeId> {
        match self {
            MutationError::FavoriteFailed { id, .. } | MutationError::DeleteFailed { id, .. } => {
                Some(*id)
            }
            MutationError::NoPendingDelete => None,
        }
    }
}

impl MixoError for MutationError {
    fn error_code(&self) -> &'static str {
        match self {
            MutationError::FavoriteFailed { .. } => "FAVORITE_FAILED",
            MutationError::DeleteFailed { .. } => "DELETE_FAILED",
            MutationError::NoPendingDelete => "NO_PENDING_DELETE",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, MutationError::NoPendingDelete)
    }
}
