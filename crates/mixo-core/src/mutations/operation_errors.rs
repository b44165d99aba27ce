use std::collections::HashMap;
use std::fmt;

use crate::recipes::RecipeId;

/// Kind of mutation applied to a single recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    Favorite,
    Delete,
}

impl MutationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MutationKind::Favorite => "favorite",
            MutationKind::Delete => "delete",
        }
    }
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error from a recipe mutation, with the recipe id for context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OperationError {
    pub recipe_id: RecipeId,
    pub kind: MutationKind,
    pub message: String,
}

/// Last mutation error per recipe.
#[derive(Clone, Debug, Default)]
pub struct OperationErrors {
    by_recipe: HashMap<RecipeId, OperationError>,
}

impl OperationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the error for a recipe (replaces any existing error).
    pub fn set(&mut self, error: OperationError) {
        self.by_recipe.insert(error.recipe_id, error);
    }

    pub fn get(&self, recipe_id: RecipeId) -> Option<&OperationError> {
        self.by_recipe.get(&recipe_id)
    }

    pub fn clear(&mut self, recipe_id: RecipeId) {
        self.by_recipe.remove(&recipe_id);
    }

    pub fn is_empty(&self) -> bool {
        self.by_recipe.is_empty()
    }

    pub fn len(&self) -> usize {
        self.by_recipe.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &OperationError> {
        self.by_recipe.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error(recipe_id: RecipeId, kind: MutationKind, message: &str) -> OperationError {
        OperationError {
            recipe_id,
            kind,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_operation_errors_set_and_get() {
        let mut errors = OperationErrors::new();
        errors.set(error(1, MutationKind::Favorite, "Failed to toggle favorite"));

        assert_eq!(errors.get(1).unwrap().message, "Failed to toggle favorite");
        assert!(errors.get(2).is_none());
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_operation_errors_replace_per_recipe() {
        let mut errors = OperationErrors::new();
        errors.set(error(1, MutationKind::Favorite, "Failed to toggle favorite"));
        errors.set(error(1, MutationKind::Delete, "Failed to delete cocktail"));

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(1).unwrap().kind, MutationKind::Delete);
    }

    #[test]
    fn test_operation_errors_clear() {
        let mut errors = OperationErrors::new();
        errors.set(error(1, MutationKind::Delete, "Failed to delete cocktail"));
        errors.clear(1);

        assert!(errors.is_empty());
        assert_eq!(errors.iter().count(), 0);
    }
}
