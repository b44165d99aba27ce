use std::fmt;

use serde::{Deserialize, Serialize};

/// Uniform result of every gateway call.
///
/// Exactly one of `data` / `error` is set, matching `success`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }

    /// Convert into a `Result`, treating a success without data as a failure.
    pub fn into_result(self) -> Result<T, String> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            (true, None) => Err("Response contained no data".to_string()),
            (false, _) => Err(self
                .error
                .unwrap_or_else(|| "Unknown error".to_string())),
        }
    }
}

/// Gateway operations, used for logging and user-facing failure messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiOperation {
    CreateRecipe,
    ListRecipes,
    GetRecipe,
    SetFavorite,
    DeleteRecipe,
}

impl ApiOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiOperation::CreateRecipe => "create_recipe",
            ApiOperation::ListRecipes => "list_recipes",
            ApiOperation::GetRecipe => "get_recipe",
            ApiOperation::SetFavorite => "set_favorite",
            ApiOperation::DeleteRecipe => "delete_recipe",
        }
    }

    /// Generic message shown when the server rejects this operation.
    pub fn failure_message(&self) -> &'static str {
        match self {
            ApiOperation::CreateRecipe => "Failed to generate cocktail",
            ApiOperation::ListRecipes => "Failed to fetch cocktails",
            ApiOperation::GetRecipe => "Failed to fetch cocktail",
            ApiOperation::SetFavorite => "Failed to toggle favorite",
            ApiOperation::DeleteRecipe => "Failed to delete cocktail",
        }
    }
}

impl fmt::Display for ApiOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
