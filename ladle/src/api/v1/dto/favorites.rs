//! Favorites DTOs for the v1 API.

use serde::Serialize;

use super::recipes::RecipeResponse;

/// Response for `POST /v1/favorites/{recipeId}`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct FavoriteAddedResponse {
    pub message: String,
    pub recipe: RecipeResponse,
}

/// Plain confirmation body, e.g. for `DELETE /v1/favorites/{recipeId}`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub message: String,
}
