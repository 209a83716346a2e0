//! v1 favorites handlers. All routes require a bearer token.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use nanoid::nanoid;

use crate::api::state::AppState;
use crate::api::v1::dto::{
    ErrorResponse, FavoriteAddedResponse, MessageResponse, RecipeResponse,
};
use crate::api::v1::middleware::CurrentUser;
use crate::error::{LadleError, Result};

/// `GET /api/v1/favorites`
#[utoipa::path(
    get,
    path = "/api/v1/favorites",
    tag = "favorites",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The user's favorite recipes", body = [RecipeResponse]),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    )
)]
pub async fn list_favorites(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<Vec<RecipeResponse>>> {
    let recipes = state.db.list_favorite_recipes(&user.id).await?;
    Ok(Json(recipes.into_iter().map(Into::into).collect()))
}

/// `POST /api/v1/favorites/{recipeId}`
#[utoipa::path(
    post,
    path = "/api/v1/favorites/{recipeId}",
    tag = "favorites",
    security(("bearer_auth" = [])),
    params(("recipeId" = String, Path, description = "Recipe to bookmark")),
    responses(
        (status = 201, description = "Recipe added to favorites", body = FavoriteAddedResponse),
        (status = 404, description = "No such recipe", body = ErrorResponse),
        (status = 409, description = "Already favorited", body = ErrorResponse),
    )
)]
pub async fn add_favorite(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(recipe_id): Path<String>,
) -> Result<(StatusCode, Json<FavoriteAddedResponse>)> {
    let recipe = state
        .db
        .get_recipe_by_id(&recipe_id)
        .await?
        .ok_or_else(|| LadleError::NotFound("Recipe not found".to_string()))?;

    let added = state.db.add_favorite(&nanoid!(), &user.id, &recipe_id).await?;
    if !added {
        return Err(LadleError::Conflict(
            "Recipe already in favorites".to_string(),
        ));
    }

    Ok((
        StatusCode::CREATED,
        Json(FavoriteAddedResponse {
            message: "Recipe added to favorites".to_string(),
            recipe: recipe.into(),
        }),
    ))
}

/// `DELETE /api/v1/favorites/{recipeId}`
#[utoipa::path(
    delete,
    path = "/api/v1/favorites/{recipeId}",
    tag = "favorites",
    security(("bearer_auth" = [])),
    params(("recipeId" = String, Path, description = "Recipe to remove")),
    responses(
        (status = 200, description = "Recipe removed from favorites", body = MessageResponse),
        (status = 404, description = "Favorite not found", body = ErrorResponse),
    )
)]
pub async fn remove_favorite(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(recipe_id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let removed = state.db.remove_favorite(&user.id, &recipe_id).await?;
    if !removed {
        return Err(LadleError::NotFound("Favorite not found".to_string()));
    }

    Ok(Json(MessageResponse {
        message: "Recipe removed from favorites".to_string(),
    }))
}
