//! v1 recipe handlers: browsing, ingredient search, detail, filter metadata.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};

use crate::api::state::AppState;
use crate::api::v1::dto::{
    ErrorResponse, FilterOptionsResponse, ListRecipesQuery, ListRecipesResponse, RecipeResponse,
    SearchRecipesRequest, SearchResultResponse,
};
use crate::error::{LadleError, Result};

/// `GET /api/v1/recipes`
///
/// Paginated catalog listing, ordered by title, narrowed by the optional
/// structured filters.
#[utoipa::path(
    get,
    path = "/api/v1/recipes",
    tag = "recipes",
    params(
        ("cuisine" = Option<String>, Query, description = "Equality filter on cuisine"),
        ("difficulty" = Option<String>, Query, description = "Easy, Medium or Hard"),
        ("dietary" = Option<String>, Query, description = "Required dietary tag"),
        ("time" = Option<u32>, Query, description = "Maximum cooking time in minutes"),
        ("page" = Option<u32>, Query, description = "1-based page number"),
        ("limit" = Option<u32>, Query, description = "Page size"),
    ),
    responses(
        (status = 200, description = "One page of recipes", body = ListRecipesResponse),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
    )
)]
pub async fn list_recipes(
    State(state): State<AppState>,
    Query(query): Query<ListRecipesQuery>,
) -> Result<Json<ListRecipesResponse>> {
    let limit = query
        .limit
        .unwrap_or(state.config.search.page_size)
        .clamp(1, state.config.search.max_page_size);
    let page = query.page.unwrap_or(1).max(1);

    let recipe_page = state.db.list_recipes(&query.to_filter(), page, limit).await?;

    Ok(Json(ListRecipesResponse {
        total_pages: recipe_page.total.div_ceil(limit as u64),
        current_page: page,
        total: recipe_page.total,
        recipes: recipe_page.recipes.into_iter().map(Into::into).collect(),
    }))
}

/// `POST /api/v1/recipes/search`
///
/// Ingredient-based search. Returns a bare JSON array of recipes augmented
/// with `matchScore`, `matchingIngredients` and `userIngredientsMatched`,
/// sorted descending by score. A missing, malformed or empty `ingredients`
/// array is rejected with 400 before the recipe store is read.
#[utoipa::path(
    post,
    path = "/api/v1/recipes/search",
    tag = "recipes",
    request_body = SearchRecipesRequest,
    responses(
        (status = 200, description = "Matching recipes, best first", body = [SearchResultResponse]),
        (status = 400, description = "Missing or malformed ingredient list", body = ErrorResponse),
    )
)]
pub async fn search_recipes(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SearchRecipesRequest>, JsonRejection>,
) -> Result<Json<Vec<SearchResultResponse>>> {
    let Json(request) = payload.map_err(|rejection| match rejection {
        JsonRejection::JsonDataError(_) => {
            LadleError::Validation("Ingredients array is required".to_string())
        }
        other => LadleError::Validation(other.body_text()),
    })?;

    tracing::info!(
        ingredients = request.ingredients.len(),
        "Ingredient search request received"
    );

    let results = state
        .search
        .search(&request.ingredients, &request.filters.into())
        .await?;

    tracing::info!(results = results.len(), "Ingredient search complete");

    Ok(Json(results.into_iter().map(Into::into).collect()))
}

/// `GET /api/v1/recipes/{recipeId}`
#[utoipa::path(
    get,
    path = "/api/v1/recipes/{recipeId}",
    tag = "recipes",
    params(("recipeId" = String, Path, description = "Recipe identifier")),
    responses(
        (status = 200, description = "The recipe", body = RecipeResponse),
        (status = 404, description = "No such recipe", body = ErrorResponse),
    )
)]
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(recipe_id): Path<String>,
) -> Result<Json<RecipeResponse>> {
    let recipe = state
        .db
        .get_recipe_by_id(&recipe_id)
        .await?
        .ok_or_else(|| LadleError::NotFound("Recipe not found".to_string()))?;

    Ok(Json(recipe.into()))
}

/// `GET /api/v1/recipes/meta/filters`
///
/// Distinct cuisines, difficulties and dietary tags across the catalog.
#[utoipa::path(
    get,
    path = "/api/v1/recipes/meta/filters",
    tag = "recipes",
    responses(
        (status = 200, description = "Available filter values", body = FilterOptionsResponse),
    )
)]
pub async fn get_filter_options(
    State(state): State<AppState>,
) -> Result<Json<FilterOptionsResponse>> {
    let options = state.db.distinct_filter_options().await?;
    Ok(Json(options.into()))
}
