//! Search request/response DTOs for the v1 API.

use serde::{Deserialize, Serialize};

use super::recipes::RecipeResponse;
use crate::matching::MatchResult;
use crate::models::{Difficulty, RecipeFilter};

/// Structured attribute filters accepted by `POST /v1/recipes/search`.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    pub cuisine: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub dietary: Option<String>,
    /// Upper bound on cooking time in minutes.
    pub time: Option<u32>,
}

impl From<SearchFilters> for RecipeFilter {
    fn from(filters: SearchFilters) -> Self {
        Self {
            cuisine: filters.cuisine,
            difficulty: filters.difficulty,
            dietary: filters.dietary,
            max_cooking_time: filters.time,
        }
    }
}

/// Request body for `POST /v1/recipes/search`.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchRecipesRequest {
    /// Free-text ingredient names. Must be non-empty.
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub filters: SearchFilters,
}

/// One search hit: the recipe plus its match annotations, serialized flat
/// so clients see an ordinary recipe object with three extra fields.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultResponse {
    #[serde(flatten)]
    pub recipe: RecipeResponse,
    /// Integer 0–100: share of the recipe's ingredients the user covered.
    pub match_score: u8,
    /// Normalized recipe ingredient names that matched.
    pub matching_ingredients: Vec<String>,
    /// Count of matched recipe ingredients (historical field name).
    pub user_ingredients_matched: usize,
}

impl From<MatchResult> for SearchResultResponse {
    fn from(result: MatchResult) -> Self {
        Self {
            recipe: result.recipe.into(),
            match_score: result.match_score,
            matching_ingredients: result.matching_ingredients,
            user_ingredients_matched: result.user_ingredients_matched,
        }
    }
}
