//! Recipe listing and detail DTOs for the v1 API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{
    Difficulty, FilterOptions, NutritionalInfo, Recipe, RecipeFilter, RecipeIngredient,
};

/// Query parameters for `GET /v1/recipes`.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
pub struct ListRecipesQuery {
    /// Equality filter on cuisine.
    pub cuisine: Option<String>,
    /// Equality filter on difficulty (`Easy`, `Medium`, `Hard`).
    pub difficulty: Option<Difficulty>,
    /// Keep only recipes carrying this dietary tag.
    pub dietary: Option<String>,
    /// Upper bound on cooking time in minutes.
    pub time: Option<u32>,
    /// 1-based page number.
    pub page: Option<u32>,
    /// Page size; clamped server-side.
    pub limit: Option<u32>,
}

impl ListRecipesQuery {
    pub fn to_filter(&self) -> RecipeFilter {
        RecipeFilter {
            cuisine: self.cuisine.clone(),
            difficulty: self.difficulty,
            dietary: self.dietary.clone(),
            max_cooking_time: self.time,
        }
    }
}

/// A recipe as serialized on the wire.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub ingredients: Vec<RecipeIngredient>,
    pub instructions: Vec<String>,
    pub cooking_time: u32,
    pub difficulty: Difficulty,
    pub cuisine: String,
    pub serving_size: u32,
    pub dietary_tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nutritional_info: Option<NutritionalInfo>,
    pub image_url: String,
    pub source: String,
    #[schema(value_type = String)]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String)]
    pub updated_at: DateTime<Utc>,
}

impl From<Recipe> for RecipeResponse {
    fn from(recipe: Recipe) -> Self {
        Self {
            id: recipe.id,
            title: recipe.title,
            description: recipe.description,
            ingredients: recipe.ingredients,
            instructions: recipe.instructions,
            cooking_time: recipe.cooking_time,
            difficulty: recipe.difficulty,
            cuisine: recipe.cuisine,
            serving_size: recipe.serving_size,
            dietary_tags: recipe.dietary_tags,
            nutritional_info: recipe.nutritional_info,
            image_url: recipe.image_url,
            source: recipe.source,
            created_at: recipe.created_at,
            updated_at: recipe.updated_at,
        }
    }
}

/// Response for `GET /v1/recipes`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListRecipesResponse {
    pub recipes: Vec<RecipeResponse>,
    pub total_pages: u64,
    pub current_page: u32,
    pub total: u64,
}

/// Response for `GET /v1/recipes/meta/filters`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptionsResponse {
    pub cuisines: Vec<String>,
    pub difficulties: Vec<String>,
    pub dietary_tags: Vec<String>,
}

impl From<FilterOptions> for FilterOptionsResponse {
    fn from(options: FilterOptions) -> Self {
        Self {
            cuisines: options.cuisines,
            difficulties: options.difficulties,
            dietary_tags: options.dietary_tags,
        }
    }
}
