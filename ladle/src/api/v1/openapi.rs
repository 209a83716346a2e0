use axum::Json;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use super::dto;
use super::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Ladle API",
        version = "1.0.0",
        description = "Recipe discovery service. Search recipes by the ingredients you have, \
                       typed or detected from a photo.",
    ),
    paths(
        handlers::health::health_check,
        handlers::recipes::list_recipes,
        handlers::recipes::search_recipes,
        handlers::recipes::get_recipe,
        handlers::recipes::get_filter_options,
        handlers::vision::analyze_image,
        handlers::vision::validate_ingredients,
        handlers::users::register,
        handlers::users::login,
        handlers::users::profile,
        handlers::favorites::list_favorites,
        handlers::favorites::add_favorite,
        handlers::favorites::remove_favorite,
    ),
    components(schemas(
        // Errors
        dto::ErrorResponse,
        // Recipes
        dto::recipes::ListRecipesQuery,
        dto::recipes::RecipeResponse,
        dto::recipes::ListRecipesResponse,
        dto::recipes::FilterOptionsResponse,
        // Search
        dto::search::SearchFilters,
        dto::search::SearchRecipesRequest,
        dto::search::SearchResultResponse,
        // Vision
        dto::vision::AnalyzeImageRequest,
        dto::vision::AnalyzeImageResponse,
        dto::vision::ValidateIngredientsRequest,
        dto::vision::ValidatedIngredient,
        dto::vision::ValidateIngredientsResponse,
        // Users
        dto::users::RegisterRequest,
        dto::users::LoginRequest,
        dto::users::UserResponse,
        dto::users::RegisterResponse,
        dto::users::LoginResponse,
        // Favorites
        dto::favorites::FavoriteAddedResponse,
        dto::favorites::MessageResponse,
        // Health (handler-local types)
        handlers::health::HealthData,
        handlers::health::DatabaseStatus,
        handlers::health::VisionStatus,
    )),
    tags(
        (name = "health", description = "Health check"),
        (name = "recipes", description = "Recipe browsing and ingredient-based search"),
        (name = "vision", description = "Photo ingredient detection and validation"),
        (name = "users", description = "Registration, login and profile"),
        (name = "favorites", description = "Favorite recipes (auth required)"),
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            utoipa::openapi::security::SecurityScheme::Http(utoipa::openapi::security::Http::new(
                utoipa::openapi::security::HttpAuthScheme::Bearer,
            )),
        );
    }
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn redoc_router<S: Clone + Send + Sync + 'static>() -> axum::Router<S> {
    Redoc::with_url("/docs", ApiDoc::openapi()).into()
}
