use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::api::state::AppState;

use super::handlers;
use super::middleware::auth_middleware;

pub fn v1_router(state: AppState) -> Router<AppState> {
    let recipes = Router::new()
        .route("/", get(handlers::recipes::list_recipes))
        .route("/search", post(handlers::recipes::search_recipes))
        .route("/meta/filters", get(handlers::recipes::get_filter_options))
        .route("/{recipeId}", get(handlers::recipes::get_recipe));

    let vision = Router::new()
        .route("/analyze", post(handlers::vision::analyze_image))
        .route("/validate", post(handlers::vision::validate_ingredients));

    let users = Router::new()
        .route("/register", post(handlers::users::register))
        .route("/login", post(handlers::users::login))
        .route(
            "/profile",
            get(handlers::users::profile).route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth_middleware,
            )),
        );

    let favorites = Router::new()
        .route("/", get(handlers::favorites::list_favorites))
        .route(
            "/{recipeId}",
            post(handlers::favorites::add_favorite).delete(handlers::favorites::remove_favorite),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/openapi.json", get(super::openapi::openapi_json))
        .merge(super::openapi::redoc_router())
        .nest("/recipes", recipes)
        .nest("/vision", vision)
        .nest("/users", users)
        .nest("/favorites", favorites)
}
