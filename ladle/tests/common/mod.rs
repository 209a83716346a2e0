//! Shared helpers for integration tests: a real router over an in-memory
//! database, request builders, and recipe seeding.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use tower::ServiceExt;

use ladle::api::{create_router, AppState};
use ladle::config::{AuthConfig, Config, DatabaseConfig, SearchConfig, ServerConfig, VisionConfig};
use ladle::db::{Database, DatabaseBackend, LibSqlBackend, RecipeStore};
use ladle::models::{Difficulty, Recipe, RecipeIngredient};
use ladle::vision::VisionProvider;

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

pub fn test_config(vision: Option<VisionConfig>) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 6004,
        },
        database: DatabaseConfig {
            url: ":memory:".to_string(),
            auth_token: None,
            local_path: None,
        },
        auth: AuthConfig {
            jwt_secret: TEST_JWT_SECRET.to_string(),
            token_ttl_hours: 24,
        },
        search: SearchConfig {
            page_size: 12,
            max_page_size: 50,
        },
        vision,
    }
}

pub async fn build_test_app(vision: Option<VisionConfig>) -> (Router, AppState) {
    let config = test_config(vision);

    let raw_db = Database::new(&config.database).await.expect("in-memory db");
    let db: Arc<dyn DatabaseBackend> = Arc::new(LibSqlBackend::new(raw_db));

    let provider = VisionProvider::new(config.vision.as_ref());
    let state = AppState::new(config, db, provider);

    (create_router(state.clone()), state)
}

pub fn recipe_with_ingredients(id: &str, title: &str, ingredient_names: &[&str]) -> Recipe {
    let mut recipe = Recipe::new(id.to_string(), title.to_string(), format!("{title} description"));
    recipe.cuisine = "Italian".to_string();
    recipe.difficulty = Difficulty::Easy;
    recipe.cooking_time = 30;
    recipe.ingredients = ingredient_names
        .iter()
        .map(|name| RecipeIngredient {
            name: name.to_string(),
            quantity: "1".to_string(),
            unit: "piece".to_string(),
        })
        .collect();
    recipe
}

pub async fn seed_recipe(state: &AppState, recipe: &Recipe) {
    state.db.create_recipe(recipe).await.expect("seed recipe");
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

pub fn authed_json_request(
    method: &str,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .expect("request")
}

pub fn authed_request(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .expect("request")
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    // Most responses are JSON, but some error paths (e.g. axum's query-string
    // rejection) return plain text. Callers that assert on the body expect
    // JSON and still get it; callers that only check the status tolerate a
    // non-JSON body here instead of panicking.
    serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
}

/// Fire a request and return `(status, parsed JSON body)`.
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.expect("response");
    let status = response.status();
    let json = body_json(response).await;
    (status, json)
}

/// Register a user and log in, returning the bearer token.
pub async fn register_and_login(app: &Router, email: &str, username: &str) -> String {
    let (status, _body) = send(
        app.clone(),
        json_request(
            "POST",
            "/api/v1/users/register",
            serde_json::json!({
                "username": username,
                "email": email,
                "password": "secret123"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        app.clone(),
        json_request(
            "POST",
            "/api/v1/users/login",
            serde_json::json!({ "email": email, "password": "secret123" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    body["token"].as_str().expect("token").to_string()
}
