//! Tests for the register/login/profile/favorites flow.

mod common;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use common::{
    authed_json_request, authed_request, build_test_app, get_request, json_request,
    recipe_with_ingredients, register_and_login, seed_recipe, send,
};

#[tokio::test]
async fn register_creates_account_without_leaking_hash() {
    let (app, _state) = build_test_app(None).await;

    let (status, body) = send(
        app,
        json_request(
            "POST",
            "/api/v1/users/register",
            json!({
                "username": "alice",
                "email": "alice@example.com",
                "password": "secret123"
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Account created successfully");
    assert_eq!(body["user"]["username"], "alice");
    assert!(body["user"].get("passwordHash").is_none());
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn register_rejects_invalid_payloads() {
    let (app, _state) = build_test_app(None).await;

    // Username too short.
    let (status, _) = send(
        app.clone(),
        json_request(
            "POST",
            "/api/v1/users/register",
            json!({ "username": "al", "email": "al@example.com", "password": "secret123" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Bad email.
    let (status, _) = send(
        app.clone(),
        json_request(
            "POST",
            "/api/v1/users/register",
            json!({ "username": "alice", "email": "not-an-email", "password": "secret123" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Short password.
    let (status, _) = send(
        app,
        json_request(
            "POST",
            "/api/v1/users/register",
            json!({ "username": "alice", "email": "alice@example.com", "password": "12345" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn register_rejects_duplicates_with_409() {
    let (app, _state) = build_test_app(None).await;

    let payload = json!({
        "username": "alice",
        "email": "alice@example.com",
        "password": "secret123"
    });

    let (status, _) = send(
        app.clone(),
        json_request("POST", "/api/v1/users/register", payload.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(app, json_request("POST", "/api/v1/users/register", payload)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("already registered"));
}

#[tokio::test]
async fn login_rejects_bad_credentials() {
    let (app, _state) = build_test_app(None).await;
    register_and_login(&app, "alice@example.com", "alice").await;

    let (status, _) = send(
        app.clone(),
        json_request(
            "POST",
            "/api/v1/users/login",
            json!({ "email": "alice@example.com", "password": "wrong-password" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        app,
        json_request(
            "POST",
            "/api/v1/users/login",
            json!({ "email": "nobody@example.com", "password": "secret123" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn profile_requires_and_honors_token() {
    let (app, _state) = build_test_app(None).await;
    let token = register_and_login(&app, "alice@example.com", "alice").await;

    let (status, _) = send(app.clone(), get_request("/api/v1/users/profile")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(
        app,
        authed_request("GET", "/api/v1/users/profile", &token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "alice@example.com");
}

#[tokio::test]
async fn favorites_flow_add_list_remove() {
    let (app, state) = build_test_app(None).await;
    seed_recipe(
        &state,
        &recipe_with_ingredients("r1", "Margherita", &["tomato"]),
    )
    .await;
    let token = register_and_login(&app, "alice@example.com", "alice").await;

    // Unauthenticated access is rejected.
    let (status, _) = send(app.clone(), get_request("/api/v1/favorites")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Add.
    let (status, body) = send(
        app.clone(),
        authed_json_request("POST", "/api/v1/favorites/r1", &token, json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Recipe added to favorites");
    assert_eq!(body["recipe"]["id"], "r1");

    // Duplicate add conflicts.
    let (status, body) = send(
        app.clone(),
        authed_json_request("POST", "/api/v1/favorites/r1", &token, json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Recipe already in favorites");

    // Listing returns the full recipe objects.
    let (status, body) = send(
        app.clone(),
        authed_request("GET", "/api/v1/favorites", &token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let favorites = body.as_array().expect("array");
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0]["title"], "Margherita");

    // Remove, then removing again is a 404.
    let (status, body) = send(
        app.clone(),
        authed_request("DELETE", "/api/v1/favorites/r1", &token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Recipe removed from favorites");

    let (status, body) = send(
        app,
        authed_request("DELETE", "/api/v1/favorites/r1", &token),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Favorite not found");
}

#[tokio::test]
async fn favoriting_missing_recipe_is_404() {
    let (app, _state) = build_test_app(None).await;
    let token = register_and_login(&app, "alice@example.com", "alice").await;

    let (status, body) = send(
        app,
        authed_json_request("POST", "/api/v1/favorites/ghost", &token, json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Recipe not found");
}
