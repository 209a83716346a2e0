//! Tests for recipe browsing, detail and filter metadata endpoints.

mod common;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use common::{build_test_app, get_request, recipe_with_ingredients, seed_recipe, send};
use ladle::models::Difficulty;

#[tokio::test]
async fn list_paginates_with_totals() {
    let (app, state) = build_test_app(None).await;
    for i in 0..5 {
        seed_recipe(
            &state,
            &recipe_with_ingredients(&format!("r{i}"), &format!("Recipe {i}"), &["salt"]),
        )
        .await;
    }

    let (status, body) = send(app.clone(), get_request("/api/v1/recipes?page=1&limit=2")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 5);
    assert_eq!(body["totalPages"], 3);
    assert_eq!(body["currentPage"], 1);
    assert_eq!(body["recipes"].as_array().unwrap().len(), 2);

    let (status, body) = send(app, get_request("/api/v1/recipes?page=3&limit=2")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recipes"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn list_applies_filters() {
    let (app, state) = build_test_app(None).await;

    let mut quick = recipe_with_ingredients("quick", "Quick Pasta", &["pasta"]);
    quick.cooking_time = 15;
    let mut slow = recipe_with_ingredients("slow", "Slow Ragu", &["beef"]);
    slow.cooking_time = 120;
    slow.difficulty = Difficulty::Hard;
    seed_recipe(&state, &quick).await;
    seed_recipe(&state, &slow).await;

    let (status, body) = send(app.clone(), get_request("/api/v1/recipes?time=30")).await;
    assert_eq!(status, StatusCode::OK);
    let recipes = body["recipes"].as_array().unwrap();
    assert_eq!(recipes.len(), 1);
    assert_eq!(recipes[0]["id"], "quick");

    let (status, body) = send(app, get_request("/api/v1/recipes?difficulty=Hard")).await;
    assert_eq!(status, StatusCode::OK);
    let recipes = body["recipes"].as_array().unwrap();
    assert_eq!(recipes.len(), 1);
    assert_eq!(recipes[0]["id"], "slow");
}

#[tokio::test]
async fn invalid_difficulty_filter_is_rejected() {
    let (app, _state) = build_test_app(None).await;

    let (status, _body) = send(app, get_request("/api/v1/recipes?difficulty=Impossible")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_recipe_by_id_and_404() {
    let (app, state) = build_test_app(None).await;
    seed_recipe(
        &state,
        &recipe_with_ingredients("r1", "Margherita", &["tomato", "mozzarella"]),
    )
    .await;

    let (status, body) = send(app.clone(), get_request("/api/v1/recipes/r1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Margherita");
    assert_eq!(body["ingredients"].as_array().unwrap().len(), 2);

    let (status, body) = send(app, get_request("/api/v1/recipes/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Recipe not found");
}

#[tokio::test]
async fn filter_metadata_lists_distinct_values() {
    let (app, state) = build_test_app(None).await;

    let mut r1 = recipe_with_ingredients("r1", "Pad Thai", &["noodles"]);
    r1.cuisine = "Thai".to_string();
    r1.dietary_tags = vec!["gluten-free".to_string()];
    let mut r2 = recipe_with_ingredients("r2", "Green Curry", &["coconut milk"]);
    r2.cuisine = "Thai".to_string();
    r2.difficulty = Difficulty::Medium;
    r2.dietary_tags = vec!["vegan".to_string(), "gluten-free".to_string()];
    seed_recipe(&state, &r1).await;
    seed_recipe(&state, &r2).await;

    let (status, body) = send(app, get_request("/api/v1/recipes/meta/filters")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cuisines"], json!(["Thai"]));
    assert_eq!(body["difficulties"], json!(["Easy", "Medium"]));
    assert_eq!(body["dietaryTags"], json!(["gluten-free", "vegan"]));
}

#[tokio::test]
async fn health_reports_database_and_vision_status() {
    let (app, _state) = build_test_app(None).await;

    let (status, body) = send(app, get_request("/api/v1/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"]["status"], "ok");
    assert_eq!(body["vision"]["status"], "unavailable");
    assert!(body["version"].is_string());
}
