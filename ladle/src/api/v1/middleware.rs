//! Bearer-token authentication middleware for the v1 API.
//!
//! Protects the favorites and profile routes. Validates the
//! `Authorization: Bearer <token>` header as a JWT signed with the
//! configured secret, loads the account, and injects it as a
//! [`CurrentUser`] request extension.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::api::state::AppState;
use crate::error::LadleError;
use crate::models::User;

/// The authenticated account, available to protected handlers via
/// `Extension<CurrentUser>`.
#[derive(Clone)]
pub struct CurrentUser(pub User);

pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    if state.config.auth.jwt_secret.is_empty() {
        return LadleError::Auth(
            "Authentication is not configured. Set JWT_SECRET to enable accounts.".to_string(),
        )
        .into_response();
    }

    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(h) if h.starts_with("Bearer ") => &h[7..],
        Some(_) => {
            return LadleError::Auth(
                "Invalid authorization header format. Expected: Bearer <token>".to_string(),
            )
            .into_response();
        }
        None => {
            return LadleError::Auth("Access token required".to_string()).into_response();
        }
    };

    let claims = match crate::auth::decode_token(token, &state.config.auth.jwt_secret) {
        Ok(claims) => claims,
        Err(error) => return error.into_response(),
    };

    let user = match state.db.get_user_by_id(&claims.sub).await {
        Ok(Some(user)) => user,
        Ok(None) => return LadleError::Auth("User not found".to_string()).into_response(),
        Err(error) => return error.into_response(),
    };

    request.extensions_mut().insert(CurrentUser(user));
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::state::AppState;
    use crate::config::{AuthConfig, Config, DatabaseConfig, SearchConfig, ServerConfig};
    use crate::db::{Database, LibSqlBackend, UserStore};
    use crate::vision::VisionProvider;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::{middleware, routing::get, Router};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn make_config(jwt_secret: &str) -> Config {
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
                jwt_secret: jwt_secret.to_string(),
                token_ttl_hours: 24,
            },
            search: SearchConfig {
                page_size: 12,
                max_page_size: 50,
            },
            vision: None,
        }
    }

    async fn build_test_app(jwt_secret: &str) -> (Router, AppState) {
        let config = make_config(jwt_secret);

        let raw_db = Database::new(&config.database).await.unwrap();
        let db: Arc<dyn crate::db::DatabaseBackend> = Arc::new(LibSqlBackend::new(raw_db));

        let state = AppState::new(config, db, VisionProvider::new(None));

        async fn protected_handler() -> &'static str {
            "protected"
        }

        async fn health_handler() -> &'static str {
            "healthy"
        }

        let public_routes = Router::new().route("/health", get(health_handler));

        let protected_routes = Router::new()
            .route("/protected", get(protected_handler))
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth_middleware,
            ));

        let app = Router::new()
            .merge(public_routes)
            .merge(protected_routes)
            .with_state(state.clone());

        (app, state)
    }

    async fn parse_error_body(response: Response) -> (StatusCode, serde_json::Value) {
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        (status, json)
    }

    async fn seed_user(state: &AppState) -> String {
        let user = User::new(
            "user-1".to_string(),
            "alice".to_string(),
            "alice@example.com".to_string(),
            "hash".to_string(),
        );
        state.db.create_user(&user).await.unwrap();
        user.id
    }

    #[tokio::test]
    async fn rejects_when_secret_not_configured() {
        let (app, _state) = build_test_app("").await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/protected")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let (status, json) = parse_error_body(response).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(json["error"]
            .as_str()
            .unwrap()
            .contains("Authentication is not configured"));
    }

    #[tokio::test]
    async fn rejects_missing_header() {
        let (app, _state) = build_test_app("test-secret").await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/protected")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let (status, json) = parse_error_body(response).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["error"], "Access token required");
        assert_eq!(json["code"], 401);
    }

    #[tokio::test]
    async fn rejects_malformed_header() {
        let (app, _state) = build_test_app("test-secret").await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/protected")
                    .header("Authorization", "Basic abc123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let (status, json) = parse_error_body(response).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(json["error"].as_str().unwrap().contains("Bearer"));
    }

    #[tokio::test]
    async fn rejects_invalid_token() {
        let (app, _state) = build_test_app("test-secret").await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/protected")
                    .header("Authorization", "Bearer not-a-real-token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let (status, json) = parse_error_body(response).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["error"], "Invalid token");
    }

    #[tokio::test]
    async fn rejects_token_for_unknown_user() {
        let (app, _state) = build_test_app("test-secret").await;
        let token = crate::auth::issue_token("ghost", "test-secret", 24).unwrap();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/protected")
                    .header("Authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let (status, json) = parse_error_body(response).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["error"], "User not found");
    }

    #[tokio::test]
    async fn allows_valid_token() {
        let (app, state) = build_test_app("test-secret").await;
        let user_id = seed_user(&state).await;
        let token = crate::auth::issue_token(&user_id, "test-secret", 24).unwrap();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/protected")
                    .header("Authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn health_bypasses_auth() {
        let (app, _state) = build_test_app("test-secret").await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
