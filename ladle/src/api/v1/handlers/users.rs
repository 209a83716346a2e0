//! v1 account handlers: registration, login, profile.

use axum::{extract::State, http::StatusCode, Extension, Json};
use nanoid::nanoid;
use validator::Validate;

use crate::api::state::AppState;
use crate::api::v1::dto::{
    ErrorResponse, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, UserResponse,
};
use crate::api::v1::middleware::CurrentUser;
use crate::auth;
use crate::error::{LadleError, Result};
use crate::models::User;

/// `POST /api/v1/users/register`
#[utoipa::path(
    post,
    path = "/api/v1/users/register",
    tag = "users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = RegisterResponse),
        (status = 400, description = "Invalid registration data", body = ErrorResponse),
        (status = 409, description = "Email or username already registered", body = ErrorResponse),
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>)> {
    request
        .validate()
        .map_err(|error| LadleError::Validation(error.to_string()))?;

    if state
        .db
        .email_or_username_taken(&request.email, &request.username)
        .await?
    {
        return Err(LadleError::Conflict(
            "Email or username already registered".to_string(),
        ));
    }

    let password_hash = auth::hash_password(&request.password)?;
    let user = User::new(nanoid!(), request.username, request.email, password_hash);
    state.db.create_user(&user).await?;

    tracing::info!(user_id = %user.id, "Account created");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "Account created successfully".to_string(),
            user: user.into(),
        }),
    ))
}

/// `POST /api/v1/users/login`
#[utoipa::path(
    post,
    path = "/api/v1/users/login",
    tag = "users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Bearer token and profile", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    request
        .validate()
        .map_err(|error| LadleError::Validation(error.to_string()))?;

    let user = state
        .db
        .get_user_by_email(&request.email)
        .await?
        .ok_or_else(|| LadleError::Auth("Invalid email or password".to_string()))?;

    if !auth::verify_password(&request.password, &user.password_hash)? {
        return Err(LadleError::Auth("Invalid email or password".to_string()));
    }

    if state.config.auth.jwt_secret.is_empty() {
        return Err(LadleError::Internal(
            "JWT_SECRET is not configured".to_string(),
        ));
    }

    let token = auth::issue_token(
        &user.id,
        &state.config.auth.jwt_secret,
        state.config.auth.token_ttl_hours,
    )?;

    tracing::info!(user_id = %user.id, "Login successful");

    Ok(Json(LoginResponse {
        token,
        user: user.into(),
    }))
}

/// `GET /api/v1/users/profile`
#[utoipa::path(
    get,
    path = "/api/v1/users/profile",
    tag = "users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The authenticated account", body = UserResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    )
)]
pub async fn profile(Extension(CurrentUser(user)): Extension<CurrentUser>) -> Json<UserResponse> {
    Json(user.into())
}
