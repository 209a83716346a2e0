use axum::{extract::State, Json};
use serde::Serialize;

use crate::api::state::AppState;
use crate::vision::VisionBackend;

/// Health payload for `GET /api/v1/health`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct HealthData {
    pub status: String,
    pub version: String,
    pub database: DatabaseStatus,
    pub vision: VisionStatus,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct DatabaseStatus {
    pub status: String,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct VisionStatus {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// `GET /api/v1/health`
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "health",
    responses(
        (status = 200, description = "Service health status", body = HealthData),
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthData> {
    let database = match state.db.sync().await {
        Ok(_) => DatabaseStatus {
            status: "ok".to_string(),
        },
        Err(_) => DatabaseStatus {
            status: "error".to_string(),
        },
    };

    let vision = if state.vision.is_available() {
        let provider = match state.vision.backend() {
            VisionBackend::OpenAI => "openai",
            VisionBackend::OpenRouter => "openrouter",
            VisionBackend::Ollama => "ollama",
            VisionBackend::LmStudio => "lmstudio",
            VisionBackend::OpenAICompatible { .. } => "openai-compatible",
            VisionBackend::Unavailable { .. } => "unavailable",
        };
        let model = state.vision.config().map(|c| c.model.clone());
        VisionStatus {
            status: "available".to_string(),
            provider: Some(provider.to_string()),
            model,
        }
    } else {
        VisionStatus {
            status: "unavailable".to_string(),
            provider: None,
            model: None,
        }
    };

    Json(HealthData {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database,
        vision,
    })
}
