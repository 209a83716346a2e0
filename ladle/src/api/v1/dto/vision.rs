//! Vision analysis DTOs for the v1 API.

use serde::{Deserialize, Serialize};

/// Request body for `POST /v1/vision/analyze`.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct AnalyzeImageRequest {
    /// Base64-encoded photo, with or without a `data:image/...;base64,` prefix.
    pub image: String,
}

/// Response for `POST /v1/vision/analyze`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeImageResponse {
    pub success: bool,
    /// Detected ingredient names, ready to submit to recipe search.
    pub ingredients: Vec<String>,
    pub detected_count: usize,
    pub message: String,
}

/// Request body for `POST /v1/vision/validate`.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct ValidateIngredientsRequest {
    pub ingredients: Vec<String>,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ValidatedIngredient {
    /// Trimmed, lowercased name.
    pub name: String,
    pub valid: bool,
}

/// Response for `POST /v1/vision/validate`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidateIngredientsResponse {
    pub success: bool,
    pub ingredients: Vec<ValidatedIngredient>,
    pub valid_count: usize,
}
