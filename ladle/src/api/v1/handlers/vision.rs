//! v1 vision handlers: photo analysis and basic ingredient validation.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::api::state::AppState;
use crate::api::v1::dto::{
    AnalyzeImageRequest, AnalyzeImageResponse, ErrorResponse, ValidateIngredientsRequest,
    ValidateIngredientsResponse, ValidatedIngredient,
};
use crate::error::{LadleError, Result};

/// `POST /api/v1/vision/analyze`
///
/// Send a base64-encoded food photo to the external vision model and get
/// back ingredient names ready to feed into recipe search.
#[utoipa::path(
    post,
    path = "/api/v1/vision/analyze",
    tag = "vision",
    request_body = AnalyzeImageRequest,
    responses(
        (status = 200, description = "Detected ingredients", body = AnalyzeImageResponse),
        (status = 400, description = "Missing or invalid image data", body = ErrorResponse),
        (status = 503, description = "Vision model not configured", body = ErrorResponse),
    )
)]
pub async fn analyze_image(
    State(state): State<AppState>,
    payload: std::result::Result<Json<AnalyzeImageRequest>, JsonRejection>,
) -> Result<Json<AnalyzeImageResponse>> {
    let Json(request) = payload.map_err(|rejection| match rejection {
        JsonRejection::JsonDataError(_) => {
            LadleError::Validation("Image data is required".to_string())
        }
        other => LadleError::Validation(other.body_text()),
    })?;

    if request.image.trim().is_empty() {
        return Err(LadleError::Validation("Image data is required".to_string()));
    }

    tracing::info!("Received image for ingredient analysis");
    let ingredients = state.vision.analyze(&request.image).await?;
    tracing::info!(detected = ingredients.len(), "Vision analysis complete");

    Ok(Json(AnalyzeImageResponse {
        success: true,
        detected_count: ingredients.len(),
        message: format!("Found {} ingredients", ingredients.len()),
        ingredients,
    }))
}

/// `POST /api/v1/vision/validate`
///
/// Cheap text-side validation of typed ingredient names: trimmed and
/// lowercased, valid when longer than one character.
#[utoipa::path(
    post,
    path = "/api/v1/vision/validate",
    tag = "vision",
    request_body = ValidateIngredientsRequest,
    responses(
        (status = 200, description = "Validation verdicts per ingredient", body = ValidateIngredientsResponse),
        (status = 400, description = "Missing ingredient list", body = ErrorResponse),
    )
)]
pub async fn validate_ingredients(
    payload: std::result::Result<Json<ValidateIngredientsRequest>, JsonRejection>,
) -> Result<Json<ValidateIngredientsResponse>> {
    let Json(request) = payload.map_err(|rejection| match rejection {
        JsonRejection::JsonDataError(_) => {
            LadleError::Validation("Ingredients array is required".to_string())
        }
        other => LadleError::Validation(other.body_text()),
    })?;

    let ingredients: Vec<ValidatedIngredient> = request
        .ingredients
        .iter()
        .map(|ingredient| {
            let trimmed = ingredient.trim();
            ValidatedIngredient {
                name: trimmed.to_lowercase(),
                valid: trimmed.len() > 1,
            }
        })
        .collect();

    let valid_count = ingredients.iter().filter(|ing| ing.valid).count();

    Ok(Json(ValidateIngredientsResponse {
        success: true,
        ingredients,
        valid_count,
    }))
}
