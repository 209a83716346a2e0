use std::time::Duration;

use async_openai::{
    config::OpenAIConfig,
    error::{ApiError, OpenAIError},
    types::{
        ChatCompletionRequestMessageContentPartImageArgs,
        ChatCompletionRequestMessageContentPartTextArgs, ChatCompletionRequestUserMessageArgs,
        ChatCompletionRequestUserMessageContentPart, CreateChatCompletionRequest,
        CreateChatCompletionRequestArgs, CreateChatCompletionResponse, ImageDetail, ImageUrlArgs,
    },
    Client,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use crate::config::{parse_vision_provider_model, VisionConfig};
use crate::error::{LadleError, Result};

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
const OLLAMA_BASE_URL: &str = "http://localhost:11434/v1";
const LMSTUDIO_BASE_URL: &str = "http://localhost:1234/v1";

/// Instruction sent alongside the photo. The model must answer with a plain
/// comma-separated ingredient list (or `none`), which `parse_ingredients`
/// turns into names.
const ANALYZE_PROMPT: &str = r#"You are an expert chef and nutritionist analyzing food images for recipe generation.

Carefully examine this food image and identify ALL visible ingredients that could be used in cooking.
Focus on ingredients that would appear in a recipe.

RETURN ONLY a comma-separated list of ingredient names.
- Be specific: "chicken breast" not just "chicken", "red bell pepper" not just "pepper"
- Include herbs, spices, oils, and cooking ingredients
- Skip utensils, plates, packaging, or non-food items
- If multiple items of same type, list once
- If no clear food ingredients, return: "none"

Examples of good responses:
"chicken breast, red bell pepper, yellow onion, garlic, olive oil, salt, black pepper"
"tomatoes, fresh basil, mozzarella cheese, olive oil, balsamic vinegar"

Now analyze this food image and provide the comma-separated list:"#;

#[derive(Debug, Clone)]
struct ApiConfig {
    base_url: String,
    api_key: Option<String>,
    model: String,
    timeout_secs: u64,
    max_retries: u32,
    max_ingredients: usize,
}

impl ApiConfig {
    fn from_vision_config(config: &VisionConfig) -> Self {
        let (provider, model) = parse_vision_provider_model(&config.model);

        let base_url = config.base_url.clone().unwrap_or_else(|| {
            match provider.to_lowercase().as_str() {
                "openrouter" => OPENROUTER_BASE_URL,
                "ollama" => OLLAMA_BASE_URL,
                "lmstudio" => LMSTUDIO_BASE_URL,
                _ => OPENAI_BASE_URL,
            }
            .to_string()
        });

        Self {
            base_url,
            api_key: config.api_key.clone(),
            model: model.to_string(),
            timeout_secs: config.timeout_secs,
            max_retries: config.max_retries,
            max_ingredients: config.max_ingredients,
        }
    }
}

#[derive(Clone)]
pub struct VisionApiClient {
    client: Client<OpenAIConfig>,
    config: ApiConfig,
}

impl VisionApiClient {
    pub fn new(config: &VisionConfig) -> Result<Self> {
        let api_config = ApiConfig::from_vision_config(config);

        let (provider, _) = parse_vision_provider_model(&config.model);
        let needs_api_key = !matches!(
            provider.to_lowercase().as_str(),
            "ollama" | "local" | "lmstudio"
        );

        if needs_api_key && api_config.api_key.is_none() {
            return Err(LadleError::Vision(
                "API key required for this provider".to_string(),
            ));
        }

        let openai_config = OpenAIConfig::new()
            .with_api_base(api_config.base_url.clone())
            .with_api_key(api_config.api_key.clone().unwrap_or_default());

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(api_config.timeout_secs))
            .build()
            .map_err(|error| {
                LadleError::Vision(format!("Failed to create vision HTTP client: {error}"))
            })?;

        // Cap async-openai's internal backoff at our timeout; its default
        // max_elapsed_time keeps retrying server errors for up to 15 minutes.
        let backoff = backoff::ExponentialBackoff {
            max_elapsed_time: Some(Duration::from_secs(api_config.timeout_secs)),
            ..Default::default()
        };

        let client = Client::with_config(openai_config)
            .with_http_client(http_client)
            .with_backoff(backoff);

        Ok(Self {
            client,
            config: api_config,
        })
    }

    pub async fn analyze(&self, image_base64: &str) -> Result<Vec<String>> {
        let data_url = build_data_url(image_base64)?;

        let mut last_error: Option<LadleError> = None;

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                let delay_ms = 100 * 2_u64.pow(attempt - 1);
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }

            let request = self.build_request(&data_url)?;

            match self.client.chat().create(request).await {
                Ok(response) => {
                    let content = Self::extract_content(response)?;
                    return Ok(parse_ingredients(&content, self.config.max_ingredients));
                }
                Err(error) => {
                    if let Some(rate_limit_error) = Self::rate_limit_error(&error) {
                        return Err(rate_limit_error);
                    }

                    if let Some(auth_error) = Self::auth_error(&error) {
                        return Err(auth_error);
                    }

                    let retryable = Self::is_retryable(&error);
                    let mapped_error = Self::map_openai_error(error);

                    if retryable && attempt < self.config.max_retries {
                        last_error = Some(mapped_error);
                        continue;
                    }

                    return Err(mapped_error);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| LadleError::Vision("Vision analysis failed after retries".to_string())))
    }

    fn build_request(&self, image_data_url: &str) -> Result<CreateChatCompletionRequest> {
        let parts: Vec<ChatCompletionRequestUserMessageContentPart> = vec![
            ChatCompletionRequestMessageContentPartTextArgs::default()
                .text(ANALYZE_PROMPT)
                .build()
                .map_err(|error| LadleError::Vision(format!("Invalid prompt part: {error}")))?
                .into(),
            ChatCompletionRequestMessageContentPartImageArgs::default()
                .image_url(
                    ImageUrlArgs::default()
                        .url(image_data_url)
                        .detail(ImageDetail::Auto)
                        .build()
                        .map_err(|error| {
                            LadleError::Vision(format!("Invalid image part: {error}"))
                        })?,
                )
                .build()
                .map_err(|error| LadleError::Vision(format!("Invalid image part: {error}")))?
                .into(),
        ];

        let messages = vec![ChatCompletionRequestUserMessageArgs::default()
            .content(parts)
            .build()
            .map_err(|error| LadleError::Vision(format!("Invalid vision message: {error}")))?
            .into()];

        CreateChatCompletionRequestArgs::default()
            .model(self.config.model.clone())
            .messages(messages)
            .build()
            .map_err(|error| LadleError::Vision(format!("Invalid vision request: {error}")))
    }

    fn extract_content(response: CreateChatCompletionResponse) -> Result<String> {
        let message = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LadleError::Vision("Vision response contained no choices".to_string()))?
            .message
            .content
            .unwrap_or_default();

        if message.trim().is_empty() {
            return Err(LadleError::Vision(
                "Vision response contained empty content".to_string(),
            ));
        }

        Ok(message)
    }

    fn is_retryable(error: &OpenAIError) -> bool {
        match error {
            OpenAIError::ApiError(api_error) => {
                api_error.r#type.is_none() && api_error.code.is_none()
            }
            OpenAIError::Reqwest(reqwest_error) => reqwest_error
                .status()
                .map(|status| status.is_server_error())
                .unwrap_or(true),
            _ => false,
        }
    }

    fn rate_limit_error(error: &OpenAIError) -> Option<LadleError> {
        match error {
            OpenAIError::Reqwest(reqwest_error)
                if reqwest_error.status() == Some(reqwest::StatusCode::TOO_MANY_REQUESTS) =>
            {
                Some(LadleError::VisionRateLimit { retry_after: None })
            }
            OpenAIError::ApiError(api_error) if Self::is_rate_limit_api_error(api_error) => {
                Some(LadleError::VisionRateLimit { retry_after: None })
            }
            _ => None,
        }
    }

    fn auth_error(error: &OpenAIError) -> Option<LadleError> {
        match error {
            OpenAIError::Reqwest(reqwest_error)
                if reqwest_error.status() == Some(reqwest::StatusCode::UNAUTHORIZED)
                    || reqwest_error.status() == Some(reqwest::StatusCode::FORBIDDEN) =>
            {
                Some(LadleError::VisionAuth(format!(
                    "Vision authentication failed: {reqwest_error}"
                )))
            }
            OpenAIError::ApiError(api_error) if Self::is_auth_api_error(api_error) => Some(
                LadleError::VisionAuth(format!("Vision authentication failed: {api_error}")),
            ),
            _ => None,
        }
    }

    fn is_rate_limit_api_error(api_error: &ApiError) -> bool {
        let message = api_error.message.to_lowercase();
        let error_type = api_error.r#type.clone().unwrap_or_default().to_lowercase();
        let code = api_error.code.clone().unwrap_or_default().to_lowercase();

        message.contains("rate limit")
            || message.contains("too many requests")
            || error_type.contains("rate_limit")
            || code.contains("rate_limit")
            || code == "insufficient_quota"
    }

    fn is_auth_api_error(api_error: &ApiError) -> bool {
        let message = api_error.message.to_lowercase();
        let error_type = api_error.r#type.clone().unwrap_or_default().to_lowercase();
        let code = api_error.code.clone().unwrap_or_default().to_lowercase();

        message.contains("unauthorized")
            || message.contains("forbidden")
            || message.contains("authentication")
            || message.contains("invalid api key")
            || code.contains("invalid_api_key")
            || code.contains("authentication")
            || error_type.contains("authentication")
    }

    fn map_openai_error(error: OpenAIError) -> LadleError {
        match error {
            OpenAIError::Reqwest(reqwest_error) => {
                LadleError::Vision(format!("Vision request failed: {reqwest_error}"))
            }
            OpenAIError::ApiError(api_error) => {
                LadleError::Vision(format!("Vision API error: {api_error}"))
            }
            other => LadleError::Vision(format!("Vision call failed: {other}")),
        }
    }
}

/// Normalize the inbound payload into a `data:` URL the API accepts.
///
/// Accepts either a bare base64 string or a full data URL; the mime type is
/// taken from the prefix when present, defaulting to JPEG.
fn build_data_url(image_base64: &str) -> Result<String> {
    let trimmed = image_base64.trim();
    if trimmed.is_empty() {
        return Err(LadleError::Validation("Image data is required".to_string()));
    }

    let (mime, data) = match trimmed.strip_prefix("data:") {
        Some(rest) => {
            let (header, data) = rest.split_once(";base64,").ok_or_else(|| {
                LadleError::Validation("Image data URL must be base64-encoded".to_string())
            })?;
            let mime = match header {
                "image/jpeg" | "image/jpg" => "image/jpeg",
                "image/png" => "image/png",
                "image/webp" => "image/webp",
                _ => "image/jpeg",
            };
            (mime, data)
        }
        None => ("image/jpeg", trimmed),
    };

    BASE64
        .decode(data)
        .map_err(|_| LadleError::Validation("Invalid base64 image data".to_string()))?;

    Ok(format!("data:{mime};base64,{data}"))
}

/// Turn the model's comma-separated answer into clean ingredient names.
///
/// Lowercases, treats `none`/apology text as empty, drops single-character
/// fragments and error phrases, strips a leading `ingredients:` label and a
/// trailing period, and caps the list length.
fn parse_ingredients(text: &str, max_ingredients: usize) -> Vec<String> {
    let text = text.trim().to_lowercase();

    if text.is_empty()
        || text == "none"
        || text.contains("no ingredients")
        || text.contains("unable to identify")
    {
        return Vec::new();
    }

    text.split(',')
        .map(|ingredient| ingredient.trim())
        .filter(|ingredient| {
            ingredient.len() > 1
                && *ingredient != "none"
                && !ingredient.contains("sorry")
                && !ingredient.contains("unable")
                && !ingredient.contains("error")
                && !ingredient.contains("cannot")
                && !ingredient.contains("please provide")
        })
        .map(|ingredient| {
            ingredient
                .strip_prefix("ingredients:")
                .or_else(|| ingredient.strip_prefix("ingredient:"))
                .unwrap_or(ingredient)
                .trim_end_matches('.')
                .trim()
                .to_string()
        })
        .filter(|ingredient| !ingredient.is_empty())
        .take(max_ingredients)
        .collect()
}
