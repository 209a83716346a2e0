use std::sync::Arc;

use crate::config::{parse_vision_provider_model, VisionConfig};
use crate::error::{LadleError, Result};
use crate::vision::api::VisionApiClient;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisionBackend {
    OpenAI,
    OpenRouter,
    Ollama,
    LmStudio,
    OpenAICompatible { base_url: String },
    Unavailable { reason: String },
}

#[derive(Debug, Clone)]
pub struct VisionProvider {
    backend: VisionBackend,
    config: Option<Arc<VisionConfig>>,
}

impl VisionProvider {
    pub fn new(config: Option<&VisionConfig>) -> Self {
        let Some(config) = config else {
            return Self::unavailable("No vision configuration provided");
        };

        let (provider, _model) = parse_vision_provider_model(&config.model);

        let backend = match provider.to_lowercase().as_str() {
            "openai" => VisionBackend::OpenAI,
            "openrouter" => VisionBackend::OpenRouter,
            "ollama" => VisionBackend::Ollama,
            "lmstudio" => VisionBackend::LmStudio,
            _ => {
                if let Some(base_url) = &config.base_url {
                    VisionBackend::OpenAICompatible {
                        base_url: base_url.clone(),
                    }
                } else {
                    VisionBackend::Unavailable {
                        reason: format!("Unknown provider in model: {}", config.model),
                    }
                }
            }
        };

        Self {
            backend,
            config: Some(Arc::new(config.clone())),
        }
    }

    pub fn unavailable(reason: &str) -> Self {
        Self {
            backend: VisionBackend::Unavailable {
                reason: reason.to_string(),
            },
            config: None,
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self.backend, VisionBackend::Unavailable { .. })
    }

    pub fn backend(&self) -> &VisionBackend {
        &self.backend
    }

    pub fn config(&self) -> Option<&VisionConfig> {
        self.config.as_deref()
    }

    /// Analyze a base64-encoded food photo and return detected ingredient
    /// names, lowercased, capped at the configured maximum.
    pub async fn analyze(&self, image_base64: &str) -> Result<Vec<String>> {
        if !self.is_available() {
            return Err(LadleError::VisionUnavailable(self.unavailable_reason()));
        }

        let config = self
            .config()
            .ok_or_else(|| LadleError::VisionUnavailable("No config available".to_string()))?;

        let client = VisionApiClient::new(config)?;
        client.analyze(image_base64).await
    }

    fn unavailable_reason(&self) -> String {
        match &self.backend {
            VisionBackend::Unavailable { reason } => reason.clone(),
            _ => "Vision analysis is not available".to_string(),
        }
    }
}
