use serde::Deserialize;
use std::env;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub search: SearchConfig,
    pub vision: Option<VisionConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub auth_token: Option<String>,
    pub local_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_hours: u64,
}

/// Defaults for the paginated recipe listing.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    pub page_size: u32,
    pub max_page_size: u32,
}

/// Configuration for the external vision model that turns food photos into
/// ingredient names. Absent when `VISION_MODEL` is unset; the service still
/// starts and text-based search works normally.
#[derive(Debug, Clone, Deserialize)]
pub struct VisionConfig {
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: u64,
    pub max_retries: u32,
    /// Cap on how many ingredient names a single analysis may return.
    pub max_ingredients: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: env::var("LADLE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("LADLE_PORT", 6004),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").unwrap_or_else(|_| "file:ladle.db".to_string()),
                auth_token: env::var("DATABASE_AUTH_TOKEN").ok(),
                local_path: env::var("DATABASE_LOCAL_PATH").ok(),
            },
            auth: AuthConfig {
                jwt_secret: env::var("JWT_SECRET").unwrap_or_default(),
                token_ttl_hours: parse_env_or("JWT_TTL_HOURS", 24),
            },
            search: SearchConfig {
                page_size: parse_env_or("RECIPE_PAGE_SIZE", 12),
                max_page_size: parse_env_or("RECIPE_MAX_PAGE_SIZE", 50),
            },
            vision: env::var("VISION_MODEL").ok().map(|model| VisionConfig {
                model,
                api_key: env::var("VISION_API_KEY").ok(),
                base_url: env::var("VISION_BASE_URL").ok(),
                timeout_secs: parse_env_or("VISION_TIMEOUT", 30),
                max_retries: parse_env_or("VISION_MAX_RETRIES", 3),
                max_ingredients: parse_env_or("VISION_MAX_INGREDIENTS", 12),
            }),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}

/// Known vision providers that use OpenAI-compatible APIs.
pub const KNOWN_VISION_PROVIDERS: &[&str] = &["openai", "openrouter", "ollama", "lmstudio"];

/// Parse a vision model name into (provider, model) tuple.
pub fn parse_vision_provider_model(model: &str) -> (&str, &str) {
    if let Some((prefix, rest)) = model.split_once('/') {
        let prefix_lower = prefix.to_lowercase();
        if KNOWN_VISION_PROVIDERS.contains(&prefix_lower.as_str()) {
            return (prefix, rest);
        }
    }
    // Default to treating the whole string as a local model
    ("local", model)
}
