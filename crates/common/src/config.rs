use crate::error::UnstuckError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_TEXT_MODEL: &str = "models/gemini-2.5-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "models/gemini-flash-latest";
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Life Unstuck application configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Gemini API key; `None` leaves the assistant unconfigured
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Model used for the coordinator and polisher calls
    pub text_model: String,

    /// Multimodal model used to describe uploaded images
    pub image_model: String,

    /// Gemini API base URL
    pub api_base_url: String,

    /// HTTP request timeout in seconds
    pub request_timeout_secs: u64,

    /// Base delay between rate-limited attempts (0 = retry immediately)
    pub retry_backoff_ms: u64,

    /// Server bind address
    pub server_host: String,

    /// Server port
    pub server_port: u16,

    /// Maximum accepted upload size in bytes
    pub upload_limit_bytes: usize,

    /// Log directory
    pub log_dir: PathBuf,

    /// Log level
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: 120,
            retry_backoff_ms: 0,
            server_host: "0.0.0.0".to_string(),
            server_port: 8080,
            upload_limit_bytes: 10 * 1024 * 1024,
            log_dir: PathBuf::from("./log"),
            log_level: "info".to_string(),
        }
    }
}

// The key must never reach the logs.
impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("text_model", &self.text_model)
            .field("image_model", &self.image_model)
            .field("api_base_url", &self.api_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("retry_backoff_ms", &self.retry_backoff_ms)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("upload_limit_bytes", &self.upload_limit_bytes)
            .field("log_dir", &self.log_dir)
            .field("log_level", &self.log_level)
            .finish()
    }
}

fn parse_var<T: FromStr>(value: Option<String>) -> Option<T> {
    value.and_then(|s| s.trim().parse().ok())
}

impl AppConfig {
    /// Load configuration from environment variables and .env file
    pub fn from_env() -> Result<Self, UnstuckError> {
        // Load .env file (ignore if not exists)
        let _ = dotenv::dotenv();

        let config = Self::from_lookup(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            api_key: non_empty("GEMINI_API_KEY").or_else(|| non_empty("API_KEY")),
            text_model: non_empty("TEXT_MODEL").unwrap_or(defaults.text_model),
            image_model: non_empty("IMAGE_MODEL").unwrap_or(defaults.image_model),
            api_base_url: non_empty("GEMINI_BASE_URL").unwrap_or(defaults.api_base_url),
            request_timeout_secs: parse_var(non_empty("REQUEST_TIMEOUT_SECS"))
                .unwrap_or(defaults.request_timeout_secs),
            retry_backoff_ms: parse_var(non_empty("RETRY_BACKOFF_MS")).unwrap_or(defaults.retry_backoff_ms),
            server_host: non_empty("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: parse_var(non_empty("SERVER_PORT")).unwrap_or(defaults.server_port),
            upload_limit_bytes: parse_var(non_empty("UPLOAD_LIMIT_BYTES"))
                .unwrap_or(defaults.upload_limit_bytes),
            log_dir: non_empty("LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
            log_level: non_empty("LOG_LEVEL").unwrap_or(defaults.log_level),
        }
    }

    /// Whether a Gemini API key is available
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Get server bind address (host:port)
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), UnstuckError> {
        if self.text_model.trim().is_empty() {
            return Err(UnstuckError::config("Text model name cannot be empty"));
        }

        if self.image_model.trim().is_empty() {
            return Err(UnstuckError::config("Image model name cannot be empty"));
        }

        if !self.api_base_url.starts_with("http://")
            && !self.api_base_url.starts_with("https://") {
            return Err(UnstuckError::config(
                "Gemini base URL must start with http:// or https://"
            ));
        }

        if self.request_timeout_secs == 0 {
            return Err(UnstuckError::config("Request timeout cannot be 0"));
        }

        // Validate port range
        if self.server_port == 0 {
            return Err(UnstuckError::config("Server port cannot be 0"));
        }

        Ok(())
    }
}
