use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use unstuck_common::{AppConfig, Result};

use crate::client::GeminiClient;
use crate::llm_trait::LlmClient;
use crate::types::{CallOutcome, GenerateRequest, ModelKind, ModelSet};

/// Instruction sent alongside an uploaded image
pub const IMAGE_DESCRIBE_PROMPT: &str = "Describe this image in 3–4 simple lines in friendly English.";

/// Bounded retry for rate-limited calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,

    /// Base delay, doubled after each rate-limited attempt; zero retries immediately
    pub backoff_base: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_base: Duration::ZERO,
        }
    }
}

impl RetryPolicy {
    fn delay_after(&self, attempt: u32) -> Duration {
        self.backoff_base * 2u32.saturating_pow(attempt.saturating_sub(1))
    }
}

/// Resilient "ask the model" wrapper around an optional backend
///
/// Never fails: every failure mode resolves to a string (or a `CallOutcome`).
#[derive(Clone)]
pub struct ModelClient {
    backend: Option<Arc<dyn LlmClient>>,
    models: ModelSet,
    retry: RetryPolicy,
}

impl ModelClient {
    /// Create new model client; `None` backend means no credential is configured
    pub fn new(backend: Option<Arc<dyn LlmClient>>, models: ModelSet) -> Self {
        Self {
            backend,
            models,
            retry: RetryPolicy::default(),
        }
    }

    /// Build the Gemini-backed client from configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let backend = GeminiClient::from_config(config)?
            .map(|client| Arc::new(client) as Arc<dyn LlmClient>);

        if backend.is_none() {
            warn!("No Gemini API key configured; answers will be \"AI unavailable.\"");
        }

        let models = ModelSet::new(&config.text_model, &config.image_model);
        Ok(Self::new(backend, models).with_retry_policy(RetryPolicy {
            backoff_base: Duration::from_millis(config.retry_backoff_ms),
            ..RetryPolicy::default()
        }))
    }

    /// Override the retry policy
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Whether a backend is available
    pub fn is_configured(&self) -> bool {
        self.backend.is_some()
    }

    /// Ask the model; failures become sentinel strings
    pub async fn call(&self, prompt: &str, model: ModelKind) -> String {
        self.call_outcome(prompt, model).await.into_text()
    }

    /// Ask the model with bounded retry on rate limiting
    pub async fn call_outcome(&self, prompt: &str, model: ModelKind) -> CallOutcome {
        let Some(backend) = &self.backend else {
            return CallOutcome::Unconfigured;
        };

        let model_id = self.models.resolve(model);
        let max_attempts = self.retry.max_attempts.max(1);

        for attempt in 1..=max_attempts {
            match backend.generate(GenerateRequest::text(model_id, prompt)).await {
                Ok(text) => {
                    debug!("Model call succeeded (attempt {}/{}) - Model: {}", attempt, max_attempts, model_id);
                    return CallOutcome::Success(text.trim().to_string());
                }
                Err(e) if e.is_rate_limited() => {
                    warn!("Model call rate limited (attempt {}/{}): {}", attempt, max_attempts, e);
                    let delay = self.retry.delay_after(attempt);
                    if attempt < max_attempts && !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                }
                Err(e) => {
                    warn!("Model call failed - Model: {}: {}", model_id, e);
                    return CallOutcome::ServiceError(e.to_string());
                }
            }
        }

        CallOutcome::RateLimited
    }

    /// Describe an image in a few friendly lines; empty on any failure
    pub async fn describe_image(&self, image: &[u8]) -> String {
        let Some(backend) = &self.backend else {
            return String::new();
        };

        let request = GenerateRequest::text(&self.models.image, IMAGE_DESCRIBE_PROMPT).with_image(image);

        match backend.generate(request).await {
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                warn!("Image description failed, continuing without it: {}", e);
                String::new()
            }
        }
    }

    /// Single test prompt against the text model
    pub async fn check_key(&self) -> CallOutcome {
        self.call_outcome("Test", ModelKind::Text).await
    }
}
