use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use unstuck_common::{AppConfig, Result, UnstuckError};
use tracing::{debug, info, warn};

use crate::llm_trait::LlmClient;
use crate::types::{ApiErrorBody, GenerateContentBody, GenerateContentResponse, GenerateRequest};

/// Gemini `generateContent` API client
#[derive(Clone)]
pub struct GeminiClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Create new Gemini client
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: std::time::Duration,
    ) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        info!("Gemini client initialized: {}", base_url);
        Ok(Self {
            base_url,
            api_key: api_key.into(),
            client,
        })
    }

    /// Create a client from configuration; `None` when no API key is set
    pub fn from_config(config: &AppConfig) -> Result<Option<Self>> {
        match &config.api_key {
            Some(key) => Self::new(
                &config.api_base_url,
                key,
                std::time::Duration::from_secs(config.request_timeout_secs),
            )
            .map(Some),
            None => Ok(None),
        }
    }

    /// Endpoint for a model; bare names get the `models/` prefix
    fn endpoint(&self, model: &str) -> String {
        let model = model.trim_start_matches('/');
        if model.starts_with("models/") {
            format!("{}/v1beta/{}:generateContent", self.base_url, model)
        } else {
            format!("{}/v1beta/models/{}:generateContent", self.base_url, model)
        }
    }

    /// Single attempt; no retry here
    async fn try_generate(&self, request: &GenerateRequest) -> Result<String> {
        let url = self.endpoint(&request.model);

        debug!(
            "Sending generateContent request - Model: {}, Parts: {}, Prompt length: {}",
            request.model,
            request.parts.len(),
            request.prompt_text().len()
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&GenerateContentBody::from(request))
            .send()
            .await
            .map_err(|e| UnstuckError::network(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_failure(status, &body));
        }

        let result: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| UnstuckError::llm(format!("Failed to parse response: {}", e)))?;

        let Some(text) = result.first_text() else {
            let finish_reason = result
                .candidates
                .first()
                .and_then(|c| c.finish_reason.as_deref())
                .unwrap_or("none");
            warn!("Gemini response carried no text - Finish reason: {}", finish_reason);
            return Err(UnstuckError::llm(format!(
                "No text in Gemini response (finish reason: {})",
                finish_reason
            )));
        };

        debug!("Received response from Gemini - Length: {}", text.len());
        Ok(text.to_string())
    }
}

/// Map a non-2xx response onto the error taxonomy
fn classify_failure(status: StatusCode, body: &str) -> UnstuckError {
    let api_error = serde_json::from_str::<ApiErrorBody>(body).ok().map(|b| b.error);

    let detail = match &api_error {
        Some(err) if !err.message.is_empty() => format!("{} {}", status, err.message),
        _ if !body.trim().is_empty() => format!("{} {}", status, body.trim()),
        _ => status.to_string(),
    };

    let exhausted = api_error
        .as_ref()
        .map(|err| err.code == 429 || err.status == "RESOURCE_EXHAUSTED")
        .unwrap_or(false);

    if status == StatusCode::TOO_MANY_REQUESTS || exhausted {
        UnstuckError::rate_limited(detail)
    } else {
        UnstuckError::llm(format!("Gemini API error: {}", detail))
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn generate(&self, request: GenerateRequest) -> Result<String> {
        self.try_generate(&request).await
    }
}
