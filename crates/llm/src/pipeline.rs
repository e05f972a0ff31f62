use std::sync::Arc;
use tracing::{debug, info, Instrument};
use uuid::Uuid;

use crate::model_client::ModelClient;
use crate::prompts::{coordinator_prompt, polisher_prompt};
use crate::types::ModelKind;

/// One user submission
#[derive(Debug, Clone, Default)]
pub struct PlanRequest {
    /// Free text typed by the user
    pub text: String,

    /// Optional uploaded image bytes
    pub image: Option<Vec<u8>>,

    /// Legacy category hint, accepted and ignored
    pub category: Option<String>,
}

impl PlanRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_image(mut self, image: Vec<u8>) -> Self {
        self.image = Some(image);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// Two-call pipeline: coordinator note, then polished 5-step plan
///
/// Stateless; the model client is shared read-only between invocations.
#[derive(Clone)]
pub struct UnstuckPipeline {
    client: Arc<ModelClient>,
}

impl UnstuckPipeline {
    /// Create new pipeline
    pub fn new(client: Arc<ModelClient>) -> Self {
        Self { client }
    }

    /// Underlying model client
    pub fn client(&self) -> &ModelClient {
        &self.client
    }

    /// Run a request; the category hint is ignored
    pub async fn run_request(&self, request: &PlanRequest) -> String {
        if let Some(category) = &request.category {
            debug!("Ignoring legacy category hint: {}", category);
        }
        self.run(&request.text, request.image.as_deref()).await
    }

    /// Produce the final answer for `text` and an optional image
    pub async fn run(&self, text: &str, image: Option<&[u8]>) -> String {
        let span = tracing::info_span!("plan", request_id = %Uuid::new_v4());

        async move {
            info!(
                "Starting plan - Text length: {} chars, Image: {}",
                text.len(),
                image.map(|i| i.len()).unwrap_or(0)
            );

            // Step 1: image context
            let image_info = match image {
                Some(bytes) if !bytes.is_empty() => self.client.describe_image(bytes).await,
                _ => String::new(),
            };
            debug!("Image description length: {}", image_info.len());

            // Step 2: coordinator
            let agent_output = self
                .client
                .call(&coordinator_prompt(text, &image_info), ModelKind::Text)
                .await;
            debug!("Agent note length: {}", agent_output.len());

            // Step 3: polisher
            let answer = self
                .client
                .call(&polisher_prompt(&agent_output), ModelKind::Text)
                .await;

            info!("Plan finished - Answer length: {} chars", answer.len());
            answer
        }
        .instrument(span)
        .await
    }
}
