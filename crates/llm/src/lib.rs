//! Life Unstuck LLM Integration
//!
//! Gemini API client, resilient model calls and the two-stage plan pipeline

mod client;
mod llm_trait;
mod model_client;
mod pipeline;
mod prompts;
mod types;

pub use client::GeminiClient;
pub use llm_trait::LlmClient;
pub use model_client::{ModelClient, RetryPolicy, IMAGE_DESCRIBE_PROMPT};
pub use pipeline::{PlanRequest, UnstuckPipeline};
pub use prompts::{coordinator_prompt, polisher_prompt, CATEGORIES};
pub use types::{
    Blob, CallOutcome, GenerateRequest, ModelKind, ModelSet, Part, IMAGE_MIME_TYPE,
    RETRY_LIMIT_REACHED, UNAVAILABLE,
};
