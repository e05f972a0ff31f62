use unstuck_common::Result;
use crate::types::GenerateRequest;
use async_trait::async_trait;

/// Common trait for remote generative-model backends
///
/// Implementations perform exactly one remote call per invocation and
/// report throttling as `UnstuckError::RateLimited` so callers can retry.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Generate text for the given parts; returns the first candidate's first text part
    async fn generate(&self, request: GenerateRequest) -> Result<String>;
}
