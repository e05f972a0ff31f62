use unstuck_common::AppConfig;
use unstuck_llm::UnstuckPipeline;

/// Shared application state
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,

    /// Plan pipeline (holds the read-only model client)
    pub pipeline: UnstuckPipeline,
}

impl AppState {
    /// Create new application state
    pub fn new(config: AppConfig, pipeline: UnstuckPipeline) -> Self {
        Self { config, pipeline }
    }
}
