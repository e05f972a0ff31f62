use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use unstuck_common::UnstuckError;

/// Message shown when a submission carries neither text nor image
pub const EMPTY_SUBMISSION: &str = "Please type something or upload an image.";

/// JSON plan request
#[derive(Debug, Deserialize)]
pub struct PlanApiRequest {
    /// User problem description
    #[serde(default)]
    pub text: String,

    /// Optional PNG/JPEG image, base64-encoded
    pub image_base64: Option<String>,

    /// Legacy category hint (ignored)
    pub category: Option<String>,
}

/// JSON plan response
#[derive(Debug, Serialize, Deserialize)]
pub struct PlanApiResponse {
    /// Final answer (or sentinel string)
    pub answer: String,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,

    /// Whether an API key is configured
    pub ai_configured: bool,
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// JSON error wrapper for API routes
#[derive(Debug)]
pub struct ApiError(pub UnstuckError);

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<UnstuckError> for ApiError {
    fn from(err: UnstuckError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// User-facing message; input errors carry their own text
    pub fn message(&self) -> String {
        match &self.0 {
            UnstuckError::InvalidInput(msg) | UnstuckError::PayloadTooLarge(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.message(),
        })
    }
}
