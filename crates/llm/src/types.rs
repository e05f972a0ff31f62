use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

/// MIME type attached to every uploaded image
pub const IMAGE_MIME_TYPE: &str = "image/png";

/// One unit of multi-modal content inside a request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    /// Plain text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Inline binary payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<Blob>,
}

impl Part {
    /// Text part
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    /// Image part, base64-encoded and tagged `image/png`
    pub fn inline_image(bytes: &[u8]) -> Self {
        Self {
            text: None,
            inline_data: Some(Blob {
                mime_type: IMAGE_MIME_TYPE.to_string(),
                data: BASE64.encode(bytes),
            }),
        }
    }
}

/// Inline binary data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blob {
    /// MIME type (e.g., "image/png")
    pub mime_type: String,

    /// Base64-encoded bytes
    pub data: String,
}

/// A model call: target model and ordered content parts
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    /// Model identifier (e.g., "models/gemini-2.5-flash")
    pub model: String,

    /// Ordered content parts
    pub parts: Vec<Part>,
}

impl GenerateRequest {
    /// Single text part request
    pub fn text(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            parts: vec![Part::text(prompt)],
        }
    }

    /// Append an inline image part
    pub fn with_image(mut self, bytes: &[u8]) -> Self {
        self.parts.push(Part::inline_image(bytes));
        self
    }

    /// Concatenated text of all text parts
    pub fn prompt_text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Whether any part carries inline data
    pub fn has_inline_data(&self) -> bool {
        self.parts.iter().any(|p| p.inline_data.is_some())
    }
}

/// Gemini `generateContent` request body
#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentBody {
    pub contents: Vec<Content>,
}

impl From<&GenerateRequest> for GenerateContentBody {
    fn from(request: &GenerateRequest) -> Self {
        Self {
            contents: vec![Content {
                role: None,
                parts: request.parts.clone(),
            }],
        }
    }
}

/// Content block (request and response)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    #[serde(default)]
    pub parts: Vec<Part>,
}

/// Gemini `generateContent` response body
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// First text part of the first candidate
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
    }
}

/// Response candidate
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,

    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Gemini error envelope: `{"error": {...}}`
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiError,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub code: u16,

    #[serde(default)]
    pub message: String,

    /// gRPC-style status (e.g., "RESOURCE_EXHAUSTED")
    #[serde(default)]
    pub status: String,
}

/// Which configured model a call targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    /// Fast general-purpose text model
    Text,
    /// Multimodal model
    Image,
}

/// The configured model pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSet {
    pub text: String,
    pub image: String,
}

impl ModelSet {
    pub fn new(text: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            image: image.into(),
        }
    }

    /// Resolve a model kind to its identifier
    pub fn resolve(&self, kind: ModelKind) -> &str {
        match kind {
            ModelKind::Text => &self.text,
            ModelKind::Image => &self.image,
        }
    }
}

/// Returned when no API key is configured
pub const UNAVAILABLE: &str = "AI unavailable.";

/// Returned when every attempt was rate limited
pub const RETRY_LIMIT_REACHED: &str = "[Retry limit reached]";

/// Typed result of one logical model call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome {
    /// Trimmed model output
    Success(String),
    /// No backend configured
    Unconfigured,
    /// Rate limited on every attempt
    RateLimited,
    /// Non-retryable failure
    ServiceError(String),
}

impl CallOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Boundary string shown to the user
    pub fn into_text(self) -> String {
        match self {
            Self::Success(text) => text,
            Self::Unconfigured => UNAVAILABLE.to_string(),
            Self::RateLimited => RETRY_LIMIT_REACHED.to_string(),
            Self::ServiceError(detail) => format!("[Error: {}]", detail),
        }
    }
}
