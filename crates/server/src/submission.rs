//! Input validation shared by the form and JSON routes

use actix_multipart::Multipart;
use futures_util::StreamExt;
use std::path::Path;
use unstuck_common::{Result, UnstuckError};
use unstuck_llm::PlanRequest;

use crate::types::EMPTY_SUBMISSION;

const ALLOWED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];
const ALLOWED_MIME_TYPES: [&str; 2] = ["image/png", "image/jpeg"];

/// Raw user submission before validation
#[derive(Debug, Default)]
pub struct Submission {
    pub text: String,
    pub image: Option<Vec<u8>>,
    pub image_name: Option<String>,
    pub category: Option<String>,
}

impl Submission {
    /// Validate and turn into a pipeline request
    pub fn into_request(self) -> Result<PlanRequest> {
        if self.text.trim().is_empty() && self.image.is_none() {
            return Err(UnstuckError::invalid_input(EMPTY_SUBMISSION));
        }

        if let Some(name) = &self.image_name {
            let ext = Path::new(name)
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.to_ascii_lowercase())
                .unwrap_or_default();

            if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
                return Err(UnstuckError::invalid_input(format!(
                    "Unsupported image file '{}'. Please upload a PNG or JPEG image.",
                    name
                )));
            }
        }

        if let Some(image) = &self.image {
            let mime = infer::get(image).map(|t| t.mime_type());
            if !mime.map(|m| ALLOWED_MIME_TYPES.contains(&m)).unwrap_or(false) {
                return Err(UnstuckError::invalid_input(
                    "The uploaded file is not a PNG or JPEG image.",
                ));
            }
        }

        Ok(PlanRequest {
            text: self.text,
            image: self.image,
            category: self.category,
        })
    }
}

/// Read the `text`, `image` and `category` fields of the form
///
/// An empty file part (no file chosen) counts as no image.
pub async fn read_multipart(mut payload: Multipart, limit: usize) -> Result<Submission> {
    let mut submission = Submission::default();

    while let Some(field) = payload.next().await {
        let mut field = field
            .map_err(|e| UnstuckError::invalid_input(format!("Malformed form data: {}", e)))?;

        let content_disposition = field.content_disposition();
        let name = content_disposition.get_name().unwrap_or_default().to_string();
        let filename = content_disposition.get_filename().map(|f| f.to_string());

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk
                .map_err(|e| UnstuckError::invalid_input(format!("Malformed form data: {}", e)))?;

            if data.len() + chunk.len() > limit {
                return Err(UnstuckError::payload_too_large(format!(
                    "Upload exceeds the {} byte limit.",
                    limit
                )));
            }
            data.extend_from_slice(&chunk);
        }

        match name.as_str() {
            "text" => submission.text = String::from_utf8_lossy(&data).into_owned(),
            "category" => {
                let category = String::from_utf8_lossy(&data).trim().to_string();
                submission.category = Some(category).filter(|c| !c.is_empty());
            }
            "image" if !data.is_empty() => {
                submission.image = Some(data);
                submission.image_name = filename.filter(|f| !f.is_empty());
            }
            _ => {}
        }
    }

    Ok(submission)
}
