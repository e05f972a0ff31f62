use actix_web::{post, web, HttpResponse};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use tracing::info;
use unstuck_common::UnstuckError;

use crate::state::AppState;
use crate::submission::Submission;
use crate::types::{ApiError, PlanApiRequest, PlanApiResponse};

/// JSON entry point: `{text, image_base64?}` -> `{answer}`
#[post("/api/plan")]
pub async fn plan(
    req: web::Json<PlanApiRequest>,
    state: web::Data<std::sync::Arc<AppState>>,
) -> Result<HttpResponse, ApiError> {
    let req = req.into_inner();

    let image = match req.image_base64.as_deref().map(str::trim) {
        Some(encoded) if !encoded.is_empty() => {
            let bytes = BASE64
                .decode(encoded)
                .map_err(|e| UnstuckError::invalid_input(format!("Invalid base64 image: {}", e)))?;

            if bytes.len() > state.config.upload_limit_bytes {
                return Err(UnstuckError::payload_too_large(format!(
                    "Upload exceeds the {} byte limit.",
                    state.config.upload_limit_bytes
                ))
                .into());
            }
            Some(bytes)
        }
        _ => None,
    };

    let request = Submission {
        text: req.text,
        image,
        image_name: None,
        category: req.category,
    }
    .into_request()?;

    info!(
        "API plan request - Text length: {}, Image: {}",
        request.text.len(),
        request.image.is_some()
    );

    let answer = state.pipeline.run_request(&request).await;

    Ok(HttpResponse::Ok().json(PlanApiResponse { answer }))
}
