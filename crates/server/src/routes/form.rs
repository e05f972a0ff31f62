use actix_multipart::Multipart;
use actix_web::{get, http::header::ContentType, post, web, HttpResponse};
use tracing::{info, warn};

use crate::html::{answer_page, index_page, warning_page};
use crate::state::AppState;
use crate::submission::read_multipart;
use crate::types::ApiError;

/// Render the empty form
#[get("/")]
pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(index_page())
}

/// Handle a form submission and render the answer
#[post("/help")]
pub async fn help(
    payload: Multipart,
    state: web::Data<std::sync::Arc<AppState>>,
) -> HttpResponse {
    let request = match read_multipart(payload, state.config.upload_limit_bytes)
        .await
        .and_then(|submission| submission.into_request())
    {
        Ok(request) => request,
        Err(e) => {
            warn!("Rejected form submission: {}", e);
            let err = ApiError::from(e);
            return HttpResponse::build(actix_web::ResponseError::status_code(&err))
                .content_type(ContentType::html())
                .body(warning_page(&err.message()));
        }
    };

    info!(
        "Form submission - Text length: {}, Image: {}",
        request.text.len(),
        request.image.is_some()
    );

    let answer = state.pipeline.run_request(&request).await;

    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(answer_page(&request.text, &answer))
}
