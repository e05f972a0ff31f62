use actix_web::{get, web, HttpResponse};

use crate::state::AppState;
use crate::types::HealthResponse;

/// Liveness and configuration status
#[get("/health")]
pub async fn health(state: web::Data<std::sync::Arc<AppState>>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        ai_configured: state.pipeline.client().is_configured(),
    })
}
