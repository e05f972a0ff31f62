//! Life Unstuck HTTP Server
//!
//! Actix-web form and JSON API around the plan pipeline

pub mod html;
pub mod routes;
pub mod state;
pub mod submission;
pub mod types;

use actix_web::{web, App, HttpServer};
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::TracingLogger;
use unstuck_common::{AppConfig, Result};
use unstuck_llm::UnstuckPipeline;

pub use routes::configure;
pub use state::AppState;

/// JSON body limit: base64 inflates by 4/3, plus room for the text
pub fn json_limit(upload_limit_bytes: usize) -> usize {
    upload_limit_bytes / 3 * 4 + 64 * 1024
}

/// Start the HTTP server and block until it stops
pub async fn start_server(config: AppConfig, pipeline: UnstuckPipeline) -> Result<()> {
    let bind_addr = config.server_bind_address();
    let json_limit = json_limit(config.upload_limit_bytes);
    let state = web::Data::new(Arc::new(AppState::new(config, pipeline)));

    info!("Starting HTTP server on {}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(state.clone())
            .app_data(web::JsonConfig::default().limit(json_limit))
            .configure(configure)
    })
    .bind(&bind_addr)?
    .run()
    .await?;

    info!("HTTP server stopped");
    Ok(())
}
