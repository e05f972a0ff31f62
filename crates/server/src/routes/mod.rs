use actix_web::web;

pub mod form;
pub mod plan;
pub mod system;

/// Register all routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(form::index)
        .service(form::help)
        .service(plan::plan)
        .service(system::health);
}
