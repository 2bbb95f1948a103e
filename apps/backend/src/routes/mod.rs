use actix_web::web;

pub mod health;
pub mod sessions;

/// Configure application routes for tests and non-HttpServer contexts.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes)
        .configure(sessions::configure_routes);
}
