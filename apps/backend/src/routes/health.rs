use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::error::AppError;
use crate::state::app_state::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    db: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    migration: Option<String>,
}

/// GET /health
///
/// Reports process liveness, database reachability, and the latest
/// applied migration version.
async fn health(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let Some(db) = state.db.as_ref() else {
        return Ok(HttpResponse::Ok().json(HealthResponse {
            status: "ok",
            db: "unconfigured",
            migration: None,
        }));
    };

    if db.ping().await.is_err() {
        return Ok(HttpResponse::Ok().json(HealthResponse {
            status: "degraded",
            db: "unavailable",
            migration: None,
        }));
    }

    let migration = migration::get_latest_migration_version(db)
        .await
        .unwrap_or(None);

    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        db: "ok",
        migration,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
}
