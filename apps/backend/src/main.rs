use actix_web::{web, App, HttpServer};
use backend::config::app::AppConfig;
use backend::config::db::DbProfile;
use backend::infra::state::build_state;
use backend::middleware::cors::cors_middleware;
use backend::middleware::request_trace::RequestTrace;
use backend::middleware::structured_logger::StructuredLogger;
use backend::middleware::trace_span::TraceSpan;
use backend::routes;
use backend::telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // Docker env_file, or sourced manually for local dev.
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("invalid configuration: {e}");
            std::process::exit(1);
        }
    };
    let host = config.host.clone();
    let port = config.port;

    let app_state = match build_state()
        .with_config(config)
        .with_db(DbProfile::Prod)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            eprintln!("failed to build application state: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(host = %host, port = %port, message = "starting_server");

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
