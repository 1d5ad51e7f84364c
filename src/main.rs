use actix_cors::Cors;
use actix_multipart::form::MultipartFormConfig;
use actix_web::{middleware::NormalizePath, web, App, HttpServer};
use tracing_actix_web::TracingLogger;

use findnaukari_backend::{
    db::postgres::create_pool, graceful_shutdown::shutdown_signal,
    middlewares::auth::AuthMiddleware, routes::configure_routes, settings::AppConfig, AppState,
};

// Transport-level multipart cap. The domain enforces its own 5MB limit
// with a proper error body, so this only needs to be comfortably above it.
const MULTIPART_LIMIT_BYTES: usize = 10 * 1024 * 1024;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt::init();

    let config = match AppConfig::new() {
        Ok(cfg) => {
            tracing::info!("Loaded configuration: {:?}", cfg);
            cfg
        }
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let pool = create_pool(&config.database_url)
        .await
        .expect("Failed to create database connection pool");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    let app_state = web::Data::new(AppState::new(&config, pool));

    let server_addr = format!("{}:{}", config.host, config.port);
    tracing::info!(
        "Starting {} v{} on {}",
        config.name,
        env!("CARGO_PKG_VERSION"),
        server_addr
    );

    let cors_origins = config.cors_origins();
    let worker_count = config.worker_count;

    let server = HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE", "OPTIONS"])
            .allow_any_header()
            .supports_credentials()
            .max_age(3600);

        if cors_origins.iter().any(|o| o == "*") {
            cors = cors.allow_any_origin();
        } else {
            for origin in &cors_origins {
                cors = cors.allowed_origin(origin);
            }
        }

        App::new()
            .app_data(app_state.clone())
            .app_data(
                MultipartFormConfig::default()
                    .total_limit(MULTIPART_LIMIT_BYTES)
                    .memory_limit(MULTIPART_LIMIT_BYTES),
            )
            .wrap(TracingLogger::default())
            .wrap(cors)
            .wrap(NormalizePath::trim())
            .wrap(AuthMiddleware)
            .configure(configure_routes)
    })
    .workers(worker_count)
    .bind(server_addr)?
    .run();

    tokio::select! {
        res = server => res,
        _ = shutdown_signal() => Ok(()),
    }
}
