use api::auth::middleware::log_request;
use api::routes::routes;
use axum::{Router, middleware::from_fn};
use migration::{Migrator, StatsMigrator};
use sea_orm_migration::MigratorTrait;
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;
use tracing_appender::rolling;
use util::config::AppConfig;
use util::state::AppState;

#[tokio::main]
async fn main() {
    // Load configuration and initialize logging
    let (log_file, host, port, project_name) = {
        let config = AppConfig::global();
        (
            config.log_file.clone(),
            config.host.clone(),
            config.port,
            config.project_name.clone(),
        )
    };
    let _log_guard = init_logging(&log_file);

    // Connect both stores and bring their schemas up to date. The stats
    // store is a separate database; no transaction ever spans the two.
    let db = db::connect().await;
    let stats_db = db::connect_stats().await;

    Migrator::up(&db, None)
        .await
        .expect("Failed to migrate database");
    StatsMigrator::up(&stats_db, None)
        .await
        .expect("Failed to migrate stats database");

    let app_state = AppState::new(db, stats_db);

    // Configure middleware
    let cors = CorsLayer::very_permissive();

    // Build app router
    let app = Router::new()
        .nest("/api", routes(app_state))
        .fallback(api::routes::not_found)
        .layer(from_fn(log_request))
        .layer(cors);

    // Start server
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .expect("Invalid address");

    println!("Starting {} on http://{}:{}", project_name, host, port);

    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Server crashed");
}

fn init_logging(log_file: &str) -> tracing_appender::non_blocking::WorkerGuard {
    use std::fs;
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    fs::create_dir_all("logs").ok();

    let file_appender = rolling::daily("logs", log_file);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true);

    let log_to_stdout = AppConfig::global().log_to_stdout;

    let stdout_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true)
        .with_target(true)
        .with_thread_ids(true);

    let env_filter =
        EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new("api=info"));

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer);

    if log_to_stdout {
        registry.with(stdout_layer).init();
    } else {
        registry.init();
    }

    guard
}
