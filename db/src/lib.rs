pub mod models;
pub mod stats;
pub mod test_utils;

use sea_orm::{Database, DatabaseConnection};
use std::path::Path;
use util::config::AppConfig;

/// Normalizes a configured path into a connection URL SeaORM accepts.
///
/// If it's already a DSN, it is used as-is; otherwise it is treated as a
/// SQLite file path and the parent directory is created (SQLite won't create
/// intermediate dirs). `mode=rwc` lets a first boot create the file before
/// migrations run.
fn connection_url(path_or_url: String) -> String {
    if path_or_url.starts_with("sqlite:")
        || path_or_url.starts_with("postgres://")
        || path_or_url.starts_with("mysql://")
    {
        path_or_url
    } else {
        if let Some(parent) = Path::new(&path_or_url).parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        format!("sqlite://{path_or_url}?mode=rwc")
    }
}

/// Connects to the entity store (`DATABASE_PATH`).
pub async fn connect() -> DatabaseConnection {
    let url = connection_url(AppConfig::global().database_path.clone());
    Database::connect(&url)
        .await
        .expect("Failed to connect to database")
}

/// Connects to the stats store (`STATS_DATABASE_PATH`).
///
/// A separate database from the entity store; callers must not assume a
/// transaction can span both.
pub async fn connect_stats() -> DatabaseConnection {
    let url = connection_url(AppConfig::global().stats_database_path.clone());
    Database::connect(&url)
        .await
        .expect("Failed to connect to stats database")
}
