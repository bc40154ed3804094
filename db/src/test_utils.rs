use migration::{Migrator, StatsMigrator};
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

/// In-memory entity store with all migrations applied.
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory db");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// In-memory stats store with all migrations applied.
pub async fn setup_test_stats_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory stats db");

    StatsMigrator::up(&db, None)
        .await
        .expect("Failed to run stats migrations");

    db
}

/// File-backed entity store for tests that overlap writes. Every pooled
/// connection sees the same database, which `sqlite::memory:` does not
/// guarantee.
pub async fn setup_test_db_at(path: &std::path::Path) -> DatabaseConnection {
    let db = Database::connect(format!("sqlite://{}?mode=rwc", path.display()))
        .await
        .expect("Failed to connect to file-backed db");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// File-backed stats store, same contract as [`setup_test_db_at`].
pub async fn setup_test_stats_db_at(path: &std::path::Path) -> DatabaseConnection {
    let db = Database::connect(format!("sqlite://{}?mode=rwc", path.display()))
        .await
        .expect("Failed to connect to file-backed stats db");

    StatsMigrator::up(&db, None)
        .await
        .expect("Failed to run stats migrations");

    db
}
