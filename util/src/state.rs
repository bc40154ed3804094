//! Application state container shared across Axum route handlers and services.
//!
//! Holds both database connections: the entity store (users, courses, quizzes,
//! enrollments, progress, submissions) and the stats store (rolling aggregates).
//! The two are separate databases on purpose; no transaction ever spans both.
//! It is typically wrapped in an `Arc` and passed into route handlers via
//! Axum's `State<T>` extractor.

use sea_orm::DatabaseConnection;

/// Central application state shared across the server.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    stats_db: DatabaseConnection,
}

impl AppState {
    /// Creates a new `AppState` from the two store connections.
    ///
    /// # Arguments
    ///
    /// * `db` - Entity store connection, typically cloned from the main pool.
    /// * `stats_db` - Aggregate store connection.
    pub fn new(db: DatabaseConnection, stats_db: DatabaseConnection) -> Self {
        Self { db, stats_db }
    }

    /// Returns a shared reference to the entity store connection.
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Returns a shared reference to the stats store connection.
    pub fn stats_db(&self) -> &DatabaseConnection {
        &self.stats_db
    }

    /// Returns a cloned copy of the entity store connection.
    ///
    /// Useful for async contexts or spawning tasks that require ownership.
    pub fn db_clone(&self) -> DatabaseConnection {
        self.db.clone()
    }

    /// Returns a cloned copy of the stats store connection.
    pub fn stats_db_clone(&self) -> DatabaseConnection {
        self.stats_db.clone()
    }
}
