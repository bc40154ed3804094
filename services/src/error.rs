use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Error type shared by all domain services.
///
/// Each variant maps to a stable machine-readable category via [`kind`],
/// which the HTTP layer translates into a status code. The `Display` text is
/// the human-readable message and carries no internal store details for the
/// first three variants.
///
/// [`kind`]: ServiceError::kind
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A referenced entity does not exist.
    #[error("{0}")]
    NotFound(String),

    /// A uniqueness invariant was violated (duplicate enrollment or
    /// duplicate submission).
    #[error("{0}")]
    Conflict(String),

    /// Malformed input (answer-vector length mismatch, bad question shape,
    /// non-positive module order).
    #[error("{0}")]
    Validation(String),

    /// Underlying store failure.
    #[error("Database error: {0}")]
    Db(#[from] DbErr),
}

impl ServiceError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Stable category string, independent of message wording and transport.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::Conflict(_) => "conflict",
            Self::Validation(_) => "validation",
            Self::Db(_) => "internal",
        }
    }

    /// Maps a store error into `Conflict` when it is a unique-constraint
    /// violation, otherwise passes it through as `Db`.
    ///
    /// This is how duplicate enrollments and submissions are detected: the
    /// insert races nothing, the unique index decides.
    pub fn conflict_on_unique(err: DbErr, msg: impl Into<String>) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Self::Conflict(msg.into()),
            _ => Self::Db(err),
        }
    }
}
