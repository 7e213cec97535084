use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23505")
        )
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23503")
        )
    }
}

/// Failures of the schedule computations (standings and matchweek windows).
///
/// All of them are recoverable by the caller: render an empty state, re-derive
/// the current matchweek, or refetch the schedule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("Cannot compute standings without a schedule")]
    MissingSchedule,

    #[error("Schedule has no matchweeks")]
    EmptySchedule,

    #[error("Matchweek not found: {0}")]
    MatchweekNotFound(String),

    #[error("Invalid result for match {match_id}: {reason}")]
    InvalidMatchResult { match_id: String, reason: String },
}
