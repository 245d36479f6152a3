use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The requested row does not exist.
    #[error("entity not found")]
    NotFound,
    /// A uniqueness constraint rejected the write.
    #[error("conflict: {0}")]
    ConflictError(String),
    /// Stored or supplied data violated a domain or foreign key constraint.
    #[error("validation error: {0}")]
    ValidationError(String),
    #[error("database error: {0}")]
    DatabaseError(DieselError),
    #[error("connection error: {0}")]
    ConnectionError(#[from] diesel::r2d2::PoolError),
}

impl From<DieselError> for RepositoryError {
    fn from(value: DieselError) -> Self {
        match value {
            DieselError::NotFound => Self::NotFound,
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                Self::ConflictError(info.message().to_string())
            }
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
                Self::ValidationError(info.message().to_string())
            }
            other => Self::DatabaseError(other),
        }
    }
}

/// Convenient alias for repository results.
pub type RepositoryResult<T> = Result<T, RepositoryError>;
