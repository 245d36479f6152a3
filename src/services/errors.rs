use thiserror::Error;

/// Generic error type used by service layer functions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// The user is not allowed to perform the operation.
    #[error("unauthorized")]
    Unauthorized,
    /// Requested resource was not found.
    #[error("not found")]
    NotFound,
    /// The write would duplicate an existing record.
    #[error("conflict: {0}")]
    Conflict(String),
    /// Submitted form data failed validation.
    #[error("form error: {0}")]
    Form(String),
    /// A value violated a domain type constraint.
    #[error("type constraint: {0}")]
    TypeConstraint(String),
    /// An unexpected internal error occurred.
    #[error("internal error")]
    Internal,
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
