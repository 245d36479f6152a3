//! Business logic behind the site's user-facing operations.
//!
//! Services take already validated form payloads, check what the acting
//! [`User`] may do, and translate repository failures into
//! [`ServiceError`] values so that callers stay thin.

use crate::domain::types::{RecommendationRef, UserId};
use crate::domain::user::User;
use crate::repository::{RelationReader, RepositoryError};

pub use errors::{ServiceError, ServiceResult};

pub mod categories;
pub mod comments;
pub mod errors;
pub mod recommendations;
pub mod votes;

/// Inactive accounts may only read.
fn ensure_active(user: &User) -> ServiceResult<()> {
    if user.is_active {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}

fn ensure_staff(user: &User) -> ServiceResult<()> {
    ensure_active(user)?;
    if user.is_staff {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}

/// Authors may manage their own content; staff may manage anyone's.
fn ensure_owner_or_staff(user: &User, owner: UserId) -> ServiceResult<()> {
    ensure_active(user)?;
    if user.is_staff || user.id == owner {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}

/// Maps a failed write; uniqueness conflicts stay visible to the caller.
fn write_error(context: &str, err: RepositoryError) -> ServiceError {
    match err {
        RepositoryError::ConflictError(message) => ServiceError::Conflict(message),
        RepositoryError::NotFound => ServiceError::NotFound,
        other => {
            log::error!("{context}: {other}");
            ServiceError::Internal
        }
    }
}

/// Fails with `NotFound` unless the addressed recommendation exists.
fn ensure_exists<R>(target: RecommendationRef, repo: &R) -> ServiceResult<()>
where
    R: RelationReader,
{
    match repo.recommendation_exists(target) {
        Ok(true) => Ok(()),
        Ok(false) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to check {target}: {e}");
            Err(ServiceError::Internal)
        }
    }
}
