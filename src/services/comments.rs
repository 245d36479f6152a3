use crate::domain::types::RecommendationRef;
use crate::domain::user::User;
use crate::dto::comments::CommentDto;
use crate::forms::comments::{AddCommentFormPayload, DeleteCommentFormPayload};
use crate::repository::{CommentReader, CommentWriter, RelationReader};

use super::{
    ServiceError, ServiceResult, ensure_active, ensure_exists, ensure_owner_or_staff, write_error,
};

pub fn add_comment<R>(
    payload: AddCommentFormPayload,
    user: &User,
    repo: &R,
) -> ServiceResult<CommentDto>
where
    R: RelationReader + CommentWriter,
{
    ensure_active(user)?;
    ensure_exists(payload.target, repo)?;

    let comment = payload.into_new_comment(user.id);
    repo.create_comment(&comment)
        .map(CommentDto::from)
        .map_err(|e| write_error("Failed to create comment", e))
}

/// Comments on the target, oldest first.
pub fn show_comments<R>(target: RecommendationRef, repo: &R) -> ServiceResult<Vec<CommentDto>>
where
    R: RelationReader + CommentReader,
{
    ensure_exists(target, repo)?;

    match repo.list_comments(target) {
        Ok(comments) => Ok(comments.into_iter().map(CommentDto::from).collect()),
        Err(e) => {
            log::error!("Failed to list comments on {target}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn delete_comment<R>(
    payload: DeleteCommentFormPayload,
    user: &User,
    repo: &R,
) -> ServiceResult<()>
where
    R: CommentReader + CommentWriter,
{
    let comment = match repo.get_comment(payload.kind, payload.comment_id) {
        Ok(Some(comment)) => comment,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get comment: {e}");
            return Err(ServiceError::Internal);
        }
    };

    ensure_owner_or_staff(user, comment.author_id)?;

    match repo.delete_comment(payload.kind, payload.comment_id) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to delete comment: {e}");
            Err(ServiceError::Internal)
        }
    }
}
