use crate::domain::types::{
    RecommendationKind, RecommendationRef, RelationCounts, RelationKind, VoteDirection,
};
use crate::domain::user::User;
use crate::dto::recommendations::RecommendationDto;
use crate::forms::comments::RelationFormPayload;
use crate::repository::{BookReader, RelationReader, RelationWriter, VideoReader, WebsiteReader};

use super::recommendations::show_recommendation;
use super::{ServiceError, ServiceResult, ensure_active, ensure_exists};

fn counts<R>(target: RecommendationRef, repo: &R) -> ServiceResult<RelationCounts>
where
    R: RelationReader,
{
    repo.relation_counts(target).map_err(|e| {
        log::error!("Failed to count relations for {target}: {e}");
        ServiceError::Internal
    })
}

fn vote<R>(
    payload: RelationFormPayload,
    direction: VoteDirection,
    user: &User,
    repo: &R,
) -> ServiceResult<RelationCounts>
where
    R: RelationReader + RelationWriter,
{
    ensure_active(user)?;
    ensure_exists(payload.target, repo)?;

    if let Err(e) = repo.cast_vote(payload.target, user.id, direction) {
        log::error!("Failed to record vote on {}: {e}", payload.target);
        return Err(ServiceError::Internal);
    }

    counts(payload.target, repo)
}

/// Upvotes the target, replacing any downvote by the same user.
pub fn upvote<R>(payload: RelationFormPayload, user: &User, repo: &R) -> ServiceResult<RelationCounts>
where
    R: RelationReader + RelationWriter,
{
    vote(payload, VoteDirection::Up, user, repo)
}

/// Downvotes the target, replacing any upvote by the same user.
pub fn downvote<R>(
    payload: RelationFormPayload,
    user: &User,
    repo: &R,
) -> ServiceResult<RelationCounts>
where
    R: RelationReader + RelationWriter,
{
    vote(payload, VoteDirection::Down, user, repo)
}

/// Withdraws whichever vote the user holds on the target.
pub fn clear_vote<R>(
    payload: RelationFormPayload,
    user: &User,
    repo: &R,
) -> ServiceResult<RelationCounts>
where
    R: RelationReader + RelationWriter,
{
    ensure_active(user)?;
    ensure_exists(payload.target, repo)?;

    for kind in [RelationKind::Upvote, RelationKind::Downvote] {
        if let Err(e) = repo.remove_relation(payload.target, user.id, kind) {
            log::error!("Failed to remove {kind} on {}: {e}", payload.target);
            return Err(ServiceError::Internal);
        }
    }

    counts(payload.target, repo)
}

/// Adds or removes the user's bookmark; returns whether it is now set.
pub fn toggle_bookmark<R>(payload: RelationFormPayload, user: &User, repo: &R) -> ServiceResult<bool>
where
    R: RelationReader + RelationWriter,
{
    ensure_active(user)?;
    ensure_exists(payload.target, repo)?;

    let bookmarked = match repo.has_relation(payload.target, user.id, RelationKind::Bookmark) {
        Ok(bookmarked) => bookmarked,
        Err(e) => {
            log::error!("Failed to check bookmark on {}: {e}", payload.target);
            return Err(ServiceError::Internal);
        }
    };

    let result = if bookmarked {
        repo.remove_relation(payload.target, user.id, RelationKind::Bookmark)
    } else {
        repo.add_relation(payload.target, user.id, RelationKind::Bookmark)
    };

    match result {
        Ok(_) => Ok(!bookmarked),
        Err(e) => {
            log::error!("Failed to toggle bookmark on {}: {e}", payload.target);
            Err(ServiceError::Internal)
        }
    }
}

/// The user's bookmarks of one kind, most recently bookmarked first.
pub fn show_bookmarks<R>(
    kind: RecommendationKind,
    user: &User,
    repo: &R,
) -> ServiceResult<Vec<RecommendationDto>>
where
    R: RelationReader + WebsiteReader + BookReader + VideoReader,
{
    let targets = match repo.list_user_relations(user.id, RelationKind::Bookmark, kind) {
        Ok(targets) => targets,
        Err(e) => {
            log::error!("Failed to list bookmarks: {e}");
            return Err(ServiceError::Internal);
        }
    };

    targets
        .into_iter()
        .map(|target| show_recommendation(target, repo))
        .collect()
}
