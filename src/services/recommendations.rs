use crate::domain::types::{
    CategoryId, RecommendationKind, RecommendationRef, SubCategoryId, UserId,
};
use crate::domain::user::User;
use crate::dto::recommendations::RecommendationDto;
use crate::forms::recommendations::{
    AddBookFormPayload, AddVideoFormPayload, AddWebsiteFormPayload,
};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{
    BookReader, BookWriter, CategoryReader, RecommendationListQuery, SubCategoryReader,
    VideoReader, VideoWriter, WebsiteReader, WebsiteWriter,
};

use super::{ServiceError, ServiceResult, ensure_active, ensure_owner_or_staff, write_error};

/// Checks that both the category and the subcategory exist and that the
/// subcategory is filed under the category.
fn check_placement<R>(
    category_id: CategoryId,
    subcategory_id: SubCategoryId,
    repo: &R,
) -> ServiceResult<()>
where
    R: CategoryReader + SubCategoryReader,
{
    match repo.get_category_by_id(category_id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get category: {e}");
            return Err(ServiceError::Internal);
        }
    }

    match repo.get_subcategory_by_id(subcategory_id) {
        Ok(Some(subcategory)) if subcategory.category_id == category_id => Ok(()),
        Ok(Some(_)) => Err(ServiceError::Form(format!(
            "subcategory {subcategory_id} does not belong to category {category_id}"
        ))),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get subcategory: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn submit_website<R>(
    payload: AddWebsiteFormPayload,
    user: &User,
    repo: &R,
) -> ServiceResult<RecommendationDto>
where
    R: CategoryReader + SubCategoryReader + WebsiteWriter,
{
    ensure_active(user)?;
    check_placement(payload.category_id, payload.subcategory_id, repo)?;

    let website = payload.into_new_website(user.id);
    repo.create_website(&website)
        .map(RecommendationDto::from)
        .map_err(|e| write_error("Failed to create website", e))
}

pub fn submit_book<R>(
    payload: AddBookFormPayload,
    user: &User,
    repo: &R,
) -> ServiceResult<RecommendationDto>
where
    R: CategoryReader + SubCategoryReader + BookWriter,
{
    ensure_active(user)?;
    check_placement(payload.category_id, payload.subcategory_id, repo)?;

    let book = payload.into_new_book(user.id);
    repo.create_book(&book)
        .map(RecommendationDto::from)
        .map_err(|e| write_error("Failed to create book", e))
}

pub fn submit_video<R>(
    payload: AddVideoFormPayload,
    user: &User,
    repo: &R,
) -> ServiceResult<RecommendationDto>
where
    R: CategoryReader + SubCategoryReader + VideoWriter,
{
    ensure_active(user)?;
    check_placement(payload.category_id, payload.subcategory_id, repo)?;

    let video = payload.into_new_video(user.id);
    repo.create_video(&video)
        .map(RecommendationDto::from)
        .map_err(|e| write_error("Failed to create video", e))
}

/// Lists one kind of recommendation, newest first, under a category and
/// optionally a subcategory addressed by slug.
pub fn show_recommendations<R>(
    kind: RecommendationKind,
    category_slug: &str,
    subcategory_slug: Option<&str>,
    page: usize,
    repo: &R,
) -> ServiceResult<Paginated<RecommendationDto>>
where
    R: CategoryReader + SubCategoryReader + WebsiteReader + BookReader + VideoReader,
{
    let page = page.max(1);

    let category = match repo.get_category_by_slug(category_slug) {
        Ok(Some(category)) => category,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get category by slug: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let mut query = RecommendationListQuery::default()
        .category(category.id)
        .paginate(page, DEFAULT_ITEMS_PER_PAGE);

    if let Some(slug) = subcategory_slug {
        match repo.get_subcategory_by_slug(category.id, slug) {
            Ok(Some(subcategory)) => query = query.subcategory(subcategory.id),
            Ok(None) => return Err(ServiceError::NotFound),
            Err(e) => {
                log::error!("Failed to get subcategory by slug: {e}");
                return Err(ServiceError::Internal);
            }
        }
    }

    let listed: Result<(usize, Vec<RecommendationDto>), _> = match kind {
        RecommendationKind::Website => repo
            .list_websites(query)
            .map(|(total, items)| (total, items.into_iter().map(RecommendationDto::from).collect())),
        RecommendationKind::Book => repo
            .list_books(query)
            .map(|(total, items)| (total, items.into_iter().map(RecommendationDto::from).collect())),
        RecommendationKind::Video => repo
            .list_videos(query)
            .map(|(total, items)| (total, items.into_iter().map(RecommendationDto::from).collect())),
    };

    match listed {
        Ok((total, items)) => Ok(Paginated::new(items, page, total, DEFAULT_ITEMS_PER_PAGE)),
        Err(e) => {
            log::error!("Failed to list {kind} recommendations: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Loads a single recommendation of any kind with its relation counts.
pub fn show_recommendation<R>(target: RecommendationRef, repo: &R) -> ServiceResult<RecommendationDto>
where
    R: WebsiteReader + BookReader + VideoReader,
{
    let found = match target {
        RecommendationRef::Website(id) => repo
            .get_website_by_id(id)
            .map(|item| item.map(RecommendationDto::from)),
        RecommendationRef::Book(id) => repo
            .get_book_by_id(id)
            .map(|item| item.map(RecommendationDto::from)),
        RecommendationRef::Video(id) => repo
            .get_video_by_id(id)
            .map(|item| item.map(RecommendationDto::from)),
    };

    match found {
        Ok(Some(item)) => Ok(item),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get {target}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Removes a recommendation; only its submitter or staff may do so.
pub fn delete_recommendation<R>(target: RecommendationRef, user: &User, repo: &R) -> ServiceResult<()>
where
    R: WebsiteReader + WebsiteWriter + BookReader + BookWriter + VideoReader + VideoWriter,
{
    let item = show_recommendation(target, repo)?;
    let author_id = UserId::new(item.author_id).map_err(|e| {
        log::error!("Invalid author id on {target}: {e}");
        ServiceError::Internal
    })?;
    ensure_owner_or_staff(user, author_id)?;

    let deleted = match target {
        RecommendationRef::Website(id) => repo.delete_website(id),
        RecommendationRef::Book(id) => repo.delete_book(id),
        RecommendationRef::Video(id) => repo.delete_video(id),
    };

    match deleted {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to delete {target}: {e}");
            Err(ServiceError::Internal)
        }
    }
}
