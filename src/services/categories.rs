use crate::domain::user::User;
use crate::dto::categories::{CategoryDto, SubCategoryDto};
use crate::forms::categories::{
    AddCategoryFormPayload, AddSubCategoryFormPayload, DeleteCategoryFormPayload,
    DeleteSubCategoryFormPayload, UpdateCategoryFormPayload, UpdateSubCategoryFormPayload,
};
use crate::repository::{
    CategoryListQuery, CategoryReader, CategoryWriter, SubCategoryListQuery, SubCategoryReader,
    SubCategoryWriter,
};

use super::{ServiceError, ServiceResult, ensure_staff, write_error};

/// Lists every category ordered by name.
pub fn show_categories<R>(repo: &R) -> ServiceResult<Vec<CategoryDto>>
where
    R: CategoryReader,
{
    match repo.list_categories(CategoryListQuery::default()) {
        Ok((_total, categories)) => Ok(categories.into_iter().map(CategoryDto::from).collect()),
        Err(e) => {
            log::error!("Failed to list categories: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Resolves a category by slug and lists its subcategories.
pub fn show_subcategories<R>(
    category_slug: &str,
    repo: &R,
) -> ServiceResult<(CategoryDto, Vec<SubCategoryDto>)>
where
    R: CategoryReader + SubCategoryReader,
{
    let category = match repo.get_category_by_slug(category_slug) {
        Ok(Some(category)) => category,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get category by slug: {e}");
            return Err(ServiceError::Internal);
        }
    };

    match repo.list_subcategories(SubCategoryListQuery::new(category.id)) {
        Ok((_total, subcategories)) => Ok((
            CategoryDto::from(category),
            subcategories.into_iter().map(SubCategoryDto::from).collect(),
        )),
        Err(e) => {
            log::error!("Failed to list subcategories: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn add_category<R>(
    payload: AddCategoryFormPayload,
    user: &User,
    repo: &R,
) -> ServiceResult<CategoryDto>
where
    R: CategoryWriter,
{
    ensure_staff(user)?;

    let category = payload.into_new_category();
    repo.create_category(&category)
        .map(CategoryDto::from)
        .map_err(|e| write_error("Failed to create category", e))
}

/// Renames a category; the slug follows the new name.
pub fn update_category<R>(
    payload: UpdateCategoryFormPayload,
    user: &User,
    repo: &R,
) -> ServiceResult<()>
where
    R: CategoryReader + CategoryWriter,
{
    ensure_staff(user)?;

    match repo.get_category_by_id(payload.category_id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get category: {e}");
            return Err(ServiceError::Internal);
        }
    }

    repo.update_category(payload.category_id, &payload.to_new_category())
        .map(|_| ())
        .map_err(|e| write_error("Failed to update category", e))
}

/// Deletes a category along with its subcategories and recommendations.
pub fn delete_category<R>(
    payload: DeleteCategoryFormPayload,
    user: &User,
    repo: &R,
) -> ServiceResult<()>
where
    R: CategoryReader + CategoryWriter,
{
    ensure_staff(user)?;

    match repo.get_category_by_id(payload.category_id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get category: {e}");
            return Err(ServiceError::Internal);
        }
    }

    match repo.delete_category(payload.category_id) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to delete category: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn add_subcategory<R>(
    payload: AddSubCategoryFormPayload,
    user: &User,
    repo: &R,
) -> ServiceResult<SubCategoryDto>
where
    R: CategoryReader + SubCategoryWriter,
{
    ensure_staff(user)?;

    match repo.get_category_by_id(payload.category_id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get category: {e}");
            return Err(ServiceError::Internal);
        }
    }

    let subcategory = payload.into_new_subcategory();
    repo.create_subcategory(&subcategory)
        .map(SubCategoryDto::from)
        .map_err(|e| write_error("Failed to create subcategory", e))
}

pub fn update_subcategory<R>(
    payload: UpdateSubCategoryFormPayload,
    user: &User,
    repo: &R,
) -> ServiceResult<()>
where
    R: SubCategoryReader + SubCategoryWriter,
{
    ensure_staff(user)?;

    match repo.get_subcategory_by_id(payload.subcategory_id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get subcategory: {e}");
            return Err(ServiceError::Internal);
        }
    }

    repo.update_subcategory(payload.subcategory_id, &payload.to_update())
        .map(|_| ())
        .map_err(|e| write_error("Failed to update subcategory", e))
}

pub fn delete_subcategory<R>(
    payload: DeleteSubCategoryFormPayload,
    user: &User,
    repo: &R,
) -> ServiceResult<()>
where
    R: SubCategoryReader + SubCategoryWriter,
{
    ensure_staff(user)?;

    match repo.get_subcategory_by_id(payload.subcategory_id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get subcategory: {e}");
            return Err(ServiceError::Internal);
        }
    }

    match repo.delete_subcategory(payload.subcategory_id) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to delete subcategory: {e}");
            Err(ServiceError::Internal)
        }
    }
}
